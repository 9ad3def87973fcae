// types.rs — Role and grantee-type enums plus their normalizers.
//
// Callers pass roles and grantee types either as the enum or as a loose
// string ("Writer", "EVERYONE"). `to_role` / `to_grantee_type` fold both
// into the enum and reject anything else before a request is built.
//
// On the wire both enums use the service's SCREAMING_SNAKE_CASE names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PermissionError, Result};

/// Access level granted by a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Role {
    /// Full control, including deleting the resource and managing grants.
    Owner,
    /// Read and modify the resource.
    Writer,
    /// Read-only access.
    Reader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Writer => "writer",
            Role::Reader => "reader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "writer" => Ok(Role::Writer),
            "reader" => Ok(Role::Reader),
            _ => Err(PermissionError::InvalidRole(s.to_string())),
        }
    }
}

/// Who a permission is granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GranteeType {
    /// A single user, identified by email address.
    User,
    /// A group, identified by its email address.
    Group,
    /// Anyone. Carries no email address.
    Everyone,
}

impl GranteeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GranteeType::User => "user",
            GranteeType::Group => "group",
            GranteeType::Everyone => "everyone",
        }
    }

    /// Whether a grant to this grantee must name an email address.
    pub fn requires_email(&self) -> bool {
        !matches!(self, GranteeType::Everyone)
    }
}

impl fmt::Display for GranteeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GranteeType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(GranteeType::User),
            "group" => Ok(GranteeType::Group),
            "everyone" => Ok(GranteeType::Everyone),
            _ => Err(PermissionError::InvalidGranteeType(s.to_string())),
        }
    }
}

/// Values accepted wherever a [`Role`] is expected.
pub trait IntoRole {
    fn into_role(self) -> Result<Role>;
}

impl IntoRole for Role {
    fn into_role(self) -> Result<Role> {
        Ok(self)
    }
}

impl IntoRole for &str {
    fn into_role(self) -> Result<Role> {
        self.parse()
    }
}

impl IntoRole for String {
    fn into_role(self) -> Result<Role> {
        self.parse()
    }
}

impl IntoRole for &String {
    fn into_role(self) -> Result<Role> {
        self.parse()
    }
}

/// Values accepted wherever a [`GranteeType`] is expected.
pub trait IntoGranteeType {
    fn into_grantee_type(self) -> Result<GranteeType>;
}

impl IntoGranteeType for GranteeType {
    fn into_grantee_type(self) -> Result<GranteeType> {
        Ok(self)
    }
}

impl IntoGranteeType for &str {
    fn into_grantee_type(self) -> Result<GranteeType> {
        self.parse()
    }
}

impl IntoGranteeType for String {
    fn into_grantee_type(self) -> Result<GranteeType> {
        self.parse()
    }
}

impl IntoGranteeType for &String {
    fn into_grantee_type(self) -> Result<GranteeType> {
        self.parse()
    }
}

/// Normalize a role given as an enum or a case-insensitive string.
pub fn to_role(value: impl IntoRole) -> Result<Role> {
    value.into_role()
}

/// Normalize a grantee type given as an enum or a case-insensitive string.
pub fn to_grantee_type(value: impl IntoGranteeType) -> Result<GranteeType> {
    value.into_grantee_type()
}
