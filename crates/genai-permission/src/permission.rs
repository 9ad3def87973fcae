// permission.rs — Permission: one access grant on a corpus or tuned model.
//
// A Permission is a typed wrapper around the service's record plus the
// client handle used to change it. Construction rules:
//
// - `create` normalizes role/grantee and checks the email rule before any
//   request is sent: User and Group grants need an email, Everyone must not
//   have one.
// - Entities built from service responses (`get`, `list`, update results)
//   take the record as-is; the service is authoritative.
//
// Only `role` can be changed in place. `grantee_type` and `email_address`
// identify who the grant is for, so changing them means delete + create.

use std::collections::BTreeMap;
use std::fmt;

use crate::client::PermissionClient;
use crate::error::{PermissionError, Result};
use crate::names::{PermissionName, ResourceRef};
use crate::service::{
    CreatePermissionRequest, DeletePermissionRequest, GetPermissionRequest, PermissionRecord,
    UpdatePermissionRequest,
};
use crate::types::{to_grantee_type, to_role, GranteeType, IntoGranteeType, IntoRole, Role};

/// Fields that identify the grantee and cannot be updated.
const RESTRICTED_FIELDS: &[&str] = &[
    "name",
    "grantee_type",
    "granteeType",
    "email_address",
    "emailAddress",
];

#[derive(Clone)]
pub struct Permission {
    name: PermissionName,
    role: Role,
    grantee_type: GranteeType,
    email_address: Option<String>,
    client: PermissionClient,
}

impl Permission {
    /// Wrap a record returned by the service.
    pub fn from_record(record: PermissionRecord, client: PermissionClient) -> Result<Self> {
        Ok(Self {
            name: PermissionName::parse(&record.name)?,
            role: record.role,
            grantee_type: record.grantee_type,
            email_address: record.email_address,
            client,
        })
    }

    /// Grant `role` on `owner` to the given grantee.
    ///
    /// An empty `email_address` counts as absent.
    pub fn create(
        client: &PermissionClient,
        owner: &ResourceRef,
        role: impl IntoRole,
        grantee_type: impl IntoGranteeType,
        email_address: Option<&str>,
    ) -> Result<Self> {
        let role = to_role(role)?;
        let grantee_type = to_grantee_type(grantee_type)?;
        let email_address = email_address.filter(|email| !email.is_empty());

        match (grantee_type.requires_email(), email_address) {
            (false, Some(_)) => {
                return Err(PermissionError::EmailGranteeMismatch {
                    grantee_type,
                    expectation: "not be set",
                })
            }
            (true, None) => {
                return Err(PermissionError::EmailGranteeMismatch {
                    grantee_type,
                    expectation: "be set",
                })
            }
            _ => {}
        }

        let request = CreatePermissionRequest {
            parent: owner.name(),
            permission: PermissionRecord {
                name: String::new(),
                role,
                grantee_type,
                email_address: email_address.map(str::to_string),
            },
        };

        tracing::debug!(
            "Permission: creating {} grant for {} on {}",
            role,
            grantee_type,
            owner
        );
        let record = client
            .service()
            .create_permission(request, client.options())?;
        let permission = Self::from_record(record, client.clone())?;
        tracing::info!("Permission: created {}", permission.name);
        Ok(permission)
    }

    /// Fetch a permission by its resolved name.
    pub fn get(client: &PermissionClient, name: &PermissionName) -> Result<Self> {
        tracing::debug!("Permission: fetching {}", name);
        let record = client.service().get_permission(
            GetPermissionRequest {
                name: name.to_string(),
            },
            client.options(),
        )?;
        Self::from_record(record, client.clone())
    }

    pub fn name(&self) -> &PermissionName {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn grantee_type(&self) -> GranteeType {
        self.grantee_type
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    /// The owning corpus or tuned model.
    pub fn resource(&self) -> &ResourceRef {
        self.name.resource()
    }

    pub fn to_record(&self) -> PermissionRecord {
        PermissionRecord {
            name: self.name.to_string(),
            role: self.role,
            grantee_type: self.grantee_type,
            email_address: self.email_address.clone(),
        }
    }

    /// Apply `update` on the service and refresh this entity from the response.
    ///
    /// The whole update is validated before the request goes out. Returns the
    /// refreshed entity; the service's values win over the requested ones.
    pub fn update(&mut self, update: &PermissionUpdate) -> Result<Permission> {
        let mut record = self.to_record();
        let update_mask = update.apply_to(&mut record)?;

        tracing::debug!(
            "Permission: updating {} ({})",
            self.name,
            update_mask.join(",")
        );
        let response = self.client.service().update_permission(
            UpdatePermissionRequest {
                permission: record,
                update_mask,
            },
            self.client.options(),
        )?;

        let refreshed = Self::from_record(response, self.client.clone())?;
        *self = refreshed.clone();
        tracing::info!("Permission: updated {} (role {})", self.name, self.role);
        Ok(refreshed)
    }

    /// Delete this permission on the service. The entity is consumed.
    pub fn delete(self) -> Result<()> {
        tracing::debug!("Permission: deleting {}", self.name);
        self.client.service().delete_permission(
            DeletePermissionRequest {
                name: self.name.to_string(),
            },
            self.client.options(),
        )?;
        tracing::info!("Permission: deleted {}", self.name);
        Ok(())
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.role == other.role
            && self.grantee_type == other.grantee_type
            && self.email_address == other.email_address
    }
}

impl Eq for Permission {}

impl fmt::Debug for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permission")
            .field("name", &self.name.to_string())
            .field("role", &self.role)
            .field("grantee_type", &self.grantee_type)
            .field("email_address", &self.email_address)
            .finish()
    }
}

/// A value in a [`PermissionUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Role(Role),
    GranteeType(GranteeType),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Role> for FieldValue {
    fn from(value: Role) -> Self {
        FieldValue::Role(value)
    }
}

impl From<GranteeType> for FieldValue {
    fn from(value: GranteeType) -> Self {
        FieldValue::GranteeType(value)
    }
}

/// Field name → new value, as passed to [`Permission::update`].
#[derive(Debug, Clone, Default)]
pub struct PermissionUpdate {
    fields: BTreeMap<String, FieldValue>,
}

impl PermissionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for an update that only changes the role.
    pub fn role(role: impl Into<FieldValue>) -> Self {
        Self::new().set("role", role)
    }

    /// Set `field` to `value`. A later call for the same field wins.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate every field, write the new values into `record`, and return
    /// the update mask.
    fn apply_to(&self, record: &mut PermissionRecord) -> Result<Vec<String>> {
        if self.fields.is_empty() {
            return Err(PermissionError::EmptyUpdate);
        }

        if let Some(field) = self
            .fields
            .keys()
            .find(|field| RESTRICTED_FIELDS.contains(&field.as_str()))
        {
            return Err(PermissionError::RestrictedField {
                field: field.clone(),
            });
        }

        let mut mask = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            match field.as_str() {
                "role" => {
                    record.role = match value {
                        FieldValue::Role(role) => *role,
                        FieldValue::Text(text) => to_role(text)?,
                        FieldValue::GranteeType(grantee) => {
                            return Err(PermissionError::InvalidFieldValue {
                                field: field.clone(),
                                reason: format!("expected a role, got grantee type {}", grantee),
                            })
                        }
                    };
                    mask.push("role".to_string());
                }
                _ => return Err(PermissionError::UnknownField(field.clone())),
            }
        }
        Ok(mask)
    }
}

impl<K, V> FromIterator<(K, V)> for PermissionUpdate
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |update, (field, value)| update.set(field, value))
    }
}
