// error.rs — Error types for the permission subsystem.
//
// Local validation failures (name shape, email/grantee mismatch, restricted
// fields, unknown enum strings) are raised before any request leaves the
// process. Everything the service reports arrives as a `ServiceError` and is
// passed through untouched.

use std::path::PathBuf;

use thiserror::Error;

use crate::names::ResourceType;
use crate::types::GranteeType;

pub type Result<T> = std::result::Result<T, PermissionError>;

/// Coarse classification of a [`PermissionError`], for callers that only
/// care about which family of failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or ambiguous resource-name input.
    IdentityFormat,
    /// Email/grantee mismatch at create time or a bad update request.
    InvariantViolation,
    /// Operation not available for this resource type.
    UnsupportedOperation,
    /// Unrecognized role or grantee-type string.
    EnumNormalization,
    /// Reported by the service or transport.
    Service,
}

/// Errors returned by the permission API.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// A permission or resource name does not match the canonical grammar.
    #[error("invalid permission name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Not enough input was supplied to identify a permission.
    #[error("cannot resolve permission identity: {0}")]
    MissingIdentity(String),

    /// The resource-type hint is not one of the recognized collections.
    #[error("unsupported resource type '{0}': expected 'corpora' or 'tunedModels'")]
    UnsupportedResourceType(String),

    /// Email address supplied (or omitted) against the grantee type.
    #[error("email_address must {expectation} when grantee_type is {grantee_type}")]
    EmailGranteeMismatch {
        grantee_type: GranteeType,
        expectation: &'static str,
    },

    /// The field identifies the grantee and cannot be changed in place.
    #[error("field '{field}' cannot be updated; delete the permission and create a new one")]
    RestrictedField { field: String },

    /// The update names a field the permission does not have.
    #[error("unknown permission field '{0}'")]
    UnknownField(String),

    /// The update contains no fields.
    #[error("update must set at least one field")]
    EmptyUpdate,

    /// The value supplied for a field has the wrong shape.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },

    /// The operation is not offered for this kind of resource.
    #[error("{operation} is not supported for {resource_type}")]
    Unsupported {
        operation: &'static str,
        resource_type: ResourceType,
    },

    #[error("invalid role '{0}': expected one of owner, writer, reader")]
    InvalidRole(String),

    #[error("invalid grantee type '{0}': expected one of user, group, everyone")]
    InvalidGranteeType(String),

    /// The service rejected the request or could not be reached.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}

impl PermissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PermissionError::InvalidName { .. }
            | PermissionError::MissingIdentity(_)
            | PermissionError::UnsupportedResourceType(_) => ErrorKind::IdentityFormat,
            PermissionError::EmailGranteeMismatch { .. }
            | PermissionError::RestrictedField { .. }
            | PermissionError::UnknownField(_)
            | PermissionError::EmptyUpdate
            | PermissionError::InvalidFieldValue { .. } => ErrorKind::InvariantViolation,
            PermissionError::Unsupported { .. } => ErrorKind::UnsupportedOperation,
            PermissionError::InvalidRole(_) | PermissionError::InvalidGranteeType(_) => {
                ErrorKind::EnumNormalization
            }
            PermissionError::Service(_) => ErrorKind::Service,
        }
    }

    /// Shorthand for building an [`PermissionError::InvalidName`].
    pub(crate) fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PermissionError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by a [`PermissionService`](crate::service::PermissionService)
/// implementation. The variants follow the service's status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors loading a [`ClientConfig`](crate::config::ClientConfig) file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
