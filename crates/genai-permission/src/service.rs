// service.rs — The RPC contract consumed by the permission API.
//
// `PermissionService` is the seam between this crate and whatever actually
// talks to the generative-AI service (an HTTP/gRPC transport, the local
// file-backed store, or a test double). Requests and responses are plain
// serde records in the service's JSON mapping (camelCase fields,
// SCREAMING_SNAKE_CASE enum values).
//
// Implementations own retries and timeouts. `RequestOptions` is forwarded to
// them unchanged on every call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::types::{GranteeType, Role};

/// Per-call options forwarded verbatim to the service implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Upper bound on a single call, if any.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// A permission as the service represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    /// Canonical name. Empty in create requests; the service assigns it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub role: Role,
    pub grantee_type: GranteeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionRequest {
    /// Owner resource, e.g. `corpora/demo-corpus`.
    pub parent: String,
    pub permission: PermissionRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPermissionRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPermissionsRequest {
    pub parent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPermissionsResponse {
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
    /// Present when more pages remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionRequest {
    /// Carries the name of the permission and the new field values.
    pub permission: PermissionRecord,
    /// Field paths the service may change (e.g. `["role"]`).
    pub update_mask: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePermissionRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipRequest {
    /// The tuned model changing hands, e.g. `tunedModels/my-model`.
    pub name: String,
    pub email_address: String,
}

/// Acknowledgment of an ownership transfer. The service returns no fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOwnershipResponse {}

/// Request/response operations on permissions.
///
/// Each method makes at most one call and blocks until it completes.
/// `Send + Sync` so one handle can be shared behind an `Arc`.
pub trait PermissionService: Send + Sync {
    fn create_permission(
        &self,
        request: CreatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError>;

    fn get_permission(
        &self,
        request: GetPermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError>;

    fn list_permissions(
        &self,
        request: ListPermissionsRequest,
        options: &RequestOptions,
    ) -> Result<ListPermissionsResponse, ServiceError>;

    fn update_permission(
        &self,
        request: UpdatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError>;

    fn delete_permission(
        &self,
        request: DeletePermissionRequest,
        options: &RequestOptions,
    ) -> Result<(), ServiceError>;

    fn transfer_ownership(
        &self,
        request: TransferOwnershipRequest,
        options: &RequestOptions,
    ) -> Result<TransferOwnershipResponse, ServiceError>;
}
