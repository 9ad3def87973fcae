// service.rs — LocalPermissionService: a file-backed PermissionService.
//
// Emulates the permission endpoints of the generative-AI service against a
// single JSON file so the SDK can run end-to-end without a network:
//
//   { "next_id": 3, "permissions": [ { "name": ..., "role": ..., ... } ] }
//
// Behaviour follows the remote service where it is observable:
// - ids are assigned from a counter and never reused
// - unknown names → NotFound; duplicate grants → AlreadyExists
// - list pages default to 50 records (max 1000); the page token is an offset
// - only `role` may appear in an update mask
// - ownership transfer is tuned-model only; current owners drop to writer
//
// Every mutation is applied to a copy of the state, written to a temp file,
// renamed over the store, and only then committed in memory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use genai_permission::service::{
    CreatePermissionRequest, DeletePermissionRequest, GetPermissionRequest,
    ListPermissionsRequest, ListPermissionsResponse, TransferOwnershipRequest,
    TransferOwnershipResponse, UpdatePermissionRequest,
};
use genai_permission::{
    GranteeType, PermissionName, PermissionRecord, PermissionService, RequestOptions,
    ResourceRef, ResourceType, Role, ServiceError,
};

use crate::error::LocalStoreError;

/// Page size used when a list request does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page a list request may ask for; larger values are clamped.
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreState {
    next_id: u64,
    #[serde(default)]
    permissions: Vec<PermissionRecord>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            permissions: Vec::new(),
        }
    }
}

impl StoreState {
    fn position(&self, name: &str) -> Result<usize, ServiceError> {
        self.permissions
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }

    fn under<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a PermissionRecord> + 'a {
        self.permissions
            .iter()
            .filter(move |p| parent_of(&p.name) == Some(parent))
    }
}

/// `corpora/x/permissions/1` → `corpora/x`.
fn parent_of(name: &str) -> Option<&str> {
    name.rsplit_once("/permissions/").map(|(parent, _)| parent)
}

pub struct LocalPermissionService {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl LocalPermissionService {
    /// Open the store at `path`, creating an empty one if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocalStoreError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|source| LocalStoreError::IoError {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&json)?
        } else {
            StoreState::default()
        };
        tracing::debug!("LocalPermissionService: opened {}", path.display());
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against a copy of the state; persist and commit if it succeeds.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut guard = self.lock();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, state: &StoreState) -> Result<(), LocalStoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| LocalStoreError::IoError {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&tmp, json).map_err(|source| LocalStoreError::IoError {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| LocalStoreError::IoError {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn parse_parent(parent: &str) -> Result<ResourceRef, ServiceError> {
    ResourceRef::parse(parent).map_err(|e| ServiceError::InvalidArgument(e.to_string()))
}

fn parse_name(name: &str) -> Result<PermissionName, ServiceError> {
    PermissionName::parse(name).map_err(|e| ServiceError::InvalidArgument(e.to_string()))
}

fn log_call(operation: &str, target: &str, options: &RequestOptions) {
    tracing::debug!(
        "LocalPermissionService: {} {} (timeout {:?})",
        operation,
        target,
        options.timeout
    );
}

impl PermissionService for LocalPermissionService {
    fn create_permission(
        &self,
        request: CreatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        log_call("create", &request.parent, options);
        let parent = parse_parent(&request.parent)?;
        let permission = request.permission;

        let has_email = permission
            .email_address
            .as_deref()
            .is_some_and(|e| !e.is_empty());
        if has_email != permission.grantee_type.requires_email() {
            return Err(ServiceError::InvalidArgument(format!(
                "email_address does not match grantee_type {}",
                permission.grantee_type
            )));
        }

        self.mutate(|state| {
            let parent_name = parent.name();
            let duplicate = state.under(&parent_name).any(|p| {
                p.grantee_type == permission.grantee_type
                    && p.email_address == permission.email_address
            });
            if duplicate {
                return Err(ServiceError::AlreadyExists(format!(
                    "{} already has a grant for {} {}",
                    parent_name,
                    permission.grantee_type,
                    permission.email_address.as_deref().unwrap_or("")
                )));
            }

            let record = PermissionRecord {
                name: format!("{}/permissions/{}", parent_name, state.next_id),
                ..permission
            };
            state.next_id += 1;
            state.permissions.push(record.clone());
            Ok(record)
        })
    }

    fn get_permission(
        &self,
        request: GetPermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        log_call("get", &request.name, options);
        parse_name(&request.name)?;
        let state = self.lock();
        let index = state.position(&request.name)?;
        Ok(state.permissions[index].clone())
    }

    fn list_permissions(
        &self,
        request: ListPermissionsRequest,
        options: &RequestOptions,
    ) -> Result<ListPermissionsResponse, ServiceError> {
        log_call("list", &request.parent, options);
        let parent = parse_parent(&request.parent)?.name();

        let page_size = match request.page_size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => (size as usize).min(MAX_PAGE_SIZE),
        };
        let offset = match request.page_token.as_deref() {
            None | Some("") => 0,
            Some(token) => token.parse::<usize>().map_err(|_| {
                ServiceError::InvalidArgument(format!("invalid page token '{}'", token))
            })?,
        };

        let state = self.lock();
        let matching: Vec<&PermissionRecord> = state.under(&parent).collect();
        let start = offset.min(matching.len());
        let end = start.saturating_add(page_size).min(matching.len());

        Ok(ListPermissionsResponse {
            permissions: matching[start..end].iter().map(|p| (*p).clone()).collect(),
            next_page_token: (end < matching.len()).then(|| end.to_string()),
        })
    }

    fn update_permission(
        &self,
        request: UpdatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        log_call("update", &request.permission.name, options);
        parse_name(&request.permission.name)?;
        if request.update_mask.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "update_mask must not be empty".to_string(),
            ));
        }
        if let Some(field) = request.update_mask.iter().find(|f| f.as_str() != "role") {
            return Err(ServiceError::InvalidArgument(format!(
                "field '{}' cannot be updated",
                field
            )));
        }

        self.mutate(|state| {
            let index = state.position(&request.permission.name)?;
            let record = &mut state.permissions[index];
            record.role = request.permission.role;
            Ok(record.clone())
        })
    }

    fn delete_permission(
        &self,
        request: DeletePermissionRequest,
        options: &RequestOptions,
    ) -> Result<(), ServiceError> {
        log_call("delete", &request.name, options);
        parse_name(&request.name)?;
        self.mutate(|state| {
            let index = state.position(&request.name)?;
            state.permissions.remove(index);
            Ok(())
        })
    }

    fn transfer_ownership(
        &self,
        request: TransferOwnershipRequest,
        options: &RequestOptions,
    ) -> Result<TransferOwnershipResponse, ServiceError> {
        log_call("transfer", &request.name, options);
        let resource = parse_parent(&request.name)?;
        if resource.resource_type() != ResourceType::TunedModel {
            return Err(ServiceError::InvalidArgument(format!(
                "ownership of {} cannot be transferred",
                resource
            )));
        }
        if request.email_address.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "email_address must not be empty".to_string(),
            ));
        }

        let parent = resource.name();
        let email = request.email_address;
        let response = self.mutate(|state| {
            let mut target_found = false;
            for p in state.permissions.iter_mut() {
                if parent_of(&p.name) != Some(parent.as_str()) {
                    continue;
                }
                let is_target = p.grantee_type == GranteeType::User
                    && p.email_address.as_deref() == Some(email.as_str());
                if is_target {
                    p.role = Role::Owner;
                    target_found = true;
                } else if p.role == Role::Owner {
                    p.role = Role::Writer;
                }
            }

            if !target_found {
                let record = PermissionRecord {
                    name: format!("{}/permissions/{}", parent, state.next_id),
                    role: Role::Owner,
                    grantee_type: GranteeType::User,
                    email_address: Some(email.clone()),
                };
                state.next_id += 1;
                state.permissions.push(record);
            }
            Ok(TransferOwnershipResponse::default())
        })?;

        tracing::info!(
            "LocalPermissionService: {} now owned by {}",
            parent,
            email
        );
        Ok(response)
    }
}
