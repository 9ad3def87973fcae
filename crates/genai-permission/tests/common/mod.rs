// common/mod.rs — Recording in-memory PermissionService for integration tests.
//
// Captures every request (with the options it arrived with), assigns ids
// from 123456789 upward, paginates list calls by offset, and can be told to
// answer updates with a fixed role or to fail list calls.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use genai_permission::service::{
    CreatePermissionRequest, DeletePermissionRequest, GetPermissionRequest,
    ListPermissionsRequest, ListPermissionsResponse, TransferOwnershipRequest,
    TransferOwnershipResponse, UpdatePermissionRequest,
};
use genai_permission::{
    PermissionClient, PermissionRecord, PermissionService, RequestOptions, Role, ServiceError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreatePermissionRequest),
    Get(GetPermissionRequest),
    List(ListPermissionsRequest),
    Update(UpdatePermissionRequest),
    Delete(DeletePermissionRequest),
    Transfer(TransferOwnershipRequest),
}

#[derive(Default)]
struct State {
    calls: Vec<(Call, RequestOptions)>,
    records: Vec<PermissionRecord>,
    next_id: u64,
    update_role: Option<Role>,
    list_error: Option<ServiceError>,
}

#[derive(Default)]
pub struct RecordingService {
    state: Mutex<State>,
}

impl RecordingService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> PermissionClient {
        PermissionClient::new(self.clone())
    }

    /// Store a record as if the service already had it.
    pub fn seed(&self, record: PermissionRecord) {
        self.state.lock().unwrap().records.push(record);
    }

    /// Answer every update with `role`, regardless of the request.
    pub fn answer_updates_with(&self, role: Role) {
        self.state.lock().unwrap().update_role = Some(role);
    }

    pub fn fail_lists_with(&self, error: ServiceError) {
        self.state.lock().unwrap().list_error = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn options(&self) -> Vec<RequestOptions> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.calls().pop()
    }

    fn record(&self, call: Call, options: &RequestOptions) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((call, options.clone()));
        state
    }
}

impl PermissionService for RecordingService {
    fn create_permission(
        &self,
        request: CreatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        let mut state = self.record(Call::Create(request.clone()), options);
        let id = 123456789 + state.next_id;
        state.next_id += 1;
        let record = PermissionRecord {
            name: format!("{}/permissions/{}", request.parent, id),
            ..request.permission
        };
        state.records.push(record.clone());
        Ok(record)
    }

    fn get_permission(
        &self,
        request: GetPermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        let state = self.record(Call::Get(request.clone()), options);
        state
            .records
            .iter()
            .find(|r| r.name == request.name)
            .cloned()
            .ok_or(ServiceError::NotFound(request.name))
    }

    fn list_permissions(
        &self,
        request: ListPermissionsRequest,
        options: &RequestOptions,
    ) -> Result<ListPermissionsResponse, ServiceError> {
        let state = self.record(Call::List(request.clone()), options);
        if let Some(error) = &state.list_error {
            return Err(error.clone());
        }
        let prefix = format!("{}/permissions/", request.parent);
        let matching: Vec<_> = state
            .records
            .iter()
            .filter(|r| r.name.starts_with(&prefix))
            .cloned()
            .collect();
        let offset: usize = request
            .page_token
            .as_deref()
            .map(|t| t.parse().unwrap())
            .unwrap_or(0);
        let size = request.page_size.map(|s| s as usize).unwrap_or(usize::MAX);
        let end = offset.saturating_add(size).min(matching.len());
        Ok(ListPermissionsResponse {
            permissions: matching[offset..end].to_vec(),
            next_page_token: (end < matching.len()).then(|| end.to_string()),
        })
    }

    fn update_permission(
        &self,
        request: UpdatePermissionRequest,
        options: &RequestOptions,
    ) -> Result<PermissionRecord, ServiceError> {
        let mut state = self.record(Call::Update(request.clone()), options);
        let role = state.update_role.unwrap_or(request.permission.role);
        let record = state
            .records
            .iter_mut()
            .find(|r| r.name == request.permission.name)
            .ok_or_else(|| ServiceError::NotFound(request.permission.name.clone()))?;
        record.role = role;
        Ok(record.clone())
    }

    fn delete_permission(
        &self,
        request: DeletePermissionRequest,
        options: &RequestOptions,
    ) -> Result<(), ServiceError> {
        let mut state = self.record(Call::Delete(request.clone()), options);
        let before = state.records.len();
        state.records.retain(|r| r.name != request.name);
        if state.records.len() == before {
            return Err(ServiceError::NotFound(request.name));
        }
        Ok(())
    }

    fn transfer_ownership(
        &self,
        request: TransferOwnershipRequest,
        options: &RequestOptions,
    ) -> Result<TransferOwnershipResponse, ServiceError> {
        let _state = self.record(Call::Transfer(request), options);
        Ok(TransferOwnershipResponse::default())
    }
}
