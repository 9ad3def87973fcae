// client.rs — PermissionClient: the explicit handle every entity carries.
//
// Wraps a shared `PermissionService` together with the `RequestOptions`
// forwarded on each call. Cloning is cheap (one `Arc` bump), so entities and
// collections each hold their own copy.

use std::fmt;
use std::sync::Arc;

use crate::collection::Permissions;
use crate::error::Result;
use crate::names::{NameQuery, ResourceRef};
use crate::permission::Permission;
use crate::service::{PermissionService, RequestOptions};

#[derive(Clone)]
pub struct PermissionClient {
    service: Arc<dyn PermissionService>,
    options: RequestOptions,
}

impl PermissionClient {
    pub fn new(service: Arc<dyn PermissionService>) -> Self {
        Self {
            service,
            options: RequestOptions::default(),
        }
    }

    /// Replace the options forwarded on every call made through this handle.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn service(&self) -> &dyn PermissionService {
        self.service.as_ref()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Permission collection scoped to `owner`.
    pub fn permissions(&self, owner: &ResourceRef) -> Permissions {
        Permissions::new(owner.clone(), self.clone())
    }

    /// Resolve `query` and fetch the permission it names.
    pub fn get_permission(&self, query: &NameQuery) -> Result<Permission> {
        let name = query.resolve()?;
        Permission::get(self, &name)
    }
}

impl fmt::Debug for PermissionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
