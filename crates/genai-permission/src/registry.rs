// registry.rs — Process-wide default service handles.
//
// Core types always take an explicit `PermissionClient`. The registry only
// backs the module-level helpers (`get_permission`) so applications can
// register a service once at startup and call them without threading a
// handle through. Entries are keyed by service name; the permission API uses
// `PERMISSION_SERVICE`.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::client::PermissionClient;
use crate::error::{Result, ServiceError};
use crate::names::NameQuery;
use crate::permission::Permission;
use crate::service::{PermissionService, RequestOptions};

/// Registry key for the permission service.
pub const PERMISSION_SERVICE: &str = "permission";

/// Service handles keyed by service name.
#[derive(Default)]
pub struct ClientRegistry {
    services: RwLock<HashMap<String, Arc<dyn PermissionService>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` under `name`, returning the handle it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        service: Arc<dyn PermissionService>,
    ) -> Option<Arc<dyn PermissionService>> {
        let name = name.into();
        tracing::debug!("ClientRegistry: registering service '{}'", name);
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, service)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PermissionService>> {
        self.services
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn PermissionService>> {
        self.services
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Client for the service registered under `name`.
    pub fn client(&self, name: &str, options: RequestOptions) -> Result<PermissionClient> {
        let service = self.get(name).ok_or_else(|| {
            ServiceError::Unavailable(format!("no client registered for service '{}'", name))
        })?;
        Ok(PermissionClient::new(service).with_options(options))
    }
}

/// The process-wide registry, created on first use.
pub fn default_registry() -> &'static ClientRegistry {
    static REGISTRY: OnceLock<ClientRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ClientRegistry::new)
}

/// Register `service` as the default permission service.
pub fn configure(service: Arc<dyn PermissionService>) {
    default_registry().register(PERMISSION_SERVICE, service);
}

/// Client for the default permission service.
pub fn default_client(options: RequestOptions) -> Result<PermissionClient> {
    default_registry().client(PERMISSION_SERVICE, options)
}

/// Resolve `query` and fetch it through the default permission service.
pub fn get_permission(query: &NameQuery) -> Result<Permission> {
    get_permission_with_options(query, RequestOptions::default())
}

/// [`get_permission`] with explicit request options.
pub fn get_permission_with_options(query: &NameQuery, options: RequestOptions) -> Result<Permission> {
    // Resolve first so malformed input never depends on registry state.
    let name = query.resolve()?;
    let client = default_client(options)?;
    Permission::get(&client, &name)
}
