//! # genai-service-local
//!
//! File-backed [`PermissionService`](genai_permission::PermissionService) for
//! running the permission API without the remote service.
//!
//! [`LocalPermissionService`] keeps every grant in one JSON file and mirrors
//! the remote service's observable behaviour: numeric ids, offset page
//! tokens, role-only update masks, and tuned-model-only ownership transfer.
//! Useful for offline development, demos, and tests.

pub mod error;
pub mod service;

pub use error::LocalStoreError;
pub use service::{LocalPermissionService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
