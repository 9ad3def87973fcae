//! # genai-permission
//!
//! Permission management for corpora and tuned models on the generative-AI
//! service.
//!
//! Grants are created, fetched, listed, updated and deleted through a
//! [`Permissions`] collection scoped to one owner ([`ResourceRef`]). Tuned
//! models can also change owner via [`Permissions::transfer_ownership`].
//!
//! ## Key invariants
//!
//! - **Names resolve locally**: [`resolve`] turns a full path, a resource name
//!   plus id, or a bare id plus a type hint into one [`PermissionName`], and
//!   fails on anything else before any request is made.
//! - **Email follows grantee**: user and group grants carry an email address,
//!   `everyone` grants never do. Checked at create time.
//! - **Only role is mutable**: updating `grantee_type` or `email_address` is
//!   rejected; delete and recreate instead.
//! - **Transport is pluggable**: everything goes through the
//!   [`PermissionService`] trait. Its errors come back unchanged as
//!   [`PermissionError::Service`].

pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod names;
pub mod permission;
pub mod registry;
pub mod service;
pub mod types;

pub use client::PermissionClient;
pub use collection::{transfer_ownership, PermissionIter, Permissions};
pub use config::ClientConfig;
pub use error::{ConfigError, ErrorKind, PermissionError, Result, ServiceError};
pub use names::{resolve, NameQuery, PermissionId, PermissionName, ResourceRef, ResourceType};
pub use permission::{FieldValue, Permission, PermissionUpdate};
pub use registry::{configure, default_client, get_permission, get_permission_with_options};
pub use service::{PermissionRecord, PermissionService, RequestOptions};
pub use types::{to_grantee_type, to_role, GranteeType, IntoGranteeType, IntoRole, Role};
