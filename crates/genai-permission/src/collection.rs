// collection.rs — Permissions: the grants attached to one owner resource.
//
// A corpus or tuned model hands out a `Permissions` collection scoped to
// itself. It creates, fetches and lists grants under that owner, and (for
// tuned models only) transfers ownership.
//
// Listing is lazy: `list()` returns an iterator that requests the next page
// only when the current one is used up, and follows `nextPageToken` until the
// service stops returning one. Entities come out in the order the service
// sent them.

use std::collections::VecDeque;

use crate::client::PermissionClient;
use crate::error::{PermissionError, Result};
use crate::names::{PermissionId, ResourceRef};
use crate::permission::Permission;
use crate::service::{ListPermissionsRequest, TransferOwnershipRequest, TransferOwnershipResponse};
use crate::types::{IntoGranteeType, IntoRole};

#[derive(Debug, Clone)]
pub struct Permissions {
    owner: ResourceRef,
    client: PermissionClient,
}

impl Permissions {
    pub fn new(owner: ResourceRef, client: PermissionClient) -> Self {
        Self { owner, client }
    }

    pub fn owner(&self) -> &ResourceRef {
        &self.owner
    }

    /// Grant `role` on the owner. See [`Permission::create`].
    pub fn create(
        &self,
        role: impl IntoRole,
        grantee_type: impl IntoGranteeType,
        email_address: Option<&str>,
    ) -> Result<Permission> {
        Permission::create(&self.client, &self.owner, role, grantee_type, email_address)
    }

    /// Fetch the grant with `permission_id` under the owner.
    pub fn get(&self, permission_id: impl Into<PermissionId>) -> Result<Permission> {
        let name = self.owner.permission_name(permission_id)?;
        Permission::get(&self.client, &name)
    }

    /// Iterate over every grant on the owner, `page_size` records per request.
    ///
    /// No request is made until the iterator is first advanced. Each call
    /// starts again from the first page.
    pub fn list(&self, page_size: Option<u32>) -> PermissionIter {
        PermissionIter {
            client: self.client.clone(),
            parent: self.owner.name(),
            page_size,
            buffer: VecDeque::new(),
            next_page_token: None,
            exhausted: false,
        }
    }

    /// Hand ownership of the owner to `email_address`.
    pub fn transfer_ownership(&self, email_address: &str) -> Result<TransferOwnershipResponse> {
        transfer_ownership(&self.client, &self.owner, email_address)
    }
}

/// Transfer ownership of `owner` to `email_address`.
///
/// Only tuned models can change owner; corpora fail before any request.
pub fn transfer_ownership(
    client: &PermissionClient,
    owner: &ResourceRef,
    email_address: &str,
) -> Result<TransferOwnershipResponse> {
    if !owner.resource_type().supports_ownership_transfer() {
        return Err(PermissionError::Unsupported {
            operation: "ownership transfer",
            resource_type: owner.resource_type(),
        });
    }

    tracing::debug!(
        "Permissions: transferring ownership of {} to {}",
        owner,
        email_address
    );
    let response = client.service().transfer_ownership(
        TransferOwnershipRequest {
            name: owner.name(),
            email_address: email_address.to_string(),
        },
        client.options(),
    )?;
    tracing::info!("Permissions: ownership of {} transferred", owner);
    Ok(response)
}

/// Lazy, page-at-a-time iterator over the grants on one owner.
///
/// Yields `Err` once if a page request fails, then ends.
#[derive(Debug)]
pub struct PermissionIter {
    client: PermissionClient,
    parent: String,
    page_size: Option<u32>,
    buffer: VecDeque<Permission>,
    next_page_token: Option<String>,
    exhausted: bool,
}

impl PermissionIter {
    fn fetch_page(&mut self) -> Result<()> {
        let request = ListPermissionsRequest {
            parent: self.parent.clone(),
            page_size: self.page_size,
            page_token: self.next_page_token.take(),
        };
        tracing::debug!(
            "Permissions: listing {} (page token {:?})",
            self.parent,
            request.page_token
        );
        let response = self
            .client
            .service()
            .list_permissions(request, self.client.options())?;

        for record in response.permissions {
            self.buffer
                .push_back(Permission::from_record(record, self.client.clone())?);
        }

        // An empty token means the same as no token.
        self.next_page_token = response.next_page_token.filter(|token| !token.is_empty());
        if self.next_page_token.is_none() {
            self.exhausted = true;
        }
        Ok(())
    }
}

impl Iterator for PermissionIter {
    type Item = Result<Permission>;

    fn next(&mut self) -> Option<Self::Item> {
        // Loop so that an empty page with a continuation token is skipped.
        loop {
            if let Some(permission) = self.buffer.pop_front() {
                return Some(Ok(permission));
            }
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                self.exhausted = true;
                self.buffer.clear();
                return Some(Err(e));
            }
        }
    }
}

impl std::iter::FusedIterator for PermissionIter {}
