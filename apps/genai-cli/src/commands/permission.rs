// permission.rs — Permission subcommands: create, get, list, update, delete, transfer.
//
// Each command prints the resulting record(s) as JSON on stdout.

use std::sync::Arc;

use clap::Subcommand;
use genai_permission::{
    ClientConfig, NameQuery, PermissionClient, PermissionRecord, PermissionUpdate, ResourceRef,
};
use genai_service_local::LocalPermissionService;

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// Grant a role on a corpus or tuned model.
    Create {
        /// Owner resource (e.g., "corpora/my-corpus", "tunedModels/my-model").
        #[arg(long)]
        resource: String,
        /// Role to grant: owner, writer, or reader.
        #[arg(long)]
        role: String,
        /// Grantee type: user, group, or everyone.
        #[arg(long)]
        grantee_type: String,
        /// Grantee email (required for user and group, forbidden for everyone).
        #[arg(long)]
        email: Option<String>,
    },
    /// Show one permission.
    Get {
        /// Full name (e.g., "corpora/my-corpus/permissions/123").
        #[arg(long, conflicts_with_all = ["resource", "id", "resource_type"])]
        name: Option<String>,
        /// Owner resource, prefixed or bare.
        #[arg(long)]
        resource: Option<String>,
        /// Permission id.
        #[arg(long)]
        id: Option<String>,
        /// Resource type for a bare --resource: corpora or tunedModels.
        #[arg(long)]
        resource_type: Option<String>,
    },
    /// List permissions on a resource.
    List {
        /// Owner resource (e.g., "corpora/my-corpus").
        #[arg(long)]
        resource: String,
        /// Records per request (defaults to [list] page_size).
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Change the role of a permission.
    Update {
        /// Full permission name.
        name: String,
        /// New role: owner, writer, or reader.
        #[arg(long)]
        role: String,
    },
    /// Delete a permission.
    Delete {
        /// Full permission name.
        name: String,
    },
    /// Transfer ownership of a tuned model.
    Transfer {
        /// Tuned model (e.g., "tunedModels/my-model").
        #[arg(long)]
        resource: String,
        /// Email of the new owner.
        #[arg(long)]
        email: String,
    },
}

pub fn execute(cmd: &PermissionCommands, config: &ClientConfig) -> anyhow::Result<()> {
    let service = LocalPermissionService::open(&config.local.store_path)?;
    let client = PermissionClient::new(Arc::new(service)).with_options(config.request_options());

    match cmd {
        PermissionCommands::Create {
            resource,
            role,
            grantee_type,
            email,
        } => {
            let owner = ResourceRef::parse(resource)?;
            let permission = client.permissions(&owner).create(
                role,
                grantee_type,
                email.as_deref(),
            )?;
            print_json(&permission.to_record())
        }
        PermissionCommands::Get {
            name,
            resource,
            id,
            resource_type,
        } => {
            let query = build_query(
                name.as_deref(),
                resource.as_deref(),
                id.as_deref(),
                resource_type.as_deref(),
            );
            let permission = client.get_permission(&query)?;
            print_json(&permission.to_record())
        }
        PermissionCommands::List {
            resource,
            page_size,
        } => {
            let owner = ResourceRef::parse(resource)?;
            let records = client
                .permissions(&owner)
                .list(page_size.or(config.list.page_size))
                .map(|permission| permission.map(|p| p.to_record()))
                .collect::<Result<Vec<PermissionRecord>, _>>()?;
            if records.is_empty() {
                tracing::info!("No permissions on {}", owner);
            }
            print_json(&records)
        }
        PermissionCommands::Update { name, role } => {
            let mut permission = client.get_permission(&NameQuery::full(name))?;
            let updated = permission.update(&PermissionUpdate::role(role.as_str()))?;
            print_json(&updated.to_record())
        }
        PermissionCommands::Delete { name } => {
            let permission = client.get_permission(&NameQuery::full(name))?;
            permission.delete()?;
            println!("Deleted {}", name);
            Ok(())
        }
        PermissionCommands::Transfer { resource, email } => {
            let owner = ResourceRef::parse(resource)?;
            client.permissions(&owner).transfer_ownership(email)?;
            println!("Transferred ownership of {} to {}", owner, email);
            Ok(())
        }
    }
}

fn build_query(
    name: Option<&str>,
    resource: Option<&str>,
    id: Option<&str>,
    resource_type: Option<&str>,
) -> NameQuery {
    let mut query = NameQuery::new();
    if let Some(name) = name {
        query = query.name(name);
    }
    if let Some(resource) = resource {
        query = query.resource_name(resource);
    }
    if let Some(id) = id {
        query = query.permission_id(id);
    }
    if let Some(resource_type) = resource_type {
        query = query.resource_type(resource_type);
    }
    query
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
