mod actors;
mod app_system;
mod clients;
mod domain;
mod error;
mod messages;
mod store;

#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, ServiceConfig, UserSystem};
use crate::domain::{UserCreate, UserPatch, UserStatus};
use crate::error::Status;
use crate::messages::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersRequest, ListUsersResponse,
    UpdateUserRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = ServiceConfig::from_env();
    info!(?config, "Starting user service");

    let system = UserSystem::new(config);
    let client = system.user_client.clone();

    let span = tracing::info_span!("user_creation");
    let alice = async {
        let request = CreateUserRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        };
        client.create_user(request.into()).await
    }
    .instrument(span)
    .await?;
    info!(user_id = %alice.id, "User created successfully");

    client
        .create_user(UserCreate::new("bob@example.com", "Bob"))
        .await?;

    if let Err(e) = client
        .create_user(UserCreate::new("alice@example.com", "Impostor"))
        .await
    {
        let status = Status::from(e);
        error!(code = ?status.code, message = %status.message, "Duplicate email rejected");
    }

    let (id, patch) = UpdateUserRequest {
        id: alice.id.clone(),
        email: None,
        name: Some("Alice Liddell".to_string()),
        status: None,
    }
    .into_parts();
    let alice = client.update_user(id, patch).await?;
    info!(user_name = %alice.name, "User renamed");

    client
        .update_user(
            alice.id.clone(),
            UserPatch::default().status(UserStatus::Suspended),
        )
        .await?;

    let request = ListUsersRequest {
        page: 1,
        per_page: 0,
    };
    let page: ListUsersResponse = client.list_users(request.page, request.per_page).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    let request = DeleteUserRequest {
        id: alice.id.clone(),
    };
    client.delete_user(request.id).await?;

    let request = GetUserRequest {
        id: alice.id.clone(),
    };
    match client.get_user(request.id).await {
        Ok(_) => error!(user_id = %alice.id, "Deleted user still visible"),
        Err(e) => info!(error = %e, "Deleted user is gone"),
    }

    system.shutdown().await?;

    info!("User service stopped");
    Ok(())
}
