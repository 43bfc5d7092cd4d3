//! # Mock Framework
//!
//! Utilities for testing code that talks to the user service without running
//! a [`UserService`](crate::actors::UserService).
//!
//! Use [`create_mock_client`] to get a client and the receiver its requests
//! land on, then helpers like [`expect_create`] or [`expect_list`] to assert
//! each request and script the reply.

use tokio::sync::mpsc;

use crate::clients::UserClient;
use crate::domain::{User, UserCreate, UserPage, UserPatch};
use crate::error::UserError;
use crate::messages::{DeleteUserResponse, ServiceResponse, UserRequest};

/// Creates a client wired to a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<UserRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CreateUser request
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(UserCreate, ServiceResponse<User, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::CreateUser { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetUser request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, ServiceResponse<User, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::GetUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateUser request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, UserPatch, ServiceResponse<User, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::UpdateUser {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DeleteUser request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, ServiceResponse<DeleteUserResponse, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ListUsers request
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(i32, i32, ServiceResponse<UserPage, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::ListUsers {
            page,
            per_page,
            respond_to,
        }) => Some((page, per_page, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStatus;
    use chrono::Utc;

    fn sample_user(id: &str) -> User {
        User::from_create(id.to_string(), UserCreate::new("test@example.com", "Test"), Utc::now())
    }

    #[tokio::test]
    async fn test_mock_client_create() {
        let (client, mut receiver) = create_mock_client(10);

        let create_task = tokio::spawn(async move {
            client
                .create_user(UserCreate::new("test@example.com", "Test"))
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.name, "Test");
        responder.send(Ok(sample_user("user_1"))).unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id, "user_1");
    }

    #[tokio::test]
    async fn test_mock_client_forwards_update_fields() {
        let (client, mut receiver) = create_mock_client(10);

        let update_task = tokio::spawn(async move {
            client
                .update_user(
                    "user_1".to_string(),
                    UserPatch::default().status(UserStatus::Inactive),
                )
                .await
        });

        let (id, patch, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, "user_1");
        assert_eq!(patch.status, Some(UserStatus::Inactive));
        assert_eq!(patch.name, None);
        responder
            .send(Err(UserError::NotFound("user_1".to_string())))
            .unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(UserError::NotFound("user_1".to_string())));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_user("user_1".to_string()).await });

        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        drop(responder);

        let err = get_task.await.unwrap().unwrap_err();
        assert!(matches!(err, UserError::ActorCommunicationError(_)));
    }

    #[tokio::test]
    async fn test_closed_channel_is_communication_error() {
        let (client, receiver) = create_mock_client(10);
        drop(receiver);

        let err = client.delete_user("user_1".to_string()).await.unwrap_err();
        assert_eq!(
            err,
            UserError::ActorCommunicationError("Actor closed".to_string())
        );
    }

    #[tokio::test]
    async fn test_mock_client_list_and_delete() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move {
            let page = client.list_users(0, 0).await?;
            let deleted = client.delete_user("user_9".to_string()).await?;
            Ok::<_, UserError>((page, deleted))
        });

        let (page, per_page, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        assert_eq!((page, per_page), (0, 0));
        responder
            .send(Ok(UserPage {
                users: vec![],
                total: 0,
                page: 1,
                per_page: 10,
            }))
            .unwrap();

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, "user_9");
        responder.send(Ok(DeleteUserResponse { success: true })).unwrap();

        let (page, deleted) = task.await.unwrap().unwrap();
        assert_eq!(page.per_page, 10);
        assert!(deleted.success);
    }
}
