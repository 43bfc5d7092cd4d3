use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{User, UserCreate, UserPage, UserPatch};
use crate::error::UserError;
use crate::messages::{DeleteUserResponse, UserRequest};

/// Client for interacting with the [`UserService`](crate::actors::UserService).
///
/// Cheap to clone; every clone feeds the same service.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop. Requests already queued ahead of it are served.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), UserError> {
        debug!("Sending shutdown request");
        self.sender
            .send(UserRequest::Shutdown)
            .await
            .map_err(|_| UserError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(UserClient => fn create_user(params: UserCreate) -> User as UserRequest::CreateUser, Error = UserError);
client_method!(UserClient => fn get_user(id: String) -> User as UserRequest::GetUser, Error = UserError);
client_method!(UserClient => fn update_user(id: String, patch: UserPatch) -> User as UserRequest::UpdateUser, Error = UserError);
client_method!(UserClient => fn delete_user(id: String) -> DeleteUserResponse as UserRequest::DeleteUser, Error = UserError);
client_method!(UserClient => fn list_users(page: i32, per_page: i32) -> UserPage as UserRequest::ListUsers, Error = UserError);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(UserClient => fn get_user_count() -> usize as UserRequest::GetUserCount, Error = UserError);
