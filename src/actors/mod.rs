use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::UserClient;
use crate::domain::{User, UserCreate, UserPage, UserPatch};
use crate::error::UserError;
use crate::messages::{DeleteUserResponse, ServiceResponse, UserRequest};
use crate::store::UserStore;

// =============================================================================
// USER SERVICE
// =============================================================================

/// Actor that serves [`UserRequest`] messages against a shared [`UserStore`].
///
/// The store does its own locking, so the same `Arc<UserStore>` can be used
/// from outside the actor while it runs.
pub struct UserService {
    receiver: mpsc::Receiver<UserRequest>,
    store: Arc<UserStore>,
}

impl UserService {
    pub fn new(buffer_size: usize, store: Arc<UserStore>) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = UserClient::new(sender);
        (service, client)
    }

    /// Runs until a `Shutdown` message arrives or every client is dropped.
    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::CreateUser { params, respond_to } => {
                    self.handle_create_user(params, respond_to);
                }
                UserRequest::GetUser { id, respond_to } => {
                    self.handle_get_user(id, respond_to);
                }
                UserRequest::UpdateUser {
                    id,
                    patch,
                    respond_to,
                } => {
                    self.handle_update_user(id, patch, respond_to);
                }
                UserRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                UserRequest::ListUsers {
                    page,
                    per_page,
                    respond_to,
                } => {
                    self.handle_list_users(page, per_page, respond_to);
                }
                UserRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
                #[cfg(test)]
                UserRequest::GetUserCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("UserService stopped");
    }

    #[instrument(fields(user_email = %params.email), skip(self, params, respond_to))]
    fn handle_create_user(&self, params: UserCreate, respond_to: ServiceResponse<User, UserError>) {
        debug!("Processing create_user request");
        let _ = respond_to.send(self.store.create(params));
    }

    #[instrument(fields(user_id = %id), skip(self, respond_to))]
    fn handle_get_user(&self, id: String, respond_to: ServiceResponse<User, UserError>) {
        debug!("Processing get_user request");

        let result = self.store.get(&id);
        if let Ok(user) = &result {
            debug!(user_name = %user.name, "User found");
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_id = %id), skip(self, patch, respond_to))]
    fn handle_update_user(
        &self,
        id: String,
        patch: UserPatch,
        respond_to: ServiceResponse<User, UserError>,
    ) {
        debug!(
            email = patch.email.is_some(),
            name = patch.name.is_some(),
            status = patch.status.is_some(),
            "Processing update_user request"
        );
        let _ = respond_to.send(self.store.update(&id, patch));
    }

    #[instrument(fields(user_id = %id), skip(self, respond_to))]
    fn handle_delete_user(
        &self,
        id: String,
        respond_to: ServiceResponse<DeleteUserResponse, UserError>,
    ) {
        debug!("Processing delete_user request");

        let result = self
            .store
            .delete(&id)
            .map(|()| DeleteUserResponse { success: true });

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_users(
        &self,
        page: i32,
        per_page: i32,
        respond_to: ServiceResponse<UserPage, UserError>,
    ) {
        debug!("Processing list_users request");

        let page = self.store.list(page, per_page);
        info!(user_count = page.users.len(), total = page.total, "Listed users");

        let _ = respond_to.send(Ok(page));
    }
}
