use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::domain::{User, UserCreate, UserPage, UserPatch, UserStatus};
use crate::error::UserError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enum for the user service. Each variant carries the call's
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum UserRequest {
    CreateUser {
        params: UserCreate,
        respond_to: ServiceResponse<User, UserError>,
    },
    GetUser {
        id: String,
        respond_to: ServiceResponse<User, UserError>,
    },
    UpdateUser {
        id: String,
        patch: UserPatch,
        respond_to: ServiceResponse<User, UserError>,
    },
    DeleteUser {
        id: String,
        respond_to: ServiceResponse<DeleteUserResponse, UserError>,
    },
    ListUsers {
        page: i32,
        per_page: i32,
        respond_to: ServiceResponse<UserPage, UserError>,
    },
    Shutdown,
    #[cfg(test)]
    GetUserCount {
        respond_to: ServiceResponse<usize, UserError>,
    },
}

// Wire shapes of the five calls.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersRequest {
    #[serde(default)]
    pub page: i32,
    #[serde(default)]
    pub per_page: i32,
}

pub type ListUsersResponse = UserPage;

impl From<CreateUserRequest> for UserCreate {
    fn from(req: CreateUserRequest) -> Self {
        UserCreate {
            email: req.email,
            name: req.name,
        }
    }
}

impl UpdateUserRequest {
    /// Splits the request into the target id and the fields to write.
    pub fn into_parts(self) -> (String, UserPatch) {
        let patch = UserPatch {
            email: self.email,
            name: self.name,
            status: self.status,
        };
        (self.id, patch)
    }
}
