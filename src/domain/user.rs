use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a user account.
///
/// Discriminants match the wire enum, where `0` is the unset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Unspecified = 0,
    Active = 1,
    Inactive = 2,
    Suspended = 3,
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
}

/// Payload for updating an existing user.
///
/// Only fields set to `Some` are written. `Some(String::new())` is a real
/// value and overwrites, `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// One window of users together with the paging parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

impl UserPatch {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.status.is_none()
    }
}

impl User {
    /// Builds a fresh record in the `Active` state with both timestamps set to `now`.
    pub fn from_create(id: String, params: UserCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: params.email,
            name: params.name,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `patch` and stamps `updated_at`.
    ///
    /// Email uniqueness is the store's concern and must be checked before this
    /// is called.
    pub fn apply_patch(&mut self, patch: UserPatch, now: DateTime<Utc>) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        // A clock that steps backwards must not break updated_at >= created_at.
        self.updated_at = now.max(self.created_at);
    }
}
