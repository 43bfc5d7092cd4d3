//! The in-memory user table and its operation contracts.
//!
//! [`UserStore`] is internally synchronized with a single `RwLock`: reads share
//! the lock, every mutation holds it exclusively from its uniqueness check
//! through its write.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{User, UserCreate, UserPage, UserPatch};
use crate::error::UserError;

/// Page size applied when the caller asks for fewer than one record per page.
pub const DEFAULT_PER_PAGE: u32 = 10;

pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct UserTable {
    users: HashMap<String, User>,
    /// email -> id of the live record holding it
    emails: HashMap<String, String>,
    /// Every id ever handed out, live or deleted.
    issued: HashSet<String>,
}

pub struct UserStore {
    table: RwLock<UserTable>,
    next_id_fn: IdGenerator,
    clock_fn: Clock,
    max_per_page: Option<u32>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("users", &self.table.read().users.len())
            .field("max_per_page", &self.max_per_page)
            .finish()
    }
}

impl UserStore {
    /// Creates an empty store using UUID v4 ids and the system clock.
    pub fn new() -> Self {
        Self::with_generators(|| uuid::Uuid::new_v4().to_string(), Utc::now)
    }

    /// Creates an empty store with caller-supplied id and timestamp sources.
    pub fn with_generators(
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
        clock_fn: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self {
            table: RwLock::new(UserTable::default()),
            next_id_fn: Box::new(next_id_fn),
            clock_fn: Box::new(clock_fn),
            max_per_page: None,
        }
    }

    /// Caps `per_page` in [`UserStore::list`]. `None` means no cap.
    pub fn with_max_per_page(mut self, max_per_page: Option<u32>) -> Self {
        self.max_per_page = max_per_page.map(|max| max.max(1));
        self
    }

    pub fn len(&self) -> usize {
        self.table.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create(&self, params: UserCreate) -> Result<User, UserError> {
        if params.email.is_empty() || params.name.is_empty() {
            warn!("Rejected create: email and name are required");
            return Err(UserError::InvalidArgument(
                "email and name are required".to_string(),
            ));
        }

        let mut table = self.table.write();

        if table.emails.contains_key(&params.email) {
            warn!(user_email = %params.email, "Rejected create: email already exists");
            return Err(UserError::AlreadyExists(format!(
                "email already exists: {}",
                params.email
            )));
        }

        let id = (self.next_id_fn)();
        if table.issued.contains(&id) {
            warn!(user_id = %id, "Id generator returned an id that was already issued");
            return Err(UserError::Internal(format!("duplicate id generated: {}", id)));
        }

        let user = User::from_create(id.clone(), params, (self.clock_fn)());
        table.issued.insert(id.clone());
        table.emails.insert(user.email.clone(), id.clone());
        table.users.insert(id.clone(), user.clone());

        info!(user_id = %id, "User created");
        Ok(user)
    }

    pub fn get(&self, id: &str) -> Result<User, UserError> {
        let table = self.table.read();
        table.users.get(id).cloned().ok_or_else(|| {
            debug!(user_id = %id, "User not found");
            UserError::NotFound(id.to_string())
        })
    }

    pub fn update(&self, id: &str, patch: UserPatch) -> Result<User, UserError> {
        let mut table = self.table.write();
        let UserTable { users, emails, .. } = &mut *table;

        let Some(user) = users.get_mut(id) else {
            warn!(user_id = %id, "Rejected update: user not found");
            return Err(UserError::NotFound(id.to_string()));
        };

        if let Some(email) = &patch.email {
            if let Some(holder) = emails.get(email) {
                if holder != id {
                    warn!(user_id = %id, user_email = %email, "Rejected update: email already exists");
                    return Err(UserError::AlreadyExists(format!(
                        "email already exists: {}",
                        email
                    )));
                }
            }
            if *email != user.email {
                emails.remove(&user.email);
                emails.insert(email.clone(), id.to_string());
            }
        }

        user.apply_patch(patch, (self.clock_fn)());

        info!(user_id = %id, "User updated");
        Ok(user.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), UserError> {
        let mut table = self.table.write();

        let Some(user) = table.users.remove(id) else {
            warn!(user_id = %id, "Rejected delete: user not found");
            return Err(UserError::NotFound(id.to_string()));
        };
        table.emails.remove(&user.email);

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Returns the 1-based `page` of users ordered by `(created_at, id)`.
    ///
    /// `page < 1` becomes 1, `per_page < 1` becomes [`DEFAULT_PER_PAGE`].
    /// Pages past the end are empty rather than an error.
    pub fn list(&self, page: i32, per_page: i32) -> UserPage {
        let page = u32::try_from(page).ok().filter(|p| *p >= 1).unwrap_or(1);
        let mut per_page = u32::try_from(per_page)
            .ok()
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PER_PAGE);
        if let Some(max) = self.max_per_page {
            per_page = per_page.min(max);
        }

        let table = self.table.read();
        let mut all: Vec<&User> = table.users.values().collect();
        all.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));

        let total = all.len();
        let start = ((page - 1) as usize)
            .saturating_mul(per_page as usize)
            .min(total);
        let end = start.saturating_add(per_page as usize).min(total);

        let users: Vec<User> = all[start..end].iter().map(|u| (*u).clone()).collect();
        debug!(total, page, per_page, returned = users.len(), "Listed users");

        UserPage {
            users,
            total,
            page,
            per_page,
        }
    }
}
