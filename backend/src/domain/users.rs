//! Placeholder user directory backed by a static list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Error;

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable numeric identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
}

/// Read-only user lookups over a fixed list.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(vec![User {
            id: 1,
            name: "John Doe".to_owned(),
        }])
    }
}

impl UserDirectory {
    /// Build a directory over `users`.
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        info!(count = users.len(), "user directory initialised");
        Self { users }
    }

    /// Page through the users in identifier order.
    #[must_use]
    pub fn list(&self, offset: usize, limit: usize) -> Vec<User> {
        let page: Vec<User> = self.users.iter().skip(offset).take(limit).cloned().collect();
        debug!(offset, limit, returned = page.len(), "listing users");
        page
    }

    /// Look up one user.
    ///
    /// # Errors
    /// Returns a 404 [`Error`] with `RESOURCE_NOT_FOUND` when no user has `id`.
    pub fn find(&self, id: u32) -> Result<User, Error> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| {
                Error::not_found()
                    .with_message(format!("User {id} not found"))
                    .with_details(serde_json::json!({ "id": id }))
            })
    }
}
