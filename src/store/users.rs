//! User account store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record id
    pub id: u64,
    /// Unique username
    pub username: String,
    /// Argon2id PHC hash
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Accounts keyed by id
pub struct UserStore {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: AtomicU64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create empty store
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a new account.
    ///
    /// Uniqueness is checked under the write lock so concurrent registers
    /// of the same username cannot both succeed.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == username) {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };

        users.insert(id, user.clone());
        Ok(user)
    }

    /// Look up an account by username
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Look up an account by id
    pub async fn get(&self, id: u64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Number of registered accounts
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
