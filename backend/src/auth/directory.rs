//! User lookup.
//!
//! Users live in memory only and are gone when the process exits.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::warn;

use super::{AuthError, Identity};

/// Maps a username/password pair to an identity.
pub trait UserDirectory: Send + Sync {
    /// Returns `None` for unknown users and wrong passwords alike.
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity>;
}

/// In-memory directory holding bcrypt password hashes.
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, String>>,
    cost: u32,
}

impl InMemoryUserDirectory {
    /// Create an empty directory hashing new passwords with `cost`.
    pub fn new(cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            cost,
        }
    }

    /// Add a user, replacing any previous password for the same username.
    pub fn add_user(&self, username: impl Into<String>, password: &str) -> Result<(), AuthError> {
        let hash = bcrypt::hash(password, self.cost)?;
        self.users.write().insert(username.into(), hash);
        Ok(())
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        // Clone the hash so the lock is not held while bcrypt runs.
        let hash = self.users.read().get(username).cloned()?;

        match bcrypt::verify(password, &hash) {
            Ok(true) => Some(Identity::new(username)),
            Ok(false) => None,
            Err(e) => {
                warn!("Stored hash for {} could not be verified: {}", username, e);
                None
            }
        }
    }
}
