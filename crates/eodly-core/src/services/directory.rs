//! Session and user directory
//!
//! A flat directory of known users plus the at-most-one signed-in session.
//! Email is the sign-in key; there is no credential check beyond presence in
//! the directory.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{User, MBTI_TYPES};
use crate::store::{keys, StorageArea};

/// Tracks the signed-in identity and the directory of known users
pub struct UserDirectory {
    store: Arc<dyn StorageArea>,
    users: Vec<User>,
    session: Option<User>,
}

impl UserDirectory {
    /// Load the directory and session from the store
    ///
    /// A session pointing at a user missing from the directory is a forced
    /// sign-out: the inconsistency is logged and the session cleared.
    pub fn load(store: Arc<dyn StorageArea>) -> Self {
        let users = match store.load(keys::USERS) {
            Ok(Some(value)) => match serde_json::from_value::<Vec<User>>(value) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!("[directory] Discarding unreadable user directory: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("[directory] Failed to read user directory: {}", e);
                Vec::new()
            }
        };

        let session = match store.load(keys::SESSION) {
            Ok(Some(value)) => match serde_json::from_value::<User>(value) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("[directory] Discarding unreadable session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("[directory] Failed to read session: {}", e);
                None
            }
        };

        let mut directory = Self {
            store,
            users,
            session,
        };

        let orphan = match &directory.session {
            Some(user) if !directory.users.iter().any(|u| u.id == user.id) => {
                Some(user.id.clone())
            }
            _ => None,
        };
        if let Some(id) = orphan {
            log::warn!(
                "[directory] Session user {} missing from directory, signing out",
                id
            );
            let _ = directory.sign_out();
        }

        directory
    }

    fn persist_users(&self) -> Result<()> {
        let value = serde_json::to_value(&self.users)?;
        self.store.save(keys::USERS, &value)
    }

    fn persist_session(&self) -> Result<()> {
        match &self.session {
            Some(user) => {
                let value = serde_json::to_value(user)?;
                self.store.save(keys::SESSION, &value)
            }
            None => self.store.remove(keys::SESSION),
        }
    }

    /// Sign in by email
    ///
    /// Any password is accepted; the only check is directory membership.
    pub fn sign_in(&mut self, email: &str) -> Result<User> {
        let Some(user) = self.users.iter().find(|u| u.email == email).cloned() else {
            return Err(Error::auth("User not found. Please sign up."));
        };

        self.session = Some(user.clone());
        self.persist_session()?;
        log::info!("[directory] Signed in {}", user.id);
        Ok(user)
    }

    /// Create a user and sign in
    ///
    /// Fails without mutating the directory when the email is already taken.
    pub fn sign_up(&mut self, name: &str, email: &str, mbti: Option<&str>) -> Result<User> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }
        if self.users.iter().any(|u| u.email == email) {
            return Err(Error::validation("User already exists. Please sign in."));
        }
        if let Some(code) = mbti {
            if !MBTI_TYPES.contains(&code) {
                return Err(Error::validation(format!("Unknown MBTI type: {}", code)));
            }
        }

        let user = User {
            id: format!("u-{}", uuid::Uuid::new_v4()),
            name: name.to_string(),
            role: "Team Member".to_string(),
            avatar: User::default_avatar(name),
            department: "Engineering".to_string(),
            mbti: mbti.map(str::to_string),
            email: email.to_string(),
        };

        self.users.push(user.clone());
        self.persist_users()?;

        self.session = Some(user.clone());
        self.persist_session()?;
        log::info!("[directory] Signed up {}", user.id);
        Ok(user)
    }

    /// Replace the matching directory entry and the session copy
    pub fn update_profile(&mut self, updated: User) -> Result<()> {
        let Some(entry) = self.users.iter_mut().find(|u| u.id == updated.id) else {
            return Err(Error::not_found(format!("No user with id {}", updated.id)));
        };
        *entry = updated.clone();
        self.persist_users()?;

        if self
            .session
            .as_ref()
            .is_some_and(|current| current.id == updated.id)
        {
            self.session = Some(updated);
            self.persist_session()?;
        }
        Ok(())
    }

    /// Clear the session
    pub fn sign_out(&mut self) -> Result<()> {
        self.session = None;
        self.persist_session()
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// All known users
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Look up a directory entry by id
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

// ============================================================================
// Tests
// ============================================================================
