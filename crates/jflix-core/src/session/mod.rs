//! Persisted session store
//!
//! Holds the serialized current-user record and the bearer token. The two are
//! a pair: login writes both, logout and account deletion clear both, and a
//! session with either one missing counts as logged out.
//!
//! Writes are whole-record: callers read the record, change it, and write it
//! back in full through [`SessionStore::update`].

mod error;
mod file;
mod memory;

pub use error::{SessionError, SessionResult};
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use crate::api::AuthContext;
use crate::models::UserRecord;

/// An authenticated session: the cached user and its token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
}

impl Session {
    /// Credentials for user-scoped API calls
    pub fn auth(&self) -> AuthContext {
        AuthContext::new(self.user.username.clone(), self.token.clone())
    }
}

/// Durable storage for the current session
pub trait SessionStore: Send + Sync {
    /// Load the cached user record, if any
    fn load(&self) -> SessionResult<Option<UserRecord>>;

    /// Replace the cached user record
    fn save(&self, user: &UserRecord) -> SessionResult<()>;

    /// Load the bearer token, if any
    fn token(&self) -> SessionResult<Option<String>>;

    /// Replace the bearer token
    fn save_token(&self, token: &str) -> SessionResult<()>;

    /// Remove both the user record and the token
    fn clear(&self) -> SessionResult<()>;

    /// Both halves of the session, or `None` if either is missing
    fn session(&self) -> SessionResult<Option<Session>> {
        let user = self.load()?;
        let token = self.token()?;
        Ok(match (user, token) {
            (Some(user), Some(token)) => Some(Session { user, token }),
            _ => None,
        })
    }

    /// Whether a complete session is stored
    fn is_authenticated(&self) -> bool {
        matches!(self.session(), Ok(Some(_)))
    }

    /// Store a fresh session, replacing whatever was there
    ///
    /// If the token cannot be written the previous user record is put back,
    /// so a new user is never stored next to an old token. When that fails
    /// too, the session is cleared.
    fn replace(&self, user: &UserRecord, token: &str) -> SessionResult<()> {
        let previous = self.load().ok().flatten();
        self.save(user)?;

        if let Err(e) = self.save_token(token) {
            let restored = match previous {
                Some(ref prev) => self.save(prev),
                None => self.clear(),
            };
            if restored.is_err() {
                let _ = self.clear();
            }
            return Err(e);
        }
        Ok(())
    }

    /// Read-modify-write of the full user record
    ///
    /// Returns the updated record, or `None` without calling `change` when no
    /// record is stored.
    fn update<F>(&self, change: F) -> SessionResult<Option<UserRecord>>
    where
        F: FnOnce(&mut UserRecord),
        Self: Sized,
    {
        let mut user = match self.load()? {
            Some(user) => user,
            None => return Ok(None),
        };
        change(&mut user);
        self.save(&user)?;
        Ok(Some(user))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ReadOnlyTokenStore;
    use super::*;

    #[test]
    fn test_replace_restores_previous_user_when_token_write_fails() {
        let store = ReadOnlyTokenStore {
            inner: MemorySessionStore::with_session(UserRecord::new("bob"), "bob-token"),
        };

        let result = store.replace(&UserRecord::new("alice"), "alice-token");
        assert!(result.is_err());

        let session = store.session().unwrap().unwrap();
        assert_eq!(session.user.username, "bob");
        assert_eq!(session.token, "bob-token");
    }

    #[test]
    fn test_replace_without_previous_session_leaves_nothing() {
        let store = ReadOnlyTokenStore::default();

        assert!(store.replace(&UserRecord::new("alice"), "t").is_err());
        assert!(store.load().unwrap().is_none());
        assert!(!store.is_authenticated());
    }
}
