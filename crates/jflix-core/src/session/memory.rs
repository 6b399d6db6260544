//! In-process session store

use std::sync::{Mutex, MutexGuard};

use super::error::SessionResult;
use super::SessionStore;
use crate::models::UserRecord;

#[derive(Debug, Default)]
struct Entries {
    user: Option<UserRecord>,
    token: Option<String>,
}

/// Session store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<Entries>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session
    pub fn with_session(user: UserRecord, token: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(Entries {
                user: Some(user),
                token: Some(token.into()),
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionResult<Option<UserRecord>> {
        Ok(self.entries().user.clone())
    }

    fn save(&self, user: &UserRecord) -> SessionResult<()> {
        self.entries().user = Some(user.clone());
        Ok(())
    }

    fn token(&self) -> SessionResult<Option<String>> {
        Ok(self.entries().token.clone())
    }

    fn save_token(&self, token: &str) -> SessionResult<()> {
        self.entries().token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let mut entries = self.entries();
        entries.user = None;
        entries.token = None;
        Ok(())
    }
}
