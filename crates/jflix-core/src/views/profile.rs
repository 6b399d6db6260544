//! User profile holder
//!
//! The profile screen edits a draft copy of the stored user record. Only the
//! fields that differ from the loaded baseline are sent, and whatever the
//! server answers replaces both the stored record and the baseline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::require_session;
use crate::api::{ApiError, MovieApi, UserUpdate};
use crate::auth::{birthday_to_api, validate_email};
use crate::error::{Error, Result};
use crate::models::UserRecord;
use crate::session::SessionStore;

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileDraft {
    pub username: String,
    pub email: String,
    /// `YYYY-MM-DD`, or empty
    pub birthday: String,
    /// New password; empty means unchanged
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl ProfileDraft {
    /// Draft pre-filled from a user record
    pub fn from_user(user: &UserRecord) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            birthday: user.birthday_date().unwrap_or_default(),
            password: String::new(),
        }
    }

    /// Fields of `self` that differ from `baseline`
    ///
    /// Empty fields are never sent: clearing a field in the draft leaves it
    /// unchanged on the server. Changed values are validated.
    pub fn diff(&self, baseline: &ProfileDraft) -> Result<UserUpdate, ApiError> {
        let mut update = UserUpdate::default();

        let username = self.username.trim();
        if !username.is_empty() && username != baseline.username {
            update.username = Some(username.to_string());
        }

        let email = self.email.trim();
        if !email.is_empty() && email != baseline.email {
            validate_email(email)?;
            update.email = Some(email.to_string());
        }

        let birthday = self.birthday.trim();
        if !birthday.is_empty() && birthday != baseline.birthday {
            update.birthday = Some(birthday_to_api(birthday)?);
        }

        if !self.password.trim().is_empty() {
            update.password = Some(self.password.clone());
        }

        Ok(update)
    }
}

/// State behind the profile screen
pub struct ProfileHolder<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    user: Option<UserRecord>,
    baseline: ProfileDraft,
    draft: ProfileDraft,
}

impl<A: MovieApi, S: SessionStore> ProfileHolder<A, S> {
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            api,
            store,
            user: None,
            baseline: ProfileDraft::default(),
            draft: ProfileDraft::default(),
        }
    }

    /// Load the stored user into the draft
    pub fn activate(&mut self) -> Result<&ProfileDraft> {
        let session = require_session(self.store.as_ref())?;
        self.set_user(session.user);
        Ok(&self.draft)
    }

    /// Fetch the current user from the API and store it
    ///
    /// The username comes from the stored session.
    pub async fn refresh(&mut self) -> Result<&UserRecord> {
        let session = require_session(self.store.as_ref())?;
        let user = self.api.get_user(&session.auth()).await?;
        self.store.save(&user)?;
        self.set_user(user);
        self.user.as_ref().ok_or(Error::Unauthenticated)
    }

    /// User record the draft was loaded from
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Changes a draft would send
    pub fn diff(&self, draft: &ProfileDraft) -> Result<UserUpdate, ApiError> {
        draft.diff(&self.baseline)
    }

    /// Send the changed fields of `draft`
    ///
    /// Returns `None` without calling the API when nothing changed. On
    /// success the server's record replaces the stored record, the baseline
    /// and the draft.
    pub async fn update(&mut self, draft: ProfileDraft) -> Result<Option<&UserRecord>> {
        let session = require_session(self.store.as_ref())?;
        let update = self.diff(&draft)?;
        if update.is_empty() {
            self.draft = draft;
            return Ok(None);
        }

        let user = self.api.edit_user(&session.auth(), &update).await?;
        self.store.save(&user)?;
        info!("Updated profile for {}", user.username);

        self.set_user(user);
        Ok(self.user.as_ref())
    }

    /// Delete the account, then clear the stored session
    ///
    /// The session is only cleared after the server confirms deletion.
    pub async fn delete_account(&mut self) -> Result<String> {
        let session = require_session(self.store.as_ref())?;
        let status = self.api.delete_user(&session.auth()).await?;

        self.store.clear()?;
        self.reset();
        info!("Deleted account {}", session.user.username);
        Ok(status)
    }

    /// Clear the stored session
    pub fn logout(&mut self) -> Result<()> {
        crate::auth::logout(self.store.as_ref())?;
        self.reset();
        Ok(())
    }

    fn set_user(&mut self, user: UserRecord) {
        self.baseline = ProfileDraft::from_user(&user);
        self.draft = self.baseline.clone();
        self.user = Some(user);
    }

    fn reset(&mut self) {
        self.user = None;
        self.baseline = ProfileDraft::default();
        self.draft = ProfileDraft::default();
    }
}
