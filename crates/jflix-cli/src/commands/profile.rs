//! Profile handlers

use anyhow::Result;
use tracing::warn;

use jflix_core::{ApiError, Error, ProfileDraft};

use super::{failure, Context};
use crate::output::Output;
use crate::prompt::{confirm, password_or_prompt, prompt_with_default};

/// Field changes given on the command line
#[derive(Debug, Default)]
pub struct ProfileEdits {
    pub username: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub password: Option<String>,
    /// Prompt for a new password
    pub change_password: bool,
}

impl ProfileEdits {
    fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
            && self.password.is_none()
            && !self.change_password
    }

    /// Apply the edits on top of a draft
    fn apply_to(self, draft: &mut ProfileDraft) {
        if let Some(username) = self.username {
            draft.username = username;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(birthday) = self.birthday {
            draft.birthday = birthday;
        }
        if let Some(password) = self.password {
            draft.password = password;
        }
    }
}

/// Show the profile, refreshed from the server when possible
pub async fn show(ctx: &Context, cached: bool, output: &Output) -> Result<()> {
    let mut holder = ctx.profile();
    holder
        .activate()
        .map_err(|e| failure("Failed to load profile", e))?;

    if !cached {
        if let Err(e) = holder.refresh().await {
            if e.needs_login() {
                return Err(failure("Failed to load profile", e));
            }
            // Fall back to the stored record
            warn!("Profile refresh failed: {}", e);
            if !output.is_quiet() {
                eprintln!("⚠ Could not refresh profile: {}", e.user_message());
            }
        }
    }

    if let Some(user) = holder.user() {
        output.print_user(user);
    }
    Ok(())
}

/// Fetch the profile from the server and store it
pub async fn refresh(ctx: &Context, output: &Output) -> Result<()> {
    let mut holder = ctx.profile();
    let user = holder
        .refresh()
        .await
        .map_err(|e| failure("Failed to load profile", e))?;
    output.success(&format!("Profile refreshed for {}", user.username));
    Ok(())
}

/// Edit profile fields
///
/// With no edits given, each field is prompted for with the current value
/// as default.
pub async fn edit(ctx: &Context, edits: ProfileEdits, output: &Output) -> Result<()> {
    let mut holder = ctx.profile();
    holder
        .activate()
        .map_err(|e| failure("Failed to load profile", e))?;

    let mut draft = holder.draft().clone();
    if edits.is_empty() {
        if !output.should_prompt() {
            anyhow::bail!("No changes given. Use --username, --email, --birthday or --password.");
        }
        draft.username = prompt_with_default("Username", &draft.username)?;
        draft.email = prompt_with_default("Email", &draft.email)?;
        draft.birthday = prompt_with_default("Birthday (YYYY-MM-DD)", &draft.birthday)?;
        if confirm("Change password?")? {
            draft.password = password_or_prompt(None, true)?;
        }
    } else {
        let change_password = edits.change_password && edits.password.is_none();
        edits.apply_to(&mut draft);
        if change_password {
            draft.password = password_or_prompt(None, true)?;
        }
    }

    match holder.update(draft).await {
        Ok(Some(user)) => {
            let name = user.username.clone();
            output.success(&format!("Profile updated for {}", name));
        }
        Ok(None) => output.message("Nothing to update."),
        Err(Error::Api(ApiError::Validation(msg))) => {
            anyhow::bail!("Invalid profile: {}", msg);
        }
        Err(e) => return Err(failure("Failed to update profile", e)),
    }
    Ok(())
}

/// Delete the account and the stored session
pub async fn delete(ctx: &Context, yes: bool, output: &Output) -> Result<()> {
    let mut holder = ctx.profile();
    holder
        .activate()
        .map_err(|e| failure("Failed to load profile", e))?;

    let username = holder
        .user()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    if !yes && output.should_prompt() {
        let prompt = format!("Permanently delete the account '{}'?", username);
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    } else if !yes {
        anyhow::bail!("Refusing to delete the account without --yes");
    }

    let status = holder
        .delete_account()
        .await
        .map_err(|e| failure("Failed to delete account", e))?;

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({"status": "success", "message": status, "username": username})
        );
    } else {
        output.success(&format!("Account {} deleted", username));
    }
    Ok(())
}
