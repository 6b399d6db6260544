//! Register, login and logout handlers

use anyhow::Result;

use jflix_core::auth;
use jflix_core::{Credentials, RegistrationForm};

use super::{failure, Context};
use crate::output::{Output, OutputFormat};
use crate::prompt::password_or_prompt;

/// Create an account
pub async fn register(
    ctx: &Context,
    username: String,
    email: String,
    birthday: Option<String>,
    password: Option<String>,
    output: &Output,
) -> Result<()> {
    // A prompted password is confirmed by the prompt itself
    let password = password_or_prompt(password, true)?;

    let form = RegistrationForm {
        username,
        confirm_password: None,
        password,
        email,
        birthday,
    };

    let user = auth::register(ctx.api.as_ref(), &form)
        .await
        .map_err(|e| failure("Registration failed", e))?;

    match output.format {
        OutputFormat::Json => output.success(&format!("Registered {}", user.username)),
        OutputFormat::Quiet => {}
        OutputFormat::Human => {
            output.success(&format!("User {} registered successfully!", user.username));
            println!("Log in with: jflix login {}", user.username);
        }
    }
    Ok(())
}

/// Log in and store the session
pub async fn login(
    ctx: &Context,
    username: String,
    password: Option<String>,
    output: &Output,
) -> Result<()> {
    let password = password_or_prompt(password, false)?;
    let credentials = Credentials::new(username, password);

    let session = auth::login(ctx.api.as_ref(), ctx.store.as_ref(), &credentials)
        .await
        .map_err(|e| failure("Login failed", e))?;

    output.success(&format!("Logged in as {}", session.user.username));
    Ok(())
}

/// Forget the stored session
pub fn logout(ctx: &Context, output: &Output) -> Result<()> {
    auth::logout(ctx.store.as_ref()).map_err(|e| failure("Logout failed", e))?;
    output.success("Logged out");
    Ok(())
}
