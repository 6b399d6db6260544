//! Status command handler

use anyhow::Result;

use jflix_core::SessionStore;

use super::{failure, Context};
use crate::output::{Output, OutputFormat};

/// Show the API endpoint and who is logged in
pub fn show(ctx: &Context, output: &Output) -> Result<()> {
    let session = ctx
        .store
        .session()
        .map_err(|e| failure("Failed to read session", e.into()))?;
    let user = session.as_ref().map(|s| &s.user);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": ctx.api.base_url().as_str(),
                    "request_timeout_secs": ctx.config.request_timeout_secs,
                    "data_dir": ctx.store.dir(),
                    "logged_in": session.is_some(),
                    "username": user.map(|u| u.username.as_str()),
                    "favorites": user.map(|u| u.favorite_movies.len()).unwrap_or(0)
                })
            );
        }
        OutputFormat::Quiet => {
            if let Some(user) = user {
                println!("{}", user.username);
            }
        }
        OutputFormat::Human => {
            println!("J-Flix Status");
            println!("=============");
            println!();
            println!("API:      {}", ctx.api.base_url());
            println!("Timeout:  {}s", ctx.config.request_timeout_secs);
            println!("Storage:  {}", ctx.store.dir().display());
            println!();
            match user {
                Some(user) => {
                    println!("Logged in as {}", user.username);
                    println!("Favorites: {}", user.favorite_movies.len());
                }
                None => println!("Not logged in. Run `jflix login <username>`."),
            }
        }
    }

    Ok(())
}
