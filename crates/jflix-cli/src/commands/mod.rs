//! Command handlers

pub mod account;
pub mod config;
pub mod movies;
pub mod profile;
pub mod status;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::debug;

use jflix_core::{
    Config, Error, FileSessionStore, HttpApi, MovieListHolder, ProfileHolder,
};

/// Everything a command needs: configuration, API client and session store
pub struct Context {
    pub config: Config,
    pub api: Arc<HttpApi>,
    pub store: Arc<FileSessionStore>,
}

impl Context {
    pub fn new(config: Config) -> Result<Self> {
        let api = HttpApi::from_config(&config).context("Failed to create API client")?;
        let store = FileSessionStore::from_config(&config);
        Ok(Self {
            config,
            api: Arc::new(api),
            store: Arc::new(store),
        })
    }

    pub fn movie_list(&self) -> MovieListHolder<HttpApi, FileSessionStore> {
        MovieListHolder::new(self.api.clone(), self.store.clone())
    }

    pub fn profile(&self) -> ProfileHolder<HttpApi, FileSessionStore> {
        ProfileHolder::new(self.api.clone(), self.store.clone())
    }
}

/// Turn a core error into a message for the terminal
pub fn failure(action: &str, err: Error) -> anyhow::Error {
    debug!("{}: {:?}", action, err);
    anyhow::anyhow!(describe(action, &err))
}

fn describe(action: &str, err: &Error) -> String {
    let mut message = format!("{}: {}", action, err.user_message());

    match err {
        Error::Api(api) if api.is_unauthorized() => {
            message.push_str("\nRun `jflix login` to sign in again.");
        }
        Error::Session(session) => {
            if let Some(suggestion) = session.recovery_suggestion() {
                message.push('\n');
                message.push_str(suggestion);
            }
        }
        _ => {}
    }

    message
}
