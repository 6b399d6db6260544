//! J-Flix Core Library
//!
//! This crate provides the core functionality for J-Flix, a movie catalogue
//! client. All data of record lives behind the J-Flix REST API; this crate
//! keeps a local session in step with it.
//!
//! # Architecture
//!
//! - **API client**: one HTTP round trip per operation, errors normalized
//! - **Session store**: the current user record and bearer token, on disk
//! - **Favorites synchronizer**: remote first, then session, then projection
//! - **View-state holders**: movie list and profile screens
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let api = Arc::new(HttpApi::from_config(&config)?);
//! let store = Arc::new(FileSessionStore::from_config(&config));
//!
//! auth::login(api.as_ref(), store.as_ref(), &Credentials::new("alice", "pw")).await?;
//!
//! let mut movies = MovieListHolder::new(api, store);
//! movies.activate().await?;
//! movies.toggle_favorite(&movies.movies()[0].id.clone()).await?;
//! ```
//!
//! # Modules
//!
//! - `api`: `MovieApi` trait, reqwest client and error taxonomy
//! - `session`: persisted session store
//! - `favorites`: favorites synchronizer
//! - `views`: movie list and profile holders
//! - `auth`: registration, login, logout
//! - `models`: user record, movie projection, director and genre
//! - `config`: application configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod session;
pub mod views;

pub use api::{ApiError, AuthContext, HttpApi, MovieApi, UserUpdate};
pub use auth::{Credentials, RegistrationForm};
pub use config::Config;
pub use error::{Error, Result};
pub use favorites::{FavoriteChange, FavoritesSync};
pub use models::{Director, Genre, Movie, UserRecord};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
pub use views::{MovieListHolder, ProfileDraft, ProfileHolder};
