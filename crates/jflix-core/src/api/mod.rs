//! Remote API client
//!
//! `MovieApi` is the contract the rest of the crate is written against;
//! `HttpApi` implements it over HTTPS with reqwest. Each call is exactly one
//! round trip. Nothing here reads or writes the session store, retries or
//! caches.

mod error;
mod http;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use error::{ApiError, GENERIC_FAILURE};
pub use http::HttpApi;
pub use types::{AuthContext, LoginRequest, LoginResponse, RegisterRequest, UserUpdate};

use async_trait::async_trait;

use crate::models::{Director, Genre, Movie, UserRecord};

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Operations offered by the J-Flix API
///
/// User-scoped calls take an `AuthContext`; the username in it always comes
/// from the persisted session.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `POST /users`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserRecord>;

    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// `GET /movies`
    async fn list_movies(&self, auth: &AuthContext) -> ApiResult<Vec<Movie>>;

    /// `GET /movies/{title}`
    async fn get_movie(&self, auth: &AuthContext, title: &str) -> ApiResult<Movie>;

    /// `GET /movies/directors/{name}`
    async fn get_director(&self, auth: &AuthContext, name: &str) -> ApiResult<Director>;

    /// `GET /movies/genres/{name}`
    async fn get_genre(&self, auth: &AuthContext, name: &str) -> ApiResult<Genre>;

    /// `GET /users/{username}`
    async fn get_user(&self, auth: &AuthContext) -> ApiResult<UserRecord>;

    /// `POST /users/{username}/movies/{movie_id}`
    async fn add_favorite(&self, auth: &AuthContext, movie_id: &str) -> ApiResult<UserRecord>;

    /// `DELETE /users/{username}/movies/{movie_id}`
    async fn remove_favorite(&self, auth: &AuthContext, movie_id: &str)
        -> ApiResult<UserRecord>;

    /// `PUT /users/{username}`
    async fn edit_user(&self, auth: &AuthContext, update: &UserUpdate) -> ApiResult<UserRecord>;

    /// `DELETE /users/{username}`, returning the server's status text
    async fn delete_user(&self, auth: &AuthContext) -> ApiResult<String>;
}
