//! reqwest-backed implementation of `MovieApi`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use super::types::{AuthContext, LoginRequest, LoginResponse, RegisterRequest, UserUpdate};
use super::{ApiResult, MovieApi};
use crate::config::Config;
use crate::models::{ApiMovie, Director, Genre, Movie, UserRecord};

/// HTTP client for the J-Flix API
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Validation(format!("invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Validation(format!(
                "API URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jflix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Base URL requests are built from
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder, auth: &AuthContext) -> RequestBuilder {
        builder.bearer_auth(&auth.token)
    }

    /// Send a request and return the raw body of a successful response
    async fn send_raw(&self, builder: RequestBuilder, operation: &str) -> ApiResult<String> {
        let response = builder.send().await.map_err(|e| {
            warn!("{} failed: no response: {}", operation, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &body);
            warn!("{} failed with status {}: {}", operation, status, err);
            return Err(err);
        }

        debug!("{} succeeded ({} bytes)", operation, body.len());
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> ApiResult<T> {
        let body = self.send_raw(builder, operation).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("{} returned a malformed payload: {}", operation, e);
            ApiError::Decode(format!("{}: {}", operation, e))
        })
    }
}

#[async_trait]
impl MovieApi for HttpApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserRecord> {
        let builder = self.client.post(self.endpoint(&["users"])).json(request);
        self.send_json(builder, "register").await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self.client.post(self.endpoint(&["login"])).json(request);
        self.send_json(builder, "login").await
    }

    async fn list_movies(&self, auth: &AuthContext) -> ApiResult<Vec<Movie>> {
        let builder = self.authorized(self.client.get(self.endpoint(&["movies"])), auth);
        let raw: Vec<ApiMovie> = self.send_json(builder, "list movies").await?;
        Ok(raw.into_iter().map(Movie::from).collect())
    }

    async fn get_movie(&self, auth: &AuthContext, title: &str) -> ApiResult<Movie> {
        let builder = self.authorized(self.client.get(self.endpoint(&["movies", title])), auth);
        let raw: ApiMovie = self.send_json(builder, "get movie").await?;
        Ok(raw.into())
    }

    async fn get_director(&self, auth: &AuthContext, name: &str) -> ApiResult<Director> {
        let url = self.endpoint(&["movies", "directors", name]);
        let builder = self.authorized(self.client.get(url), auth);
        self.send_json(builder, "get director").await
    }

    async fn get_genre(&self, auth: &AuthContext, name: &str) -> ApiResult<Genre> {
        let url = self.endpoint(&["movies", "genres", name]);
        let builder = self.authorized(self.client.get(url), auth);
        self.send_json(builder, "get genre").await
    }

    async fn get_user(&self, auth: &AuthContext) -> ApiResult<UserRecord> {
        let url = self.endpoint(&["users", &auth.username]);
        let builder = self.authorized(self.client.get(url), auth);
        self.send_json(builder, "get user").await
    }

    async fn add_favorite(&self, auth: &AuthContext, movie_id: &str) -> ApiResult<UserRecord> {
        let url = self.endpoint(&["users", &auth.username, "movies", movie_id]);
        let builder = self
            .authorized(self.client.post(url), auth)
            .json(&serde_json::json!({}));
        self.send_json(builder, "add favorite").await
    }

    async fn remove_favorite(
        &self,
        auth: &AuthContext,
        movie_id: &str,
    ) -> ApiResult<UserRecord> {
        let url = self.endpoint(&["users", &auth.username, "movies", movie_id]);
        let builder = self.authorized(self.client.delete(url), auth);
        self.send_json(builder, "remove favorite").await
    }

    async fn edit_user(&self, auth: &AuthContext, update: &UserUpdate) -> ApiResult<UserRecord> {
        let url = self.endpoint(&["users", &auth.username]);
        let builder = self.authorized(self.client.put(url), auth).json(update);
        self.send_json(builder, "edit user").await
    }

    async fn delete_user(&self, auth: &AuthContext) -> ApiResult<String> {
        let url = self.endpoint(&["users", &auth.username]);
        let builder = self.authorized(self.client.delete(url), auth);
        self.send_raw(builder, "delete user").await
    }
}
