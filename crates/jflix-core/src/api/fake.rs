//! In-memory `MovieApi` used by unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ApiError, ApiResult, AuthContext, LoginRequest, LoginResponse, MovieApi, RegisterRequest,
    UserUpdate,
};
use crate::models::{Director, DirectorSummary, Genre, GenreSummary, Movie, UserRecord};

pub(crate) const TOKEN: &str = "test-token";
pub(crate) const PASSWORD: &str = "hunter2";

type Hook = Box<dyn FnMut() + Send>;

#[derive(Default)]
struct FakeState {
    user: UserRecord,
    movies: Vec<Movie>,
    failures: HashMap<&'static str, ApiError>,
    calls: Vec<String>,
    updates: Vec<UserUpdate>,
    deleted: bool,
    before_reply: Option<Hook>,
}

/// Fake server holding one user account and a movie catalogue
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub(crate) fn new(user: UserRecord) -> Self {
        Self {
            state: Mutex::new(FakeState {
                user,
                ..FakeState::default()
            }),
        }
    }

    pub(crate) fn with_movies(self, movies: Vec<Movie>) -> Self {
        self.lock().movies = movies;
        self
    }

    /// Make every call of `operation` fail with `error`
    pub(crate) fn fail(&self, operation: &'static str, error: ApiError) {
        self.lock().failures.insert(operation, error);
    }

    pub(crate) fn recover(&self, operation: &'static str) {
        self.lock().failures.remove(operation);
    }

    /// Calls made so far, formatted as `operation[ argument]`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub(crate) fn updates(&self) -> Vec<UserUpdate> {
        self.lock().updates.clone()
    }

    /// Run `hook` inside every call, before the fake answers
    pub(crate) fn before_reply(&self, hook: impl FnMut() + Send + 'static) {
        self.lock().before_reply = Some(Box::new(hook));
    }

    pub(crate) fn server_user(&self) -> UserRecord {
        self.lock().user.clone()
    }

    pub(crate) fn is_deleted(&self) -> bool {
        self.lock().deleted
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn begin(&self, operation: &'static str, arg: Option<&str>) -> ApiResult<()> {
        let mut state = self.lock();
        if let Some(hook) = state.before_reply.as_mut() {
            hook();
        }
        state.calls.push(match arg {
            Some(a) => format!("{} {}", operation, a),
            None => operation.to_string(),
        });
        match state.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn check_auth(&self, auth: &AuthContext) -> ApiResult<()> {
        let state = self.lock();
        if auth.token != TOKEN || state.deleted {
            return Err(ApiError::Unauthorized("invalid token".to_string()));
        }
        if auth.username != state.user.username {
            return Err(ApiError::NotFound(format!("{} not found", auth.username)));
        }
        Ok(())
    }
}

pub(crate) fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        year: Some(2000),
        image_path: None,
        description: Some(format!("{} synopsis", title)),
        director: DirectorSummary {
            name: "Some Director".to_string(),
            bio: String::new(),
        },
        genre: GenreSummary {
            name: "Drama".to_string(),
            description: String::new(),
        },
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<UserRecord> {
        self.begin("register", Some(&request.username))?;
        let mut user = UserRecord::new(request.username.clone());
        user.email = request.email.clone();
        user.birthday = request.birthday.clone();
        Ok(user)
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.begin("login", Some(&request.username))?;
        let state = self.lock();
        if request.username != state.user.username || request.password != PASSWORD {
            return Err(ApiError::Unauthorized(
                "Incorrect username or password.".to_string(),
            ));
        }
        Ok(LoginResponse {
            user: state.user.clone(),
            token: TOKEN.to_string(),
        })
    }

    async fn list_movies(&self, auth: &AuthContext) -> ApiResult<Vec<Movie>> {
        self.begin("list_movies", None)?;
        self.check_auth(auth)?;
        Ok(self.lock().movies.clone())
    }

    async fn get_movie(&self, auth: &AuthContext, title: &str) -> ApiResult<Movie> {
        self.begin("get_movie", Some(title))?;
        self.check_auth(auth)?;
        self.lock()
            .movies
            .iter()
            .find(|m| m.title == title)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{} not found", title)))
    }

    async fn get_director(&self, auth: &AuthContext, name: &str) -> ApiResult<Director> {
        self.begin("get_director", Some(name))?;
        self.check_auth(auth)?;
        Ok(Director {
            name: name.to_string(),
            bio: "Bio".to_string(),
            birth: None,
            death: None,
        })
    }

    async fn get_genre(&self, auth: &AuthContext, name: &str) -> ApiResult<Genre> {
        self.begin("get_genre", Some(name))?;
        self.check_auth(auth)?;
        Ok(Genre {
            name: name.to_string(),
            description: "Description".to_string(),
        })
    }

    async fn get_user(&self, auth: &AuthContext) -> ApiResult<UserRecord> {
        self.begin("get_user", Some(&auth.username))?;
        self.check_auth(auth)?;
        Ok(self.lock().user.clone())
    }

    async fn add_favorite(&self, auth: &AuthContext, movie_id: &str) -> ApiResult<UserRecord> {
        self.begin("add_favorite", Some(movie_id))?;
        self.check_auth(auth)?;
        let mut state = self.lock();
        state.user.add_favorite(movie_id);
        Ok(state.user.clone())
    }

    async fn remove_favorite(
        &self,
        auth: &AuthContext,
        movie_id: &str,
    ) -> ApiResult<UserRecord> {
        self.begin("remove_favorite", Some(movie_id))?;
        self.check_auth(auth)?;
        let mut state = self.lock();
        state.user.remove_favorite(movie_id);
        Ok(state.user.clone())
    }

    async fn edit_user(&self, auth: &AuthContext, update: &UserUpdate) -> ApiResult<UserRecord> {
        self.begin("edit_user", None)?;
        self.check_auth(auth)?;
        let mut state = self.lock();
        state.updates.push(update.clone());
        if let Some(ref username) = update.username {
            state.user.username = username.clone();
        }
        if let Some(ref email) = update.email {
            state.user.email = email.clone();
        }
        if let Some(ref birthday) = update.birthday {
            state.user.birthday = Some(birthday.clone());
        }
        Ok(state.user.clone())
    }

    async fn delete_user(&self, auth: &AuthContext) -> ApiResult<String> {
        self.begin("delete_user", Some(&auth.username))?;
        self.check_auth(auth)?;
        let mut state = self.lock();
        state.deleted = true;
        Ok(format!("{} was deleted.", state.user.username))
    }
}
