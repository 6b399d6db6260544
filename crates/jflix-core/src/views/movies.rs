//! Movie catalogue holder

use std::sync::Arc;

use tracing::{debug, info};

use super::require_session;
use crate::api::MovieApi;
use crate::error::Result;
use crate::favorites::{FavoriteChange, FavoritesSync};
use crate::models::{Director, Genre, Movie};
use crate::session::SessionStore;

/// State behind the movie list screen
pub struct MovieListHolder<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    favorites: FavoritesSync<A, S>,
    movies: Vec<Movie>,
}

impl<A: MovieApi, S: SessionStore> MovieListHolder<A, S> {
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        let favorites = FavoritesSync::new(api.clone(), store.clone());
        Self {
            api,
            store,
            favorites,
            movies: Vec::new(),
        }
    }

    /// Load favorites from the session, then fetch the catalogue
    ///
    /// Fails with `Error::Unauthenticated` when no session is stored.
    pub async fn activate(&mut self) -> Result<()> {
        let session = require_session(self.store.as_ref())?;
        self.favorites.reload()?;

        self.movies = self.api.list_movies(&session.auth()).await?;
        info!(
            "Loaded {} movies ({} favorites)",
            self.movies.len(),
            self.favorites.projection().len()
        );
        Ok(())
    }

    /// Movies from the last catalogue load
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Find a loaded movie by id
    pub fn find(&self, movie_id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == movie_id)
    }

    /// Find a loaded movie by id or case-insensitive title
    pub fn lookup(&self, id_or_title: &str) -> Option<&Movie> {
        self.find(id_or_title).or_else(|| {
            self.movies
                .iter()
                .find(|m| m.title.eq_ignore_ascii_case(id_or_title))
        })
    }

    /// Whether the user has favorited `movie_id`
    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorites.is_favorite(movie_id)
    }

    /// Favorite ids, in the order they were added
    pub fn favorite_ids(&self) -> &[String] {
        self.favorites.projection()
    }

    /// Loaded movies that are favorites, in favorites order
    ///
    /// Ids with no matching movie in the catalogue are skipped.
    pub fn favorite_movies(&self) -> Vec<&Movie> {
        self.favorites
            .projection()
            .iter()
            .filter_map(|id| self.find(id))
            .collect()
    }

    /// Toggle a favorite through the synchronizer
    pub async fn toggle_favorite(&mut self, movie_id: &str) -> Result<FavoriteChange> {
        self.favorites.toggle_favorite(movie_id).await
    }

    /// Fetch a single movie by title
    pub async fn movie(&self, title: &str) -> Result<Movie> {
        let session = require_session(self.store.as_ref())?;
        debug!("Fetching movie {}", title);
        Ok(self.api.get_movie(&session.auth(), title).await?)
    }

    /// Fetch director details
    pub async fn director(&self, name: &str) -> Result<Director> {
        let session = require_session(self.store.as_ref())?;
        debug!("Fetching director {}", name);
        Ok(self.api.get_director(&session.auth(), name).await?)
    }

    /// Fetch genre details
    pub async fn genre(&self, name: &str) -> Result<Genre> {
        let session = require_session(self.store.as_ref())?;
        debug!("Fetching genre {}", name);
        Ok(self.api.get_genre(&session.auth(), name).await?)
    }

    /// Clear the session and drop everything loaded
    pub fn logout(&mut self) -> Result<()> {
        crate::auth::logout(self.store.as_ref())?;
        self.movies.clear();
        self.favorites.reload()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{movie, FakeApi, TOKEN};
    use crate::api::ApiError;
    use crate::error::Error;
    use crate::models::UserRecord;
    use crate::session::MemorySessionStore;

    type Holder = MovieListHolder<FakeApi, MemorySessionStore>;

    fn setup(favorites: &[&str]) -> (Arc<FakeApi>, Arc<MemorySessionStore>, Holder) {
        let mut user = UserRecord::new("alice");
        user.favorite_movies = favorites.iter().map(|s| s.to_string()).collect();

        let api = Arc::new(FakeApi::new(user.clone()).with_movies(vec![
            movie("m1", "Alien"),
            movie("m2", "Brazil"),
            movie("m3", "Casablanca"),
        ]));
        let store = Arc::new(MemorySessionStore::with_session(user, TOKEN));
        let holder = MovieListHolder::new(api.clone(), store.clone());
        (api, store, holder)
    }

    #[tokio::test]
    async fn test_activate_loads_favorites_then_movies() {
        let (api, _store, mut holder) = setup(&["m3", "m1"]);
        holder.activate().await.unwrap();

        assert_eq!(holder.movies().len(), 3);
        assert!(holder.is_favorite("m1"));
        assert!(!holder.is_favorite("m2"));

        let titles: Vec<&str> = holder
            .favorite_movies()
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Casablanca", "Alien"]);
        assert_eq!(api.calls(), vec!["list_movies"]);
    }

    #[tokio::test]
    async fn test_activate_requires_session() {
        let api = Arc::new(FakeApi::new(UserRecord::new("alice")));
        let store = Arc::new(MemorySessionStore::new());
        store.save_token(TOKEN).unwrap();
        let mut holder = MovieListHolder::new(api.clone(), store);

        let err = holder.activate().await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_activate_surfaces_api_failure() {
        let (api, _store, mut holder) = setup(&[]);
        api.fail("list_movies", ApiError::Unauthorized("jwt expired".to_string()));

        let err = holder.activate().await.unwrap_err();
        assert!(err.needs_login());
        assert!(holder.movies().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_updates_predicate() {
        let (_api, store, mut holder) = setup(&[]);
        holder.activate().await.unwrap();

        holder.toggle_favorite("m2").await.unwrap();
        assert!(holder.is_favorite("m2"));
        assert_eq!(holder.favorite_ids(), ["m2".to_string()].as_slice());
        assert_eq!(
            store.load().unwrap().unwrap().favorite_movies,
            holder.favorite_ids()
        );
    }

    #[tokio::test]
    async fn test_lookup_by_id_or_title() {
        let (_api, _store, mut holder) = setup(&[]);
        holder.activate().await.unwrap();

        assert_eq!(holder.lookup("m2").unwrap().title, "Brazil");
        assert_eq!(holder.lookup("casablanca").unwrap().id, "m3");
        assert!(holder.lookup("Zodiac").is_none());
    }

    #[tokio::test]
    async fn test_detail_fetches() {
        let (api, _store, holder) = setup(&[]);

        assert_eq!(holder.movie("Alien").await.unwrap().id, "m1");
        assert_eq!(holder.director("Ridley Scott").await.unwrap().name, "Ridley Scott");
        assert_eq!(holder.genre("Horror").await.unwrap().name, "Horror");
        assert!(matches!(
            holder.movie("Zodiac").await.unwrap_err(),
            Error::Api(ApiError::NotFound(_))
        ));
        assert_eq!(api.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let (_api, store, mut holder) = setup(&["m1"]);
        holder.activate().await.unwrap();

        holder.logout().unwrap();
        assert!(holder.movies().is_empty());
        assert!(!holder.is_favorite("m1"));
        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());
    }
}
