//! Favorites synchronizer
//!
//! Keeps three copies of the favorites list in agreement: the remote user
//! record, the persisted session record, and the in-memory projection used
//! for display.
//!
//! ## Ordering
//!
//! Local state changes only after the API confirms the change. A failed call
//! leaves the persisted record and the projection exactly as they were, so
//! local and remote never diverge because of an error. Two toggles of the same
//! id must not be in flight at once; `&mut self` on every mutating call keeps
//! that true within one synchronizer.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::MovieApi;
use crate::error::{Error, Result};
use crate::models::UserRecord;
use crate::session::{Session, SessionStore};

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

impl FavoriteChange {
    /// Message shown after a successful toggle
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteChange::Added => "Movie added to favorites",
            FavoriteChange::Removed => "Movie removed from favorites",
        }
    }
}

/// Applies favorite changes remotely, then locally
pub struct FavoritesSync<A, S> {
    api: Arc<A>,
    store: Arc<S>,
    /// Favorite ids as last read from the persisted record
    projection: Vec<String>,
}

impl<A: MovieApi, S: SessionStore> FavoritesSync<A, S> {
    /// Create a synchronizer with an empty projection; call [`reload`](Self::reload)
    pub fn new(api: Arc<A>, store: Arc<S>) -> Self {
        Self {
            api,
            store,
            projection: Vec::new(),
        }
    }

    /// Recompute the projection from the persisted record
    pub fn reload(&mut self) -> Result<&[String]> {
        self.projection = self
            .store
            .load()?
            .map(|user| user.favorite_movies)
            .unwrap_or_default();
        Ok(&self.projection)
    }

    /// Current favorites projection
    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    /// Whether the projection contains `movie_id`
    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.projection.iter().any(|id| id == movie_id)
    }

    /// Add the movie if it is not a favorite, remove it if it is
    ///
    /// Membership is read from the persisted record, not the projection.
    pub async fn toggle_favorite(&mut self, movie_id: &str) -> Result<FavoriteChange> {
        let session = self.require_session()?;

        if session.user.is_favorite(movie_id) {
            self.apply_remove(&session, movie_id).await?;
            Ok(FavoriteChange::Removed)
        } else {
            self.apply_add(&session, movie_id).await?;
            Ok(FavoriteChange::Added)
        }
    }

    /// Add a favorite; adding an existing favorite leaves the list unchanged
    pub async fn add_favorite(&mut self, movie_id: &str) -> Result<()> {
        let session = self.require_session()?;
        self.apply_add(&session, movie_id).await
    }

    /// Remove a favorite
    ///
    /// The remote call is issued even when the id is not stored locally;
    /// local state is then left as it is.
    pub async fn remove_favorite(&mut self, movie_id: &str) -> Result<()> {
        let session = self.require_session()?;
        self.apply_remove(&session, movie_id).await
    }

    /// Set the projection from the record just written
    ///
    /// A record that vanished during the remote call (logout) empties the
    /// projection.
    fn follow_record(&mut self, updated: Option<UserRecord>) -> Result<()> {
        match updated {
            Some(user) => {
                self.projection = user.favorite_movies;
                Ok(())
            }
            None => {
                self.projection.clear();
                Err(Error::Unauthenticated)
            }
        }
    }

    fn require_session(&self) -> Result<Session> {
        self.store.session()?.ok_or(Error::Unauthenticated)
    }

    async fn apply_add(&mut self, session: &Session, movie_id: &str) -> Result<()> {
        if let Err(e) = self.api.add_favorite(&session.auth(), movie_id).await {
            warn!("Failed to add {} to favorites: {}", movie_id, e);
            return Err(e.into());
        }

        let updated = self.store.update(|user| {
            user.add_favorite(movie_id);
        })?;
        self.follow_record(updated)?;

        info!("Added {} to favorites", movie_id);
        Ok(())
    }

    async fn apply_remove(&mut self, session: &Session, movie_id: &str) -> Result<()> {
        if let Err(e) = self.api.remove_favorite(&session.auth(), movie_id).await {
            warn!("Failed to remove {} from favorites: {}", movie_id, e);
            return Err(e.into());
        }

        let updated = self.store.update(|user| {
            user.remove_favorite(movie_id);
        })?;
        self.follow_record(updated)?;

        info!("Removed {} from favorites", movie_id);
        Ok(())
    }
}
