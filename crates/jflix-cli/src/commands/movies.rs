//! Movie catalogue and favorites handlers

use anyhow::Result;

use jflix_core::{FavoriteChange, Movie, SessionStore};

use super::{failure, Context};
use crate::output::Output;

/// List the catalogue, or only favorites
pub async fn list(ctx: &Context, favorites_only: bool, output: &Output) -> Result<()> {
    let mut holder = ctx.movie_list();
    holder
        .activate()
        .await
        .map_err(|e| failure("Failed to load movies", e))?;

    let movies: Vec<&Movie> = if favorites_only {
        holder.favorite_movies()
    } else {
        holder.movies().iter().collect()
    };

    output.print_movies(&movies, |id| holder.is_favorite(id));
    Ok(())
}

/// Show a single movie by title
pub async fn show(ctx: &Context, title: String, output: &Output) -> Result<()> {
    let holder = ctx.movie_list();
    let movie = holder
        .movie(&title)
        .await
        .map_err(|e| failure("Failed to load movie", e))?;

    let favorite = ctx
        .store
        .load()
        .map_err(|e| failure("Failed to read session", e.into()))?
        .map(|user| user.is_favorite(&movie.id));

    output.print_movie(&movie, favorite);
    Ok(())
}

/// Show director details
pub async fn director(ctx: &Context, name: String, output: &Output) -> Result<()> {
    let director = ctx
        .movie_list()
        .director(&name)
        .await
        .map_err(|e| failure("Failed to load director", e))?;
    output.print_director(&director);
    Ok(())
}

/// Show genre details
pub async fn genre(ctx: &Context, name: String, output: &Output) -> Result<()> {
    let genre = ctx
        .movie_list()
        .genre(&name)
        .await
        .map_err(|e| failure("Failed to load genre", e))?;
    output.print_genre(&genre);
    Ok(())
}

/// Toggle a movie in or out of the favorites
///
/// `movie` may be an id or a title from the catalogue.
pub async fn favorite(ctx: &Context, movie: String, output: &Output) -> Result<()> {
    let mut holder = ctx.movie_list();
    holder
        .activate()
        .await
        .map_err(|e| failure("Failed to load movies", e))?;

    let (movie_id, title) = match holder.lookup(&movie) {
        Some(m) => (m.id.clone(), m.title.clone()),
        None => (movie.clone(), movie.clone()),
    };
    let was_favorite = holder.is_favorite(&movie_id);

    let change = holder.toggle_favorite(&movie_id).await.map_err(|e| {
        let action = if was_favorite {
            "Failed to remove from favorites"
        } else {
            "Failed to add to favorites"
        };
        failure(action, e)
    })?;

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "movie_id": movie_id,
                "favorite": change == FavoriteChange::Added,
                "favorites": holder.favorite_ids()
            })
        );
    } else {
        output.success(&format!("{}: {}", change.message(), title));
    }
    Ok(())
}
