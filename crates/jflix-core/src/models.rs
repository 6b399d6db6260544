//! Data models for J-Flix
//!
//! Defines the user record cached in the session, the movie view projection
//! and the director/genre detail records. Field names on the wire follow the
//! API: user records and projections use PascalCase keys, raw movie payloads
//! use camelCase.

use serde::{Deserialize, Deserializer, Serialize};

/// Genre name used when a movie arrives without any genre
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The current user as returned by the API and cached in the session store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    /// Server-side identifier, kept when the API sends one
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Birthday as sent by the API (usually an RFC 3339 timestamp)
    #[serde(default)]
    pub birthday: Option<String>,
    /// Favorite movie ids, in insertion order, without duplicates
    #[serde(default, deserialize_with = "deserialize_unique_ids")]
    pub favorite_movies: Vec<String>,
}

impl UserRecord {
    /// Create a record with just a username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Check whether a movie is in the favorites list
    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorite_movies.iter().any(|id| id == movie_id)
    }

    /// Append a movie id unless it is already present
    ///
    /// Returns true if the list changed.
    pub fn add_favorite(&mut self, movie_id: &str) -> bool {
        if self.is_favorite(movie_id) {
            return false;
        }
        self.favorite_movies.push(movie_id.to_string());
        true
    }

    /// Remove a movie id if present
    ///
    /// Returns true if the list changed.
    pub fn remove_favorite(&mut self, movie_id: &str) -> bool {
        let before = self.favorite_movies.len();
        self.favorite_movies.retain(|id| id != movie_id);
        before != self.favorite_movies.len()
    }

    /// Birthday reduced to its `YYYY-MM-DD` date part
    pub fn birthday_date(&self) -> Option<String> {
        self.birthday
            .as_deref()
            .map(|b| b.split('T').next().unwrap_or(b).to_string())
            .filter(|b| !b.is_empty())
    }
}

fn deserialize_unique_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut ids: Vec<String> = Vec::new();
    for id in raw.unwrap_or_default() {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Director as embedded in a movie projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DirectorSummary {
    pub name: String,
    pub bio: String,
}

/// Genre as embedded in a movie projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GenreSummary {
    pub name: String,
    pub description: String,
}

/// A movie as presented to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub director: DirectorSummary,
    pub genre: GenreSummary,
}

/// Raw movie payload returned by `/movies` and `/movies/{title}`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMovie {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub director: Option<ApiPerson>,
    #[serde(default)]
    pub genres: Vec<ApiGenreRef>,
    /// Older payloads carry a single genre object instead of a list
    #[serde(default)]
    pub genre: Option<ApiGenreRef>,
}

/// Director reference inside a raw movie payload
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ApiPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Genre reference inside a raw movie payload
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct ApiGenreRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ApiMovie> for Movie {
    fn from(raw: ApiMovie) -> Self {
        let director = raw.director.unwrap_or_default();

        // First listed genre wins; fall back to the legacy single genre
        let genre_name = raw
            .genres
            .into_iter()
            .next()
            .or(raw.genre)
            .and_then(|g| g.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Self {
            id: raw.id,
            title: raw.title,
            year: raw.release_year,
            image_path: raw.image_url,
            description: raw.description,
            director: DirectorSummary {
                name: director.name.unwrap_or_default(),
                bio: director.bio.unwrap_or_default(),
            },
            genre: GenreSummary {
                name: genre_name,
                description: String::new(),
            },
        }
    }
}

/// Director details from `/movies/directors/{name}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all(serialize = "PascalCase"))]
pub struct Director {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Bio", default)]
    pub bio: String,
    #[serde(alias = "Birth", default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(alias = "Death", default, skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}

/// Genre details from `/movies/genres/{name}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all(serialize = "PascalCase"))]
pub struct Genre {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description", default)]
    pub description: String,
}
