//! View-state holders
//!
//! Holders keep the transient, in-memory projections a screen needs and
//! route user actions to the favorites synchronizer or the API client. They
//! own nothing durable: everything they show is either fetched fresh or
//! derived from the persisted session.

mod movies;
mod profile;

pub use movies::MovieListHolder;
pub use profile::{ProfileDraft, ProfileHolder};

use crate::error::{Error, Result};
use crate::session::{Session, SessionStore};

/// Load the stored session or fail with `Error::Unauthenticated`
fn require_session<S: SessionStore>(store: &S) -> Result<Session> {
    store.session()?.ok_or(Error::Unauthenticated)
}
