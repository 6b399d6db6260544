//! Crate-level error type

use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

/// Errors surfaced by the synchronizer, holders and auth flows
#[derive(Error, Debug)]
pub enum Error {
    /// The remote call failed or input was rejected before sending
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The local session could not be read or written
    #[error(transparent)]
    Session(#[from] SessionError),

    /// No complete session (user record and token) is stored
    #[error("Not logged in. Run `jflix login` first.")]
    Unauthenticated,
}

impl Error {
    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(e) => e.user_message(),
            Error::Session(e) => e.to_string(),
            Error::Unauthenticated => self.to_string(),
        }
    }

    /// Whether logging in again is the way out of this error
    pub fn needs_login(&self) -> bool {
        match self {
            Error::Unauthenticated => true,
            Error::Api(e) => e.is_unauthorized(),
            Error::Session(_) => false,
        }
    }
}

/// Result type for crate operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_login() {
        assert!(Error::Unauthenticated.needs_login());
        assert!(Error::from(ApiError::Unauthorized("expired".to_string())).needs_login());
        assert!(!Error::from(ApiError::NotFound("x".to_string())).needs_login());
    }

    #[test]
    fn test_api_errors_display_transparently() {
        let err = Error::from(ApiError::NotFound("Heat not found".to_string()));
        assert_eq!(err.to_string(), "Not found: Heat not found");
        assert_eq!(err.user_message(), "Heat not found");
    }
}
