//! API error taxonomy
//!
//! Every failed remote call is normalized into an `ApiError` at the client
//! boundary. Validation failures use the same type so callers surface them
//! the same way, but they are raised before any request is made.

use thiserror::Error;

/// Message shown for failures the user cannot do anything specific about
pub const GENERIC_FAILURE: &str = "Something bad happened; please try again later.";

/// Errors produced by the remote API client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (DNS, connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// 401: token missing, invalid or expired, or bad credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 404: unknown user, title, director or genre
    #[error("Not found: {0}")]
    NotFound(String),

    /// 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected schema
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Input failed client-side validation; no request was sent
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    /// Classify a non-success HTTP status with the response body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| default_message(status));
        match status {
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }

    /// Whether the stored session should be considered stale
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Server { .. } | ApiError::Decode(_) => {
                GENERIC_FAILURE.to_string()
            }
            ApiError::Unauthorized(_) => {
                "Your session is invalid or has expired. Please log in again.".to_string()
            }
            ApiError::NotFound(msg)
            | ApiError::Validation(msg)
            | ApiError::Rejected { message: msg, .. } => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), "")
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pull a human-readable message out of an error body
///
/// The API answers with either plain text, `{"message": ...}`,
/// `{"error": ...}` or `{"errors": [{"msg": ...}]}` depending on the route.
fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v,
        Err(_) => return Some(body.to_string()),
    };

    match &value {
        serde_json::Value::String(s) => return Some(s.clone()),
        serde_json::Value::Object(map) => {
            for key in ["message", "error"] {
                if let Some(serde_json::Value::String(s)) = map.get(key) {
                    return Some(s.clone());
                }
            }
            if let Some(serde_json::Value::Array(errors)) = map.get("errors") {
                let msgs: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !msgs.is_empty() {
                    return Some(msgs.join("; "));
                }
            }
        }
        _ => {}
    }

    None
}

fn default_message(status: u16) -> String {
    match status {
        401 => "authentication required".to_string(),
        404 => "resource does not exist".to_string(),
        _ => format!("HTTP status {}", status),
    }
}
