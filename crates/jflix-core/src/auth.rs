//! Registration, login and logout
//!
//! Forms are validated locally first. A validation failure is returned as
//! `ApiError::Validation` and no request is sent.

use chrono::{NaiveDate, SecondsFormat};
use tracing::info;

use crate::api::{ApiError, LoginRequest, MovieApi, RegisterRequest};
use crate::error::Result;
use crate::models::UserRecord;
use crate::session::{Session, SessionStore};

/// Date format accepted for birthdays
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input of the registration form
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    /// Repeated password; checked only when given
    pub confirm_password: Option<String>,
    pub email: String,
    /// `YYYY-MM-DD`
    pub birthday: Option<String>,
}

impl RegistrationForm {
    /// Check the form and build the request body
    pub fn validate(&self) -> Result<RegisterRequest, ApiError> {
        let username = required("Username", &self.username)?;
        let password = required_secret("Password", &self.password)?;
        let email = required("Email", &self.email)?;
        validate_email(&email)?;

        if let Some(ref confirm) = self.confirm_password {
            if confirm != &self.password {
                return Err(ApiError::Validation("Passwords do not match".to_string()));
            }
        }

        let birthday = match self.birthday.as_deref().map(str::trim) {
            Some(b) if !b.is_empty() => Some(birthday_to_api(b)?),
            _ => None,
        };

        Ok(RegisterRequest {
            username,
            password,
            email,
            birthday,
        })
    }
}

/// Input of the login form
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check the credentials and build the request body
    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        Ok(LoginRequest {
            username: required("Username", &self.username)?,
            password: required_secret("Password", &self.password)?,
        })
    }
}

/// Create an account; does not log in
pub async fn register<A: MovieApi>(api: &A, form: &RegistrationForm) -> Result<UserRecord> {
    let request = form.validate()?;
    let user = api.register(&request).await?;
    info!("Registered user {}", user.username);
    Ok(user)
}

/// Log in and replace the stored session with the returned user and token
///
/// On failure the stored session is left untouched.
pub async fn login<A: MovieApi, S: SessionStore>(
    api: &A,
    store: &S,
    credentials: &Credentials,
) -> Result<Session> {
    let request = credentials.validate()?;
    let response = api.login(&request).await?;

    store.replace(&response.user, &response.token)?;
    info!("Logged in as {}", response.user.username);

    Ok(Session {
        user: response.user,
        token: response.token,
    })
}

/// Forget the stored session
pub fn logout<S: SessionStore>(store: &S) -> Result<()> {
    store.clear()?;
    info!("Logged out");
    Ok(())
}

/// Convert a `YYYY-MM-DD` date to the API's timestamp format
///
/// The API stores birthdays as UTC midnight, e.g. `2000-01-01T00:00:00.000Z`.
pub fn birthday_to_api(date: &str) -> Result<String, ApiError> {
    let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        ApiError::Validation(format!(
            "Birthday '{}' is not a valid date (expected YYYY-MM-DD)",
            date
        ))
    })?;

    Ok(parsed
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{}T00:00:00.000Z", parsed)))
}

/// Minimal email shape check; the server does the real validation
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

fn required(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Like `required`, but keeps surrounding whitespace
fn required_secret(field: &str, value: &str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
