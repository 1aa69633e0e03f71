//! Email/password sign-in, account creation and sign-out.

use once_cell::sync::Lazy;
use regex::Regex;

use super::session::SessionStore;
use crate::api::{ApiClient, ApiError};
use crate::models::{LoginRequest, SignupRequest};
use crate::traits::TokenStoreError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Loose shape check for an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("login failed: {0}")]
    Login(#[source] ApiError),

    #[error("sign up failed: {0}")]
    SignUp(#[source] ApiError),

    #[error("Invalid token from server")]
    MissingToken,

    #[error("could not store session: {0}")]
    Storage(#[from] TokenStoreError),
}

impl AuthFlowError {
    pub fn user_message(&self) -> String {
        match self {
            AuthFlowError::Login(ApiError::Server { status, message })
                if message.trim().is_empty() && (*status == 401 || *status == 400) =>
            {
                "Invalid credentials".to_string()
            }
            AuthFlowError::Login(e @ ApiError::Server { .. }) => e.user_message(),
            AuthFlowError::Login(_) => "Invalid credentials".to_string(),
            AuthFlowError::SignUp(e @ ApiError::Server { .. }) => e.user_message(),
            AuthFlowError::SignUp(_) => "Something went wrong".to_string(),
            AuthFlowError::Storage(_) => {
                "Signed in, but the session could not be saved on this device.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Log in and store the returned token.
pub async fn login(
    api: &ApiClient,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<(), AuthFlowError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthFlowError::MissingFields);
    }

    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .map_err(AuthFlowError::Login)?;

    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AuthFlowError::MissingToken)?;
    session.set(&token).await?;
    tracing::info!("Signed in as {}", email);
    Ok(())
}

/// Create an account. The caller then sends the user to log in.
pub async fn sign_up(
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AuthFlowError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthFlowError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(AuthFlowError::InvalidEmail);
    }

    api.sign_up(&SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
    .await
    .map_err(AuthFlowError::SignUp)?;
    tracing::info!("Created account for {}", email);
    Ok(())
}

/// Forget the stored session.
pub async fn logout(session: &SessionStore) {
    session.clear().await;
    tracing::info!("Signed out");
}
