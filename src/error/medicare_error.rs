//! Unified error type for the MediCare client.
//!
//! Every flow has its own error enum close to the code that raises it.
//! `MedicareError` wraps them so the binary and the alert layer can ask one
//! type for a category and a message.

use std::fmt;

use super::category::ErrorCategory;
use crate::api::ApiError;
use crate::auth::{AuthFlowError, IdentityError, OAuthError};
use crate::booking::{BookingError, ReviewError};
use crate::traits::TokenStoreError;

#[derive(Debug)]
pub enum MedicareError {
    /// A single backend call failed.
    Api(ApiError),

    /// Booking confirmation failed.
    Booking(BookingError),

    /// Review submission failed.
    Review(ReviewError),

    /// Login or sign-up failed.
    AuthFlow(AuthFlowError),

    /// Google sign-in failed.
    OAuth(OAuthError),

    /// The session token could not be read or written.
    TokenStore(TokenStoreError),

    /// The session token could not be decoded.
    Identity(IdentityError),

    /// Filesystem or terminal failure.
    Io(std::io::Error),

    /// Missing or invalid configuration.
    Config(String),
}

impl MedicareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MedicareError::Api(err) => err.category(),
            MedicareError::Booking(err) => match err {
                BookingError::NotAuthenticated => ErrorCategory::Auth,
                BookingError::MissingSlotDetail => ErrorCategory::Validation,
                BookingError::AppointmentFailed(api) => api.category(),
                BookingError::SlotNotReserved { .. } => ErrorCategory::Server,
            },
            MedicareError::Review(err) => match err {
                ReviewError::NotAuthenticated => ErrorCategory::Auth,
                ReviewError::Submit(api) => api.category(),
                _ => ErrorCategory::Validation,
            },
            MedicareError::AuthFlow(err) => match err {
                AuthFlowError::MissingFields | AuthFlowError::InvalidEmail => {
                    ErrorCategory::Validation
                }
                AuthFlowError::Login(api) | AuthFlowError::SignUp(api) => api.category(),
                AuthFlowError::MissingToken => ErrorCategory::Decode,
                AuthFlowError::Storage(_) => ErrorCategory::System,
            },
            MedicareError::OAuth(err) => match err {
                OAuthError::NotConfigured => ErrorCategory::Configuration,
                OAuthError::Listener(_) | OAuthError::Browser(_) | OAuthError::Storage(_) => {
                    ErrorCategory::System
                }
                OAuthError::Timeout | OAuthError::Http(_) | OAuthError::Provider(_) => {
                    ErrorCategory::Network
                }
                OAuthError::Denied(_) | OAuthError::InvalidCallback(_) => ErrorCategory::Auth,
                OAuthError::Exchange(api) => api.category(),
                OAuthError::MissingToken => ErrorCategory::Decode,
            },
            MedicareError::TokenStore(_) | MedicareError::Io(_) => ErrorCategory::System,
            MedicareError::Identity(_) => ErrorCategory::Decode,
            MedicareError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether pressing "try again" could help.
    pub fn is_retryable(&self) -> bool {
        match self {
            MedicareError::Api(err) => err.is_retryable(),
            MedicareError::Booking(BookingError::AppointmentFailed(err)) => err.is_retryable(),
            MedicareError::Review(ReviewError::Submit(err)) => err.is_retryable(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            MedicareError::Api(err) => err.user_message(),
            MedicareError::Booking(err) => err.user_message(),
            MedicareError::Review(err) => err.user_message(),
            MedicareError::AuthFlow(err) => err.user_message(),
            MedicareError::OAuth(err) => err.user_message(),
            MedicareError::TokenStore(_) => {
                "Your session could not be accessed on this device.".to_string()
            }
            MedicareError::Identity(_) => "Please sign in again.".to_string(),
            MedicareError::Io(err) => format!("System error: {}", err),
            MedicareError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for MedicareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedicareError::Api(err) => write!(f, "{}", err),
            MedicareError::Booking(err) => write!(f, "{}", err),
            MedicareError::Review(err) => write!(f, "{}", err),
            MedicareError::AuthFlow(err) => write!(f, "{}", err),
            MedicareError::OAuth(err) => write!(f, "{}", err),
            MedicareError::TokenStore(err) => write!(f, "{}", err),
            MedicareError::Identity(err) => write!(f, "{}", err),
            MedicareError::Io(err) => write!(f, "I/O error: {}", err),
            MedicareError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MedicareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MedicareError::Api(err) => Some(err),
            MedicareError::Booking(err) => Some(err),
            MedicareError::Review(err) => Some(err),
            MedicareError::AuthFlow(err) => Some(err),
            MedicareError::OAuth(err) => Some(err),
            MedicareError::TokenStore(err) => Some(err),
            MedicareError::Identity(err) => Some(err),
            MedicareError::Io(err) => Some(err),
            MedicareError::Config(_) => None,
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<ApiError> for MedicareError {
    fn from(err: ApiError) -> Self {
        MedicareError::Api(err)
    }
}

impl From<BookingError> for MedicareError {
    fn from(err: BookingError) -> Self {
        MedicareError::Booking(err)
    }
}

impl From<ReviewError> for MedicareError {
    fn from(err: ReviewError) -> Self {
        MedicareError::Review(err)
    }
}

impl From<AuthFlowError> for MedicareError {
    fn from(err: AuthFlowError) -> Self {
        MedicareError::AuthFlow(err)
    }
}

impl From<OAuthError> for MedicareError {
    fn from(err: OAuthError) -> Self {
        MedicareError::OAuth(err)
    }
}

impl From<TokenStoreError> for MedicareError {
    fn from(err: TokenStoreError) -> Self {
        MedicareError::TokenStore(err)
    }
}

impl From<IdentityError> for MedicareError {
    fn from(err: IdentityError) -> Self {
        MedicareError::Identity(err)
    }
}

impl From<std::io::Error> for MedicareError {
    fn from(err: std::io::Error) -> Self {
        MedicareError::Io(err)
    }
}
