//! Error handling for the MediCare client.
//!
//! - **Error Categories**: high-level classification that decides how a
//!   failure is shown (inline "try again", sign-in prompt, field message)
//! - **Network errors**: transport failures and per-status user text
//! - **Unified error type**: `MedicareError` wraps the per-flow errors
//!   (`ApiError`, `BookingError`, `ReviewError`, `AuthFlowError`,
//!   `OAuthError`) for the binary
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | Non-2xx response | Yes |
//! | Validation | Rejected locally, no request made | No |
//! | Auth | No session, or credentials refused | No |
//! | Decode | Body or token claims unreadable | No |
//! | System | OS/filesystem errors | No |
//! | Configuration | Config issues | No |
//!
//! Nothing is retried automatically. "Retryable" only means the screen
//! offers a manual try again.

mod category;
mod medicare_error;
mod network;

pub use category::ErrorCategory;
pub use medicare_error::MedicareError;
pub use network::{status_message, NetworkError};
