//! Authentication: the stored session, identity claims, and the sign-in
//! flows that produce a session.

pub mod flow;
pub mod identity;
pub mod oauth;
pub mod session;

pub use flow::{is_valid_email, login, logout, sign_up, AuthFlowError};
pub use identity::{current_identity, current_user_id, decode_claims, IdentityClaims, IdentityError};
pub use oauth::{OAuthConfig, OAuthError};
pub use session::SessionStore;
