//! Identity extraction from the session token.
//!
//! The token is a JWT. Its payload is decoded without verifying the
//! signature; the backend checks the signature on every request, so the
//! claims here only drive what the client shows and which ids it sends.

use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD},
    Engine,
};
use serde::{Deserialize, Deserializer};

use super::session::SessionStore;

/// Claims read from the token payload.
///
/// Claims are read leniently: a claim of an unexpected type is treated as
/// absent rather than failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IdentityClaims {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub email: Option<String>,
    /// Seconds since the epoch; may be fractional
    #[serde(default, deserialize_with = "deserialize_optional_seconds")]
    pub exp: Option<f64>,
}

impl IdentityClaims {
    /// Name for display, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
    }
}

/// Why a token could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("token is not a JWT (expected three segments, found {0})")]
    Malformed(usize),

    #[error("token payload is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => {
            tracing::debug!("Ignoring non-string claim: {}", other);
            None
        }
        None => None,
    })
}

fn deserialize_optional_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| URL_SAFE.decode(segment))
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .or_else(|_| STANDARD.decode(segment))
}

/// Decode the claims of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<IdentityClaims, IdentityError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(IdentityError::Malformed(parts.len()));
    }

    let payload = decode_segment(parts[1])?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Claims of the current session, or `None` when signed out or undecodable.
pub async fn current_identity(session: &SessionStore) -> Option<IdentityClaims> {
    let token = session.get().await?;
    match decode_claims(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::warn!("Could not decode session token: {}", e);
            None
        }
    }
}

/// The signed-in user's id (the token's `sub` claim).
pub async fn current_user_id(session: &SessionStore) -> Option<String> {
    current_identity(session)
        .await
        .and_then(|claims| claims.sub)
        .filter(|sub| !sub.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTokenStore;
    use std::sync::Arc;

    fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    fn session_with_token(token: Option<&str>) -> SessionStore {
        let store = match token {
            Some(t) => InMemoryTokenStore::with_token(t),
            None => InMemoryTokenStore::new(),
        };
        SessionStore::new(Arc::new(store))
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(&serde_json::json!({"sub": "42", "name": "Ann"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.name.as_deref(), Some("Ann"));
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_decode_numeric_sub() {
        let token = make_token(&serde_json::json!({"sub": 42, "exp": 1700000000}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.exp, Some(1700000000.0));
    }

    #[test]
    fn test_odd_claim_types_do_not_hide_sub() {
        let token = make_token(&serde_json::json!({
            "sub": "42",
            "name": 7,
            "email": ["ann@example.com"],
            "exp": 1700000000.5
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.name, None);
        assert_eq!(claims.email, None);
        assert_eq!(claims.exp, Some(1700000000.5));
    }

    #[tokio::test]
    async fn test_fractional_exp_keeps_user_signed_in() {
        let token = make_token(&serde_json::json!({
            "sub": "42",
            "name": "Ann",
            "exp": 1700000000.5
        }));
        let session = session_with_token(Some(&token));
        assert_eq!(current_user_id(&session).await.as_deref(), Some("42"));
    }

    #[test]
    fn test_decode_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let body = URL_SAFE.encode(r#"{"sub":"7"}"#);
        let token = format!("{}.{}.sig", header, body);
        assert_eq!(decode_claims(&token).unwrap().sub.as_deref(), Some("7"));
    }

    #[test]
    fn test_decode_rejects_malformed_tokens() {
        assert!(matches!(
            decode_claims("not-a-jwt"),
            Err(IdentityError::Malformed(1))
        ));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(IdentityError::Base64(_))
        ));

        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(IdentityError::Json(_))));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let claims = IdentityClaims {
            email: Some("ann@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(claims.display_name(), Some("ann@example.com"));
    }

    #[tokio::test]
    async fn test_current_user_id_from_stored_token() {
        let token = make_token(&serde_json::json!({"sub": "42", "name": "Ann"}));
        let session = session_with_token(Some(&token));
        assert_eq!(current_user_id(&session).await, Some("42".to_string()));
    }

    #[tokio::test]
    async fn test_current_user_id_without_token() {
        let session = session_with_token(None);
        assert_eq!(current_user_id(&session).await, None);
    }

    #[tokio::test]
    async fn test_current_user_id_with_garbage_token() {
        let session = session_with_token(Some("garbage"));
        assert_eq!(current_user_id(&session).await, None);
    }

    #[tokio::test]
    async fn test_current_user_id_without_sub() {
        let token = make_token(&serde_json::json!({"name": "Ann"}));
        let session = session_with_token(Some(&token));
        assert_eq!(current_user_id(&session).await, None);
        assert_eq!(
            current_identity(&session).await.unwrap().name.as_deref(),
            Some("Ann")
        );
    }

    #[tokio::test]
    async fn test_identity_gone_after_logout() {
        let token = make_token(&serde_json::json!({"sub": "42"}));
        let session = session_with_token(Some(&token));

        session.clear().await;
        assert_eq!(current_user_id(&session).await, None);
    }
}
