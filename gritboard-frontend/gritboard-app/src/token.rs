//! Client-side handling of the bearer token.
//!
//! Nothing here verifies signatures. The expiry check only decides which view to show.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::{AuthError, DashboardError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(&'static str),
    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),
}

impl From<TokenError> for DashboardError {
    fn from(_: TokenError) -> Self {
        DashboardError::SessionExpired
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<f64>,
}

fn has_token_shape(token: &str) -> bool {
    let segments: Vec<_> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}

/// Extracts the token from a sign-in response body.
///
/// The body is either the bare token, possibly quoted, or a JSON object with a
/// `token` field.
pub fn normalize_signin_response(body: &str) -> Result<String, AuthError> {
    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object
            .get("token")
            .and_then(Value::as_str)
            .map(|token| token.trim().replace('"', "")),
        _ => None,
    }
    .unwrap_or_else(|| body.trim().replace('"', ""));

    if has_token_shape(&token) {
        Ok(token)
    } else {
        Err(AuthError::InvalidFormat(token))
    }
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    if !has_token_shape(token) {
        return Err(TokenError::Malformed("expected three segments"));
    }
    let payload = token
        .split('.')
        .nth(1)
        .ok_or(TokenError::Malformed("missing payload"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Malformed("payload is not base64url"))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| TokenError::Malformed("payload is not a JSON object"))
}

/// Decodes the payload and checks `exp` against `now`.
pub fn validate_token(token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
    let claims = decode_claims(token)?;
    let exp = claims
        .exp
        .filter(|exp| exp.is_finite())
        .ok_or(TokenError::Malformed("no expiry claim"))?;
    let expires_at = DateTime::from_timestamp(exp.floor() as i64, 0)
        .ok_or(TokenError::Malformed("expiry out of range"))?;
    if expires_at <= now {
        return Err(TokenError::Expired(expires_at));
    }
    Ok(claims)
}

#[cfg(test)]
pub(crate) fn token_with_payload(payload: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}
