//! Read-only decoding of session token claims.
//!
//! The token's signature is NOT verified here. Decoded claims are hints used
//! to skip restoring an obviously expired session and to backfill profile
//! fields the login response left out. They must never gate anything that
//! matters: the API validates the token on every request.

use crate::{error::TokenError, roles::Role, types::string_or_number};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Claims carried in the middle segment of a session token. Any JSON object
/// decodes; a well-known claim of an unexpected type reads as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,
    #[serde(
        default,
        deserialize_with = "role_if_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,
    /// NumericDate expiry in seconds since the Unix epoch. May be fractional.
    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// True when the token carries an expiry strictly after `now_millis`.
    #[must_use]
    pub fn is_live(&self, now_millis: i64) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let now = now_millis as f64;
        self.exp.is_some_and(|exp| exp * 1000.0 > now)
    }
}

fn role_if_string<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(Role::from(value)),
        _ => None,
    })
}

fn numeric_date<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(value)) => value.as_f64().filter(|exp| exp.is_finite()),
        _ => None,
    })
}

/// Decodes the claims segment of a `header.claims.signature` token.
///
/// # Errors
///
/// Returns an error if the token does not have three segments, or if the
/// claims segment is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let mut parts = token.trim().split('.');
    let _header = parts.next().ok_or(TokenError::Format)?;
    let claims_b64 = parts.next().ok_or(TokenError::Format)?;
    let _signature = parts.next().ok_or(TokenError::Format)?;
    if parts.next().is_some() || claims_b64.is_empty() {
        return Err(TokenError::Format);
    }

    let bytes = Base64UrlUnpadded::decode_vec(claims_b64.trim_end_matches('='))
        .map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}


#[cfg(test)]
mod tests {
    use super::test_tokens::token_with;
    use super::*;
    use serde_json::json;

    const NOW_MS: i64 = 1_700_000_000_000;

    #[test]
    fn decodes_subject_role_and_expiry() -> Result<(), TokenError> {
        let token = token_with(&json!({
            "sub": "42",
            "role": "LIBRARIAN",
            "exp": 1_700_003_600,
            "iat": 1_700_000_000,
        }));

        let claims = decode_claims(&token)?;
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.role, Some(Role::Librarian));
        assert_eq!(claims.exp, Some(1_700_003_600.0));
        assert_eq!(claims.extra.get("iat"), Some(&json!(1_700_000_000)));
        assert!(claims.is_live(NOW_MS));
        Ok(())
    }

    #[test]
    fn expiry_must_be_strictly_in_the_future() {
        let claims = Claims {
            exp: Some(1_700_000_000.0),
            ..Claims::default()
        };
        assert!(!claims.is_live(NOW_MS));
        assert!(claims.is_live(NOW_MS - 1));
        assert!(!Claims::default().is_live(NOW_MS));
    }

    #[test]
    fn numeric_subject_is_kept_as_text() -> Result<(), TokenError> {
        let token = token_with(&json!({ "sub": 42, "exp": 1_700_003_600 }));
        let claims = decode_claims(&token)?;
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert!(claims.is_live(NOW_MS));
        Ok(())
    }

    #[test]
    fn fractional_expiry_is_honoured() -> Result<(), TokenError> {
        let token = token_with(&json!({ "exp": 1_700_000_000.5 }));
        let claims = decode_claims(&token)?;
        assert_eq!(claims.exp, Some(1_700_000_000.5));
        assert!(claims.is_live(NOW_MS));
        assert!(!claims.is_live(NOW_MS + 500));
        Ok(())
    }

    #[test]
    fn mistyped_claims_read_as_absent() -> Result<(), TokenError> {
        let token = token_with(&json!({
            "sub": { "id": 1 },
            "role": ["STUDENT"],
            "exp": "tomorrow",
        }));
        let claims = decode_claims(&token)?;
        assert_eq!(claims.sub, None);
        assert_eq!(claims.role, None);
        assert_eq!(claims.exp, None);
        assert!(!claims.is_live(NOW_MS));
        Ok(())
    }

    #[test]
    fn accepts_padded_claims_segment() -> Result<(), TokenError> {
        let token = token_with(&json!({ "sub": "a" }));
        let parts: Vec<&str> = token.split('.').collect();
        let padded = format!("{}.{}==.{}", parts[0], parts[1], parts[2]);

        let claims = decode_claims(&padded)?;
        assert_eq!(claims.sub.as_deref(), Some("a"));
        Ok(())
    }

    #[test]
    fn decodes_non_ascii_payloads() -> Result<(), TokenError> {
        let token = token_with(&json!({ "sub": "7", "name": "Zoë Ñúñez" }));
        let claims = decode_claims(&token)?;
        assert_eq!(claims.extra.get("name"), Some(&json!("Zoë Ñúñez")));
        Ok(())
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(decode_claims(""), Err(TokenError::Format)));
        assert!(matches!(decode_claims("only-one"), Err(TokenError::Format)));
        assert!(matches!(decode_claims("a.b"), Err(TokenError::Format)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Format)));
        assert!(matches!(decode_claims("a..c"), Err(TokenError::Format)));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Base64)));

        let not_json = format!("h.{}.s", Base64UrlUnpadded::encode_string(b"not json"));
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Json(_))));
    }
}
