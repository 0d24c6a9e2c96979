//! Session token payload decoding
//!
//! Only the payload is read. The signature is never verified here; the
//! backend re-validates every request.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde_json::Value;
use thiserror::Error;

/// Why a token could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected 3 dot-separated parts, got {0}")]
    Shape(usize),
    #[error("payload is not valid base64")]
    Base64,
    #[error("payload is not a JSON object")]
    Payload,
}

/// Claims the console cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// Expiry in epoch seconds
    pub exp: Option<i64>,
    /// Username
    pub sub: Option<String>,
    /// Authority string, e.g. `ROLE_ADMIN`
    pub role: Option<String>,
}

impl TokenClaims {
    /// `exp` present and strictly before `now_secs`
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now_secs)
    }
}

/// Decode the payload of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Shape(parts.len()));
    }

    let raw = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(raw)
        .or_else(|_| STANDARD_NO_PAD.decode(raw))
        .map_err(|_| TokenError::Base64)?;

    let payload: Value = serde_json::from_slice(&bytes).map_err(|_| TokenError::Payload)?;
    let object = payload.as_object().ok_or(TokenError::Payload)?;

    Ok(TokenClaims {
        exp: object.get("exp").and_then(numeric_seconds),
        sub: object.get("sub").and_then(Value::as_str).map(str::to_string),
        role: object.get("role").and_then(Value::as_str).map(str::to_string),
    })
}

/// Integer or float JSON number, truncated to whole seconds
fn numeric_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned token around `payload`
    pub(crate) fn token_with(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_decode_full_claims() {
        let token = token_with(r#"{"sub":"admin","role":"ROLE_ADMIN","iat":1700000000,"exp":1700086400}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_086_400));
        assert_eq!(claims.sub.as_deref(), Some("admin"));
        assert_eq!(claims.role.as_deref(), Some("ROLE_ADMIN"));
        assert!(claims.is_expired_at(1_700_086_401));
        assert!(!claims.is_expired_at(1_700_086_400));
    }

    #[test]
    fn test_exp_variants() {
        let claims = decode_claims(&token_with(r#"{"exp":1700000000.9}"#)).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));

        let claims = decode_claims(&token_with(r#"{"exp":"1700000000"}"#)).unwrap();
        assert_eq!(claims.exp, None);
        assert!(!claims.is_expired_at(i64::MAX));

        let claims = decode_claims(&token_with(r#"{"sub":"x"}"#)).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_standard_alphabet_with_padding() {
        let payload = r#"{"exp":1,"n":"?>"}"#;
        let body = base64::engine::general_purpose::STANDARD.encode(payload);
        let token = format!("h.{}.s", body);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(1));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(decode_claims("abc"), Err(TokenError::Shape(1)));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Shape(4)));
        assert_eq!(decode_claims("a.!!!.c"), Err(TokenError::Base64));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"));
        assert_eq!(decode_claims(&not_json), Err(TokenError::Payload));

        let array = format!("h.{}.s", URL_SAFE_NO_PAD.encode("[1,2]"));
        assert_eq!(decode_claims(&array), Err(TokenError::Payload));
    }
}
