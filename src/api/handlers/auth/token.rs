//! Session token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs carrying the account id (`sub`, as a
//! string), `email`, `iat`, and a 24-hour `exp`. They are never persisted and
//! cannot be revoked before expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validity window of an issued token.
pub const VALIDITY_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret is not configured")]
    MissingSecret,
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Issue a signed token for an account.
///
/// # Errors
/// Returns [`TokenError::MissingSecret`] when the signing secret is empty;
/// an unset secret is a configuration error, never a reason to emit a weakly
/// signed token.
pub fn issue(secret: &SecretString, account_id: i64, email: &str) -> Result<String, TokenError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + VALIDITY_SECONDS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verify a token's signature and expiry, returning its raw claims.
///
/// Only HS256 is accepted; tokens signed with any other algorithm fail
/// verification even when otherwise well-formed.
///
/// # Errors
/// Returns an error on any parse, signature, or expiry failure.
pub fn verify(secret: &SecretString, token: &str) -> Result<serde_json::Value, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    validation.validate_exp = true;

    let data = decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("test-secret".to_string())
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue(&secret(), 42, "a@x.com").unwrap();

        let claims = verify(&secret(), &token).unwrap();
        assert_eq!(claims["sub"], "42");
        assert_eq!(claims["email"], "a@x.com");

        let iat = claims["iat"].as_i64().unwrap();
        let exp = claims["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, VALIDITY_SECONDS);
    }

    #[test]
    fn test_empty_secret_is_a_configuration_error() {
        let empty = SecretString::from(String::new());

        assert!(matches!(
            issue(&empty, 1, "a@x.com"),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_garbled_token_rejected() {
        assert!(verify(&secret(), "garbage").is_err());
        assert!(verify(&secret(), "a.b.c").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(&secret(), 1, "a@x.com").unwrap();
        let other = SecretString::from("other-secret".to_string());

        assert!(verify(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@x.com".to_string(),
            iat: now - 2 * VALIDITY_SECONDS,
            exp: now - VALIDITY_SECONDS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify(&secret(), &token).is_err());
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        // Same HMAC key family, different algorithm; the verifier only
        // accepts HS256.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@x.com".to_string(),
            iat: now,
            exp: now + VALIDITY_SECONDS,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify(&secret(), &token).is_err());
    }
}
