//! Authenticated identity carried through the request extensions.

/// Authenticated user context derived from a verified bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub account_id: i64,
    pub email: String,
}

impl Principal {
    /// Extract the principal from verified token claims.
    ///
    /// `sub` and `email` must be present and string-typed, and `sub` must be
    /// a numeric account id; anything else is a claims error.
    #[must_use]
    pub fn from_claims(claims: &serde_json::Value) -> Option<Self> {
        let account_id = claims
            .get("sub")
            .and_then(serde_json::Value::as_str)?
            .parse::<i64>()
            .ok()?;
        let email = claims.get("email").and_then(serde_json::Value::as_str)?;

        Some(Self {
            account_id,
            email: email.to_string(),
        })
    }
}
