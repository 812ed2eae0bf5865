use crate::api::handlers::valid_email;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PASSWORD_MIN_LENGTH: usize = 6;

#[derive(ToSchema, Deserialize, Debug)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// Collect human-readable validation errors; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }

        if self.email.trim().is_empty() {
            errors.push("email is required".to_string());
        } else if !valid_email(self.email.trim()) {
            errors.push("email must be a valid email address".to_string());
        }

        if self.password.is_empty() {
            errors.push("password is required".to_string());
        } else if self.password.len() < PASSWORD_MIN_LENGTH {
            errors.push(format!(
                "password must be at least {PASSWORD_MIN_LENGTH} characters long"
            ));
        }

        errors
    }
}

/// Login accepts either an `identifier` (email or display name) or the
/// legacy `email` field.
#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .or(self.email.as_deref())
            .map(str::trim)
            .filter(|identifier| !identifier.is_empty())
    }
}

/// User data in responses; the password hash is never serialized.
#[derive(ToSchema, Serialize, Debug)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let request = RegisterRequest {
            name: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(request.validate().is_empty());

        let request = RegisterRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = request.validate();
        assert_eq!(
            errors,
            vec![
                "name is required",
                "email must be a valid email address",
                "password must be at least 6 characters long",
            ]
        );
    }

    #[test]
    fn test_login_identifier_resolution() {
        let request = LoginRequest {
            identifier: Some("alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: "secret1".to_string(),
        };
        assert_eq!(request.identifier(), Some("alice"));

        let request = LoginRequest {
            identifier: None,
            email: Some(" a@x.com ".to_string()),
            password: "secret1".to_string(),
        };
        assert_eq!(request.identifier(), Some("a@x.com"));

        let request = LoginRequest {
            identifier: None,
            email: None,
            password: "secret1".to_string(),
        };
        assert_eq!(request.identifier(), None);
    }
}
