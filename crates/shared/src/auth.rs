//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Unique token ID, used for revocation.
    pub jti: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user with a fresh token ID.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the token ID from claims.
    #[must_use]
    pub const fn token_id(&self) -> Uuid {
        self.jti
    }

    /// Returns the expiration as a timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// User email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// User password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// User email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// User password.
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

impl LoginResponse {
    /// Creates a bearer token response.
    #[must_use]
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// User info returned by auth and profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_valid() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "name": "John Alice",
            "email": "john@example.com",
            "password": "secret123"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email_and_short_password() {
        let request = RegisterRequest {
            name: "John".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_register_request_rejects_empty_name() {
        let request = RegisterRequest {
            name: String::new(),
            email: "john@example.com".to_string(),
            password: "secret123".to_string(),
        };

        assert!(request.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_login_request_requires_password() {
        let request = LoginRequest {
            email: "john@example.com".to_string(),
            password: String::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_response_is_bearer() {
        let response = LoginResponse::bearer("abc".to_string(), 3600);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["token_type"], "Bearer");
        assert_eq!(value["expires_in"], 3600);
    }
}
