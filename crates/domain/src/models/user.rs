//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for registering a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request payload for a partial user update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub username: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,

    pub is_active: Option<bool>,
}

/// Row values for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Column changes for a user. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub hashed_password: Option<String>,
    pub is_active: Option<bool>,
}

/// Form fields of the password grant (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::Fake;

    fn sample_user() -> User {
        User {
            id: 7,
            email: "keeper@example.com".to_string(),
            username: "keeper".to_string(),
            hashed_password: "$argon2id$secret".to_string(),
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"username\":\"keeper\""));
        assert!(json.contains("\"is_superuser\":false"));
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterUserRequest {
            email: SafeEmail().fake(),
            username: Username().fake::<String>() + "_bee",
            password: "longenough".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterUserRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterUserRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let blank_username = RegisterUserRequest {
            username: "     ".to_string(),
            ..valid
        };
        assert!(blank_username.validate().is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let request: UpdateUserRequest = serde_json::from_str(r#"{"is_active": false}"#).unwrap();
        assert_eq!(request.is_active, Some(false));
        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_token_response_bearer() {
        let response = TokenResponse::bearer("abc.def.ghi".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["access_token"], "abc.def.ghi");
    }
}
