use serde::{Deserialize, Serialize};

use crate::auth::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for authentication.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Response after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Response after a successful authentication.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
}

/// Response for token validation: the resolved user, hash stripped.
#[derive(Debug, Serialize)]
pub struct ValidateTokenResponse {
    pub success: bool,
    pub user: User,
}

/// Response for the protected probe route.
#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn user_json_hides_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$argon2id$segredo".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&ValidateTokenResponse {
            success: true,
            user,
        })
        .unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("createdAt"));
        assert!(!json.contains("segredo"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn auth_response_serialization() {
        let json = serde_json::to_string(&AuthResponse {
            success: true,
            token: "abc".into(),
            username: "alice".into(),
        })
        .unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""token":"abc""#));
    }
}
