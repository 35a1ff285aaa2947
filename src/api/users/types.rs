//! User request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::user::{Address, Name, User, UserProfile, UserRole, UserStatus};

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
///
/// Absent nested objects and unrecognised `status`/`role` values are
/// accepted here and reported by validation.
#[derive(Debug, Clone, Deserialize)]
pub struct UserApiRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub address: Address,
}

pub type CreateUserApiRequest = UserApiRequest;
pub type UpdateUserApiRequest = UserApiRequest;

impl UserApiRequest {
    /// Split into profile and plaintext password
    pub fn into_parts(self) -> (UserProfile, String) {
        let profile = UserProfile {
            username: self.username,
            email: self.email,
            phone: self.phone,
            name: self.name,
            address: self.address,
            status: self.status,
            role: self.role,
        };

        (profile, self.password)
    }
}

/// User as returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: Name,
    pub address: Address,
    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            phone: user.phone().to_string(),
            name: user.name().clone(),
            address: user.address().clone(),
            status: user.status(),
            role: user.role(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures::user;

    #[test]
    fn test_request_defaults_unknown_enums() {
        let request: UserApiRequest = serde_json::from_value(serde_json::json!({
            "username": "jsilva",
            "email": "jsilva@example.com",
            "password": "S3cure!pass",
            "phone": "+5511987654321",
            "status": "banned"
        }))
        .unwrap();

        let (profile, password) = request.into_parts();

        assert_eq!(profile.status, UserStatus::Unknown);
        assert_eq!(profile.role, UserRole::None);
        assert_eq!(profile.name, Name::default());
        assert_eq!(password, "S3cure!pass");
    }

    #[test]
    fn test_response_has_no_password() {
        let response = UserResponse::from(&user("jsilva"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["username"], "jsilva");
        assert_eq!(json["status"], "active");
        assert_eq!(json["address"]["geolocation"]["lat"], -23.55);
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("updated_at").is_none());
    }
}
