//! User entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pagination::{FieldMap, SortValue, Sortable};

/// User identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    /// Not set or not recognised; rejected by validation
    #[default]
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    /// Parse the stored representation; unrecognised values map to `Unknown`
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "suspended" => Self::Suspended,
            _ => Self::Unknown,
        }
    }
}

/// Role of a user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Manager,
    Admin,
    /// Not set or not recognised; rejected by validation
    #[default]
    #[serde(other)]
    None,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Customer => "customer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "customer" => Self::Customer,
            "manager" => Self::Manager,
            "admin" => Self::Admin,
            _ => Self::None,
        }
    }
}

/// Full name of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: f64,
    pub long: f64,
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: i32,
    pub zipcode: String,
    pub geolocation: Geolocation,
}

/// Mutable profile data shared by create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: Name,
    pub address: Address,
    pub status: UserStatus,
    pub role: UserRole,
}

/// Profile plus plaintext password, as submitted by a caller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInput {
    pub profile: UserProfile,
    pub password: String,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with a generated ID
    pub fn new(profile: UserProfile, password_hash: impl Into<String>) -> Self {
        Self::with_id(UserId::generate(), profile, password_hash)
    }

    pub fn with_id(id: UserId, profile: UserProfile, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            profile,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Rebuild a user from persisted state
    pub fn restore(
        id: UserId,
        profile: UserProfile,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            profile,
            password_hash,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn phone(&self) -> &str {
        &self.profile.phone
    }

    pub fn name(&self) -> &Name {
        &self.profile.name
    }

    pub fn address(&self) -> &Address {
        &self.profile.address
    }

    pub fn status(&self) -> UserStatus {
        self.profile.status
    }

    pub fn role(&self) -> UserRole {
        self.profile.role
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    // Mutators

    /// Replace every profile field and the password hash
    pub fn replace(&mut self, profile: UserProfile, password_hash: impl Into<String>) {
        self.profile = profile;
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub fn activate(&mut self) {
        self.profile.status = UserStatus::Active;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.profile.status = UserStatus::Inactive;
        self.touch();
    }

    pub fn suspend(&mut self) {
        self.profile.status = UserStatus::Suspended;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

static USER_FIELDS: Lazy<FieldMap<User>> = Lazy::new(|| {
    FieldMap::<User>::new()
        .field("id", |u| SortValue::Uuid(u.id.as_uuid()))
        .field("username", |u| SortValue::Text(&u.profile.username))
        .field("email", |u| SortValue::Text(&u.profile.email))
        .field("phone", |u| SortValue::Text(&u.profile.phone))
        .field("status", |u| SortValue::Text(u.profile.status.as_str()))
        .field("role", |u| SortValue::Text(u.profile.role.as_str()))
        .field("firstname", |u| SortValue::Text(&u.profile.name.firstname))
        .field("lastname", |u| SortValue::Text(&u.profile.name.lastname))
        .field("city", |u| SortValue::Text(&u.profile.address.city))
        .field("street", |u| SortValue::Text(&u.profile.address.street))
        .field("number", |u| SortValue::from(u.profile.address.number))
        .field("zipcode", |u| SortValue::Text(&u.profile.address.zipcode))
        .field("created_at", |u| SortValue::Timestamp(u.created_at))
        .field("updated_at", |u| SortValue::from(u.updated_at))
});

impl Sortable for User {
    fn field_map() -> &'static FieldMap<Self> {
        &USER_FIELDS
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A profile that passes every validation rule
    pub fn valid_profile(username: &str) -> UserProfile {
        UserProfile {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "+5511987654321".to_string(),
            name: Name {
                firstname: "Joana".to_string(),
                lastname: "Silva".to_string(),
            },
            address: Address {
                city: "Sao Paulo".to_string(),
                street: "Rua Augusta".to_string(),
                number: 120,
                zipcode: "01304-000".to_string(),
                geolocation: Geolocation {
                    lat: -23.55,
                    long: -46.63,
                },
            },
            status: UserStatus::Active,
            role: UserRole::Customer,
        }
    }

    pub fn valid_input(username: &str) -> UserInput {
        UserInput {
            profile: valid_profile(username),
            password: "S3cure!pass".to_string(),
        }
    }

    pub fn user(username: &str) -> User {
        User::new(valid_profile(username), "hashed_password")
    }

    pub fn named(username: &str, firstname: &str, lastname: &str) -> User {
        let mut profile = valid_profile(username);
        profile.name = Name {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        };
        User::new(profile, "hashed_password")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::pagination::{paginate, PageRequest};

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::generate();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = user("jsilva");

        assert_eq!(user.username(), "jsilva");
        assert_eq!(user.email(), "jsilva@example.com");
        assert_eq!(user.status(), UserStatus::Active);
        assert_eq!(user.role(), UserRole::Customer);
        assert!(user.updated_at().is_none());
    }

    #[test]
    fn test_status_changes_stamp_updated_at() {
        let mut user = user("jsilva");

        user.suspend();
        assert_eq!(user.status(), UserStatus::Suspended);
        assert!(user.updated_at().is_some());

        user.deactivate();
        assert_eq!(user.status(), UserStatus::Inactive);

        user.activate();
        assert_eq!(user.status(), UserStatus::Active);
    }

    #[test]
    fn test_replace_profile() {
        let mut user = user("jsilva");
        let mut profile = valid_profile("jsouza");
        profile.role = UserRole::Admin;

        user.replace(profile, "new_hash");

        assert_eq!(user.username(), "jsouza");
        assert_eq!(user.role(), UserRole::Admin);
        assert_eq!(user.password_hash(), "new_hash");
        assert!(user.updated_at().is_some());
    }

    #[test]
    fn test_serialization_excludes_password() {
        let user = user("jsilva");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"username\":\"jsilva\""));
    }

    #[test]
    fn test_unknown_status_and_role_deserialize_to_defaults() {
        let status: UserStatus = serde_json::from_str("\"banned\"").unwrap();
        let role: UserRole = serde_json::from_str("\"superuser\"").unwrap();

        assert_eq!(status, UserStatus::Unknown);
        assert_eq!(role, UserRole::None);
    }

    #[test]
    fn test_known_status_and_role_survive_json() {
        let status: UserStatus = serde_json::from_str("\"suspended\"").unwrap();
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();

        assert_eq!(status, UserStatus::Suspended);
        assert_eq!(role, UserRole::Admin);
        assert_eq!(serde_json::to_string(&UserStatus::default()).unwrap(), "\"unknown\"");
        assert_eq!(serde_json::to_string(&UserRole::default()).unwrap(), "\"none\"");
    }

    #[test]
    fn test_stored_representation() {
        for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended] {
            assert_eq!(UserStatus::from_str_lossy(status.as_str()), status);
        }
        for role in [UserRole::Customer, UserRole::Manager, UserRole::Admin] {
            assert_eq!(UserRole::from_str_lossy(role.as_str()), role);
        }
        assert_eq!(UserStatus::from_str_lossy("???"), UserStatus::Unknown);
    }

    #[test]
    fn test_users_order_by_name_fields() {
        let users = vec![
            named("lee-amy", "Amy", "Lee"),
            named("lee-ben", "Ben", "Lee"),
            named("ash-cal", "Cal", "Ash"),
        ];

        let request = PageRequest::new(1, 10).with_order_by("lastname asc, firstname desc");
        let page = paginate(users, &request).unwrap();
        let usernames: Vec<_> = page.items().iter().map(User::username).collect();

        assert_eq!(usernames, vec!["ash-cal", "lee-ben", "lee-amy"]);
    }

    #[test]
    fn test_every_user_field_is_sortable() {
        for field in User::field_map().names() {
            let request = PageRequest::new(1, 10).with_order_by(format!("{field} desc"));
            assert!(paginate(vec![user("a-user"), user("b-user")], &request).is_ok());
        }
    }
}
