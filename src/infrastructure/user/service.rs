//! User service for user management

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{User, UserId, UserInput, UserProfile, UserRepository, UserValidator};
use crate::domain::validation::Validator;
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub profile: UserProfile,
    pub password: String,
}

/// Request replacing every mutable field of an existing user
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub profile: UserProfile,
    pub password: String,
}

/// User service for management and listing
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    validator: UserValidator,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            validator: UserValidator,
        }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let input = self.validate(request.profile, request.password)?;
        self.ensure_unique(&input.profile, None).await?;

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repository
            .create(User::new(input.profile, password_hash))
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "Created user");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = parse_id(id)?;
        self.repository.get(&user_id).await
    }

    /// One page of users
    pub async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        self.repository.list_page(request).await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Replace a user's profile and password
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let user_id = parse_id(id)?;

        let mut user = self
            .repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        let input = self.validate(request.profile, request.password)?;
        self.ensure_unique(&input.profile, Some(&user_id)).await?;

        let password_hash = self.hasher.hash(&input.password)?;
        user.replace(input.profile, password_hash);

        let user = self.repository.update(&user).await?;

        info!(user_id = %user.id(), "Updated user");
        Ok(user)
    }

    /// Activate a user
    pub async fn activate(&self, id: &str) -> Result<User, DomainError> {
        self.transition(id, User::activate).await
    }

    /// Deactivate a user
    pub async fn deactivate(&self, id: &str) -> Result<User, DomainError> {
        self.transition(id, User::deactivate).await
    }

    /// Suspend a user
    pub async fn suspend(&self, id: &str) -> Result<User, DomainError> {
        self.transition(id, User::suspend).await
    }

    async fn transition(&self, id: &str, apply: fn(&mut User)) -> Result<User, DomainError> {
        let user_id = parse_id(id)?;

        let mut user = self
            .repository
            .get(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        apply(&mut user);
        let user = self.repository.update(&user).await?;

        info!(user_id = %user.id(), status = user.status().as_str(), "Changed user status");
        Ok(user)
    }

    fn validate(&self, profile: UserProfile, password: String) -> Result<UserInput, DomainError> {
        let input = UserInput { profile, password };
        let report = self.validator.validate(&input);

        if !report.is_valid() {
            warn!(
                username = %input.profile.username,
                failures = report.errors().len(),
                "Rejected invalid user"
            );
        }

        report.into_result().map(|()| input)
    }

    async fn ensure_unique(
        &self,
        profile: &UserProfile,
        except: Option<&UserId>,
    ) -> Result<(), DomainError> {
        if self
            .repository
            .username_taken(&profile.username, except)
            .await?
        {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                profile.username
            )));
        }

        if self.repository.email_taken(&profile.email, except).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                profile.email
            )));
        }

        Ok(())
    }
}

fn parse_id(id: &str) -> Result<UserId, DomainError> {
    id.parse()
        .map_err(|e| DomainError::invalid_id(format!("'{}' is not a valid user ID: {}", id, e)))
}
