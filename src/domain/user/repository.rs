//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;

    /// One page of users ordered by `request.order_by`.
    ///
    /// Count and slice are taken from the same snapshot. Ties keep
    /// creation order.
    async fn list_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError>;

    /// Check if a username is held by a user other than `except`
    async fn username_taken(
        &self,
        username: &str,
        except: Option<&UserId>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .get_by_username(username)
            .await?
            .is_some_and(|u| Some(u.id()) != except))
    }

    /// Check if an email is held by a user other than `except`
    async fn email_taken(&self, email: &str, except: Option<&UserId>) -> Result<bool, DomainError> {
        Ok(self
            .get_by_email(email)
            .await?
            .is_some_and(|u| Some(u.id()) != except))
    }
}
