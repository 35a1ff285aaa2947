//! Application state for shared services

use std::sync::Arc;

use crate::config::PaginationConfig;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{
    CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>, pagination: PaginationConfig) -> Self {
        Self {
            user_service,
            pagination,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn activate(&self, id: &str) -> Result<User, DomainError>;
    async fn deactivate(&self, id: &str) -> Result<User, DomainError>;
    async fn suspend(&self, id: &str) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        UserService::list(self, request).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn activate(&self, id: &str) -> Result<User, DomainError> {
        UserService::activate(self, id).await
    }

    async fn deactivate(&self, id: &str) -> Result<User, DomainError> {
        UserService::deactivate(self, id).await
    }

    async fn suspend(&self, id: &str) -> Result<User, DomainError> {
        UserService::suspend(self, id).await
    }
}
