//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::pagination::{paginate_source, InMemoryPageSource, Page, PageRequest};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Rows in creation order plus lookup indexes into them
#[derive(Debug, Default)]
struct UserTable {
    rows: Vec<User>,
    by_id: HashMap<UserId, usize>,
    by_username: HashMap<String, usize>,
    by_email: HashMap<String, usize>,
}

impl UserTable {
    fn find(&self, index: &HashMap<String, usize>, key: &str) -> Option<&User> {
        index.get(key).map(|&pos| &self.rows[pos])
    }

    fn check_unique(&self, user: &User) -> Result<(), DomainError> {
        let owned_by_other = |index: &HashMap<String, usize>, key: &str| {
            self.find(index, key).is_some_and(|u| u.id() != user.id())
        };

        if owned_by_other(&self.by_username, user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        if owned_by_other(&self.by_email, user.email()) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already exists",
                user.email()
            )));
        }

        Ok(())
    }
}

/// In-memory implementation of UserRepository.
///
/// Natural order is creation order; updates keep a user's position.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users, in the given order
    pub fn with_users(users: Vec<User>) -> Result<Self, DomainError> {
        let mut table = UserTable::default();

        for user in users {
            insert(&mut table, user)?;
        }

        Ok(Self {
            table: Arc::new(RwLock::new(table)),
        })
    }
}

fn insert(table: &mut UserTable, user: User) -> Result<(), DomainError> {
    if table.by_id.contains_key(user.id()) {
        return Err(DomainError::conflict(format!(
            "User with ID '{}' already exists",
            user.id()
        )));
    }
    table.check_unique(&user)?;

    let pos = table.rows.len();
    table.by_id.insert(*user.id(), pos);
    table.by_username.insert(user.username().to_string(), pos);
    table.by_email.insert(user.email().to_string(), pos);
    table.rows.push(user);

    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.by_id.get(id).map(|&pos| table.rows[pos].clone()))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.find(&table.by_username, username).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.find(&table.by_email, email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        insert(&mut table, user.clone())?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let pos = *table
            .by_id
            .get(user.id())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))?;

        table.check_unique(user)?;

        let previous = std::mem::replace(&mut table.rows[pos], user.clone());
        table.by_username.remove(previous.username());
        table.by_email.remove(previous.email());
        table.by_username.insert(user.username().to_string(), pos);
        table.by_email.insert(user.email().to_string(), pos);

        Ok(user.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.rows.len())
    }

    async fn list_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        // Clone under the read lock so count and slice see one snapshot
        let snapshot = InMemoryPageSource::new(self.table.read().await.rows.clone());
        paginate_source(&snapshot, request).await
    }
}
