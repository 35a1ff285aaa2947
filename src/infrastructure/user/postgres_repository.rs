//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tokio::sync::Mutex;

use crate::domain::pagination::{paginate_source, OrderSpec, Page, PageRequest, PageSource};
use crate::domain::user::{
    Address, Geolocation, Name, User, UserId, UserProfile, UserRepository, UserRole, UserStatus,
};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, username, email, phone, password_hash, firstname, lastname, \
     city, street, number, zipcode, lat, long, status, role, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by {}: {}", column, e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("username", username).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("email", email).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let profile = user.profile();
        let geo = profile.address.geolocation;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, phone, password_hash, firstname, lastname,
                               city, street, number, zipcode, lat, long, status, role,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(user.password_hash())
        .bind(&profile.name.firstname)
        .bind(&profile.name.lastname)
        .bind(&profile.address.city)
        .bind(&profile.address.street)
        .bind(profile.address.number)
        .bind(&profile.address.zipcode)
        .bind(geo.lat)
        .bind(geo.long)
        .bind(profile.status.as_str())
        .bind(profile.role.as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(&user, "create", e))?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let profile = user.profile();
        let geo = profile.address.geolocation;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, phone = $4, password_hash = $5, firstname = $6,
                lastname = $7, city = $8, street = $9, number = $10, zipcode = $11,
                lat = $12, long = $13, status = $14, role = $15, updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(user.password_hash())
        .bind(&profile.name.firstname)
        .bind(&profile.name.lastname)
        .bind(&profile.address.city)
        .bind(&profile.address.street)
        .bind(profile.address.number)
        .bind(&profile.address.zipcode)
        .bind(geo.lat)
        .bind(geo.long)
        .bind(profile.status.as_str())
        .bind(profile.role.as_str())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(user, "update", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }

    async fn list_page(&self, request: &PageRequest) -> Result<Page<User>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        // Count and slice must observe the same snapshot
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to set isolation level: {}", e)))?;

        let source = SnapshotPageSource { tx: Mutex::new(tx) };
        let page = paginate_source(&source, request).await?;

        source
            .tx
            .into_inner()
            .commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(page)
    }
}

/// Users read through one open transaction
struct SnapshotPageSource {
    tx: Mutex<Transaction<'static, Postgres>>,
}

#[async_trait]
impl PageSource<User> for SnapshotPageSource {
    async fn count(&self) -> Result<usize, DomainError> {
        let mut tx = self.tx.lock().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }

    async fn fetch(
        &self,
        skip: usize,
        take: usize,
        order: &OrderSpec,
    ) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY {} LIMIT $1 OFFSET $2",
            order_by_clause(order)?
        );

        let limit = i64::try_from(take)
            .map_err(|_| DomainError::internal(format!("Page size {} out of range", take)))?;
        let offset = i64::try_from(skip)
            .map_err(|_| DomainError::internal(format!("Offset {} out of range", skip)))?;

        let mut tx = self.tx.lock().await;
        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }
}

/// SQL expression ordering `field` the way the in-memory comparator does
fn sort_expression(field: &str) -> Option<&'static str> {
    let expression = match field {
        "id" => "id",
        "username" => "username COLLATE \"C\"",
        "email" => "email COLLATE \"C\"",
        "phone" => "phone COLLATE \"C\"",
        "status" => "status COLLATE \"C\"",
        "role" => "role COLLATE \"C\"",
        "firstname" => "firstname COLLATE \"C\"",
        "lastname" => "lastname COLLATE \"C\"",
        "city" => "city COLLATE \"C\"",
        "street" => "street COLLATE \"C\"",
        "number" => "number",
        "zipcode" => "zipcode COLLATE \"C\"",
        "created_at" => "created_at",
        "updated_at" => "updated_at",
        _ => return None,
    };

    Some(expression)
}

/// Build an ORDER BY list from whitelisted expressions, ending with natural order
fn order_by_clause(order: &OrderSpec) -> Result<String, DomainError> {
    let mut terms = Vec::with_capacity(order.len() + 1);

    for key in order {
        let expression = sort_expression(key.field()).ok_or_else(|| {
            DomainError::internal(format!("No column mapping for field '{}'", key.field()))
        })?;

        // Nulls sort before every value in ascending order
        let direction = if key.is_descending() {
            "DESC NULLS LAST"
        } else {
            "ASC NULLS FIRST"
        };

        terms.push(format!("{expression} {direction}"));
    }

    terms.push("seq ASC".to_string());
    Ok(terms.join(", "))
}

fn write_error(user: &User, action: &str, e: sqlx::Error) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        if msg.contains("username") {
            DomainError::conflict(format!("Username '{}' already exists", user.username()))
        } else if msg.contains("email") {
            DomainError::conflict(format!("Email '{}' already exists", user.email()))
        } else {
            DomainError::conflict(format!("User with ID '{}' already exists", user.id()))
        }
    } else {
        DomainError::storage(format!("Failed to {} user: {}", action, e))
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let column_error =
        |e: sqlx::Error| DomainError::storage(format!("Invalid user row in database: {}", e));

    let profile = UserProfile {
        username: row.try_get("username").map_err(column_error)?,
        email: row.try_get("email").map_err(column_error)?,
        phone: row.try_get("phone").map_err(column_error)?,
        name: Name {
            firstname: row.try_get("firstname").map_err(column_error)?,
            lastname: row.try_get("lastname").map_err(column_error)?,
        },
        address: Address {
            city: row.try_get("city").map_err(column_error)?,
            street: row.try_get("street").map_err(column_error)?,
            number: row.try_get("number").map_err(column_error)?,
            zipcode: row.try_get("zipcode").map_err(column_error)?,
            geolocation: Geolocation {
                lat: row.try_get("lat").map_err(column_error)?,
                long: row.try_get("long").map_err(column_error)?,
            },
        },
        status: UserStatus::from_str_lossy(row.try_get("status").map_err(column_error)?),
        role: UserRole::from_str_lossy(row.try_get("role").map_err(column_error)?),
    };

    Ok(User::restore(
        UserId::from_uuid(row.try_get("id").map_err(column_error)?),
        profile,
        row.try_get("password_hash").map_err(column_error)?,
        row.try_get("created_at").map_err(column_error)?,
        row.try_get("updated_at").map_err(column_error)?,
    ))
}
