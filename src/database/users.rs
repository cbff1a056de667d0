use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::user::User;

/// Read/write access to credential records. No update or delete: accounts
/// are created once and only ever read back through the auth gate.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup; absence is a valid, non-error outcome.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a new credential record. The store's UNIQUE constraint is the
    /// authoritative duplicate guard and surfaces as `Conflict`.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError>;
}

/// Postgres-backed credential store.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                DatabaseError::Conflict(format!("username '{}' is already taken", username)),
            ),
            Err(other) => Err(other.into()),
        }
    }
}
