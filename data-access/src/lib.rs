//! Narrow store handle for the signup flow.
//!
//! Everything goes through [`DataAccess`]: one lookup, one insert, one
//! update. The pool is opened at startup and closed at shutdown; handlers
//! clone the handle.

use email::Email;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct DataAccess {
    pool: SqlitePool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub verification_code: i64,
    pub verified: bool,
}

impl DataAccess {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        Ok(Self::new(SqlitePool::connect(database_url).await?))
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../migrations").run(&self.pool).await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, verification_code, verified
            FROM users WHERE email = ? LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a pending (unverified) signup and returns its row id.
    ///
    /// Does NOT check for an existing row; callers do the existence check
    /// first. There is no transaction around check-then-insert.
    pub async fn insert_user(
        &self,
        email: &Email,
        verification_code: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, verification_code)
            VALUES (?, ?)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(verification_code)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn mark_verified(&self, email: &Email) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET verified = 1 WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
