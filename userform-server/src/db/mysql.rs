//! MySQL-backed user store

use async_trait::async_trait;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};

use userform_core::{NewUser, StoreError, UserRecord, UserStore};

/// Create a MySQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(super::DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Run startup migrations. Mirrors the PostgreSQL schema.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT AUTO_INCREMENT PRIMARY KEY,
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            age INT NOT NULL CHECK (age >= 0 AND age <= 120),
            education VARCHAR(200) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("mysql migrations complete");
    Ok(())
}

/// User store over a MySQL pool.
#[derive(Clone)]
pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn record_from_row(row: &MySqlRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
        education: row.try_get("education")?,
    })
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (first_name, last_name, email, age, education) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.education)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, age, education \
             FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::backend)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, age, education \
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref()
            .map(record_from_row)
            .transpose()
            .map_err(StoreError::backend)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(result.rows_affected())
    }

    async fn update_by_id(&self, id: i64, user: &NewUser) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, email = ?, \
             age = ?, education = ? WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.education)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        // MySQL reports changed rows, not matched rows: a no-op update
        // on an existing record comes back as 0. The contract wants
        // matched rows, so confirm existence before reporting 0.
        if result.rows_affected() == 0 {
            let exists = sqlx::query("SELECT id FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::backend)?;
            return Ok(u64::from(exists.is_some()));
        }
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database.
    // Run with: DATABASE_URL=mysql://... cargo test -p userform-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }
}
