//! Abstract persistence port for user records
//!
//! The record service is coded against this trait only; the concrete
//! sqlx stores live in `userform-server` and [`MemoryStore`] backs
//! tests and throwaway dev runs.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{NewUser, UserRecord};

/// Storage-layer failure. The wrapped cause is for operator logs;
/// callers surface only a generic label.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Persistence operations on the `users` table, independent of the
/// datastore technology.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record; the backend assigns the id.
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError>;

    /// Every record, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError>;

    /// Returns the number of rows deleted (0 or 1).
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;

    /// Overwrite every field of the record with `id`. Returns the
    /// number of rows matched (0 or 1).
    async fn update_by_id(&self, id: i64, user: &NewUser) -> Result<u64, StoreError>;
}
