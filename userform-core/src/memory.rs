//! In-memory user store
//!
//! Backs the test suite and `--database-url memory` dev runs. Ids are
//! assigned the way the SQL backends do: monotonically, never reused.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::record::{NewUser, UserRecord};
use crate::store::{StoreError, UserStore};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<UserRecord>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.rows.push(UserRecord {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            age: user.age,
            education: user.education.clone(),
        });
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows = inner.rows.clone();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok((before - inner.rows.len()) as u64)
    }

    async fn update_by_id(&self, id: i64, user: &NewUser) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.first_name = user.first_name.clone();
                row.last_name = user.last_name.clone();
                row.email = user.email.clone();
                row.age = user.age;
                row.education = user.education.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
