//! Database layer - connection pools and the sqlx-backed user stores
//!
//! Both backends implement the same `UserStore` port from
//! `userform-core`; business logic never branches on the datastore.
//! Schema migrations run at startup with `CREATE TABLE IF NOT EXISTS`.

pub mod mysql;
pub mod postgres;

pub use mysql::MySqlUserStore;
pub use postgres::PgUserStore;

/// Default maximum connections for either pool.
/// Kept low for a single small service.
pub(crate) const DEFAULT_MAX_CONNECTIONS: u32 = 5;
