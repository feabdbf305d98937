//! userform-core: domain logic for the user-registration service
//!
//! Field validation, the record model with partial-update merge
//! semantics, the abstract persistence port, and the record service
//! that ties them together. HTTP transport and the sqlx stores live
//! in `userform-server`.

pub mod memory;
pub mod record;
pub mod service;
pub mod store;
pub mod validate;

pub use memory::MemoryStore;
pub use record::{NewUser, RawUser, UserPatch, UserRecord};
pub use service::{RecordService, ServiceError};
pub use store::{StoreError, UserStore};
pub use validate::{validate, Rule};
