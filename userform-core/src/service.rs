//! Record service
//!
//! Orchestrates validation, the partial-update merge, and the
//! normalization of persistence outcomes. Coded once against the
//! [`UserStore`] port; the datastore choice is injected.

use std::sync::Arc;

use thiserror::Error;

use crate::record::{NewUser, RawUser, UserPatch, UserRecord};
use crate::store::{StoreError, UserStore};
use crate::validate::{validate, Rule};

/// Per-field messages for the create path, which collects every
/// failure so callers see the complete set in one response.
pub const MSG_FIRST_NAME: &str =
    "First name must start with a capital letter and contain only letters.";
pub const MSG_LAST_NAME: &str =
    "Last name must start with a capital letter and contain only letters.";
pub const MSG_EMAIL: &str = "Email must be in a valid format.";
pub const MSG_AGE: &str = "Age must be a number between 0 and 120.";
pub const MSG_EDUCATION: &str =
    "Education must be between 2 and 200 characters long and contain only letters.";
pub const MSG_NO_FIELDS: &str = "Please provide at least one field to update.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more fields failed validation. No persistence call was
    /// made.
    #[error("validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// No record matches the requested id.
    #[error("user not found")]
    NotFound,

    /// The persistence layer failed. The cause stays here for the
    /// operator log; clients get a generic label.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// The service itself: stateless apart from the injected store.
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn UserStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Validate all five fields and insert. Failures are collected
    /// per field rather than short-circuiting.
    pub async fn create(&self, fields: RawUser) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        if !validate(&fields.first_name, Rule::Name) {
            errors.push(MSG_FIRST_NAME.to_owned());
        }
        if !validate(&fields.last_name, Rule::Name) {
            errors.push(MSG_LAST_NAME.to_owned());
        }
        if !validate(&fields.email, Rule::Email) {
            errors.push(MSG_EMAIL.to_owned());
        }
        if !validate(&fields.age, Rule::Age) {
            errors.push(MSG_AGE.to_owned());
        }
        if !validate(&fields.education, Rule::Education) {
            errors.push(MSG_EDUCATION.to_owned());
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let user = to_row(&fields)?;
        self.store.insert(&user).await?;
        Ok(())
    }

    /// Full listing ordered by id ascending. An empty table is a
    /// valid, non-error outcome.
    pub async fn list(&self) -> Result<Vec<UserRecord>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    /// Delete by id. Zero affected rows is reported as not-found, and
    /// the first name of the removed record rides along for the
    /// confirmation message.
    pub async fn delete(&self, id: i64) -> Result<Option<String>, ServiceError> {
        let first_name = self.store.find_by_id(id).await?.map(|u| u.first_name);
        let affected = self.store.delete_by_id(id).await?;
        if affected == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(first_name)
    }

    /// Merge the patch onto the stored record, then validate the
    /// merged candidate. Unlike create, only the first failure is
    /// reported.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<(), ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::Validation(vec![MSG_NO_FIELDS.to_owned()]));
        }

        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let merged = patch.merge_into(&current);
        if !validate(&merged.first_name, Rule::Name) {
            return Err(first_failure("Invalid first name"));
        }
        if !validate(&merged.last_name, Rule::Name) {
            return Err(first_failure("Invalid last name"));
        }
        if !validate(&merged.email, Rule::Email) {
            return Err(first_failure("Invalid email"));
        }
        if !validate(&merged.age, Rule::Age) {
            return Err(first_failure("Invalid age"));
        }
        if !validate(&merged.education, Rule::Education) {
            return Err(first_failure("Invalid education"));
        }

        let user = to_row(&merged)?;
        let affected = self.store.update_by_id(id, &user).await?;
        if affected == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }
}

fn first_failure(message: &str) -> ServiceError {
    ServiceError::Validation(vec![message.to_owned()])
}

/// Convert validated raw fields to the typed row. The age rule only
/// admits integers in 0..=120, so a parse failure can only mean the
/// caller skipped validation; it maps back to the age message.
fn to_row(fields: &RawUser) -> Result<NewUser, ServiceError> {
    let age: i32 = fields
        .age
        .parse()
        .map_err(|_| ServiceError::Validation(vec![MSG_AGE.to_owned()]))?;
    Ok(NewUser {
        first_name: fields.first_name.clone(),
        last_name: fields.last_name.clone(),
        email: fields.email.clone(),
        age,
        education: fields.education.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn service() -> RecordService {
        RecordService::new(Arc::new(MemoryStore::new()))
    }

    fn valid_fields() -> RawUser {
        RawUser {
            first_name: "John".into(),
            last_name: "Smith".into(),
            email: "john.smith@example.com".into(),
            age: "30".into(),
            education: "Computer Science".into(),
        }
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        let record = &listed[0];
        assert_eq!(record.id, 1);
        assert_eq!(record.first_name, "John");
        assert_eq!(record.age, 30);
        assert_eq!(record.education, "Computer Science");
    }

    #[tokio::test]
    async fn create_collects_every_failing_field() {
        let svc = service();
        let fields = RawUser {
            email: "not-an-email".into(),
            education: "B".into(),
            ..valid_fields()
        };

        let err = svc.create(fields).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors, vec![MSG_EMAIL.to_owned(), MSG_EDUCATION.to_owned()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Nothing was persisted.
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_all_fields_invalid_reports_all_five() {
        let svc = service();
        let err = svc.create(RawUser::default()).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.len(), 5),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_on_empty_store_is_success() {
        let svc = service();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_single_field_keeps_the_rest() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        let patch = UserPatch {
            age: Some("45".into()),
            ..Default::default()
        };
        svc.update(1, patch).await.unwrap();

        let record = &svc.list().await.unwrap()[0];
        assert_eq!(record.age, 45);
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Smith");
        assert_eq!(record.email, "john.smith@example.com");
        assert_eq!(record.education, "Computer Science");
    }

    #[tokio::test]
    async fn update_with_no_fields_is_rejected_before_storage() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        let err = svc.update(1, UserPatch::default()).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors, vec![MSG_NO_FIELDS.to_owned()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Stored record untouched.
        let record = &svc.list().await.unwrap()[0];
        assert_eq!(record.age, 30);
    }

    #[tokio::test]
    async fn update_validates_the_merged_candidate() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        // Patch value is itself invalid; merge happens first, then the
        // candidate fails the name rule.
        let patch = UserPatch {
            first_name: Some("j0hn".into()),
            ..Default::default()
        };
        let err = svc.update(1, patch).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors, vec!["Invalid first name".to_owned()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_reports_only_the_first_failure() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        let patch = UserPatch {
            first_name: Some("j0hn".into()),
            email: Some("broken".into()),
            ..Default::default()
        };
        let err = svc.update(1, patch).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let svc = service();
        let patch = UserPatch {
            age: Some("45".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update(42, patch).await.unwrap_err(),
            ServiceError::NotFound
        ));
    }

    #[tokio::test]
    async fn delete_returns_first_name_for_confirmation() {
        let svc = service();
        svc.create(valid_fields()).await.unwrap();

        let name = svc.delete(1).await.unwrap();
        assert_eq!(name.as_deref(), Some("John"));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_record_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete(42).await.unwrap_err(),
            ServiceError::NotFound
        ));
    }
}
