//! Record model and partial-update merge semantics
//!
//! JSON field names stay camelCase for compatibility with the
//! original form clients; storage uses the typed [`NewUser`] row.

use serde::{Deserialize, Serialize};

/// A stored registration entry. `id` is assigned by the datastore on
/// insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub education: String,
}

/// Raw field values as submitted, prior to validation. Age is kept as
/// a string here; it only becomes an integer once validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub education: String,
}

/// A validated row ready for insert or update. No id: the datastore
/// assigns it on insert and keys updates separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i32,
    pub education: String,
}

/// Partial update payload. A field that is `None` or empty keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
    pub education: Option<String>,
}

impl UserPatch {
    /// True when no field carries a usable value.
    pub fn is_empty(&self) -> bool {
        fn absent(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, str::is_empty)
        }
        absent(&self.first_name)
            && absent(&self.last_name)
            && absent(&self.email)
            && absent(&self.age)
            && absent(&self.education)
    }

    /// Merge onto the stored record, producing the candidate fields.
    /// Validation always runs against this merged result, never the
    /// partial input alone.
    pub fn merge_into(&self, current: &UserRecord) -> RawUser {
        fn pick(patch: &Option<String>, current: String) -> String {
            match patch.as_deref() {
                Some(value) if !value.is_empty() => value.to_owned(),
                _ => current,
            }
        }
        RawUser {
            first_name: pick(&self.first_name, current.first_name.clone()),
            last_name: pick(&self.last_name, current.last_name.clone()),
            email: pick(&self.email, current.email.clone()),
            age: pick(&self.age, current.age.to_string()),
            education: pick(&self.education, current.education.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> UserRecord {
        UserRecord {
            id: 7,
            first_name: "John".into(),
            last_name: "Smith".into(),
            email: "john@example.com".into(),
            age: 30,
            education: "BSc".into(),
        }
    }

    #[test]
    fn empty_patch_detected() {
        assert!(UserPatch::default().is_empty());
        assert!(UserPatch {
            age: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
        assert!(!UserPatch {
            age: Some("45".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let patch = UserPatch {
            age: Some("45".into()),
            ..Default::default()
        };
        let merged = patch.merge_into(&stored());
        assert_eq!(merged.age, "45");
        assert_eq!(merged.first_name, "John");
        assert_eq!(merged.email, "john@example.com");
        assert_eq!(merged.education, "BSc");
    }

    #[test]
    fn merge_treats_empty_string_as_absent() {
        let patch = UserPatch {
            first_name: Some(String::new()),
            last_name: Some("Jones".into()),
            ..Default::default()
        };
        let merged = patch.merge_into(&stored());
        assert_eq!(merged.first_name, "John");
        assert_eq!(merged.last_name, "Jones");
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Smith");
        assert_eq!(json["age"], 30);
    }
}
