//! Field validation rules for registration input
//!
//! Every rule is a pure regex predicate over the raw string value.
//! Empty or non-matching input is an ordinary `false`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Names: letters only, uppercase first letter, 3+ characters.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z]{2,}$").expect("invalid name regex"));

/// Conventional local@domain.tld shape, ASCII only.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("invalid email regex")
});

/// Integer 0..=120 with no leading zeros and no sign.
static AGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(1[01][0-9]|[1-9]?[0-9]|120)$").expect("invalid age regex"));

/// Letters and whitespace, 2 to 200 characters.
static EDUCATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]{2,200}$").expect("invalid education regex"));

/// Named validation rule for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// First or last name.
    Name,
    Email,
    /// Age as a numeric string.
    Age,
    Education,
}

impl Rule {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Name => &NAME_RE,
            Self::Email => &EMAIL_RE,
            Self::Age => &AGE_RE,
            Self::Education => &EDUCATION_RE,
        }
    }
}

/// Check a raw field value against a named rule.
///
/// Total and deterministic: absence (empty string) and mismatch are
/// both plain `false`.
pub fn validate(value: &str, rule: Rule) -> bool {
    if value.is_empty() {
        return false;
    }
    rule.regex().is_match(value)
}
