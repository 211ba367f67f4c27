//! # Field Validation
//!
//! Pure validation of a [`UserDraft`] before it is sent to the remote collection.
//!
//! The same [`ValidationErrors`] type carries both locally computed errors and the
//! per-field errors a server returns when it rejects a create or update, so the
//! form state never has to reconcile two shapes.

use crate::model::{DraftField, UserDraft};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const STATUS_REQUIRED: &str = "Status is required";

// One "@", then a dot somewhere in the domain part.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Field name → human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<DraftField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds errors from a server-supplied `field → message` mapping.
    ///
    /// Keys that do not name a draft field are dropped.
    pub fn from_server<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mapped = Self::new();
        for (key, message) in errors {
            match key.as_ref().parse::<DraftField>() {
                Ok(field) => mapped.insert(field, message),
                Err(reason) => debug!(%reason, "Dropping server field error"),
            }
        }
        mapped
    }

    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: DraftField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    /// Overlays `other` on top of these errors; entries in `other` win.
    pub fn merge(&mut self, other: &ValidationErrors) {
        for (field, message) in other.iter() {
            self.insert(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validates a draft, returning one entry per invalid field.
///
/// # Rules
/// - `name` must not be blank.
/// - `email` must not be blank and must have the `local@domain.tld` shape.
/// - `status` must not be blank.
///
/// An empty result means the draft may be submitted.
pub fn validate(draft: &UserDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.name.trim().is_empty() {
        errors.insert(DraftField::Name, NAME_REQUIRED);
    }

    if draft.email.trim().is_empty() {
        errors.insert(DraftField::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.insert(DraftField::Email, EMAIL_INVALID);
    }

    if draft.status.trim().is_empty() {
        errors.insert(DraftField::Status, STATUS_REQUIRED);
    }

    errors
}
