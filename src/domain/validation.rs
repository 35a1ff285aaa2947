//! Field-level validation results

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A single failed rule, addressed by a dotted field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of running every rule of a validator against one value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn ensure(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Messages recorded for `field`
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.messages_for(field).next().is_some()
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DomainError::invalid_fields(self.errors))
        }
    }
}

/// Runs a rule set against a value
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationReport;
}
