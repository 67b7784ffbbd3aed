//! Validation Framework
//!
//! Input DTOs declare their static rules with `validator` derives. The
//! [`Validatable`] implementations in this module layer the rules that depend
//! on the current date on top and collect everything into a single
//! [`ValidationResult`].

mod author;
mod book;

use crate::ApplicationError;
use chrono::Datelike;
use ebookstore_domain::Isbn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Validation result containing all errors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Object-level errors
    pub object_errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: BTreeMap::new(),
            object_errors: Vec::new(),
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add an object-level error
    pub fn add_object_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.object_errors.push(message.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }

        self.object_errors.extend(other.object_errors);
    }

    /// One-line description of every error
    pub fn summary(&self) -> String {
        let mut messages = Vec::new();

        for (field, errors) in &self.field_errors {
            for error in errors {
                messages.push(format!("{}: {}", field, error));
            }
        }

        messages.extend(self.object_errors.iter().cloned());
        messages.join("; ")
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(self) -> Result<(), ApplicationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ApplicationError::InvalidFields(self))
        }
    }
}

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Extension to convert validator errors to our format
pub trait ValidatorExt {
    fn to_validation_result(&self) -> ValidationResult;
}

impl<T: Validate> ValidatorExt for T {
    fn to_validation_result(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => {
                let mut result = ValidationResult::success();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        result.add_field_error(field.to_string(), message);
                    }
                }

                result
            }
        }
    }
}

/// Current calendar year (UTC)
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Custom `validator` rule: ISBN-10 or ISBN-13 with a matching checksum.
pub fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    Isbn::parse(value).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("isbn");
        error.message = Some(err.to_string().into());
        error
    })
}

/// Reject years later than the current one.
pub(crate) fn check_not_future(result: &mut ValidationResult, field: &str, year: i32) {
    if year > current_year() {
        result.add_field_error(field, format!("{} cannot be in the future", field));
    }
}
