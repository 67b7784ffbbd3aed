//! Author validation rules

use super::{check_not_future, Validatable, ValidationResult, ValidatorExt};
use crate::dto::{CreateAuthorDto, UpdateAuthorDto};

impl Validatable for CreateAuthorDto {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(year) = self.birth_year {
            check_not_future(&mut result, "birth_year", year);
        }
        result
    }
}

impl Validatable for UpdateAuthorDto {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        if let Some(year) = self.birth_year {
            check_not_future(&mut result, "birth_year", year);
        }
        result
    }
}
