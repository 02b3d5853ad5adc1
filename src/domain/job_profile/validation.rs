//! Job profile validation rules

use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::common::validation::length_between;

const MAX_ITEMS: usize = 50;
const MAX_ITEM_LENGTH: usize = 500;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum JobProfileValidationError {
    #[error("El título del puesto debe tener entre 2 y 100 caracteres")]
    InvalidTitle,

    #[error("El departamento debe tener entre 2 y 100 caracteres")]
    InvalidDepartment,

    #[error("La descripción no puede superar 2000 caracteres")]
    DescriptionTooLong,

    #[error("La lista de {0} admite como máximo {1} elementos de hasta {2} caracteres")]
    InvalidList(&'static str, usize, usize),

    #[error("Un puesto no puede reportar a sí mismo")]
    ReportsToItself,
}

impl From<JobProfileValidationError> for DomainError {
    fn from(e: JobProfileValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

pub fn validate_title(title: &str) -> Result<(), JobProfileValidationError> {
    if !length_between(title, 2, 100) {
        return Err(JobProfileValidationError::InvalidTitle);
    }
    Ok(())
}

pub fn validate_department(department: &str) -> Result<(), JobProfileValidationError> {
    if !length_between(department, 2, 100) {
        return Err(JobProfileValidationError::InvalidDepartment);
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), JobProfileValidationError> {
    if description.is_some_and(|d| d.chars().count() > 2000) {
        return Err(JobProfileValidationError::DescriptionTooLong);
    }
    Ok(())
}

pub fn validate_list(
    label: &'static str,
    items: &[String],
) -> Result<(), JobProfileValidationError> {
    if items.len() > MAX_ITEMS || items.iter().any(|i| i.chars().count() > MAX_ITEM_LENGTH) {
        return Err(JobProfileValidationError::InvalidList(
            label,
            MAX_ITEMS,
            MAX_ITEM_LENGTH,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_list() {
        assert!(validate_list("competencias", &["Liderazgo".to_string()]).is_ok());
        assert!(validate_list("competencias", &vec!["x".to_string(); 51]).is_err());
        assert!(validate_list("competencias", &["x".repeat(501)]).is_err());
    }
}
