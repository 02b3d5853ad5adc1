//! Client validation rules

use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::common::validation::{is_valid_email, length_between};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_FIELD_LENGTH: usize = 200;
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Errors raised while building or changing a client
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientValidationError {
    #[error("El nombre debe tener entre {0} y {1} caracteres")]
    InvalidName(usize, usize),

    #[error("El email '{0}' no es válido")]
    InvalidEmail(String),

    #[error("El campo {0} no puede superar {1} caracteres")]
    FieldTooLong(&'static str, usize),
}

impl From<ClientValidationError> for DomainError {
    fn from(e: ClientValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

pub fn validate_client_name(name: &str) -> Result<(), ClientValidationError> {
    if !length_between(name, MIN_NAME_LENGTH, MAX_NAME_LENGTH) {
        return Err(ClientValidationError::InvalidName(
            MIN_NAME_LENGTH,
            MAX_NAME_LENGTH,
        ));
    }
    Ok(())
}

pub fn validate_client_email(email: &str) -> Result<(), ClientValidationError> {
    if !is_valid_email(email) {
        return Err(ClientValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Check an optional free-text field against a maximum length
pub fn validate_optional_field(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ClientValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ClientValidationError::FieldTooLong(field, max)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("Jo").is_ok());
        assert!(validate_client_name("J").is_err());
        assert!(validate_client_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_optional_field() {
        assert!(validate_optional_field("teléfono", None, 10).is_ok());
        assert!(validate_optional_field("teléfono", Some("123"), 10).is_ok());
        let err = validate_optional_field("teléfono", Some("12345678901"), 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "El campo teléfono no puede superar 10 caracteres"
        );
    }
}
