//! User validation utilities

use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::common::validation::{is_valid_email, length_between};

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("El nombre debe tener entre {0} y {1} caracteres")]
    InvalidName(usize, usize),

    #[error("El email '{0}' no es válido")]
    InvalidEmail(String),

    #[error("La contraseña debe tener al menos {0} caracteres")]
    PasswordTooShort(usize),

    #[error("La contraseña no puede superar {0} caracteres")]
    PasswordTooLong(usize),
}

impl From<UserValidationError> for DomainError {
    fn from(e: UserValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub fn validate_user_name(name: &str) -> Result<(), UserValidationError> {
    if !length_between(name, MIN_NAME_LENGTH, MAX_NAME_LENGTH) {
        return Err(UserValidationError::InvalidName(
            MIN_NAME_LENGTH,
            MAX_NAME_LENGTH,
        ));
    }
    Ok(())
}

pub fn validate_user_email(email: &str) -> Result<(), UserValidationError> {
    if !is_valid_email(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if len > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
