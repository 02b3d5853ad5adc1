//! Quality objective validation rules

use thiserror::Error;

use super::entity::ObjectiveStatus;
use crate::domain::DomainError;
use crate::domain::common::validation::length_between;

pub const MAX_TEXT_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObjectiveValidationError {
    #[error("El título del objetivo debe tener entre 3 y 200 caracteres")]
    InvalidTitle,

    #[error("El indicador es obligatorio y no puede superar 200 caracteres")]
    InvalidIndicator,

    #[error("El campo {0} no puede superar {1} caracteres")]
    FieldTooLong(&'static str, usize),

    #[error("El valor meta debe ser un número mayor que cero")]
    InvalidTarget,

    #[error("El valor medido debe ser un número no negativo")]
    InvalidValue,

    #[error("La fecha límite no puede ser anterior a la fecha de inicio")]
    DueBeforeStart,

    #[error("No se puede registrar avance en un objetivo en estado {0}")]
    ProgressNotAllowed(ObjectiveStatus),

    #[error("Un objetivo cancelado no puede cambiar de estado")]
    Cancelled,
}

impl From<ObjectiveValidationError> for DomainError {
    fn from(e: ObjectiveValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

pub fn validate_title(title: &str) -> Result<(), ObjectiveValidationError> {
    if !length_between(title, 3, MAX_TEXT_LENGTH) {
        return Err(ObjectiveValidationError::InvalidTitle);
    }
    Ok(())
}

pub fn validate_indicator(indicator: &str) -> Result<(), ObjectiveValidationError> {
    if !length_between(indicator, 1, MAX_TEXT_LENGTH) {
        return Err(ObjectiveValidationError::InvalidIndicator);
    }
    Ok(())
}

pub fn validate_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ObjectiveValidationError> {
    if value.is_some_and(|v| v.chars().count() > max) {
        return Err(ObjectiveValidationError::FieldTooLong(field, max));
    }
    Ok(())
}

pub fn validate_target(target: f64) -> Result<(), ObjectiveValidationError> {
    if !target.is_finite() || target <= 0.0 {
        return Err(ObjectiveValidationError::InvalidTarget);
    }
    Ok(())
}

pub fn validate_measurement(value: f64) -> Result<(), ObjectiveValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ObjectiveValidationError::InvalidValue);
    }
    Ok(())
}
