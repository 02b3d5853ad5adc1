//! Training plan validation rules

use thiserror::Error;

use super::entity::TrainingStatus;
use crate::domain::DomainError;
use crate::domain::common::validation::length_between;

pub const MAX_TEXT_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_DURATION_HOURS: f64 = 10_000.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainingPlanValidationError {
    #[error("El título de la formación debe tener entre 3 y 200 caracteres")]
    InvalidTitle,

    #[error("El campo {0} no puede superar {1} caracteres")]
    FieldTooLong(&'static str, usize),

    #[error("La fecha de fin no puede ser anterior a la fecha de inicio")]
    EndBeforeStart,

    #[error("La duración debe ser mayor que cero horas")]
    InvalidDuration,

    #[error("No se puede pasar una formación de {from} a {to}")]
    InvalidTransition {
        from: TrainingStatus,
        to: TrainingStatus,
    },

    #[error("La formación en estado {0} no admite cambios de participantes")]
    Closed(TrainingStatus),

    #[error("El usuario ya está inscrito en la formación")]
    AlreadyEnrolled,

    #[error("El usuario no está inscrito en la formación")]
    NotEnrolled,
}

impl From<TrainingPlanValidationError> for DomainError {
    fn from(e: TrainingPlanValidationError) -> Self {
        match e {
            TrainingPlanValidationError::AlreadyEnrolled => DomainError::conflict(e.to_string()),
            TrainingPlanValidationError::NotEnrolled => DomainError::not_found(e.to_string()),
            _ => DomainError::validation(e.to_string()),
        }
    }
}

pub fn validate_title(title: &str) -> Result<(), TrainingPlanValidationError> {
    if !length_between(title, 3, MAX_TEXT_LENGTH) {
        return Err(TrainingPlanValidationError::InvalidTitle);
    }
    Ok(())
}

pub fn validate_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), TrainingPlanValidationError> {
    if value.is_some_and(|v| v.chars().count() > max) {
        return Err(TrainingPlanValidationError::FieldTooLong(field, max));
    }
    Ok(())
}

pub fn validate_duration(hours: f64) -> Result<(), TrainingPlanValidationError> {
    if !hours.is_finite() || hours <= 0.0 || hours > MAX_DURATION_HOURS {
        return Err(TrainingPlanValidationError::InvalidDuration);
    }
    Ok(())
}
