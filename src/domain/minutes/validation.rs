//! Meeting minutes validation rules

use thiserror::Error;

use super::entity::MinutesStatus;
use crate::domain::DomainError;
use crate::domain::common::validation::length_between;

pub const MAX_LIST_ITEMS: usize = 100;
pub const MAX_ITEM_LENGTH: usize = 500;
pub const MAX_SUMMARY_LENGTH: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinutesValidationError {
    #[error("El título del acta debe tener entre 3 y 200 caracteres")]
    InvalidTitle,

    #[error("El acta debe tener al menos un asistente")]
    NoAttendees,

    #[error("La lista de {0} admite como máximo {1} elementos de hasta {2} caracteres")]
    InvalidList(&'static str, usize, usize),

    #[error("El resumen no puede superar {0} caracteres")]
    SummaryTooLong(usize),

    #[error("La descripción del acuerdo es obligatoria")]
    EmptyAgreement,

    #[error("Acuerdo no encontrado en el acta")]
    AgreementNotFound,

    #[error("Solo se pueden modificar actas en borrador (estado actual: {0})")]
    NotDraft(MinutesStatus),

    #[error("No se puede pasar un acta de {from} a {to}")]
    InvalidTransition { from: MinutesStatus, to: MinutesStatus },

    #[error("Un acta archivada no admite cambios")]
    Archived,
}

impl From<MinutesValidationError> for DomainError {
    fn from(e: MinutesValidationError) -> Self {
        match e {
            MinutesValidationError::AgreementNotFound => DomainError::not_found(e.to_string()),
            _ => DomainError::validation(e.to_string()),
        }
    }
}

pub fn validate_title(title: &str) -> Result<(), MinutesValidationError> {
    if !length_between(title, 3, 200) {
        return Err(MinutesValidationError::InvalidTitle);
    }
    Ok(())
}

pub fn validate_attendees(attendees: &[String]) -> Result<(), MinutesValidationError> {
    if attendees.is_empty() {
        return Err(MinutesValidationError::NoAttendees);
    }
    validate_list("asistentes", attendees)
}

pub fn validate_list(label: &'static str, items: &[String]) -> Result<(), MinutesValidationError> {
    if items.len() > MAX_LIST_ITEMS || items.iter().any(|i| i.chars().count() > MAX_ITEM_LENGTH) {
        return Err(MinutesValidationError::InvalidList(
            label,
            MAX_LIST_ITEMS,
            MAX_ITEM_LENGTH,
        ));
    }
    Ok(())
}

pub fn validate_summary(summary: Option<&str>) -> Result<(), MinutesValidationError> {
    if summary.is_some_and(|s| s.chars().count() > MAX_SUMMARY_LENGTH) {
        return Err(MinutesValidationError::SummaryTooLong(MAX_SUMMARY_LENGTH));
    }
    Ok(())
}
