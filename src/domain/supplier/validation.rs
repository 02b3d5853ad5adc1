//! Supplier validation rules

use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::common::validation::{is_valid_email, length_between};

const MAX_FIELD_LENGTH: usize = 200;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SupplierValidationError {
    #[error("El nombre del proveedor debe tener entre 2 y 150 caracteres")]
    InvalidName,

    #[error("El NIF del proveedor es obligatorio y no puede superar 20 caracteres")]
    InvalidTaxId,

    #[error("El email '{0}' no es válido")]
    InvalidEmail(String),

    #[error("El campo {0} no puede superar {1} caracteres")]
    FieldTooLong(&'static str, usize),

    #[error("La puntuación debe estar entre 0 y 100")]
    InvalidScore,

    #[error("No se puede evaluar un proveedor inactivo")]
    Inactive,
}

impl From<SupplierValidationError> for DomainError {
    fn from(e: SupplierValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

pub fn validate_supplier_name(name: &str) -> Result<(), SupplierValidationError> {
    if !length_between(name, 2, 150) {
        return Err(SupplierValidationError::InvalidName);
    }
    Ok(())
}

pub fn validate_tax_id(tax_id: &str) -> Result<(), SupplierValidationError> {
    if !length_between(tax_id, 1, 20) {
        return Err(SupplierValidationError::InvalidTaxId);
    }
    Ok(())
}

pub fn validate_optional_email(email: Option<&str>) -> Result<(), SupplierValidationError> {
    match email {
        Some(e) if !is_valid_email(e) => Err(SupplierValidationError::InvalidEmail(e.to_string())),
        _ => Ok(()),
    }
}

pub fn validate_text(field: &'static str, value: Option<&str>) -> Result<(), SupplierValidationError> {
    if value.is_some_and(|v| v.chars().count() > MAX_FIELD_LENGTH) {
        return Err(SupplierValidationError::FieldTooLong(field, MAX_FIELD_LENGTH));
    }
    Ok(())
}

pub fn validate_score(score: f64) -> Result<(), SupplierValidationError> {
    if !(0.0..=100.0).contains(&score) {
        return Err(SupplierValidationError::InvalidScore);
    }
    Ok(())
}
