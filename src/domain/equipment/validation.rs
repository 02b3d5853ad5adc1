//! Equipment validation rules

use thiserror::Error;

use crate::domain::DomainError;
use crate::domain::common::validation::length_between;

pub const MAX_CODE_LENGTH: usize = 50;
pub const MAX_FIELD_LENGTH: usize = 200;
pub const MIN_FREQUENCY_DAYS: u32 = 1;
pub const MAX_FREQUENCY_DAYS: u32 = 3650;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquipmentValidationError {
    #[error("El nombre del equipo debe tener entre 2 y 100 caracteres")]
    InvalidName,

    #[error("El código del equipo es obligatorio y no puede superar {0} caracteres")]
    InvalidCode(usize),

    #[error("El tipo de equipo es obligatorio")]
    MissingType,

    #[error("El campo {0} no puede superar {1} caracteres")]
    FieldTooLong(&'static str, usize),

    #[error("La frecuencia de mantenimiento debe estar entre {0} y {1} días")]
    InvalidFrequency(u32, u32),

    #[error("La fecha de mantenimiento no puede ser anterior a la fecha de compra")]
    MaintenanceBeforePurchase,

    #[error("Un equipo retirado no admite cambios de estado ni mantenimientos")]
    Retired,
}

impl From<EquipmentValidationError> for DomainError {
    fn from(e: EquipmentValidationError) -> Self {
        DomainError::validation(e.to_string())
    }
}

pub fn validate_equipment_name(name: &str) -> Result<(), EquipmentValidationError> {
    if !length_between(name, 2, 100) {
        return Err(EquipmentValidationError::InvalidName);
    }
    Ok(())
}

pub fn validate_equipment_code(code: &str) -> Result<(), EquipmentValidationError> {
    if !length_between(code, 1, MAX_CODE_LENGTH) {
        return Err(EquipmentValidationError::InvalidCode(MAX_CODE_LENGTH));
    }
    Ok(())
}

pub fn validate_equipment_type(equipment_type: &str) -> Result<(), EquipmentValidationError> {
    if equipment_type.trim().is_empty() {
        return Err(EquipmentValidationError::MissingType);
    }
    if equipment_type.chars().count() > MAX_FIELD_LENGTH {
        return Err(EquipmentValidationError::FieldTooLong(
            "tipo de equipo",
            MAX_FIELD_LENGTH,
        ));
    }
    Ok(())
}

pub fn validate_frequency(days: Option<u32>) -> Result<(), EquipmentValidationError> {
    match days {
        Some(d) if !(MIN_FREQUENCY_DAYS..=MAX_FREQUENCY_DAYS).contains(&d) => Err(
            EquipmentValidationError::InvalidFrequency(MIN_FREQUENCY_DAYS, MAX_FREQUENCY_DAYS),
        ),
        _ => Ok(()),
    }
}

pub fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), EquipmentValidationError> {
    match value {
        Some(v) if v.chars().count() > MAX_FIELD_LENGTH => Err(
            EquipmentValidationError::FieldTooLong(field, MAX_FIELD_LENGTH),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_bounds() {
        assert!(validate_frequency(None).is_ok());
        assert!(validate_frequency(Some(1)).is_ok());
        assert!(validate_frequency(Some(3650)).is_ok());
        assert!(validate_frequency(Some(0)).is_err());
        assert!(validate_frequency(Some(3651)).is_err());
    }

    #[test]
    fn test_code_required() {
        assert!(validate_equipment_code("EQ-001").is_ok());
        assert!(validate_equipment_code("  ").is_err());
    }
}
