//! Tenant identifier

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const MAX_COMPANY_ID_LENGTH: usize = 50;

/// Company (tenant) identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyId(String);

impl CompanyId {
    /// Create a new CompanyId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_company_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CompanyId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanyId> for String {
    fn from(id: CompanyId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a company ID
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
/// - No consecutive hyphens
fn validate_company_id(id: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| {
        DomainError::invalid_id(format!("Identificador de empresa inválido: {}", reason))
    };

    if id.is_empty() {
        return Err(invalid("no puede estar vacío"));
    }

    if id.len() > MAX_COMPANY_ID_LENGTH {
        return Err(invalid("supera los 50 caracteres"));
    }

    let starts_ok = id.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    let ends_ok = id.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());

    if !starts_ok || !ends_ok {
        return Err(invalid("debe empezar y terminar con una letra o número"));
    }

    if id.contains("--") {
        return Err(invalid("no puede contener guiones consecutivos"));
    }

    if let Some(c) = id.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        return Err(invalid(&format!("carácter no permitido '{}'", c)));
    }

    Ok(())
}
