//! Supplier entity and evaluation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    SupplierValidationError, validate_optional_email, validate_score, validate_supplier_name,
    validate_tax_id, validate_text,
};
use crate::domain::common::validation::{normalize_email, normalize_optional};
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::{StorageEntity, UniqueConstraint};
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

define_id!(
    /// Supplier identifier
    SupplierId,
    "proveedor"
);

string_enum!(
    SupplierCategory, "categoría de proveedor" {
        Product => "PRODUCT",
        Service => "SERVICE",
        Both => "BOTH",
    }
);

string_enum!(
    /// Approval status; evaluations move a supplier between the rated states
    #[derive(Default)]
    SupplierStatus, "estado de proveedor" {
        #[default]
        Pending => "PENDING",
        Approved => "APPROVED",
        Conditional => "CONDITIONAL",
        Rejected => "REJECTED",
        Inactive => "INACTIVE",
    }
);

/// Minimum score for an approved supplier
pub const APPROVAL_THRESHOLD: f64 = 80.0;
/// Minimum score for a conditionally approved supplier
pub const CONDITIONAL_THRESHOLD: f64 = 60.0;

impl SupplierStatus {
    /// Status earned by an evaluation score
    pub fn for_score(score: f64) -> Self {
        if score >= APPROVAL_THRESHOLD {
            Self::Approved
        } else if score >= CONDITIONAL_THRESHOLD {
            Self::Conditional
        } else {
            Self::Rejected
        }
    }
}

/// A periodic supplier evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierEvaluation {
    pub score: f64,
    pub comments: Option<String>,
    pub evaluated_by: UserId,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub name: String,
    pub tax_id: String,
    pub category: SupplierCategory,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SupplierChanges {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub category: Option<SupplierCategory>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    company_id: CompanyId,
    name: String,
    /// Stored uppercased
    tax_id: String,
    category: SupplierCategory,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    contact_name: Option<String>,
    status: SupplierStatus,
    evaluations: Vec<SupplierEvaluation>,
    last_score: Option<f64>,
    last_evaluated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(company_id: CompanyId, data: NewSupplier) -> Result<Self, SupplierValidationError> {
        let name = data.name.trim().to_string();
        let tax_id = normalize_tax_id(&data.tax_id);
        let email = normalize_optional(data.email).map(|e| normalize_email(&e));
        let phone = normalize_optional(data.phone);
        let address = normalize_optional(data.address);
        let contact_name = normalize_optional(data.contact_name);

        validate_supplier_name(&name)?;
        validate_tax_id(&tax_id)?;
        validate_optional_email(email.as_deref())?;
        validate_text("teléfono", phone.as_deref())?;
        validate_text("dirección", address.as_deref())?;
        validate_text("contacto", contact_name.as_deref())?;

        let now = Utc::now();

        Ok(Self {
            id: SupplierId::generate(),
            company_id,
            name,
            tax_id,
            category: data.category,
            email,
            phone,
            address,
            contact_name,
            status: SupplierStatus::default(),
            evaluations: Vec::new(),
            last_score: None,
            last_evaluated_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &SupplierId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn category(&self) -> SupplierCategory {
        self.category
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.contact_name.as_deref()
    }

    pub fn status(&self) -> SupplierStatus {
        self.status
    }

    pub fn evaluations(&self) -> &[SupplierEvaluation] {
        &self.evaluations
    }

    pub fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    pub fn last_evaluated_at(&self) -> Option<DateTime<Utc>> {
        self.last_evaluated_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn apply(&mut self, changes: SupplierChanges) -> Result<(), SupplierValidationError> {
        let name = changes.name.map(|v| v.trim().to_string());
        let tax_id = changes.tax_id.as_deref().map(normalize_tax_id);
        let email = changes
            .email
            .map(|e| normalize_optional(Some(e)).map(|e| normalize_email(&e)));

        if let Some(name) = &name {
            validate_supplier_name(name)?;
        }
        if let Some(tax_id) = &tax_id {
            validate_tax_id(tax_id)?;
        }
        if let Some(email) = &email {
            validate_optional_email(email.as_deref())?;
        }
        validate_text("teléfono", changes.phone.as_deref())?;
        validate_text("dirección", changes.address.as_deref())?;
        validate_text("contacto", changes.contact_name.as_deref())?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(tax_id) = tax_id {
            self.tax_id = tax_id;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if changes.phone.is_some() {
            self.phone = normalize_optional(changes.phone);
        }
        if changes.address.is_some() {
            self.address = normalize_optional(changes.address);
        }
        if changes.contact_name.is_some() {
            self.contact_name = normalize_optional(changes.contact_name);
        }

        self.touch();
        Ok(())
    }

    /// Record an evaluation and derive the new status from its score
    pub fn evaluate(
        &mut self,
        score: f64,
        comments: Option<String>,
        evaluated_by: UserId,
    ) -> Result<&SupplierEvaluation, SupplierValidationError> {
        if self.status == SupplierStatus::Inactive {
            return Err(SupplierValidationError::Inactive);
        }
        validate_score(score)?;

        let now = Utc::now();
        self.evaluations.push(SupplierEvaluation {
            score,
            comments: normalize_optional(comments),
            evaluated_by,
            evaluated_at: now,
        });
        self.last_score = Some(score);
        self.last_evaluated_at = Some(now);
        self.status = SupplierStatus::for_score(score);
        self.touch();

        let last = self.evaluations.len() - 1;
        Ok(&self.evaluations[last])
    }

    pub fn set_status(&mut self, status: SupplierStatus) {
        self.status = status;
        self.touch();
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.set_status(SupplierStatus::Inactive);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Canonical form of a tax id: trimmed and uppercased
pub fn normalize_tax_id(tax_id: &str) -> String {
    tax_id.trim().to_uppercase()
}

impl TenantScoped for Supplier {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for Supplier {
    type Key = SupplierId;
    const COLLECTION: &'static str = "suppliers";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_constraints() -> Vec<UniqueConstraint> {
        vec![UniqueConstraint::new("company_tax_id", &["company_id", "tax_id"]).case_insensitive()]
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![&["company_id", "status"], &["company_id", "category"]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_supplier() -> Supplier {
        Supplier::new(
            CompanyId::new("acme").unwrap(),
            NewSupplier {
                name: "Tornillería López".to_string(),
                tax_id: " b12345678 ".to_string(),
                category: SupplierCategory::Product,
                email: Some("Ventas@Lopez.es".to_string()),
                phone: None,
                address: None,
                contact_name: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_supplier_is_pending() {
        let supplier = create_supplier();
        assert_eq!(supplier.status(), SupplierStatus::Pending);
        assert_eq!(supplier.tax_id(), "B12345678");
        assert_eq!(supplier.email(), Some("ventas@lopez.es"));
        assert!(supplier.last_score().is_none());
    }

    #[test]
    fn test_status_for_score_thresholds() {
        assert_eq!(SupplierStatus::for_score(80.0), SupplierStatus::Approved);
        assert_eq!(SupplierStatus::for_score(79.9), SupplierStatus::Conditional);
        assert_eq!(SupplierStatus::for_score(60.0), SupplierStatus::Conditional);
        assert_eq!(SupplierStatus::for_score(59.9), SupplierStatus::Rejected);
    }

    #[test]
    fn test_evaluate_records_history() {
        let mut supplier = create_supplier();
        let evaluator = UserId::generate();

        supplier.evaluate(65.0, None, evaluator.clone()).unwrap();
        supplier
            .evaluate(92.0, Some("Entregas puntuales".to_string()), evaluator)
            .unwrap();

        assert_eq!(supplier.status(), SupplierStatus::Approved);
        assert_eq!(supplier.last_score(), Some(92.0));
        assert_eq!(supplier.evaluations().len(), 2);
        assert!(supplier.last_evaluated_at().is_some());
    }

    #[test]
    fn test_inactive_supplier_cannot_be_evaluated() {
        let mut supplier = create_supplier();
        supplier.deactivate();

        let result = supplier.evaluate(90.0, None, UserId::generate());
        assert_eq!(result.unwrap_err(), SupplierValidationError::Inactive);
    }

    #[test]
    fn test_apply_can_clear_email() {
        let mut supplier = create_supplier();
        supplier
            .apply(SupplierChanges {
                email: Some("".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(supplier.email(), None);
    }
}
