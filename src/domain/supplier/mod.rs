//! Supplier domain - approved vendor list and periodic evaluations

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{SupplierSearchCriteria, SupplierSearchCriteriaBuilder, SupplierSortField};
pub use entity::{
    APPROVAL_THRESHOLD, CONDITIONAL_THRESHOLD, NewSupplier, Supplier, SupplierCategory,
    SupplierChanges, SupplierEvaluation, SupplierId, SupplierStatus, normalize_tax_id,
};
pub use repository::SupplierRepository;
pub use validation::SupplierValidationError;
