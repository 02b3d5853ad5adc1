//! Equipment domain - inventory and maintenance schedule

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{EquipmentSearchCriteria, EquipmentSearchCriteriaBuilder, EquipmentSortField};
pub use entity::{Equipment, EquipmentChanges, EquipmentId, EquipmentStatus, NewEquipment};
pub use repository::EquipmentRepository;
pub use validation::EquipmentValidationError;
