//! Quality objective domain - measurable targets and their progress

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{ObjectiveSearchCriteria, ObjectiveSearchCriteriaBuilder, ObjectiveSortField};
pub use entity::{
    NewObjective, Objective, ObjectiveChanges, ObjectiveId, ObjectiveStatus, ProgressEntry,
};
pub use repository::ObjectiveRepository;
pub use validation::ObjectiveValidationError;
