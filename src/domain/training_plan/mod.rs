//! Training plan domain - yearly training actions and their participants

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{
    TrainingPlanSearchCriteria, TrainingPlanSearchCriteriaBuilder, TrainingPlanSortField,
};
pub use entity::{
    NewTrainingPlan, TrainingModality, TrainingPlan, TrainingPlanChanges, TrainingPlanId,
    TrainingStatus,
};
pub use repository::TrainingPlanRepository;
pub use validation::TrainingPlanValidationError;
