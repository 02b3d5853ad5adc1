//! Storage-backed training plan repository

use crate::domain::training_plan::{TrainingPlan, TrainingPlanRepository};
use crate::infrastructure::storage::StorageRepository;

impl TrainingPlanRepository for StorageRepository<TrainingPlan> {}
