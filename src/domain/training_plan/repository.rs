//! Training plan repository trait

use async_trait::async_trait;

use super::criteria::TrainingPlanSearchCriteria;
use super::entity::{TrainingPlan, TrainingPlanId};
use crate::domain::traits::Repository;

#[async_trait]
pub trait TrainingPlanRepository:
    Repository<TrainingPlan, TrainingPlanId, TrainingPlanSearchCriteria>
{
}
