//! Objective repository trait

use async_trait::async_trait;

use super::criteria::ObjectiveSearchCriteria;
use super::entity::{Objective, ObjectiveId};
use crate::domain::traits::Repository;

#[async_trait]
pub trait ObjectiveRepository: Repository<Objective, ObjectiveId, ObjectiveSearchCriteria> {}
