//! Meeting minutes repository trait

use async_trait::async_trait;

use super::criteria::MinutesSearchCriteria;
use super::entity::{MeetingMinutes, MinutesId};
use crate::domain::traits::Repository;

#[async_trait]
pub trait MinutesRepository: Repository<MeetingMinutes, MinutesId, MinutesSearchCriteria> {}
