//! Meeting minutes domain - records of meetings, agreements and approval

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{MinutesSearchCriteria, MinutesSearchCriteriaBuilder, MinutesSortField};
pub use entity::{
    Agreement, AgreementId, MeetingMinutes, MeetingType, MinutesChanges, MinutesId,
    MinutesStatus, NewAgreement, NewMinutes,
};
pub use repository::MinutesRepository;
pub use validation::MinutesValidationError;
