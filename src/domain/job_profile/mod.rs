//! Job profile domain - positions, responsibilities and competencies

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{
    JobProfileSearchCriteria, JobProfileSearchCriteriaBuilder, JobProfileSortField,
};
pub use entity::{JobProfile, JobProfileChanges, JobProfileId, JobProfileStatus, NewJobProfile};
pub use repository::JobProfileRepository;
pub use validation::JobProfileValidationError;
