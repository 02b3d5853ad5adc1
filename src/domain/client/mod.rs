//! Client domain - customers of a company

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{ClientSearchCriteria, ClientSearchCriteriaBuilder, ClientSortField};
pub use entity::{Client, ClientChanges, ClientId, ClientStatus, ClientType, NewClient};
pub use repository::ClientRepository;
pub use validation::{ClientValidationError, validate_client_email, validate_client_name};
