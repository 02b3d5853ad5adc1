//! User domain - accounts, roles and authentication data

mod criteria;
mod entity;
mod repository;
mod validation;

pub use criteria::{UserSearchCriteria, UserSearchCriteriaBuilder, UserSortField};
pub use entity::{NewUser, User, UserChanges, UserId, UserRole, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, UserValidationError, validate_password,
};
