//! Domain layer - Core business logic and entities

pub mod client;
pub mod common;
pub mod equipment;
pub mod error;
pub mod job_profile;
pub mod minutes;
pub mod objective;
pub mod search;
pub mod storage;
pub mod supplier;
pub mod training_plan;
pub mod traits;
pub mod user;

pub use common::CompanyId;
pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use traits::{Repository, TenantScoped};
