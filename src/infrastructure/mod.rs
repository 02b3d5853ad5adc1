//! Infrastructure layer - storage backends, authentication and use-case services

pub mod auth;
pub mod client;
pub mod equipment;
pub mod job_profile;
pub mod logging;
pub mod minutes;
pub mod objective;
pub mod observability;
pub mod storage;
pub mod supplier;
pub mod training_plan;
pub mod user;
