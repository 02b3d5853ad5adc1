//! Job profile infrastructure

mod service;
mod storage_repository;

pub use service::JobProfileService;
