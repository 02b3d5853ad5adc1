//! Training plan infrastructure

mod service;
mod storage_repository;

pub use service::TrainingPlanService;
