//! Meeting minutes infrastructure

mod service;
mod storage_repository;

pub use service::MinutesService;
