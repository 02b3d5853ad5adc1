//! Quality objective infrastructure

mod service;
mod storage_repository;

pub use service::ObjectiveService;
