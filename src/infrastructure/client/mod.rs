//! Client infrastructure - storage-backed repository and use cases

mod service;
mod storage_repository;

pub use service::ClientService;
