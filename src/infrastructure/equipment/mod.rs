//! Equipment infrastructure - inventory and maintenance use cases

mod service;
mod storage_repository;

pub use service::EquipmentService;
