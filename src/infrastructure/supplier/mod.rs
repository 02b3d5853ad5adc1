//! Supplier infrastructure - approved vendor list use cases

mod service;
mod storage_repository;

pub use service::SupplierService;
