//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;
mod repository;
pub mod sql;

pub use factory::{StorageBackend, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use migrations::{Migration, PostgresMigrator, run_storage_migrations};
pub use postgres::{PostgresConfig, PostgresStorage};
pub use repository::StorageRepository;
