//! Storage domain - Generic document storage abstraction layer

mod entity;
pub mod query;
mod repository;

pub use entity::{StorageEntity, StorageKey, UniqueConstraint};
pub use query::{
    DocumentQuery, FilterCondition, FilterOperator, FilterValue, SortKind, SortOrder,
    SortSpec, to_document,
};
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
