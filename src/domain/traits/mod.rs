//! Cross-module domain traits

mod repository;

pub use repository::{Repository, TenantScoped};
