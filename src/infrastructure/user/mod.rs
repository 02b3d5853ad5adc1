//! User infrastructure - account management and authentication use cases

mod service;
mod storage_repository;

pub use service::{TEMPORARY_PASSWORD_LENGTH, UserService};
