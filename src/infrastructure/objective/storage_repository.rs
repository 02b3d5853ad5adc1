//! Storage-backed objective repository

use crate::domain::objective::{Objective, ObjectiveRepository};
use crate::infrastructure::storage::StorageRepository;

impl ObjectiveRepository for StorageRepository<Objective> {}
