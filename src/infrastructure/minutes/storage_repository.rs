//! Storage-backed minutes repository

use crate::domain::minutes::{MeetingMinutes, MinutesRepository};
use crate::infrastructure::storage::StorageRepository;

impl MinutesRepository for StorageRepository<MeetingMinutes> {}
