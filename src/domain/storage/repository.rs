//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;
use super::query::{DocumentQuery, FilterCondition};

/// Generic document storage for any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity
    ///
    /// Fails with a conflict if the key exists or a unique constraint is violated.
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Saves an entity (creates if not exists, updates if exists)
    async fn save(&self, entity: E) -> Result<E, DomainError> {
        if self.exists(entity.key()).await? {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    /// Deletes an entity by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }

    /// Runs a document query
    async fn find(&self, query: &DocumentQuery) -> Result<Vec<E>, DomainError> {
        query.apply(self.list().await?)
    }

    /// Counts entities matching every condition, ignoring pagination
    async fn count_matching(&self, conditions: &[FilterCondition]) -> Result<usize, DomainError> {
        let query = DocumentQuery::new().filters(conditions.iter().cloned());
        Ok(query.apply(self.list().await?)?.len())
    }

    /// Clears all entities (use with caution)
    async fn clear(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::domain::storage::StorageKey;

    /// Storage double that can be primed with entities or a failure
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<HashMap<String, E>>,
        error: Mutex<Option<String>>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities
                .lock()
                .unwrap()
                .insert(entity.key().as_str().to_string(), entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().get(key.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().values().cloned().collect())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if entities.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Entity with key '{}' already exists",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn update(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let key = entity.key().as_str().to_string();
            let mut entities = self.entities.lock().unwrap();

            if !entities.contains_key(&key) {
                return Err(DomainError::not_found(format!(
                    "Entity with key '{}' not found",
                    key
                )));
            }

            entities.insert(key, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().remove(key.as_str()).is_some())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            self.check_error()?;
            self.entities.lock().unwrap().clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::storage::{FilterCondition, SortOrder};
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        struct TestKey(String);

        impl StorageKey for TestKey {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct TestEntity {
            id: TestKey,
            name: String,
        }

        impl StorageEntity for TestEntity {
            type Key = TestKey;
            const COLLECTION: &'static str = "test_entities";

            fn key(&self) -> &Self::Key {
                &self.id
            }
        }

        fn create_test_entity(id: &str, name: &str) -> TestEntity {
            TestEntity {
                id: TestKey(id.to_string()),
                name: name.to_string(),
            }
        }

        #[tokio::test]
        async fn test_mock_storage_create_conflict() {
            let entity = create_test_entity("1", "Test");
            let storage = MockStorage::new().with_entity(entity.clone());

            let result = storage.create(entity).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_save_creates_then_updates() {
            let storage: MockStorage<TestEntity> = MockStorage::new();

            storage.save(create_test_entity("1", "First")).await.unwrap();
            storage.save(create_test_entity("1", "Second")).await.unwrap();

            let stored = storage.get(&TestKey("1".to_string())).await.unwrap().unwrap();
            assert_eq!(stored.name, "Second");
            assert_eq!(storage.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_default_find_and_count_matching() {
            let storage = MockStorage::new()
                .with_entity(create_test_entity("1", "Calibrator"))
                .with_entity(create_test_entity("2", "Scale"))
                .with_entity(create_test_entity("3", "Caliper"));

            let query = DocumentQuery::new()
                .filter(FilterCondition::contains("name", "cali"))
                .sort_by("name", SortOrder::Desc)
                .limit(1);

            let found = storage.find(&query).await.unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].name, "Caliper");

            let total = storage.count_matching(&query.conditions).await.unwrap();
            assert_eq!(total, 2);
        }

        #[tokio::test]
        async fn test_mock_storage_with_error() {
            let storage: MockStorage<TestEntity> =
                MockStorage::new().with_error("Simulated storage error");

            let result = storage.find(&DocumentQuery::new()).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
