//! PostgreSQL storage implementation with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use tracing::error;

use crate::domain::DomainError;
use crate::domain::storage::{
    DocumentQuery, FilterCondition, Storage, StorageEntity, StorageKey, to_document,
};

use super::sql::{
    SqlParam, SqlStatement, count_statement, schema_statements, select_statement,
    unique_index_name,
};

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/iso_management".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    /// Opens a connection pool shared by every collection
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| storage_error("Failed to connect to PostgreSQL", e))
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
    error!(error = %e, "{}", context);
    DomainError::storage(format!("{}: {}", context, e))
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: Vec<SqlParam>,
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Float(value) => query.bind(value),
            SqlParam::Bool(value) => query.bind(value),
            SqlParam::Timestamp(value) => query.bind(value),
        };
    }
    query
}

/// PostgreSQL document storage
///
/// Each entity is one JSONB document in the table named after its collection,
/// keyed by the entity key. Document queries are translated to SQL so
/// filtering, sorting and paging happen in the database.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates a storage for the entity's collection on an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: E::COLLECTION.to_string(),
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensures the table, its indexes and unique indexes exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        for statement in schema_statements::<E>()? {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| storage_error("Failed to create table", e))?;
        }

        Ok(())
    }

    /// Maps a write failure, turning unique index violations into conflicts
    fn write_error(&self, context: &str, key: &str, e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                let message = db
                    .constraint()
                    .and_then(|name| {
                        E::unique_constraints().into_iter().find(|c| {
                            unique_index_name(&self.table_name, c.name) == name
                        })
                    })
                    .map(|c| c.conflict_message())
                    .unwrap_or_else(|| format!("Ya existe un registro con la clave '{}'", key));

                return DomainError::conflict(message);
            }
        }

        storage_error(context, e)
    }

    fn decode(data: serde_json::Value) -> Result<E, DomainError> {
        serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.table_name);

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get entity", e))?;

        row.map(|row| Self::decode(row.get("data"))).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!(
            "SELECT data FROM {} ORDER BY created_at, key",
            self.table_name
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to list entities", e))?;

        rows.into_iter()
            .map(|row| Self::decode(row.get("data")))
            .collect()
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = to_document(&entity)?;

        let query = format!(
            "INSERT INTO {} (key, data) VALUES ($1, $2)",
            self.table_name
        );

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| self.write_error("Failed to create entity", &key, e))?;

        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = to_document(&entity)?;

        let query = format!(
            "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
            self.table_name
        );

        let result = sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| self.write_error("Failed to update entity", &key, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Registro '{}' no encontrado",
                key
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE key = $1", self.table_name);

        let result = sqlx::query(&query)
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete entity", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let query = format!("DELETE FROM {}", self.table_name);

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to clear storage", e))?;

        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.count_matching(&[]).await
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE key = $1) AS exists",
            self.table_name
        );

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check existence", e))?;

        Ok(row.get("exists"))
    }

    async fn find(&self, query: &DocumentQuery) -> Result<Vec<E>, DomainError> {
        let SqlStatement { sql, params } = select_statement(&self.table_name, query)?;

        let rows = bind_params(sqlx::query(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to query entities", e))?;

        rows.into_iter()
            .map(|row| Self::decode(row.get("data")))
            .collect()
    }

    async fn count_matching(&self, conditions: &[FilterCondition]) -> Result<usize, DomainError> {
        let SqlStatement { sql, params } = count_statement(&self.table_name, conditions)?;

        let row = bind_params(sqlx::query(&sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count entities", e))?;

        let count: i64 = row.get("count");
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
