//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;
use crate::domain::client::Client;
use crate::domain::equipment::Equipment;
use crate::domain::job_profile::JobProfile;
use crate::domain::minutes::MeetingMinutes;
use crate::domain::objective::Objective;
use crate::domain::storage::StorageEntity;
use crate::domain::supplier::Supplier;
use crate::domain::training_plan::TrainingPlan;
use crate::domain::user::User;

use super::sql::schema_statements;

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration, returns false if it was already applied
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(migration.version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to start transaction: {}", e)))?;

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let version: Option<i64> =
            sqlx::query_scalar("SELECT MAX(version) FROM _migrations WHERE success = TRUE")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to get migration version: {}", e))
                })?;

        Ok(version)
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }

    /// Table and indexes for an entity's collection
    pub fn for_entity<E: StorageEntity>(version: i64) -> Result<Self, DomainError> {
        let statements = schema_statements::<E>()?;

        Ok(Self::new(
            version,
            format!("Create {} table", E::COLLECTION),
            format!("{};", statements.join(";\n")),
        ))
    }
}

/// Collection of migrations for the storage layer
pub fn storage_migrations() -> Result<Vec<Migration>, DomainError> {
    Ok(vec![
        Migration::for_entity::<Client>(1)?,
        Migration::for_entity::<JobProfile>(2)?,
        Migration::for_entity::<User>(3)?,
        Migration::for_entity::<Equipment>(4)?,
        Migration::for_entity::<MeetingMinutes>(5)?,
        Migration::for_entity::<Objective>(6)?,
        Migration::for_entity::<Supplier>(7)?,
        Migration::for_entity::<TrainingPlan>(8)?,
    ])
}

/// Runs all pending storage migrations, returns how many were applied
pub async fn run_storage_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in storage_migrations()? {
        if migrator.run_migration(&migration).await? {
            info!(version = migration.version, description = %migration.description, "Applied migration");
            applied += 1;
        }
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_migrations_order() {
        let migrations = storage_migrations().unwrap();

        assert_eq!(migrations.len(), 8);
        for pair in migrations.windows(2) {
            assert!(
                pair[1].version > pair[0].version,
                "Migrations should be in ascending order"
            );
        }
    }

    #[test]
    fn test_entity_migration_includes_unique_indexes() {
        let migration = Migration::for_entity::<Client>(1).unwrap();

        assert_eq!(migration.description, "Create clients table");
        assert!(migration.up.starts_with("CREATE TABLE IF NOT EXISTS clients"));
        assert!(migration.up.contains("CREATE UNIQUE INDEX IF NOT EXISTS uq_clients_company_email"));
        assert!(migration.up.ends_with(';'));
    }

    #[test]
    fn test_unique_indexes_keep_tenant_case() {
        for migration in storage_migrations().unwrap() {
            assert!(
                !migration.up.contains("lower(data->>'company_id')"),
                "{} folds the tenant key",
                migration.description
            );
        }

        let clients = Migration::for_entity::<Client>(1).unwrap();
        assert!(clients.up.contains("((data->>'company_id'), (lower(data->>'email')))"));
    }
}
