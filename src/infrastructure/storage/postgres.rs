//! PostgreSQL document collection
//!
//! Each collection is a table of `(key, data JSONB, created_at, updated_at)`
//! named after [`StorageEntity::COLLECTION`]. All collections share one pool.
//! [`StorageEntity::UNIQUE_FIELDS`] become unique expression indexes over the
//! JSONB document, so concurrent inserts cannot both win.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use crate::domain::DomainError;
use crate::domain::storage::{DocumentEdit, DocumentFilter, Storage, StorageEntity, StorageKey};

/// PostgreSQL connection settings
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/internhub".to_string(),
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

    /// Open a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// Collection stored as a PostgreSQL JSONB table
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table", &E::COLLECTION)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Creates the collection table if it does not exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key VARCHAR(255) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            E::COLLECTION
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to create table '{}': {}", E::COLLECTION, e))
            })?;

        for fields in E::UNIQUE_FIELDS {
            sqlx::query(&unique_index_sql(E::COLLECTION, fields))
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!(
                        "Failed to create unique index on '{}': {}",
                        E::COLLECTION,
                        e
                    ))
                })?;
        }

        Ok(())
    }

    async fn insert(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = Self::encode(&entity)?;

        let query = format!("INSERT INTO {} (key, data) VALUES ($1, $2)", E::COLLECTION);

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::conflict(format!(
                        "Document '{}' conflicts with an existing document in '{}'",
                        key,
                        E::COLLECTION
                    ))
                }
                _ => DomainError::storage(format!("Failed to create document: {}", e)),
            })?;

        Ok(entity)
    }

    fn decode(row: &PgRow) -> Result<E, DomainError> {
        let data: serde_json::Value = row.get("data");

        serde_json::from_value(data).map_err(|e| {
            DomainError::storage(format!(
                "Failed to deserialize document from '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }

    fn encode(entity: &E) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(entity).map_err(|e| {
            DomainError::storage(format!(
                "Failed to serialize document for '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", E::COLLECTION);

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get document: {}", e)))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!("SELECT data FROM {} ORDER BY created_at", E::COLLECTION);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        self.insert(entity).await
    }

    /// The unique indexes from `ensure_table` decide races; the filter only
    /// gives a readable conflict for the common, uncontended case.
    async fn create_unique(
        &self,
        entity: E,
        conflict: DocumentFilter<'_, E>,
    ) -> Result<E, DomainError> {
        if self.find_one(conflict).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Document '{}' conflicts with an existing document in '{}'",
                entity.key().as_str(),
                E::COLLECTION
            )));
        }

        self.insert(entity).await
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let data = Self::encode(&entity)?;

        let query = format!(
            "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
            E::COLLECTION
        );

        let result = sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update document: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Document '{}' not found in '{}'",
                key,
                E::COLLECTION
            )));
        }

        Ok(entity)
    }

    async fn modify(
        &self,
        key: &E::Key,
        edit: DocumentEdit<'_, E>,
    ) -> Result<Option<E>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let select = format!("SELECT data FROM {} WHERE key = $1 FOR UPDATE", E::COLLECTION);
        let row = sqlx::query(&select)
            .bind(key.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to lock document: {}", e)))?;

        // Dropping the transaction rolls it back and releases the row lock
        let Some(row) = row else {
            return Ok(None);
        };

        let mut entity = Self::decode(&row)?;
        if edit(&mut entity)? {
            let update = format!(
                "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
                E::COLLECTION
            );
            sqlx::query(&update)
                .bind(key.as_str())
                .bind(Self::encode(&entity)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to update document: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))?;

        Ok(Some(entity))
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE key = $1", E::COLLECTION);

        let result = sqlx::query(&query)
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) AS count FROM {}", E::COLLECTION);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count documents: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE key = $1) AS exists",
            E::COLLECTION
        );

        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check existence: {}", e)))?;

        Ok(row.get("exists"))
    }
}

/// `CREATE UNIQUE INDEX` over the given top-level JSONB fields
fn unique_index_sql(table: &str, fields: &[&str]) -> String {
    let name = format!("{}_{}_key", table, fields.join("_").to_lowercase());
    let columns = fields
        .iter()
        .map(|f| format!("(data->>'{}')", f))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
        name, table, columns
    )
}
