//! Document store bootstrap
//!
//! The store is opened once at startup and handed to every repository. There
//! is no global connection handle.

use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::intern::Intern;
use crate::domain::internship::Internship;
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::team::Team;
use crate::domain::user::User;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Handle to the four document collections
#[derive(Debug, Clone)]
pub struct DocumentStore {
    pub users: Arc<dyn Storage<User>>,
    pub interns: Arc<dyn Storage<Intern>>,
    pub teams: Arc<dyn Storage<Team>>,
    pub internships: Arc<dyn Storage<Internship>>,
}

impl DocumentStore {
    /// Empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStorage::<User>::new()),
            interns: Arc::new(InMemoryStorage::<Intern>::new()),
            teams: Arc::new(InMemoryStorage::<Team>::new()),
            internships: Arc::new(InMemoryStorage::<Internship>::new()),
        }
    }

    /// Open the configured backend, creating PostgreSQL tables as needed
    pub async fn open(config: &StorageConfig) -> Result<Self, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory document store");
                Ok(Self::in_memory())
            }
            StorageConfig::Postgres(pg_config) => {
                let pool = pg_config.connect().await?;

                let store = Self {
                    users: postgres_collection::<User>(&pool).await?,
                    interns: postgres_collection::<Intern>(&pool).await?,
                    teams: postgres_collection::<Team>(&pool).await?,
                    internships: postgres_collection::<Internship>(&pool).await?,
                };

                info!(
                    max_connections = pg_config.max_connections,
                    "Connected to PostgreSQL document store"
                );
                Ok(store)
            }
        }
    }

    /// Reachability of each collection, by name
    pub async fn check(&self) -> Vec<(&'static str, Result<usize, DomainError>)> {
        vec![
            (User::COLLECTION, self.users.count().await),
            (Intern::COLLECTION, self.interns.count().await),
            (Team::COLLECTION, self.teams.count().await),
            (Internship::COLLECTION, self.internships.count().await),
        ]
    }
}

async fn postgres_collection<E>(pool: &sqlx::PgPool) -> Result<Arc<dyn Storage<E>>, DomainError>
where
    E: StorageEntity + 'static,
{
    let storage = PostgresStorage::<E>::new(pool.clone());
    storage.ensure_table().await?;
    Ok(Arc::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in-memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("Postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("pg".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!("mongo".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::InMemory.storage_type(), StorageType::InMemory);

        let postgres = StorageConfig::Postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[tokio::test]
    async fn test_open_in_memory() {
        let store = DocumentStore::open(&StorageConfig::InMemory).await.unwrap();

        let checks = store.check().await;
        let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();

        assert_eq!(names, vec!["users", "interns", "teams", "internships"]);
        assert!(checks.iter().all(|(_, result)| matches!(result, Ok(0))));
    }
}
