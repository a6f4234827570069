//! In-memory document collection

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{DocumentEdit, DocumentFilter, Storage, StorageEntity, StorageKey};

/// Thread-safe in-memory collection
///
/// Used for development and tests. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    documents: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a collection pre-populated with documents
    pub fn with_entities(entities: Vec<E>) -> Self {
        let documents = entities
            .into_iter()
            .map(|e| (e.key().as_str().to_string(), e))
            .collect();

        Self {
            documents: RwLock::new(documents),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.read().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire read lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.documents.write().map_err(|e| {
            DomainError::storage(format!(
                "Failed to acquire write lock on '{}': {}",
                E::COLLECTION,
                e
            ))
        })
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self.read()?.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        if documents.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Document '{}' already exists in '{}'",
                key,
                E::COLLECTION
            )));
        }

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn create_unique(
        &self,
        entity: E,
        conflict: DocumentFilter<'_, E>,
    ) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        if documents.contains_key(&key) || documents.values().any(|e| conflict(e)) {
            return Err(DomainError::conflict(format!(
                "Document '{}' conflicts with an existing document in '{}'",
                key,
                E::COLLECTION
            )));
        }

        documents.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut documents = self.write()?;

        match documents.get_mut(&key) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(format!(
                "Document '{}' not found in '{}'",
                key,
                E::COLLECTION
            ))),
        }
    }

    async fn modify(
        &self,
        key: &E::Key,
        edit: DocumentEdit<'_, E>,
    ) -> Result<Option<E>, DomainError> {
        let mut documents = self.write()?;

        let Some(stored) = documents.get_mut(key.as_str()) else {
            return Ok(None);
        };

        // Edits run on a copy so a failed edit leaves the document untouched
        let mut draft = stored.clone();
        if edit(&mut draft)? {
            *stored = draft;
        }
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.write()?.remove(key.as_str()).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(key.as_str()))
    }
}
