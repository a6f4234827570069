//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Predicate used to select documents from a collection
pub type DocumentFilter<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// In-place edit applied while a document is locked. Returns whether the
/// document changed and must be written back; an error aborts without writing.
pub type DocumentEdit<'a, E> = &'a mut (dyn FnMut(&mut E) -> Result<bool, DomainError> + Send);

/// Generic document collection: CRUD on any entity type keyed by its id
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves all entities matching the filter
    async fn find(&self, filter: DocumentFilter<'_, E>) -> Result<Vec<E>, DomainError> {
        Ok(self.list().await?.into_iter().filter(|e| filter(e)).collect())
    }

    /// Retrieves the first entity matching the filter
    async fn find_one(&self, filter: DocumentFilter<'_, E>) -> Result<Option<E>, DomainError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Creates a new entity unless a stored document matches `conflict`.
    /// The check and the insert are one atomic step.
    async fn create_unique(
        &self,
        entity: E,
        conflict: DocumentFilter<'_, E>,
    ) -> Result<E, DomainError>;

    /// Updates an existing entity, returns `NotFound` if it is gone
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Reads, edits and writes back one document without letting another
    /// writer in between. Returns the stored document, or `None` when no
    /// document has the key.
    async fn modify(
        &self,
        key: &E::Key,
        edit: DocumentEdit<'_, E>,
    ) -> Result<Option<E>, DomainError>;

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
}
