//! Collection wrapper that yields to the scheduler before every call, so
//! tests can interleave concurrent callers between reads and writes.

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::{DocumentEdit, DocumentFilter, Storage, StorageEntity};

use super::InMemoryStorage;

#[derive(Debug)]
pub struct YieldingStorage<E>
where
    E: StorageEntity,
{
    inner: InMemoryStorage<E>,
}

impl<E> YieldingStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            inner: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for YieldingStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        tokio::task::yield_now().await;
        self.inner.list().await
    }

    async fn find(&self, filter: DocumentFilter<'_, E>) -> Result<Vec<E>, DomainError> {
        tokio::task::yield_now().await;
        self.inner.find(filter).await
    }

    async fn find_one(&self, filter: DocumentFilter<'_, E>) -> Result<Option<E>, DomainError> {
        tokio::task::yield_now().await;
        self.inner.find_one(filter).await
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        tokio::task::yield_now().await;
        self.inner.create(entity).await
    }

    async fn create_unique(
        &self,
        entity: E,
        conflict: DocumentFilter<'_, E>,
    ) -> Result<E, DomainError> {
        tokio::task::yield_now().await;
        self.inner.create_unique(entity, conflict).await
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        tokio::task::yield_now().await;
        self.inner.update(entity).await
    }

    async fn modify(
        &self,
        key: &E::Key,
        edit: DocumentEdit<'_, E>,
    ) -> Result<Option<E>, DomainError> {
        tokio::task::yield_now().await;
        self.inner.modify(key, edit).await
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        tokio::task::yield_now().await;
        self.inner.delete(key).await
    }
}
