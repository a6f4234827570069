//! Storage-backed internship repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::internship::{Internship, InternshipId, InternshipQuery, InternshipRepository};
use crate::domain::storage::Storage;

/// Storage-backed implementation of InternshipRepository
#[derive(Debug)]
pub struct StorageInternshipRepository {
    storage: Arc<dyn Storage<Internship>>,
}

impl StorageInternshipRepository {
    pub fn new(storage: Arc<dyn Storage<Internship>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl InternshipRepository for StorageInternshipRepository {
    async fn get(&self, id: &InternshipId) -> Result<Option<Internship>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, internship: Internship) -> Result<Internship, DomainError> {
        self.storage.create(internship).await
    }

    async fn list(&self, query: &InternshipQuery) -> Result<Vec<Internship>, DomainError> {
        let mut internships = self
            .storage
            .find(&|internship: &Internship| query.matches(internship))
            .await?;

        // Newest first
        internships.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(internships)
    }
}
