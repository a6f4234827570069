//! Internship repository trait

use async_trait::async_trait;

use super::entity::{Internship, InternshipId, InternshipQuery};
use crate::domain::DomainError;

/// Repository trait for internship postings
#[async_trait]
pub trait InternshipRepository: Send + Sync {
    async fn get(&self, id: &InternshipId) -> Result<Option<Internship>, DomainError>;

    async fn create(&self, internship: Internship) -> Result<Internship, DomainError>;

    /// Postings matching `query`, newest first
    async fn list(&self, query: &InternshipQuery) -> Result<Vec<Internship>, DomainError>;
}
