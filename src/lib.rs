//! Internhub API
//!
//! Internship and mentorship management for organizations:
//! - Staff and intern onboarding with profile verification
//! - Teams with membership mirrored on every member record
//! - Internship postings and applications

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    intern::{InternService, StorageInternRepository},
    internship::{InternshipService, StorageInternshipRepository},
    storage::DocumentStore,
    team::{StorageTeamRepository, TeamService},
    user::{StorageUserRepository, UserService},
};
use tracing::info;

/// Open the document store described by the configuration
pub async fn open_store(config: &AppConfig) -> anyhow::Result<DocumentStore> {
    let storage_config = config.storage.to_storage_config()?;
    info!(backend = ?storage_config.storage_type(), "Opening document store");

    Ok(DocumentStore::open(&storage_config).await?)
}

/// Build every service on top of one store handle
pub fn create_app_state(store: DocumentStore) -> AppState {
    let users = Arc::new(StorageUserRepository::new(store.users.clone()));
    let interns = Arc::new(StorageInternRepository::new(store.interns.clone()));
    let teams = Arc::new(StorageTeamRepository::new(store.teams.clone()));
    let internships = Arc::new(StorageInternshipRepository::new(store.internships.clone()));

    AppState {
        user_service: Arc::new(UserService::new(users.clone())),
        intern_service: Arc::new(InternService::new(interns.clone(), users.clone())),
        team_service: Arc::new(TeamService::new(teams, users.clone(), interns.clone())),
        internship_service: Arc::new(InternshipService::new(internships, interns, users)),
        store,
    }
}
