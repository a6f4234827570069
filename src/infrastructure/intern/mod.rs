//! Intern infrastructure implementations

mod repository;
mod service;

pub use repository::StorageInternRepository;
pub use service::{InternService, RegisterInternRequest};
