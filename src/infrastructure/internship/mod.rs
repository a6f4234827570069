//! Internship infrastructure implementations

mod repository;
mod service;

pub use repository::StorageInternshipRepository;
pub use service::{InternshipService, PostInternshipRequest, Poster, UpdateApplicationRequest};
