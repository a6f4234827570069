//! Intern domain
//!
//! Interns carry their own profile, applications and reports, plus the
//! `teams` back-references kept in step with team membership.

pub mod application;
pub mod dashboard;
mod entity;
pub mod records;
mod repository;
mod validation;

pub use application::{ApplicationData, ApplicationRecord, ApplicationStatus, ProfileSnapshot};
pub use dashboard::{Banner, DashboardStatus};
pub use entity::{Intern, InternId, ProfileState, VerificationStatus};
pub use records::{InternProfile, Notification, NotificationKind};
pub use repository::InternRepository;
pub use validation::{InternValidationError, normalize_email, validate_intern_id};
