//! Domain layer - Core business logic and entities

pub mod error;
pub mod intern;
pub mod internship;
pub mod organization;
pub mod storage;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use intern::{
    ApplicationData, ApplicationRecord, ApplicationStatus, DashboardStatus, Intern, InternId,
    InternProfile, InternRepository, ProfileState, VerificationStatus,
};
pub use internship::{Internship, InternshipId, InternshipQuery, InternshipRepository, PostingDetails};
pub use organization::{Affiliation, OrganizationId, OrganizationRef};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Membership, MembershipPlan, Team, TeamId, TeamRepository};
pub use user::{User, UserId, UserRepository, UserRole};
