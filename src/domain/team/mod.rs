//! Team domain module
//!
//! Teams group mentors, panelists and interns of one organization. Team
//! membership is stored on both sides; see [`membership`] for how the two
//! sides are kept in step.

mod entity;
pub mod membership;
mod repository;
mod validation;

pub use entity::{Team, TeamId};
pub use membership::{Membership, MembershipPlan};
pub use repository::TeamRepository;
pub use validation::{
    TeamValidationError, validate_team_description, validate_team_id, validate_team_name,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
