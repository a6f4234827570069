//! User domain
//!
//! Staff users of an organization. Their `teams` set is the back-reference
//! side of team membership.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserRole};
pub use repository::UserRepository;
pub use validation::{UserValidationError, validate_user_id, validate_username};
