//! User infrastructure module

mod repository;
mod service;

pub use repository::StorageUserRepository;
pub use service::{CreateUserRequest, UserService};
