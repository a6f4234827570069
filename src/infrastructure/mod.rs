//! Infrastructure layer - storage backends, repositories and services

pub mod intern;
pub mod internship;
pub mod logging;
pub mod storage;
pub mod team;
pub mod user;
