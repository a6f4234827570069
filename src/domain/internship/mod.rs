//! Internship postings

mod entity;
mod repository;

pub use entity::{
    Internship, InternshipId, InternshipQuery, PostingDetails, WorkMode, start_of_day,
};
pub use repository::InternshipRepository;

pub(crate) use entity::{deserialize_date, parse_date};
