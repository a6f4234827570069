//! Storage domain - document collection abstraction

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{DocumentEdit, DocumentFilter, Storage};

#[cfg(test)]
pub use repository::mock;
