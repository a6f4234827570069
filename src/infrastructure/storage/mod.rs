//! Storage infrastructure - document collection backends

mod factory;
mod in_memory;
mod postgres;
#[cfg(test)]
pub(crate) mod yielding;

pub use factory::{DocumentStore, StorageConfig, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
