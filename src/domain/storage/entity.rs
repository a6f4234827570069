//! Storage entity traits and types

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

/// Trait for types that can be used as document keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for backends that index by string
    fn as_str(&self) -> &str;
}

/// Trait for documents that live in a collection
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Name of the collection holding this entity, also used as table name
    const COLLECTION: &'static str;

    /// Document fields whose values must be unique across the collection.
    /// Each inner slice is one composite key of camelCase field names.
    const UNIQUE_FIELDS: &'static [&'static [&'static str]] = &[];

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct NoteKey(String);

    impl StorageKey for NoteKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Note {
        id: NoteKey,
        body: String,
    }

    impl StorageEntity for Note {
        type Key = NoteKey;
        const COLLECTION: &'static str = "notes";

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    #[test]
    fn test_entity_key_and_collection() {
        let note = Note {
            id: NoteKey("note-1".to_string()),
            body: "hello".to_string(),
        };

        assert_eq!(note.key().as_str(), "note-1");
        assert_eq!(Note::COLLECTION, "notes");
        assert!(Note::UNIQUE_FIELDS.is_empty());
    }
}
