//! # Snapshot Image
//!
//! Ordered, serializable rendering of an [`AddressedStore`]: a list of
//! sections, each a list of (scope, list of (path, bytes)).

use crate::domain::store::{AddressedStore, StorageScope};
use serde::{Deserialize, Serialize};
use shared_types::{validate_path, AddressError, Scope, ScopeKey, Section};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeImage {
    pub scope: Scope,
    pub entries: Vec<(String, Vec<u8>)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionImage {
    pub section: Section,
    pub scopes: Vec<ScopeImage>,
}

/// The unit committed atomically by the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotImage {
    pub sections: Vec<SectionImage>,
}

impl SnapshotImage {
    /// Render every materialized section of `store`.
    pub fn capture(store: &AddressedStore) -> Self {
        let sections = store
            .sections()
            .map(|(section, content)| SectionImage {
                section,
                scopes: content
                    .scopes()
                    .map(|(scope, entries)| ScopeImage {
                        scope,
                        entries: entries
                            .entries()
                            .map(|(path, value)| (path.to_string(), value.to_vec()))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    /// Rebuild the store. Paths are re-validated since the image came from disk.
    pub fn into_store(self) -> Result<AddressedStore, AddressError> {
        let mut store = AddressedStore::new();
        for section in self.sections {
            store.materialize_section(section.section);
            for scope in section.scopes {
                for (path, _) in &scope.entries {
                    validate_path(path)?;
                }
                let content: StorageScope = scope.entries.into_iter().collect();
                store.attach(ScopeKey::new(section.section, scope.scope), Some(content));
            }
        }
        Ok(store)
    }
}
