//! # Storage Scopes and Sections

use shared_types::Scope;
use std::collections::BTreeMap;

/// Ordered mapping of path to blob; owns its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageScope {
    entries: BTreeMap<String, Vec<u8>>,
}

impl StorageScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert or replace, returning the previous blob.
    pub fn insert(&mut self, path: String, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(path, value)
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.entries.remove(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(path, value)| (path.as_str(), value.as_slice()))
    }

    /// Sum of the byte lengths of every blob.
    pub fn usage(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<u8>)> for StorageScope {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Mapping of scope to [`StorageScope`], created on first write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSection {
    scopes: BTreeMap<Scope, StorageScope>,
}

impl StorageSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self, scope: Scope) -> Option<&StorageScope> {
        self.scopes.get(&scope)
    }

    /// Scope for writing, materialized if absent.
    pub fn scope_mut(&mut self, scope: Scope) -> &mut StorageScope {
        self.scopes.entry(scope).or_default()
    }

    pub fn existing_scope_mut(&mut self, scope: Scope) -> Option<&mut StorageScope> {
        self.scopes.get_mut(&scope)
    }

    /// Detach a scope, leaving it absent.
    pub fn take(&mut self, scope: Scope) -> Option<StorageScope> {
        self.scopes.remove(&scope)
    }

    /// Attach a scope, replacing whatever was there.
    pub fn put(&mut self, scope: Scope, content: StorageScope) {
        self.scopes.insert(scope, content);
    }

    pub fn scopes(&self) -> impl Iterator<Item = (Scope, &StorageScope)> {
        self.scopes.iter().map(|(scope, content)| (*scope, content))
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
