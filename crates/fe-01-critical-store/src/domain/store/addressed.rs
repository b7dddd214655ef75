//! # Addressed Store
//!
//! Arena of sections indexed by [`Section::index`]. Sections and scopes are
//! materialized on first write; every read of something that was never
//! written yields "absent" rather than an error.

use super::scope::{StorageScope, StorageSection};
use shared_types::{Address, Scope, ScopeKey, Section};
use std::collections::BTreeSet;

/// In-memory Section → Scope → Path → bytes map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedStore {
    sections: [Option<StorageSection>; Section::COUNT],
}

impl Default for AddressedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressedStore {
    /// Create an empty store (cold start).
    pub fn new() -> Self {
        Self {
            sections: std::array::from_fn(|_| None),
        }
    }

    fn section(&self, section: Section) -> Option<&StorageSection> {
        self.sections[section.index()].as_ref()
    }

    fn section_mut(&mut self, section: Section) -> &mut StorageSection {
        self.sections[section.index()].get_or_insert_with(StorageSection::new)
    }

    fn scope(&self, key: ScopeKey) -> Option<&StorageScope> {
        self.section(key.section)?.scope(key.scope)
    }

    /// Whether an entry exists at `address`.
    pub fn contains(&self, address: &Address) -> bool {
        self.scope(address.scope_key())
            .is_some_and(|scope| scope.contains(address.path()))
    }

    /// Blob at `address`, or `None` if absent.
    pub fn read(&self, address: &Address) -> Option<&[u8]> {
        self.scope(address.scope_key())?.get(address.path())
    }

    /// Store `value` at `address`, materializing section and scope.
    ///
    /// Returns `true` if the stored bytes changed.
    pub fn write(&mut self, address: &Address, value: Vec<u8>) -> bool {
        if self.read(address) == Some(value.as_slice()) {
            return false;
        }
        self.section_mut(address.section())
            .scope_mut(address.scope())
            .insert(address.path().to_string(), value);
        true
    }

    /// Remove the entry at `address`. Returns `false` if it was absent.
    pub fn remove(&mut self, address: &Address) -> bool {
        self.sections[address.section().index()]
            .as_mut()
            .and_then(|section| section.existing_scope_mut(address.scope()))
            .and_then(|scope| scope.remove(address.path()))
            .is_some()
    }

    /// Drop every entry of a scope. Returns `false` if the scope was absent.
    pub fn clear_scope(&mut self, key: ScopeKey) -> bool {
        self.sections[key.section.index()]
            .as_mut()
            .and_then(|section| section.take(key.scope))
            .is_some()
    }

    /// Exchange the entire content of two scopes, presence included.
    pub fn swap_scopes(&mut self, a: ScopeKey, b: ScopeKey) {
        if a == b {
            return;
        }
        let content_a = self.detach(a);
        let content_b = self.detach(b);
        self.attach(a, content_b);
        self.attach(b, content_a);
    }

    /// Replace `dst` with a deep copy of `src`. An absent source clears `dst`.
    pub fn copy_scope(&mut self, src: ScopeKey, dst: ScopeKey) {
        if src == dst {
            return;
        }
        let copy = self.scope(src).cloned();
        self.detach(dst);
        self.attach(dst, copy);
    }

    /// Paths present in a scope, in order. Empty if the scope is absent.
    pub fn manifest(&self, key: ScopeKey) -> BTreeSet<String> {
        self.scope(key)
            .map(|scope| scope.paths().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Total blob bytes in a scope. Zero if the scope is absent.
    pub fn usage(&self, key: ScopeKey) -> usize {
        self.scope(key).map_or(0, StorageScope::usage)
    }

    /// Materialized scopes of a section, in order.
    pub fn scopes(&self, section: Section) -> Vec<Scope> {
        self.section(section)
            .map(|s| s.scopes().map(|(scope, _)| scope).collect())
            .unwrap_or_default()
    }

    /// Materialized sections, in storage order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &StorageSection)> {
        Section::ALL
            .iter()
            .filter_map(|section| self.section(*section).map(|s| (*section, s)))
    }

    /// Whether nothing has ever been written (or everything was cleared).
    pub fn is_empty(&self) -> bool {
        self.sections().all(|(_, section)| section.is_empty())
    }

    /// Total number of entries across every scope.
    pub fn entry_count(&self) -> usize {
        self.sections()
            .flat_map(|(_, section)| section.scopes())
            .map(|(_, scope)| scope.len())
            .sum()
    }

    pub(crate) fn materialize_section(&mut self, section: Section) {
        self.section_mut(section);
    }

    pub(crate) fn detach(&mut self, key: ScopeKey) -> Option<StorageScope> {
        self.sections[key.section.index()]
            .as_mut()
            .and_then(|section| section.take(key.scope))
    }

    pub(crate) fn attach(&mut self, key: ScopeKey, content: Option<StorageScope>) {
        if let Some(content) = content {
            self.section_mut(key.section).put(key.scope, content);
        }
    }
}
