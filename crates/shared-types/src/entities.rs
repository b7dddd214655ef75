//! # Critical Data Addressing
//!
//! Every piece of critical data lives at an [`Address`]:
//!
//! ```text
//! Section ──→ Scope ──→ Path ──→ bytes
//! ```
//!
//! - **Section**: closed enumeration of storage areas.
//! - **Scope**: integer whose meaning depends on the section. Lifecycle-scoped
//!   sections interpret it as a [`LifecycleScope`]; record-indexed sections
//!   (history, theme/payvar/extension configuration) use a plain index.
//! - **Path**: caller-chosen key, validated by [`crate::security::validate_path`].

use crate::errors::AddressError;
use crate::security::validate_path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SECTION
// =============================================================================

/// Top-level storage area of the critical data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Game-owned critical data, lifecycle scoped.
    CriticalData,
    /// Monetary meters and bet accumulators, lifecycle scoped.
    Meters,
    /// Data owned by the Foundation itself (state machine, queues), lifecycle scoped.
    FoundationData,
    /// Archived game-cycle history records, scope is the record index.
    History,
    /// Per-theme critical data, scope is the theme index.
    ThemeCriticalData,
    /// Per-payvar critical data, scope is the payvar index.
    PayvarCriticalData,
    /// Theme configuration values written by the registry loader.
    ThemeConfigurations,
    /// Payvar configuration values written by the registry loader.
    PayvarConfigurations,
    /// Extension configuration values written by the registry loader.
    ExtensionConfigurations,
    /// Data owned by the progressive contribution subsystem, lifecycle scoped.
    ProgressiveData,
}

impl Section {
    /// Number of sections.
    pub const COUNT: usize = 10;

    /// All sections in storage order.
    pub const ALL: [Section; Self::COUNT] = [
        Section::CriticalData,
        Section::Meters,
        Section::FoundationData,
        Section::History,
        Section::ThemeCriticalData,
        Section::PayvarCriticalData,
        Section::ThemeConfigurations,
        Section::PayvarConfigurations,
        Section::ExtensionConfigurations,
        Section::ProgressiveData,
    ];

    /// Dense index of this section, used as the arena slot.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether scopes in this section are [`LifecycleScope`] enumerants.
    pub const fn is_lifecycle_scoped(self) -> bool {
        matches!(
            self,
            Section::CriticalData
                | Section::Meters
                | Section::FoundationData
                | Section::ProgressiveData
        )
    }

    /// Stable name used in diagnostics and by the inspection tool.
    pub const fn name(self) -> &'static str {
        match self {
            Section::CriticalData => "CriticalData",
            Section::Meters => "Meters",
            Section::FoundationData => "FoundationData",
            Section::History => "History",
            Section::ThemeCriticalData => "ThemeCriticalData",
            Section::PayvarCriticalData => "PayvarCriticalData",
            Section::ThemeConfigurations => "ThemeConfigurations",
            Section::PayvarConfigurations => "PayvarConfigurations",
            Section::ExtensionConfigurations => "ExtensionConfigurations",
            Section::ProgressiveData => "ProgressiveData",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AddressError::UnknownSection(s.to_string()))
    }
}

// =============================================================================
// SCOPE
// =============================================================================

/// Sub-partition of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope(pub u32);

impl Scope {
    /// Scope for a record-indexed section.
    pub const fn index(index: u32) -> Self {
        Scope(index)
    }

    /// Raw scope value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of data in lifecycle-scoped sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum LifecycleScope {
    /// Cleared whenever the game cycle returns to Idle.
    GameCycle = 0,
    /// History staging for the current cycle, archived then cleared.
    History = 1,
    /// Lives as long as the active theme.
    Theme = 2,
    /// Lives as long as the active payvar.
    Payvar = 3,
    /// Feature-level data spanning game cycles.
    Feature = 4,
    /// Lives for the whole installation.
    Persistent = 5,
}

impl LifecycleScope {
    /// All lifecycle scopes.
    pub const ALL: [LifecycleScope; 6] = [
        LifecycleScope::GameCycle,
        LifecycleScope::History,
        LifecycleScope::Theme,
        LifecycleScope::Payvar,
        LifecycleScope::Feature,
        LifecycleScope::Persistent,
    ];

    /// Interpret a raw scope as a lifecycle enumerant.
    pub fn from_scope(scope: Scope) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| *l as u32 == scope.0)
    }
}

impl From<LifecycleScope> for Scope {
    fn from(lifecycle: LifecycleScope) -> Self {
        Scope(lifecycle as u32)
    }
}

/// One scope within one section; the unit of clear/swap/copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeKey {
    pub section: Section,
    pub scope: Scope,
}

impl ScopeKey {
    pub fn new(section: Section, scope: impl Into<Scope>) -> Self {
        Self {
            section,
            scope: scope.into(),
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match LifecycleScope::from_scope(self.scope) {
            Some(lifecycle) if self.section.is_lifecycle_scoped() => {
                write!(f, "{}/{:?}", self.section, lifecycle)
            }
            _ => write!(f, "{}/{}", self.section, self.scope),
        }
    }
}

// =============================================================================
// ADDRESS
// =============================================================================

/// Fully qualified location of one critical data entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    section: Section,
    scope: Scope,
    path: String,
}

impl Address {
    /// Build an address, validating the path.
    pub fn new(
        section: Section,
        scope: impl Into<Scope>,
        path: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self {
            section,
            scope: scope.into(),
            path,
        })
    }

    /// The section.
    pub fn section(&self) -> Section {
        self.section
    }

    /// The scope.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The scope this address lives in.
    pub fn scope_key(&self) -> ScopeKey {
        ScopeKey {
            section: self.section,
            scope: self.scope,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope_key(), self.path)
    }
}
