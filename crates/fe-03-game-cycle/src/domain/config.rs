//! # Foundation Configuration

use fe_01_critical_store::{CompressionConfig, JournalConfig};
use serde::{Deserialize, Serialize};
use shared_bus::DEFAULT_EVENT_PACE;
use shared_types::Denomination;
use std::fmt;
use std::path::PathBuf;

/// Mode of the active theme context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameContextMode {
    /// No theme context is active.
    None,
    /// Normal play; the only mode in which game-cycle operations run.
    #[default]
    Play,
    /// Replaying a history record.
    History,
    /// Operator utility screens.
    Utility,
}

impl fmt::Display for GameContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameContextMode::None => "None",
            GameContextMode::Play => "Play",
            GameContextMode::History => "History",
            GameContextMode::Utility => "Utility",
        };
        f.write_str(name)
    }
}

/// Configuration for a [`crate::Foundation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationConfig {
    pub journal: JournalConfig,

    /// Transactional events dispatched per `process_events` pass.
    pub event_pace: usize,

    /// Credits live in the bank meter and are moved to wagerable to bet.
    pub banked_credits: bool,

    /// An ancillary (double-up) game may follow main play.
    pub ancillary_enabled: bool,

    /// Bonus play may follow main or ancillary play.
    pub bonus_enabled: bool,

    /// Capacity of the history ring buffer.
    pub max_history_records: u32,

    /// Game denomination, recorded with each history record.
    pub denomination: Denomination,

    /// Context mode at startup.
    pub context_mode: GameContextMode,
}

impl Default for FoundationConfig {
    fn default() -> Self {
        Self {
            journal: JournalConfig::default(),
            event_pace: DEFAULT_EVENT_PACE,
            banked_credits: true,
            ancillary_enabled: false,
            bonus_enabled: false,
            max_history_records: 10,
            denomination: Denomination::UNIT,
            context_mode: GameContextMode::Play,
        }
    }
}

impl FoundationConfig {
    pub fn memory_only() -> Self {
        Self::default()
    }

    pub fn file_backed(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            journal: JournalConfig::file_backed(data_dir),
            ..Self::default()
        }
    }

    pub fn with_journal(mut self, journal: JournalConfig) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_compression(mut self, compression: CompressionConfig) -> Self {
        self.journal = self.journal.with_compression(compression);
        self
    }

    /// Pace is clamped to at least one event per pass.
    pub fn with_event_pace(mut self, pace: usize) -> Self {
        self.event_pace = pace.max(1);
        self
    }

    pub fn with_banked_credits(mut self, banked: bool) -> Self {
        self.banked_credits = banked;
        self
    }

    pub fn with_ancillary(mut self, enabled: bool) -> Self {
        self.ancillary_enabled = enabled;
        self
    }

    pub fn with_bonus(mut self, enabled: bool) -> Self {
        self.bonus_enabled = enabled;
        self
    }

    /// Capacity is clamped to at least one record.
    pub fn with_max_history_records(mut self, records: u32) -> Self {
        self.max_history_records = records.max(1);
        self
    }

    pub fn with_denomination(mut self, denomination: Denomination) -> Self {
        self.denomination = denomination;
        self
    }

    pub fn with_context_mode(mut self, mode: GameContextMode) -> Self {
        self.context_mode = mode;
        self
    }
}
