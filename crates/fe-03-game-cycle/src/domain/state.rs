//! # Game-Cycle State Machine
//!
//! ```text
//!  Idle ──commit──→ Committed ──enroll──→ [EnrollPending] ──→ EnrollComplete
//!   ▲ ▲                 │                                        │      │
//!   │ └─── uncommit ────┘              unenroll ─────────────────┘      │ start playing
//!   │                                                                   ▼
//!   │      ┌─────────────── adjust outcome (not final) ──────────── Playing
//!   │      ▼                                                            │ adjust (final)
//!   │  [EvaluatePending] ────────────────────────────────────→ MainPlayComplete
//!   │                                             ancillary ↙     │ bonus    ↘ finalize
//!   │                                   AncillaryPlaying ... BonusPlaying ...  │
//!   │                                                                          ▼
//!   └────────────── end game cycle ──── Finalized ←── [FinalizeAwardPending] ──┘
//! ```
//!
//! Bracketed states are only ever passed through inside a single call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the current game cycle, persisted as its `u8` enumerant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameCycleState {
    /// Not yet initialized; never persisted.
    #[default]
    Invalid = 0,
    Idle = 1,
    Committed = 2,
    EnrollPending = 3,
    EnrollComplete = 4,
    Playing = 5,
    EvaluatePending = 6,
    MainPlayComplete = 7,
    AncillaryPlaying = 8,
    AncillaryEvaluatePending = 9,
    AncillaryPlayComplete = 10,
    BonusPlaying = 11,
    BonusEvaluatePending = 12,
    BonusPlayComplete = 13,
    FinalizeAwardPending = 14,
    Finalized = 15,
}

impl GameCycleState {
    /// Every state a restored game cycle may be in.
    pub const VALID: [GameCycleState; 15] = [
        GameCycleState::Idle,
        GameCycleState::Committed,
        GameCycleState::EnrollPending,
        GameCycleState::EnrollComplete,
        GameCycleState::Playing,
        GameCycleState::EvaluatePending,
        GameCycleState::MainPlayComplete,
        GameCycleState::AncillaryPlaying,
        GameCycleState::AncillaryEvaluatePending,
        GameCycleState::AncillaryPlayComplete,
        GameCycleState::BonusPlaying,
        GameCycleState::BonusEvaluatePending,
        GameCycleState::BonusPlayComplete,
        GameCycleState::FinalizeAwardPending,
        GameCycleState::Finalized,
    ];

    /// Decode a persisted enumerant. `Invalid` and unknown values are `None`.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::VALID.iter().copied().find(|state| *state as u8 == value)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            GameCycleState::Invalid => "Invalid",
            GameCycleState::Idle => "Idle",
            GameCycleState::Committed => "Committed",
            GameCycleState::EnrollPending => "EnrollPending",
            GameCycleState::EnrollComplete => "EnrollComplete",
            GameCycleState::Playing => "Playing",
            GameCycleState::EvaluatePending => "EvaluatePending",
            GameCycleState::MainPlayComplete => "MainPlayComplete",
            GameCycleState::AncillaryPlaying => "AncillaryPlaying",
            GameCycleState::AncillaryEvaluatePending => "AncillaryEvaluatePending",
            GameCycleState::AncillaryPlayComplete => "AncillaryPlayComplete",
            GameCycleState::BonusPlaying => "BonusPlaying",
            GameCycleState::BonusEvaluatePending => "BonusEvaluatePending",
            GameCycleState::BonusPlayComplete => "BonusPlayComplete",
            GameCycleState::FinalizeAwardPending => "FinalizeAwardPending",
            GameCycleState::Finalized => "Finalized",
        }
    }

    /// Play phase this state belongs to, if any.
    pub fn play_phase(self) -> Option<PlayPhase> {
        PlayPhase::ALL.into_iter().find(|phase| {
            phase.playing() == self || phase.evaluate_pending() == self || phase.complete() == self
        })
    }

    /// Whether an outcome has been accumulated but not yet credited.
    pub fn has_pending_win(self) -> bool {
        self >= GameCycleState::Playing && self <= GameCycleState::FinalizeAwardPending
    }

    /// Edges of the state graph.
    pub fn can_transition_to(self, next: GameCycleState) -> bool {
        use GameCycleState::*;
        matches!(
            (self, next),
            (Invalid, Idle)
                | (Idle, Committed)
                | (Committed, Idle)
                | (Committed, EnrollPending)
                | (EnrollPending, EnrollComplete)
                | (EnrollComplete, Idle)
                | (EnrollComplete, Playing)
                | (Playing, EvaluatePending)
                | (EvaluatePending, Playing)
                | (EvaluatePending, MainPlayComplete)
                | (MainPlayComplete, AncillaryPlaying)
                | (MainPlayComplete, BonusPlaying)
                | (MainPlayComplete, FinalizeAwardPending)
                | (AncillaryPlaying, AncillaryEvaluatePending)
                | (AncillaryEvaluatePending, AncillaryPlaying)
                | (AncillaryEvaluatePending, AncillaryPlayComplete)
                | (AncillaryPlayComplete, BonusPlaying)
                | (AncillaryPlayComplete, FinalizeAwardPending)
                | (BonusPlaying, BonusEvaluatePending)
                | (BonusEvaluatePending, BonusPlaying)
                | (BonusEvaluatePending, BonusPlayComplete)
                | (BonusPlayComplete, FinalizeAwardPending)
                | (FinalizeAwardPending, Finalized)
                | (Finalized, Idle)
        )
    }
}

impl fmt::Display for GameCycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Main, ancillary (double-up style) or bonus play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayPhase {
    Main,
    Ancillary,
    Bonus,
}

impl PlayPhase {
    pub const ALL: [PlayPhase; 3] = [PlayPhase::Main, PlayPhase::Ancillary, PlayPhase::Bonus];

    pub const fn playing(self) -> GameCycleState {
        match self {
            PlayPhase::Main => GameCycleState::Playing,
            PlayPhase::Ancillary => GameCycleState::AncillaryPlaying,
            PlayPhase::Bonus => GameCycleState::BonusPlaying,
        }
    }

    pub const fn evaluate_pending(self) -> GameCycleState {
        match self {
            PlayPhase::Main => GameCycleState::EvaluatePending,
            PlayPhase::Ancillary => GameCycleState::AncillaryEvaluatePending,
            PlayPhase::Bonus => GameCycleState::BonusEvaluatePending,
        }
    }

    pub const fn complete(self) -> GameCycleState {
        match self {
            PlayPhase::Main => GameCycleState::MainPlayComplete,
            PlayPhase::Ancillary => GameCycleState::AncillaryPlayComplete,
            PlayPhase::Bonus => GameCycleState::BonusPlayComplete,
        }
    }
}

/// Externally callable operation, as named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCycleOperation {
    /// Cold-start move out of `Invalid`.
    Initialize,
    CommitGameCycle,
    UncommitGameCycle,
    EnrollGameCycle,
    UnenrollGameCycle,
    StartPlaying,
    AdjustOutcome,
    StartAncillaryPlaying,
    StartBonusPlaying,
    FinalizeOutcome,
    EndGameCycle,
    InsertMoney,
    CommitBet,
    UncommitBet,
    PlaceStartingBet,
    PlaceMidGameBet,
    TransferBankToWagerable,
    RequestCashout,
    ActivateThemeContext,
    InactivateThemeContext,
}

const INVALID: &[GameCycleState] = &[GameCycleState::Invalid];
const IDLE: &[GameCycleState] = &[GameCycleState::Idle];
const COMMITTED: &[GameCycleState] = &[GameCycleState::Committed];
const ENROLL_COMPLETE: &[GameCycleState] = &[GameCycleState::EnrollComplete];
const BETTING: &[GameCycleState] = &[GameCycleState::Committed, GameCycleState::EnrollComplete];
const PLAYING: &[GameCycleState] = &[
    GameCycleState::Playing,
    GameCycleState::AncillaryPlaying,
    GameCycleState::BonusPlaying,
];
const MAIN_COMPLETE: &[GameCycleState] = &[GameCycleState::MainPlayComplete];
const BONUS_ENTRY: &[GameCycleState] = &[
    GameCycleState::MainPlayComplete,
    GameCycleState::AncillaryPlayComplete,
];
const PLAY_COMPLETE: &[GameCycleState] = &[
    GameCycleState::MainPlayComplete,
    GameCycleState::AncillaryPlayComplete,
    GameCycleState::BonusPlayComplete,
];
const FINALIZED: &[GameCycleState] = &[GameCycleState::Finalized];

impl GameCycleOperation {
    pub const fn name(self) -> &'static str {
        match self {
            GameCycleOperation::Initialize => "Initialize",
            GameCycleOperation::CommitGameCycle => "CommitGameCycle",
            GameCycleOperation::UncommitGameCycle => "UncommitGameCycle",
            GameCycleOperation::EnrollGameCycle => "EnrollGameCycle",
            GameCycleOperation::UnenrollGameCycle => "UnenrollGameCycle",
            GameCycleOperation::StartPlaying => "StartPlaying",
            GameCycleOperation::AdjustOutcome => "AdjustOutcome",
            GameCycleOperation::StartAncillaryPlaying => "StartAncillaryPlaying",
            GameCycleOperation::StartBonusPlaying => "StartBonusPlaying",
            GameCycleOperation::FinalizeOutcome => "FinalizeOutcome",
            GameCycleOperation::EndGameCycle => "EndGameCycle",
            GameCycleOperation::InsertMoney => "InsertMoney",
            GameCycleOperation::CommitBet => "CommitBet",
            GameCycleOperation::UncommitBet => "UncommitBet",
            GameCycleOperation::PlaceStartingBet => "PlaceStartingBet",
            GameCycleOperation::PlaceMidGameBet => "PlaceMidGameBet",
            GameCycleOperation::TransferBankToWagerable => "TransferBankToWagerable",
            GameCycleOperation::RequestCashout => "RequestCashout",
            GameCycleOperation::ActivateThemeContext => "ActivateThemeContext",
            GameCycleOperation::InactivateThemeContext => "InactivateThemeContext",
        }
    }

    /// States in which the operation may be invoked.
    pub fn legal_states(self) -> &'static [GameCycleState] {
        match self {
            GameCycleOperation::Initialize => INVALID,
            GameCycleOperation::CommitGameCycle => IDLE,
            GameCycleOperation::UncommitGameCycle | GameCycleOperation::EnrollGameCycle => {
                COMMITTED
            }
            GameCycleOperation::UnenrollGameCycle
            | GameCycleOperation::StartPlaying
            | GameCycleOperation::PlaceStartingBet => ENROLL_COMPLETE,
            GameCycleOperation::AdjustOutcome | GameCycleOperation::PlaceMidGameBet => PLAYING,
            GameCycleOperation::StartAncillaryPlaying => MAIN_COMPLETE,
            GameCycleOperation::StartBonusPlaying => BONUS_ENTRY,
            GameCycleOperation::FinalizeOutcome => PLAY_COMPLETE,
            GameCycleOperation::EndGameCycle => FINALIZED,
            GameCycleOperation::CommitBet | GameCycleOperation::UncommitBet => BETTING,
            GameCycleOperation::InsertMoney | GameCycleOperation::TransferBankToWagerable => {
                &GameCycleState::VALID
            }
            GameCycleOperation::RequestCashout
            | GameCycleOperation::ActivateThemeContext
            | GameCycleOperation::InactivateThemeContext => IDLE,
        }
    }

    pub fn is_legal_in(self, state: GameCycleState) -> bool {
        self.legal_states().contains(&state)
    }

    /// Whether the operation needs the theme context to be in `Play` mode.
    pub fn requires_play_mode(self) -> bool {
        !matches!(
            self,
            GameCycleOperation::Initialize
                | GameCycleOperation::ActivateThemeContext
                | GameCycleOperation::InactivateThemeContext
        )
    }
}

impl fmt::Display for GameCycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a legal-state set for diagnostics, e.g. `Idle|Committed`.
pub fn describe_states(states: &[GameCycleState]) -> String {
    states
        .iter()
        .map(|state| state.name())
        .collect::<Vec<_>>()
        .join("|")
}
