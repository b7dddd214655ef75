//! # Foundation Events
//!
//! | Event | Queue | Replayed after restart |
//! |-------|-------|------------------------|
//! | `EnrollResponse` | transactional | yes |
//! | `OutcomeAdjusted` | transactional | yes |
//! | `FinalizeAwardResponse` | transactional | yes |
//! | `GameCycleEnded` | transactional | yes |
//! | `ThemeContextActivated` | transactional | no |
//! | `ThemeContextInactivated` | transactional | no |
//! | `MoneyChanged` | non-transactional | no |
//! | `CashoutRequested` | non-transactional | no |

use super::config::GameContextMode;
use super::state::GameCycleState;
use serde::{Deserialize, Serialize};
use shared_bus::{QueueKind, QueuedEvent};
use shared_types::BaseUnits;

/// Notification from the Foundation to the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoundationEvent {
    EnrollResponse {
        game_cycle: u64,
        succeeded: bool,
    },
    OutcomeAdjusted {
        state: GameCycleState,
        accumulated_win: BaseUnits,
        is_final: bool,
    },
    FinalizeAwardResponse {
        game_cycle: u64,
        win: BaseUnits,
    },
    GameCycleEnded {
        game_cycle: u64,
        history_record: u32,
    },
    ThemeContextActivated {
        theme: String,
        payvar: String,
        mode: GameContextMode,
    },
    ThemeContextInactivated,
    MoneyChanged {
        wagerable: BaseUnits,
        bank: BaseUnits,
        paid: BaseUnits,
    },
    CashoutRequested {
        amount: BaseUnits,
    },
}

impl FoundationEvent {
    /// Queue this event is posted to.
    pub fn queue(&self) -> QueueKind {
        match self {
            FoundationEvent::MoneyChanged { .. } | FoundationEvent::CashoutRequested { .. } => {
                QueueKind::NonTransactional
            }
            _ => QueueKind::Transactional,
        }
    }
}

impl QueuedEvent for FoundationEvent {
    fn kind(&self) -> &'static str {
        match self {
            FoundationEvent::EnrollResponse { .. } => "EnrollResponse",
            FoundationEvent::OutcomeAdjusted { .. } => "OutcomeAdjusted",
            FoundationEvent::FinalizeAwardResponse { .. } => "FinalizeAwardResponse",
            FoundationEvent::GameCycleEnded { .. } => "GameCycleEnded",
            FoundationEvent::ThemeContextActivated { .. } => "ThemeContextActivated",
            FoundationEvent::ThemeContextInactivated => "ThemeContextInactivated",
            FoundationEvent::MoneyChanged { .. } => "MoneyChanged",
            FoundationEvent::CashoutRequested { .. } => "CashoutRequested",
        }
    }

    fn survives_restart(&self) -> bool {
        match self {
            FoundationEvent::EnrollResponse { .. }
            | FoundationEvent::OutcomeAdjusted { .. }
            | FoundationEvent::FinalizeAwardResponse { .. }
            | FoundationEvent::GameCycleEnded { .. } => true,
            FoundationEvent::ThemeContextActivated { .. }
            | FoundationEvent::ThemeContextInactivated
            | FoundationEvent::MoneyChanged { .. }
            | FoundationEvent::CashoutRequested { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_events_are_not_replayed() {
        let activated = FoundationEvent::ThemeContextActivated {
            theme: "Sevens".into(),
            payvar: "95".into(),
            mode: GameContextMode::Play,
        };
        assert!(!activated.survives_restart());
        assert_eq!(activated.queue(), QueueKind::Transactional);
    }

    #[test]
    fn test_money_events_are_non_transactional() {
        let event = FoundationEvent::MoneyChanged {
            wagerable: 0,
            bank: 10,
            paid: 0,
        };
        assert_eq!(event.queue(), QueueKind::NonTransactional);
        assert_eq!(event.kind(), "MoneyChanged");
    }

    #[test]
    fn test_cycle_events_are_replayed() {
        let event = FoundationEvent::GameCycleEnded {
            game_cycle: 3,
            history_record: 2,
        };
        assert!(event.survives_restart());
    }
}
