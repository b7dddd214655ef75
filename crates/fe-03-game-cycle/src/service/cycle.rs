//! # Game-Cycle Operations
//!
//! Each operation checks the transaction, the context mode, the current
//! state and its own guard, and computes every new value before the first
//! write. A rejected call leaves state and meters untouched.

use super::foundation::Foundation;
use crate::domain::errors::FoundationError;
use crate::domain::events::FoundationEvent;
use crate::domain::fields::history_staging;
use crate::domain::history::{GameOutcome, WAGER_CATEGORIES_PATH};
use crate::domain::meters::{checked_add, MeterViolation};
use crate::domain::state::{GameCycleOperation as Op, GameCycleState, PlayPhase};
use fe_02_transaction_coordinator::CriticalStore;
use fe_telemetry::metrics;
use shared_types::Address;
use tracing::{info, warn};

impl Foundation {
    /// Idle → Committed.
    ///
    /// Requires an offerable wager (funds of at least the minimum bet) and
    /// no enforced commit failure.
    pub fn commit_game_cycle(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::CommitGameCycle)?;
        if self.enforced_commit_failure {
            warn!("CommitGameCycle refused by enforced failure");
            return Err(FoundationError::CommitRefused);
        }
        let available = self.ledger.meters().available_money(self.config.banked_credits)?;
        let limits = self.bet_limits.bet_limits();
        if available == 0 || available < limits.min_bet {
            return Err(FoundationError::GuardRejected {
                operation: Op::CommitGameCycle,
                guard: "an offerable wager",
            });
        }
        let game_cycle = self
            .game_cycle
            .checked_add(1)
            .ok_or(MeterViolation::Overflow {
                operation: "game cycle number",
            })?;

        self.set_game_cycle_number(game_cycle)?;
        self.transition(Op::CommitGameCycle, GameCycleState::Committed)
    }

    /// Committed → Idle. The committed bet must have been withdrawn.
    pub fn uncommit_game_cycle(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::UncommitGameCycle)?;
        self.require_no_committed_bet(Op::UncommitGameCycle)?;
        self.transition(Op::UncommitGameCycle, GameCycleState::Idle)
    }

    /// Committed → EnrollPending → EnrollComplete, posting the enrollment
    /// outcome.
    pub fn enroll_game_cycle(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::EnrollGameCycle)?;
        if self.ledger.meters().committed_bet.is_none() {
            return Err(FoundationError::GuardRejected {
                operation: Op::EnrollGameCycle,
                guard: "a committed bet",
            });
        }

        self.transition(Op::EnrollGameCycle, GameCycleState::EnrollPending)?;
        self.post(FoundationEvent::EnrollResponse {
            game_cycle: self.game_cycle,
            succeeded: true,
        });
        self.transition(Op::EnrollGameCycle, GameCycleState::EnrollComplete)
    }

    /// EnrollComplete → Idle. The committed bet must have been withdrawn.
    pub fn unenroll_game_cycle(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::UnenrollGameCycle)?;
        self.require_no_committed_bet(Op::UnenrollGameCycle)?;
        self.transition(Op::UnenrollGameCycle, GameCycleState::Idle)
    }

    /// EnrollComplete → Playing, contributing the starting bet to linked
    /// progressives.
    pub fn start_playing(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::StartPlaying)?;
        let starting_bet =
            self.ledger
                .meters()
                .starting_bet
                .ok_or(FoundationError::GuardRejected {
                    operation: Op::StartPlaying,
                    guard: "a starting bet",
                })?;

        {
            let mut store = self.coordinator.store()?;
            self.progressive
                .contribute(&mut store, self.game_cycle, starting_bet)?;
        }
        self.transition(Op::StartPlaying, GameCycleState::Playing)
    }

    /// Accumulate an outcome in the current play phase.
    ///
    /// Passes through the phase's evaluate-pending state, then returns to
    /// play (`is_final == false`) or completes the phase. The final
    /// main-play outcome must carry wager-category information.
    pub fn adjust_outcome(
        &mut self,
        outcome: GameOutcome,
        is_final: bool,
    ) -> Result<(), FoundationError> {
        self.begin(Op::AdjustOutcome)?;
        let phase =
            self.state
                .play_phase()
                .ok_or_else(|| FoundationError::IllegalStateTransition {
                    operation: Op::AdjustOutcome,
                    current: self.state,
                    legal: Op::AdjustOutcome.legal_states(),
                })?;
        if phase == PlayPhase::Main && is_final && outcome.wager_categories.is_empty() {
            return Err(FoundationError::GuardRejected {
                operation: Op::AdjustOutcome,
                guard: "wager category information",
            });
        }
        let accumulated = checked_add(
            self.cycle.accumulated_outcome,
            outcome.win,
            "accumulated outcome",
        )?;
        let categories = if outcome.wager_categories.is_empty() {
            None
        } else {
            Some(bincode::serialize(&outcome.wager_categories)?)
        };
        let staging = history_staging();
        let categories_address = Address::new(staging.section, staging.scope, WAGER_CATEGORIES_PATH)?;

        self.transition(Op::AdjustOutcome, phase.evaluate_pending())?;
        self.set_accumulated_outcome(accumulated)?;
        if let Some(categories) = categories {
            self.coordinator
                .store()?
                .write(&categories_address, categories)?;
        }
        let next = if is_final {
            phase.complete()
        } else {
            phase.playing()
        };
        self.transition(Op::AdjustOutcome, next)?;

        self.post(FoundationEvent::OutcomeAdjusted {
            state: next,
            accumulated_win: accumulated,
            is_final,
        });
        Ok(())
    }

    /// MainPlayComplete → AncillaryPlaying.
    pub fn start_ancillary_playing(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::StartAncillaryPlaying)?;
        self.transition(Op::StartAncillaryPlaying, GameCycleState::AncillaryPlaying)
    }

    /// MainPlayComplete or AncillaryPlayComplete → BonusPlaying.
    pub fn start_bonus_playing(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::StartBonusPlaying)?;
        if !self.config.bonus_enabled {
            return Err(FoundationError::GuardRejected {
                operation: Op::StartBonusPlaying,
                guard: "bonus play enabled",
            });
        }
        self.transition(Op::StartBonusPlaying, GameCycleState::BonusPlaying)
    }

    /// Any play-complete state → FinalizeAwardPending → Finalized.
    ///
    /// Credits the accumulated win to the bank (banked credits) or to
    /// wagerable, and reports it to linked progressives.
    pub fn finalize_outcome(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::FinalizeOutcome)?;
        let win = self.cycle.accumulated_outcome;
        let meters = *self.ledger.meters();
        let credited = if self.config.banked_credits {
            checked_add(meters.bank, win, "bank")?
        } else {
            checked_add(meters.wagerable, win, "wagerable")?
        };

        {
            let mut store = self.coordinator.store()?;
            self.progressive.finalize(&mut store, self.game_cycle, win)?;
        }

        self.transition(Op::FinalizeOutcome, GameCycleState::FinalizeAwardPending)?;
        {
            let mut store = self.coordinator.store()?;
            if self.config.banked_credits {
                self.ledger.set_bank(&mut store, credited)?;
            } else {
                self.ledger.set_wagerable(&mut store, credited)?;
            }
        }
        self.post(FoundationEvent::FinalizeAwardResponse {
            game_cycle: self.game_cycle,
            win,
        });
        self.transition(Op::FinalizeOutcome, GameCycleState::Finalized)?;
        self.post_money_changed();
        Ok(())
    }

    /// Finalized → Idle, archiving the cycle's history first.
    ///
    /// Returns the history slot the cycle was archived to.
    pub fn end_game_cycle(&mut self) -> Result<u32, FoundationError> {
        self.begin(Op::EndGameCycle)?;
        let slot = self.archive_history()?;
        self.post(FoundationEvent::GameCycleEnded {
            game_cycle: self.game_cycle,
            history_record: slot,
        });
        self.transition(Op::EndGameCycle, GameCycleState::Idle)?;

        metrics::record_game_cycle_completed();
        info!(
            game_cycle = self.game_cycle,
            history_slot = slot,
            "[fe-03] Game cycle completed"
        );
        Ok(slot)
    }

    /// Test hook: make `CommitGameCycle` fail with `CommitRefused`.
    pub fn set_enforced_commit_failure(&mut self, enforced: bool) {
        self.enforced_commit_failure = enforced;
    }

    fn require_no_committed_bet(&self, operation: Op) -> Result<(), FoundationError> {
        if self.ledger.meters().committed_bet.is_some() {
            return Err(FoundationError::GuardRejected {
                operation,
                guard: "no committed bet",
            });
        }
        Ok(())
    }
}
