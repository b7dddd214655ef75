//! # Money Operations
//!
//! Bets, credits and cashout. Every operation runs the bet invariant and
//! all overflow checks first, then writes through the meter ledger.

use super::foundation::Foundation;
use crate::domain::errors::FoundationError;
use crate::domain::events::FoundationEvent;
use crate::domain::meters::{check_bet, checked_add, checked_debit, plan_debit, MeterViolation};
use crate::domain::state::GameCycleOperation as Op;
use shared_types::{BaseUnits, Denomination};
use tracing::info;

impl Foundation {
    /// Credit the bank (banked credits) or wagerable meter.
    pub fn insert_money(&mut self, amount: BaseUnits) -> Result<(), FoundationError> {
        self.begin(Op::InsertMoney)?;
        let meters = *self.ledger.meters();
        {
            let mut store = self.coordinator.store()?;
            if self.config.banked_credits {
                let bank = checked_add(meters.bank, amount, "bank")?;
                self.ledger.set_bank(&mut store, bank)?;
            } else {
                let wagerable = checked_add(meters.wagerable, amount, "wagerable")?;
                self.ledger.set_wagerable(&mut store, wagerable)?;
            }
        }
        info!(amount, "[fe-03] Money inserted");
        self.post_money_changed();
        Ok(())
    }

    /// Commit `bet` credits of `denomination`, replacing any earlier
    /// committed bet.
    pub fn commit_bet(&mut self, bet: u64, denomination: Denomination) -> Result<(), FoundationError> {
        self.begin(Op::CommitBet)?;
        let amount = denomination
            .to_base_units(bet)
            .map_err(MeterViolation::from)?;
        let meters = *self.ledger.meters();
        let previous = meters.committed_bet.unwrap_or(0);
        let available = checked_add(
            meters.available_money(self.config.banked_credits)?,
            previous,
            "available money",
        )?;
        check_bet(amount, amount, available, &self.bet_limits.bet_limits())?;
        let refunded = checked_add(meters.wagerable, previous, "wagerable")?;
        let (wagerable, bank) =
            plan_debit(refunded, meters.bank, amount, self.config.banked_credits)?;

        {
            let mut store = self.coordinator.store()?;
            self.ledger.set_bank(&mut store, bank)?;
            self.ledger.set_wagerable(&mut store, wagerable)?;
            self.ledger.set_committed_bet(&mut store, Some(amount))?;
        }
        info!(bet = amount, wagerable, bank, "[fe-03] Bet committed");
        self.post_money_changed();
        Ok(())
    }

    /// Refund the committed bet to wagerable and unset it. Nothing happens
    /// if no bet is committed.
    pub fn uncommit_bet(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::UncommitBet)?;
        let meters = *self.ledger.meters();
        let Some(previous) = meters.committed_bet else {
            return Ok(());
        };
        let wagerable = checked_add(meters.wagerable, previous, "wagerable")?;

        {
            let mut store = self.coordinator.store()?;
            self.ledger.set_wagerable(&mut store, wagerable)?;
            self.ledger.set_committed_bet(&mut store, None)?;
        }
        self.post_money_changed();
        Ok(())
    }

    /// Turn the committed bet into the starting bet. Only one starting bet
    /// is placed per game cycle.
    pub fn place_starting_bet(&mut self) -> Result<(), FoundationError> {
        self.begin(Op::PlaceStartingBet)?;
        let meters = self.ledger.meters();
        if meters.starting_bet.is_some() {
            return Err(FoundationError::GuardRejected {
                operation: Op::PlaceStartingBet,
                guard: "no starting bet placed",
            });
        }
        let committed = meters.committed_bet.ok_or(FoundationError::GuardRejected {
            operation: Op::PlaceStartingBet,
            guard: "a committed bet",
        })?;

        let mut store = self.coordinator.store()?;
        self.ledger.set_starting_bet(&mut store, Some(committed))?;
        self.ledger.set_committed_bet(&mut store, None)?;
        Ok(())
    }

    /// Add a mid-game bet; the invariant applies to the cycle's total bet.
    pub fn place_mid_game_bet(
        &mut self,
        bet: u64,
        denomination: Denomination,
    ) -> Result<(), FoundationError> {
        self.begin(Op::PlaceMidGameBet)?;
        let amount = denomination
            .to_base_units(bet)
            .map_err(MeterViolation::from)?;
        let meters = *self.ledger.meters();
        let accumulated = checked_add(meters.total_bet()?, amount, "total bet")?;
        let available = meters.available_money(self.config.banked_credits)?;
        check_bet(amount, accumulated, available, &self.bet_limits.bet_limits())?;
        let (wagerable, bank) =
            plan_debit(meters.wagerable, meters.bank, amount, self.config.banked_credits)?;
        let mid_game_bet = checked_add(meters.mid_game_bet, amount, "mid-game bet")?;

        {
            let mut store = self.coordinator.store()?;
            self.ledger.set_bank(&mut store, bank)?;
            self.ledger.set_wagerable(&mut store, wagerable)?;
            self.ledger.set_mid_game_bet(&mut store, mid_game_bet)?;
        }
        self.post_money_changed();
        Ok(())
    }

    /// Whether `bet` could be committed in the next game cycle, counting a
    /// win that is accumulated but not yet credited. Needs no transaction.
    pub fn can_bet_next_game_cycle(
        &self,
        bet: u64,
        denomination: Denomination,
    ) -> Result<(), MeterViolation> {
        let amount = denomination.to_base_units(bet)?;
        let mut available = self
            .ledger
            .meters()
            .available_money(self.config.banked_credits)?;
        if self.state.has_pending_win() {
            available = checked_add(available, self.cycle.accumulated_outcome, "available money")?;
        }
        check_bet(amount, amount, available, &self.bet_limits.bet_limits())
    }

    /// Move credits from the bank to wagerable while transfer is eligible.
    pub fn transfer_bank_to_wagerable(&mut self, amount: BaseUnits) -> Result<(), FoundationError> {
        self.begin(Op::TransferBankToWagerable)?;
        if !self.config.banked_credits || !self.cycle.bank_transfer_eligible {
            return Err(FoundationError::GuardRejected {
                operation: Op::TransferBankToWagerable,
                guard: "bank transfer eligibility",
            });
        }
        let meters = *self.ledger.meters();
        let bank = checked_debit(meters.bank, amount)?;
        let wagerable = checked_add(meters.wagerable, amount, "wagerable")?;

        {
            let mut store = self.coordinator.store()?;
            self.ledger.set_bank(&mut store, bank)?;
            self.ledger.set_wagerable(&mut store, wagerable)?;
        }
        self.post_money_changed();
        Ok(())
    }

    /// Pay out every credit. Returns the amount paid.
    pub fn request_cashout(&mut self) -> Result<BaseUnits, FoundationError> {
        self.begin(Op::RequestCashout)?;
        let meters = *self.ledger.meters();
        let amount = checked_add(meters.bank, meters.wagerable, "cashout")?;
        let paid = checked_add(meters.paid, amount, "paid")?;

        {
            let mut store = self.coordinator.store()?;
            self.ledger.set_paid(&mut store, paid)?;
            self.ledger.set_bank(&mut store, 0)?;
            self.ledger.set_wagerable(&mut store, 0)?;
        }
        info!(amount, "[fe-03] Cashout");
        self.post(FoundationEvent::CashoutRequested { amount });
        self.post_money_changed();
        Ok(amount)
    }
}
