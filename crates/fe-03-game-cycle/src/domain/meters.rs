//! # Meters and the Bet Invariant
//!
//! Every bet is checked before anything is mutated:
//!
//! ```text
//! requested ≤ available  ∧  accumulated ≤ max  ∧  (accumulated = 0 ∨ accumulated ≥ min)
//! ```
//!
//! All arithmetic is checked; an overflow is a violation, never a wrap.

use super::errors::RestoreError;
use serde::{Deserialize, Serialize};
use shared_types::{BaseUnits, LifecycleScope, MoneyError, Scope, Section};
use thiserror::Error;

/// Persisted meter, one store entry each under `(Meters, Persistent)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meter {
    Wagerable,
    Bank,
    Paid,
    CommittedBet,
    StartingBet,
    MidGameBet,
}

impl Meter {
    pub const ALL: [Meter; 6] = [
        Meter::Wagerable,
        Meter::Bank,
        Meter::Paid,
        Meter::CommittedBet,
        Meter::StartingBet,
        Meter::MidGameBet,
    ];

    pub const SECTION: Section = Section::Meters;

    pub const fn path(self) -> &'static str {
        match self {
            Meter::Wagerable => "Wagerable",
            Meter::Bank => "Bank",
            Meter::Paid => "Paid",
            Meter::CommittedBet => "CommittedBet",
            Meter::StartingBet => "StartingBet",
            Meter::MidGameBet => "MidGameBet",
        }
    }

    pub fn scope() -> Scope {
        LifecycleScope::Persistent.into()
    }
}

/// Balances and bet accumulators, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeterSet {
    pub wagerable: BaseUnits,
    pub bank: BaseUnits,
    pub paid: BaseUnits,
    /// `None` is persisted as `-1`.
    pub committed_bet: Option<BaseUnits>,
    pub starting_bet: Option<BaseUnits>,
    pub mid_game_bet: BaseUnits,
}

impl MeterSet {
    /// Money the player may bet with.
    pub fn available_money(&self, banked_credits: bool) -> Result<BaseUnits, MeterViolation> {
        if banked_credits {
            checked_add(self.wagerable, self.bank, "available money")
        } else {
            Ok(self.wagerable)
        }
    }

    /// Total bet placed this game cycle.
    pub fn total_bet(&self) -> Result<BaseUnits, MeterViolation> {
        checked_add(
            self.starting_bet.unwrap_or(0),
            self.mid_game_bet,
            "total bet",
        )
    }

    /// Raw persisted value of one meter.
    pub fn raw(&self, meter: Meter) -> Result<i64, MeterViolation> {
        match meter {
            Meter::Wagerable => to_raw(meter, self.wagerable),
            Meter::Bank => to_raw(meter, self.bank),
            Meter::Paid => to_raw(meter, self.paid),
            Meter::CommittedBet => bet_to_raw(meter, self.committed_bet),
            Meter::StartingBet => bet_to_raw(meter, self.starting_bet),
            Meter::MidGameBet => to_raw(meter, self.mid_game_bet),
        }
    }
}

/// Bet limits from the registry, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    pub min_bet: BaseUnits,
    pub max_bet: BaseUnits,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: i64::MAX as BaseUnits,
        }
    }
}

/// A meter or bet rule that an operation would break.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeterViolation {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: BaseUnits,
        available: BaseUnits,
    },

    #[error("Bet {accumulated} exceeds maximum {max}")]
    AboveMaximum { accumulated: BaseUnits, max: BaseUnits },

    #[error("Bet {accumulated} below minimum {min}")]
    BelowMinimum { accumulated: BaseUnits, min: BaseUnits },

    #[error("Arithmetic overflow computing {operation}")]
    Overflow { operation: &'static str },

    #[error(transparent)]
    Conversion(#[from] MoneyError),
}

/// Check a bet against funds and limits.
pub fn check_bet(
    requested: BaseUnits,
    accumulated: BaseUnits,
    available: BaseUnits,
    limits: &BetLimits,
) -> Result<(), MeterViolation> {
    if requested > available {
        return Err(MeterViolation::InsufficientFunds {
            requested,
            available,
        });
    }
    if accumulated > limits.max_bet {
        return Err(MeterViolation::AboveMaximum {
            accumulated,
            max: limits.max_bet,
        });
    }
    if accumulated != 0 && accumulated < limits.min_bet {
        return Err(MeterViolation::BelowMinimum {
            accumulated,
            min: limits.min_bet,
        });
    }
    Ok(())
}

/// Largest value a meter can persist.
pub const METER_MAX: BaseUnits = i64::MAX as BaseUnits;

/// Add two amounts, failing if the sum would not fit in a persisted meter.
pub fn checked_add(
    a: BaseUnits,
    b: BaseUnits,
    operation: &'static str,
) -> Result<BaseUnits, MeterViolation> {
    a.checked_add(b)
        .filter(|sum| *sum <= METER_MAX)
        .ok_or(MeterViolation::Overflow { operation })
}

/// Debit `amount` from `balance`, failing on a shortfall.
pub fn checked_debit(balance: BaseUnits, amount: BaseUnits) -> Result<BaseUnits, MeterViolation> {
    balance
        .checked_sub(amount)
        .ok_or(MeterViolation::InsufficientFunds {
            requested: amount,
            available: balance,
        })
}

/// Balances after debiting `amount` for a bet.
///
/// In a banked environment a wagerable shortfall is first moved over from
/// the bank. Returns `(wagerable, bank)`.
pub fn plan_debit(
    wagerable: BaseUnits,
    bank: BaseUnits,
    amount: BaseUnits,
    banked_credits: bool,
) -> Result<(BaseUnits, BaseUnits), MeterViolation> {
    let (wagerable, bank) = if banked_credits && wagerable < amount {
        let shortfall = amount - wagerable;
        (amount, checked_debit(bank, shortfall)?)
    } else {
        (wagerable, bank)
    };
    Ok((checked_debit(wagerable, amount)?, bank))
}

pub fn to_raw(meter: Meter, value: BaseUnits) -> Result<i64, MeterViolation> {
    i64::try_from(value).map_err(|_| MeterViolation::Overflow {
        operation: meter.path(),
    })
}

pub fn bet_to_raw(meter: Meter, bet: Option<BaseUnits>) -> Result<i64, MeterViolation> {
    bet.map_or(Ok(-1), |value| to_raw(meter, value))
}

/// Decode a persisted balance, rejecting negatives.
pub fn balance_from_raw(raw: i64) -> Result<BaseUnits, RestoreError> {
    BaseUnits::try_from(raw).map_err(|_| RestoreError::NegativeMeter(raw))
}

/// Decode a persisted bet, where `-1` is unset.
pub fn bet_from_raw(raw: i64) -> Result<Option<BaseUnits>, RestoreError> {
    match raw {
        -1 => Ok(None),
        raw if raw < -1 => Err(RestoreError::BetBelowUnset(raw)),
        raw => Ok(Some(raw as BaseUnits)),
    }
}
