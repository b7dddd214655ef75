//! # Money
//!
//! Meters hold base currency units. Games bet in credits of a denomination;
//! the conversion is overflow-checked so a bet can never wrap.

use crate::errors::MoneyError;
use serde::{Deserialize, Serialize};

/// Amount in base currency units.
pub type BaseUnits = u64;

/// Value of one credit in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Denomination(u64);

impl Denomination {
    /// One base unit per credit.
    pub const UNIT: Denomination = Denomination(1);

    /// Create a denomination, rejecting zero.
    pub fn new(base_units_per_credit: u64) -> Result<Self, MoneyError> {
        if base_units_per_credit == 0 {
            return Err(MoneyError::ZeroDenomination);
        }
        Ok(Self(base_units_per_credit))
    }

    /// Base units per credit.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Convert credits of this denomination to base units.
    pub fn to_base_units(self, credits: u64) -> Result<BaseUnits, MoneyError> {
        credits.checked_mul(self.0).ok_or(MoneyError::Overflow {
            credits,
            denomination: self.0,
        })
    }
}

impl Default for Denomination {
    fn default() -> Self {
        Self::UNIT
    }
}
