//! # Test Fixtures
//!
//! Builders that bring a [`Foundation`] to a known point of the game cycle.
//! Every step runs in its own caller transaction and drains the
//! transactional queue afterwards, so the next transaction can open.

use fe_01_critical_store::JournalConfig;
use fe_03_game_cycle::{
    BetLimits, Foundation, FoundationConfig, FoundationError, GameOutcome, NullProgressiveSink,
    StaticBetLimits,
};
use shared_types::Denomination;
use std::path::Path;

/// File-backed configuration without the process lock, so one test can
/// reopen the same directory.
pub fn file_config(dir: &Path) -> FoundationConfig {
    FoundationConfig::memory_only().with_journal(JournalConfig::file_backed(dir).with_lock(false))
}

/// Open with explicit bet limits.
pub fn open_with_limits(
    config: FoundationConfig,
    min_bet: u64,
    max_bet: u64,
) -> Result<Foundation, FoundationError> {
    Foundation::with_collaborators(
        config,
        Box::new(StaticBetLimits(BetLimits { min_bet, max_bet })),
        Box::new(NullProgressiveSink),
    )
}

/// Run one step in its own transaction, then dispatch what it posted.
pub fn step<T>(
    foundation: &mut Foundation,
    f: impl FnOnce(&mut Foundation) -> Result<T, FoundationError>,
) -> Result<T, FoundationError> {
    let value = foundation.transaction(f)?;
    foundation.process_all_events()?;
    Ok(value)
}

pub fn insert(foundation: &mut Foundation, amount: u64) -> Result<(), FoundationError> {
    step(foundation, |f| f.insert_money(amount))
}

/// Idle → Committed with `bet` committed.
pub fn commit(foundation: &mut Foundation, bet: u64) -> Result<(), FoundationError> {
    step(foundation, |f| {
        f.commit_game_cycle()?;
        f.commit_bet(bet, Denomination::UNIT)
    })
}

/// Committed → EnrollComplete.
pub fn enroll(foundation: &mut Foundation) -> Result<(), FoundationError> {
    step(foundation, |f| f.enroll_game_cycle())
}

/// EnrollComplete → Playing.
pub fn start_playing(foundation: &mut Foundation) -> Result<(), FoundationError> {
    step(foundation, |f| {
        f.place_starting_bet()?;
        f.start_playing()
    })
}

/// Playing → MainPlayComplete with a final main-play outcome.
pub fn complete_main_play(foundation: &mut Foundation, win: u64, bet: u64) -> Result<(), FoundationError> {
    step(foundation, |f| {
        f.adjust_outcome(GameOutcome::win(win).with_wager_category(0, bet), true)
    })
}
