//! # Foundation Emulator Test Suite
//!
//! Cross-crate integration tests. Each module drives the public surface of
//! the store, the transaction coordinator and the game-cycle state machine
//! together, the way a game would.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs            # Foundation builders shared by the modules below
//! └── integration/
//!     ├── commit_atomicity.rs    # interrupted commits never leak partial writes
//!     ├── transition_guards.rs   # every illegal (state, operation) pair is refused
//!     ├── store_contract.rs      # absence is idempotent, swap is an involution
//!     ├── bet_invariant.rs       # min/max/funds rules for committed bets
//!     ├── game_cycle_flow.rs     # Idle → ... → Idle with history archived
//!     └── event_replay.rs        # only replayable events survive a restart
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fe-tests
//! cargo test -p fe-tests integration::game_cycle_flow
//! ```

pub mod fixtures;
pub mod integration;
