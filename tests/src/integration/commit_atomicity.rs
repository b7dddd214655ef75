//! # Commit Atomicity
//!
//! A restart observes either the snapshot before a transaction or the one
//! after it, never a mix:
//!
//! 1. A transaction that never closes leaves nothing behind.
//! 2. A half-written modifier file from an interrupted commit is discarded.
//! 3. A committed snapshot that does not verify refuses to load.

#[cfg(test)]
mod tests {
    use crate::fixtures::{file_config, insert};
    use fe_01_critical_store::{StartKind, COMMITTED_FILE, MODIFIER_FILE};
    use fe_02_transaction_coordinator::CriticalStore;
    use fe_03_game_cycle::{Foundation, FoundationError, GameCycleState};
    use shared_types::{Address, LifecycleScope, Section};
    use std::fs;

    fn reel_stop(index: u32) -> Address {
        Address::new(
            Section::CriticalData,
            LifecycleScope::Feature,
            format!("ReelStop{index}"),
        )
        .unwrap()
    }

    #[test]
    fn test_unclosed_transaction_is_invisible_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            insert(&mut foundation, 400).unwrap();

            foundation.open_transaction().unwrap();
            foundation.insert_money(600).unwrap();
            {
                let mut store = foundation.critical_store().unwrap();
                for index in 0..8 {
                    store.write(&reel_stop(index), vec![index as u8]).unwrap();
                }
            }
            foundation.commit_game_cycle().unwrap();
            assert_eq!(foundation.meters().bank, 1_000);
            // Power lost before CloseTransaction.
        }

        let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.journal().start_kind(), StartKind::Warm);
        assert_eq!(foundation.state(), GameCycleState::Idle);
        assert_eq!(foundation.meters().bank, 400);
        assert_eq!(foundation.game_cycle_number(), 0);

        foundation.open_transaction().unwrap();
        let store = foundation.critical_store().unwrap();
        for index in 0..8 {
            assert_eq!(store.read(&reel_stop(index)).unwrap(), None);
        }
    }

    #[test]
    fn test_interrupted_commit_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            insert(&mut foundation, 250).unwrap();
        }
        let modifier = dir.path().join(MODIFIER_FILE);
        fs::write(&modifier, b"FECD\x01 torn frame").unwrap();

        let foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.meters().bank, 250);
        assert!(!modifier.exists());
    }

    #[test]
    fn test_commit_replaces_previous_snapshot_whole() {
        let dir = tempfile::tempdir().unwrap();
        let first_sequence;
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            insert(&mut foundation, 100).unwrap();
            first_sequence = foundation.journal().committed_sequence();
            insert(&mut foundation, 100).unwrap();
        }

        let foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.meters().bank, 200);
        assert!(foundation.journal().committed_sequence() > first_sequence);
        assert!(!dir.path().join(MODIFIER_FILE).exists());
    }

    #[test]
    fn test_corrupt_committed_snapshot_refuses_to_load() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            insert(&mut foundation, 100).unwrap();
        }
        let committed = dir.path().join(COMMITTED_FILE);
        let mut bytes = fs::read(&committed).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&committed, bytes).unwrap();

        let err = Foundation::open(file_config(dir.path())).unwrap_err();
        assert!(matches!(err, FoundationError::Store(ref e) if e.is_corruption()));
    }
}
