//! # End-to-End Game Cycle
//!
//! ```text
//! Idle ─commit─→ Committed ─enroll─→ EnrollComplete ─start─→ Playing
//!   ↑                                                          │ adjust(final)
//!   └──end── Finalized ←──finalize── MainPlayComplete ←────────┘
//! ```
//!
//! With banked credits, bank 1000, bet 100 and a win of 50 the bank ends at
//! 950, the cycle is archived to history and game-cycle scoped data is gone.

#[cfg(test)]
mod tests {
    use crate::fixtures::{commit, enroll, insert, step};
    use fe_02_transaction_coordinator::CriticalStore;
    use fe_03_game_cycle::domain::fields::game_cycle_scopes;
    use fe_03_game_cycle::{
        EventObserver, Foundation, FoundationConfig, FoundationEvent, GameCycleState, GameOutcome,
    };
    use shared_bus::QueueKind;
    use shared_types::{Address, LifecycleScope, Section};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<&'static str>>>);

    impl EventObserver for Recorder {
        fn on_dispatched(&mut self, event: &FoundationEvent, queue: QueueKind) {
            if queue == QueueKind::Transactional {
                self.0.lock().unwrap().push(shared_bus::QueuedEvent::kind(event));
            }
        }
    }

    fn staged(path: &str) -> Address {
        Address::new(Section::CriticalData, LifecycleScope::History, path).unwrap()
    }

    fn cycle_scoped(path: &str) -> Address {
        Address::new(Section::CriticalData, LifecycleScope::GameCycle, path).unwrap()
    }

    #[test]
    fn test_full_game_cycle() {
        let mut foundation = Foundation::open(FoundationConfig::memory_only()).unwrap();
        let recorder = Recorder::default();
        foundation.set_observer(Box::new(recorder.clone()));
        assert_eq!(foundation.state(), GameCycleState::Idle);
        insert(&mut foundation, 1_000).unwrap();
        assert_eq!(foundation.meters().bank, 1_000);

        commit(&mut foundation, 100).unwrap();
        assert_eq!(foundation.state(), GameCycleState::Committed);
        assert_eq!(foundation.game_cycle_number(), 1);

        enroll(&mut foundation).unwrap();
        assert_eq!(foundation.state(), GameCycleState::EnrollComplete);

        step(&mut foundation, |f| f.place_starting_bet()).unwrap();
        assert_eq!(foundation.meters().starting_bet, Some(100));
        assert_eq!(foundation.meters().committed_bet, None);

        step(&mut foundation, |f| {
            f.start_playing()?;
            let mut store = f.critical_store()?;
            store.write(&cycle_scoped("ReelStops"), vec![3, 17, 9])?;
            store.write(&staged("Display"), b"cherry cherry bar".to_vec())?;
            Ok(())
        })
        .unwrap();
        assert_eq!(foundation.state(), GameCycleState::Playing);

        step(&mut foundation, |f| {
            f.adjust_outcome(GameOutcome::win(50).with_wager_category(0, 100), true)
        })
        .unwrap();
        assert_eq!(foundation.state(), GameCycleState::MainPlayComplete);
        assert_eq!(foundation.accumulated_outcome(), 50);

        step(&mut foundation, |f| f.finalize_outcome()).unwrap();
        assert_eq!(foundation.state(), GameCycleState::Finalized);
        assert_eq!(foundation.meters().bank, 950);

        let slot = step(&mut foundation, |f| f.end_game_cycle()).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(foundation.state(), GameCycleState::Idle);
        assert_eq!(foundation.meters().bank, 950);
        assert_eq!(foundation.meters().starting_bet, None);
        assert_eq!(foundation.accumulated_outcome(), 0);

        foundation.open_transaction().unwrap();
        assert_eq!(foundation.history_record_count().unwrap(), 1);
        let record = foundation.read_history_record(0).unwrap().unwrap();
        assert_eq!(record.summary.game_cycle, 1);
        assert_eq!(record.summary.starting_bet, 100);
        assert_eq!(record.summary.win, 50);
        assert_eq!(record.entries.get("Display"), Some(&b"cherry cherry bar".to_vec()));
        assert!(record.entries.contains_key("WagerCategories"));

        let store = foundation.critical_store().unwrap();
        for scope in game_cycle_scopes() {
            assert!(store.manifest(scope).unwrap().is_empty(), "{scope} not cleared");
        }
        assert_eq!(store.read(&cycle_scoped("ReelStops")).unwrap(), None);
        drop(store);
        foundation.close_transaction().unwrap();

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![
                "EnrollResponse",
                "OutcomeAdjusted",
                "FinalizeAwardResponse",
                "GameCycleEnded"
            ]
        );
    }

    #[test]
    fn test_non_banked_cycle_credits_wagerable() {
        let mut foundation =
            Foundation::open(FoundationConfig::memory_only().with_banked_credits(false)).unwrap();
        insert(&mut foundation, 1_000).unwrap();
        commit(&mut foundation, 100).unwrap();
        enroll(&mut foundation).unwrap();
        step(&mut foundation, |f| {
            f.place_starting_bet()?;
            f.start_playing()?;
            f.adjust_outcome(GameOutcome::win(50).with_wager_category(0, 100), true)?;
            f.finalize_outcome()
        })
        .unwrap();
        step(&mut foundation, |f| f.end_game_cycle()).unwrap();

        assert_eq!(foundation.meters().wagerable, 950);
        assert_eq!(foundation.meters().bank, 0);
        assert!(!foundation.cycle_flags().bank_transfer_eligible);
    }

    #[test]
    fn test_bonus_round_accumulates_into_one_award() {
        let mut foundation =
            Foundation::open(FoundationConfig::memory_only().with_bonus(true)).unwrap();
        insert(&mut foundation, 1_000).unwrap();
        commit(&mut foundation, 200).unwrap();
        enroll(&mut foundation).unwrap();
        step(&mut foundation, |f| {
            f.place_starting_bet()?;
            f.start_playing()?;
            f.adjust_outcome(GameOutcome::win(20).with_wager_category(1, 200), true)?;
            f.start_bonus_playing()?;
            f.adjust_outcome(GameOutcome::win(30), false)?;
            f.adjust_outcome(GameOutcome::win(100), true)
        })
        .unwrap();
        assert_eq!(foundation.state(), GameCycleState::BonusPlayComplete);
        assert_eq!(foundation.accumulated_outcome(), 150);

        step(&mut foundation, |f| {
            f.finalize_outcome()?;
            f.end_game_cycle()
        })
        .unwrap();
        assert_eq!(foundation.meters().bank, 1_000 - 200 + 150);
    }
}
