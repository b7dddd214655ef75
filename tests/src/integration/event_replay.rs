//! # Event Replay Filter
//!
//! Transactional events still queued at commit time are persisted with the
//! snapshot, but only the kinds that make sense after a power cycle. After
//! a restart the restored queue holds exactly those, in posting order.

#[cfg(test)]
mod tests {
    use crate::fixtures::file_config;
    use fe_02_transaction_coordinator::TransactionError;
    use fe_03_game_cycle::{Foundation, FoundationError, FoundationEvent, GameContextMode};
    use shared_bus::QueueKind;

    #[test]
    fn test_only_persisted_events_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            foundation.open_transaction().unwrap();
            foundation
                .activate_theme_context("Dragon", "96pct", GameContextMode::Play)
                .unwrap();
            foundation.poster().post(FoundationEvent::GameCycleEnded {
                game_cycle: 4,
                history_record: 3,
            });
            foundation.close_transaction().unwrap();
            assert_eq!(foundation.pending_events(QueueKind::Transactional), 2);
        }

        let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.pending_events(QueueKind::Transactional), 1);
        assert!(matches!(
            foundation.open_transaction(),
            Err(FoundationError::Transaction(
                TransactionError::EventsPendingAgainstOpen { pending: 1 }
            ))
        ));

        assert_eq!(foundation.process_all_events().unwrap(), 1);
        assert_eq!(foundation.pending_events(QueueKind::Transactional), 0);
        foundation.open_transaction().unwrap();
    }

    #[test]
    fn test_dispatched_events_are_not_replayed() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            foundation.poster().post(FoundationEvent::EnrollResponse {
                game_cycle: 1,
                succeeded: true,
            });
            foundation.poster().post(FoundationEvent::FinalizeAwardResponse {
                game_cycle: 1,
                win: 20,
            });
            assert_eq!(foundation.process_events().unwrap(), 1);
        }

        let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.pending_events(QueueKind::Transactional), 1);
        assert_eq!(foundation.process_all_events().unwrap(), 1);
    }

    #[test]
    fn test_non_transactional_events_are_never_persisted() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            foundation.transaction(|f| f.insert_money(100)).unwrap();
            assert_eq!(foundation.pending_events(QueueKind::NonTransactional), 1);
        }

        let foundation = Foundation::open(file_config(dir.path())).unwrap();
        assert_eq!(foundation.pending_events(QueueKind::NonTransactional), 0);
        assert_eq!(foundation.pending_events(QueueKind::Transactional), 0);
    }
}
