//! # Transition Guards
//!
//! For every reachable state, every operation whose legal-state set does not
//! contain that state is refused with `IllegalStateTransition`, and neither
//! the state, the meters nor the accumulated outcome move.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        commit, complete_main_play, enroll, insert, open_with_limits, start_playing, step,
    };
    use fe_03_game_cycle::{
        Foundation, FoundationConfig, FoundationError, GameContextMode, GameCycleOperation as Op,
        GameCycleState, GameOutcome,
    };
    use shared_types::Denomination;

    type Attempt = fn(&mut Foundation) -> Result<(), FoundationError>;

    fn attempts() -> [(Op, Attempt); 19] {
        [
            (Op::CommitGameCycle, |f| f.commit_game_cycle()),
            (Op::UncommitGameCycle, |f| f.uncommit_game_cycle()),
            (Op::EnrollGameCycle, |f| f.enroll_game_cycle()),
            (Op::UnenrollGameCycle, |f| f.unenroll_game_cycle()),
            (Op::StartPlaying, |f| f.start_playing()),
            (Op::AdjustOutcome, |f| {
                f.adjust_outcome(GameOutcome::win(5).with_wager_category(0, 10), true)
            }),
            (Op::StartAncillaryPlaying, |f| f.start_ancillary_playing()),
            (Op::StartBonusPlaying, |f| f.start_bonus_playing()),
            (Op::FinalizeOutcome, |f| f.finalize_outcome()),
            (Op::EndGameCycle, |f| f.end_game_cycle().map(|_| ())),
            (Op::InsertMoney, |f| f.insert_money(1)),
            (Op::CommitBet, |f| f.commit_bet(10, Denomination::UNIT)),
            (Op::UncommitBet, |f| f.uncommit_bet()),
            (Op::PlaceStartingBet, |f| f.place_starting_bet()),
            (Op::PlaceMidGameBet, |f| f.place_mid_game_bet(10, Denomination::UNIT)),
            (Op::TransferBankToWagerable, |f| f.transfer_bank_to_wagerable(1)),
            (Op::RequestCashout, |f| f.request_cashout().map(|_| ())),
            (Op::ActivateThemeContext, |f| {
                f.activate_theme_context("Theme", "Payvar", GameContextMode::Play)
            }),
            (Op::InactivateThemeContext, |f| f.inactivate_theme_context()),
        ]
    }

    fn foundation_in(target: GameCycleState) -> Foundation {
        let config = FoundationConfig::memory_only()
            .with_ancillary(true)
            .with_bonus(true);
        let mut foundation = open_with_limits(config, 10, 1_000).unwrap();
        insert(&mut foundation, 5_000).unwrap();

        let path: &[GameCycleState] = match target {
            GameCycleState::AncillaryPlaying => &[
                GameCycleState::Committed,
                GameCycleState::EnrollComplete,
                GameCycleState::Playing,
                GameCycleState::MainPlayComplete,
                GameCycleState::AncillaryPlaying,
            ],
            GameCycleState::AncillaryPlayComplete => &[
                GameCycleState::Committed,
                GameCycleState::EnrollComplete,
                GameCycleState::Playing,
                GameCycleState::MainPlayComplete,
                GameCycleState::AncillaryPlaying,
                GameCycleState::AncillaryPlayComplete,
            ],
            GameCycleState::BonusPlaying | GameCycleState::BonusPlayComplete => &[
                GameCycleState::Committed,
                GameCycleState::EnrollComplete,
                GameCycleState::Playing,
                GameCycleState::MainPlayComplete,
                GameCycleState::BonusPlaying,
                GameCycleState::BonusPlayComplete,
            ],
            _ => &[
                GameCycleState::Committed,
                GameCycleState::EnrollComplete,
                GameCycleState::Playing,
                GameCycleState::MainPlayComplete,
                GameCycleState::Finalized,
            ],
        };

        for next in path {
            if foundation.state() == target {
                break;
            }
            match next {
                GameCycleState::Committed => commit(&mut foundation, 100).unwrap(),
                GameCycleState::EnrollComplete => enroll(&mut foundation).unwrap(),
                GameCycleState::Playing => start_playing(&mut foundation).unwrap(),
                GameCycleState::MainPlayComplete => {
                    complete_main_play(&mut foundation, 40, 100).unwrap()
                }
                GameCycleState::AncillaryPlaying => {
                    step(&mut foundation, |f| f.start_ancillary_playing()).unwrap()
                }
                GameCycleState::BonusPlaying => {
                    step(&mut foundation, |f| f.start_bonus_playing()).unwrap()
                }
                GameCycleState::AncillaryPlayComplete | GameCycleState::BonusPlayComplete => {
                    step(&mut foundation, |f| f.adjust_outcome(GameOutcome::win(20), true))
                        .unwrap()
                }
                GameCycleState::Finalized => {
                    step(&mut foundation, |f| f.finalize_outcome()).unwrap()
                }
                other => unreachable!("no fixture step for {other}"),
            }
        }
        assert_eq!(foundation.state(), target);
        foundation
    }

    fn assert_illegal_operations_refused(target: GameCycleState) {
        let mut foundation = foundation_in(target);
        let meters = *foundation.meters();
        let accumulated = foundation.accumulated_outcome();

        foundation.open_transaction().unwrap();
        let mut refused = 0;
        for (operation, attempt) in attempts() {
            if operation.is_legal_in(target) {
                continue;
            }
            match attempt(&mut foundation) {
                Err(FoundationError::IllegalStateTransition {
                    operation: reported,
                    current,
                    legal,
                }) => {
                    assert_eq!(reported, operation);
                    assert_eq!(current, target);
                    assert_eq!(legal, operation.legal_states());
                }
                other => panic!("{operation} in {target}: expected refusal, got {other:?}"),
            }
            assert_eq!(foundation.state(), target, "{operation} moved the state");
            assert_eq!(*foundation.meters(), meters, "{operation} moved a meter");
            assert_eq!(foundation.accumulated_outcome(), accumulated);
            refused += 1;
        }
        foundation.close_transaction().unwrap();
        assert!(refused > 0);
    }

    #[test]
    fn test_guards_in_idle() {
        assert_illegal_operations_refused(GameCycleState::Idle);
    }

    #[test]
    fn test_guards_in_committed() {
        assert_illegal_operations_refused(GameCycleState::Committed);
    }

    #[test]
    fn test_guards_in_enroll_complete() {
        assert_illegal_operations_refused(GameCycleState::EnrollComplete);
    }

    #[test]
    fn test_guards_in_playing() {
        assert_illegal_operations_refused(GameCycleState::Playing);
    }

    #[test]
    fn test_guards_in_main_play_complete() {
        assert_illegal_operations_refused(GameCycleState::MainPlayComplete);
    }

    #[test]
    fn test_guards_in_ancillary_playing() {
        assert_illegal_operations_refused(GameCycleState::AncillaryPlaying);
    }

    #[test]
    fn test_guards_in_bonus_playing() {
        assert_illegal_operations_refused(GameCycleState::BonusPlaying);
    }

    #[test]
    fn test_guards_in_ancillary_play_complete() {
        assert_illegal_operations_refused(GameCycleState::AncillaryPlayComplete);
    }

    #[test]
    fn test_guards_in_bonus_play_complete() {
        assert_illegal_operations_refused(GameCycleState::BonusPlayComplete);
    }

    #[test]
    fn test_guards_in_finalized() {
        assert_illegal_operations_refused(GameCycleState::Finalized);
    }
}
