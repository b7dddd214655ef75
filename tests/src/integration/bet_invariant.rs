//! # Bet Invariant
//!
//! `CommitBet` succeeds exactly when the converted bet is within
//! `[min_bet, max_bet]` (or zero) and covered by available money. The debit
//! lands on wagerable, topped up from the bank when credits are banked.

#[cfg(test)]
mod tests {
    use crate::fixtures::{insert, open_with_limits, step};
    use fe_03_game_cycle::{Foundation, FoundationConfig, FoundationError, MeterViolation};
    use proptest::prelude::*;
    use shared_types::Denomination;

    const MIN_BET: u64 = 100;
    const MAX_BET: u64 = 500;

    /// Committed game cycle with `funds` inserted.
    fn committed(banked: bool, funds: u64) -> Foundation {
        let config = FoundationConfig::memory_only().with_banked_credits(banked);
        let mut foundation = open_with_limits(config, MIN_BET, MAX_BET).unwrap();
        insert(&mut foundation, funds).unwrap();
        step(&mut foundation, |f| f.commit_game_cycle()).unwrap();
        foundation
    }

    fn commit_bet(foundation: &mut Foundation, bet: u64) -> Result<(), FoundationError> {
        step(foundation, |f| f.commit_bet(bet, Denomination::UNIT))
    }

    #[test]
    fn test_non_banked_limits() {
        let mut foundation = committed(false, 1_000);
        assert_eq!(foundation.meters().wagerable, 1_000);

        let err = commit_bet(&mut foundation, 600).unwrap_err();
        assert!(matches!(
            err,
            FoundationError::InvariantViolation(MeterViolation::AboveMaximum {
                accumulated: 600,
                max: MAX_BET
            })
        ));
        assert_eq!(foundation.meters().wagerable, 1_000);
        assert_eq!(foundation.meters().committed_bet, None);

        let err = commit_bet(&mut foundation, 50).unwrap_err();
        assert!(matches!(
            err,
            FoundationError::InvariantViolation(MeterViolation::BelowMinimum { .. })
        ));

        commit_bet(&mut foundation, 100).unwrap();
        assert_eq!(foundation.meters().wagerable, 900);
        assert_eq!(foundation.meters().committed_bet, Some(100));
    }

    #[test]
    fn test_recommit_refunds_previous_bet() {
        let mut foundation = committed(false, 1_000);
        commit_bet(&mut foundation, 100).unwrap();
        commit_bet(&mut foundation, 300).unwrap();
        assert_eq!(foundation.meters().wagerable, 700);
        assert_eq!(foundation.meters().committed_bet, Some(300));
    }

    #[test]
    fn test_banked_bet_draws_from_bank() {
        let mut foundation = committed(true, 1_000);
        assert_eq!(foundation.meters().bank, 1_000);
        assert_eq!(foundation.meters().wagerable, 0);

        commit_bet(&mut foundation, 100).unwrap();
        assert_eq!(foundation.meters().bank, 900);
        assert_eq!(foundation.meters().wagerable, 0);
        assert_eq!(foundation.meters().committed_bet, Some(100));
    }

    #[test]
    fn test_insufficient_funds_rejected() {
        let mut foundation = committed(true, 300);
        let err = commit_bet(&mut foundation, 400).unwrap_err();
        assert!(matches!(
            err,
            FoundationError::InvariantViolation(MeterViolation::InsufficientFunds {
                requested: 400,
                available: 300
            })
        ));
        assert_eq!(foundation.meters().bank, 300);
    }

    #[test]
    fn test_denomination_scales_bet() {
        let mut foundation = committed(false, 1_000);
        let err = step(&mut foundation, |f| {
            f.commit_bet(30, Denomination::new(25).unwrap())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            FoundationError::InvariantViolation(MeterViolation::AboveMaximum { accumulated: 750, .. })
        ));

        step(&mut foundation, |f| f.commit_bet(4, Denomination::new(25).unwrap())).unwrap();
        assert_eq!(foundation.meters().committed_bet, Some(100));
        assert_eq!(foundation.meters().wagerable, 900);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_commit_bet_matches_invariant(bet in 0u64..1_200, banked in any::<bool>()) {
            let funds = 800;
            let mut foundation = committed(banked, funds);
            let accepted = commit_bet(&mut foundation, bet).is_ok();
            let expected = bet <= funds && bet <= MAX_BET && (bet == 0 || bet >= MIN_BET);
            prop_assert_eq!(accepted, expected);

            let meters = *foundation.meters();
            let remaining = meters.available_money(banked).unwrap();
            if accepted {
                prop_assert_eq!(remaining, funds - bet);
                prop_assert_eq!(meters.committed_bet, Some(bet));
            } else {
                prop_assert_eq!(remaining, funds);
                prop_assert_eq!(meters.committed_bet, None);
            }
        }
    }
}
