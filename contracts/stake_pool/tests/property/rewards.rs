//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - Rewards within a pool are proportional to stake size
//! - `pending_reward` is a pure read
//! - A zero-weight pool never accrues
//! - Withdrawals unlock exactly at `unlock_at`, for exactly the queued amount

use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;
use stake_pool::ContractError;

use crate::harness::Harness;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Two stakers in one pool for the same interval earn in the ratio of
    /// their stakes, up to one unit of truncation each.
    #[test]
    fn prop_rewards_proportional_to_stake(
        a in 1i128..=100_000,
        b in 1i128..=100_000,
        rate in 1i128..=1_000,
        elapsed in 1u64..=100_000,
    ) {
        let h = Harness::new(rate, &[100], 0);
        h.env.ledger().set_timestamp(0);
        prop_assert!(h.stake(0, 0, a));
        prop_assert!(h.stake(1, 0, b));

        h.env.ledger().set_timestamp(elapsed);
        let pa = h.client.pending_reward(&0, &h.users[0]);
        let pb = h.client.pending_reward(&0, &h.users[1]);

        let total = rate * i128::from(elapsed);
        prop_assert!(pa + pb <= total);
        prop_assert!(total - (pa + pb) <= 2);
        prop_assert!((pa * b - pb * a).abs() <= a + b);
    }

    /// Reading pending reward twice with no state change returns the same
    /// value and leaves the stored pool untouched.
    #[test]
    fn prop_pending_reward_is_pure(
        amount in 1i128..=1_000_000,
        rate in 0i128..=10_000,
        elapsed in 0u64..=1_000_000,
    ) {
        let h = Harness::new(rate, &[7, 11], 0);
        prop_assert!(h.stake(0, 1, amount));

        h.env.ledger().set_timestamp(elapsed);
        let before = h.client.get_pool(&1);
        let first = h.client.pending_reward(&1, &h.users[0]);
        let second = h.client.pending_reward(&1, &h.users[0]);

        prop_assert_eq!(first, second);
        prop_assert_eq!(h.client.get_pool(&1), before);
    }

    /// A pool with zero weight earns nothing no matter how long it is staked.
    #[test]
    fn prop_zero_weight_pool_never_accrues(
        amount in 1i128..=1_000_000,
        sibling_weight in 0u64..=1_000,
        steps in proptest::collection::vec(1u64..=50_000, 1..6),
    ) {
        let h = Harness::new(1_000, &[0, sibling_weight], 0);
        prop_assert!(h.stake(0, 0, amount));

        let mut now = 0u64;
        for step in steps {
            now += step;
            h.env.ledger().set_timestamp(now);
            h.client.update_pool_reward(&0);
            prop_assert_eq!(h.client.pending_reward(&0, &h.users[0]), 0);
        }
        prop_assert_eq!(h.client.get_pool(&0).acc_reward_per_share, 0);
    }

    /// Nothing can be withdrawn before the lock expires; exactly the queued
    /// amount can be withdrawn at expiry, once.
    #[test]
    fn prop_lock_is_enforced(
        amount in 1i128..=10_000,
        lock in 1u64..=1_000_000,
        start in 0u64..=1_000,
    ) {
        let h = Harness::new(10, &[1], lock);
        h.env.ledger().set_timestamp(start);
        prop_assert!(h.stake(2, 0, amount));
        let unlock_at = h.client.unstake(&h.users[2], &0, &amount);
        prop_assert_eq!(unlock_at, start + lock);

        h.env.ledger().set_timestamp(unlock_at - 1);
        prop_assert_eq!(
            h.client.try_withdraw(&h.users[2], &0).unwrap_err().unwrap(),
            ContractError::NothingWithdrawable
        );

        h.env.ledger().set_timestamp(unlock_at);
        prop_assert_eq!(h.client.withdraw(&h.users[2], &0), amount);
        prop_assert_eq!(
            h.client.try_withdraw(&h.users[2], &0).unwrap_err().unwrap(),
            ContractError::NothingWithdrawable
        );
    }
}
