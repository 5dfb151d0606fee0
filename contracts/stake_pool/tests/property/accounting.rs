//! Property-based state-machine test for the stake ledger.
//!
//! A random sequence of user operations, admin re-weights and clock
//! advances is replayed against a three-pool contract. After every step:
//! - each pool's `total_staked` equals the sum of its positions
//! - `total_weight` equals the sum of pool weights
//! - reward paid plus reward still claimable never exceeds what the pool
//!   was emitted since start, up to two units of rounding per step

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Ledger as _;

use crate::harness::{Harness, USERS};

const WEIGHTS: [u64; 3] = [100, 0, 250];
const POOLS: u32 = WEIGHTS.len() as u32;
const RATE: i128 = 97;
const LOCK: u64 = 50;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Stake {
        user: u8,
        pool: u8,
        #[proptest(strategy = "1i128..=5_000")]
        amount: i128,
    },
    Unstake {
        user: u8,
        pool: u8,
        #[proptest(strategy = "1i128..=5_000")]
        amount: i128,
    },
    Claim {
        user: u8,
        pool: u8,
    },
    Withdraw {
        user: u8,
        pool: u8,
    },
    EmergencyWithdraw {
        user: u8,
        pool: u8,
    },
    Reweight {
        pool: u8,
        #[proptest(strategy = "0u64..=300")]
        weight: u64,
    },
    Advance {
        #[proptest(strategy = "1u64..=500")]
        seconds: u64,
    },
}

/// What the test expects the registry to hold, tracked alongside the
/// contract.
struct Model {
    weights: [u64; 3],
    /// Reward each pool was entitled to, floored per clock advance.
    emitted: [i128; 3],
}

impl Model {
    fn new() -> Self {
        Model {
            weights: WEIGHTS,
            emitted: [0; 3],
        }
    }

    fn total_weight(&self) -> u64 {
        self.weights.iter().sum()
    }

    fn advance(&mut self, seconds: u64) {
        let total = self.total_weight();
        if total == 0 {
            return;
        }
        for (emitted, weight) in self.emitted.iter_mut().zip(self.weights) {
            *emitted += RATE * i128::from(seconds) * i128::from(weight) / i128::from(total);
        }
    }
}

fn pick(user: u8, pool: u8) -> (usize, u32) {
    (usize::from(user) % USERS, u32::from(pool) % POOLS)
}

fn check_invariants(h: &Harness, model: &Model, steps: i128) -> Result<(), TestCaseError> {
    prop_assert_eq!(h.client.get_total_weight(), model.total_weight());

    for pool_id in 0..POOLS {
        let pool = h.client.get_pool(&pool_id);
        prop_assert_eq!(pool.weight, model.weights[pool_id as usize]);

        let mut staked = 0i128;
        let mut claimable = 0i128;
        for user in &h.users {
            staked += h.client.get_user_info(&pool_id, user).staked;
            claimable += h.client.pending_reward(&pool_id, user);
        }
        prop_assert_eq!(pool.total_staked, staked);

        // Each settlement floors a position's entitlement separately, and
        // the model floors once per advance rather than once per accrual.
        let emitted = model.emitted[pool_id as usize];
        prop_assert!(
            pool.rewards_paid + claimable <= emitted + 2 * steps,
            "pool {} paid {} + claimable {} > emitted {}",
            pool_id,
            pool.rewards_paid,
            claimable,
            emitted
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ledger_invariants_hold(ops in proptest::collection::vec(any::<Op>(), 1..40)) {
        let h = Harness::new(RATE, &WEIGHTS, LOCK);
        let mut model = Model::new();
        let mut now = 0u64;
        h.env.ledger().set_timestamp(now);

        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Stake { user, pool, amount } => {
                    let (user, pool) = pick(user, pool);
                    h.stake(user, pool, amount);
                }
                Op::Unstake { user, pool, amount } => {
                    let (user, pool) = pick(user, pool);
                    let _ = h.client.try_unstake(&h.users[user], &pool, &amount);
                }
                Op::Claim { user, pool } => {
                    let (user, pool) = pick(user, pool);
                    let _ = h.client.try_claim(&h.users[user], &pool);
                }
                Op::Withdraw { user, pool } => {
                    let (user, pool) = pick(user, pool);
                    let _ = h.client.try_withdraw(&h.users[user], &pool);
                }
                Op::EmergencyWithdraw { user, pool } => {
                    let (user, pool) = pick(user, pool);
                    let _ = h.client.try_emergency_withdraw(&h.users[user], &pool);
                }
                Op::Reweight { pool, weight } => {
                    let pool = u32::from(pool) % POOLS;
                    h.client.update_pool(&h.admin, &pool, &weight, &1, &LOCK);
                    model.weights[pool as usize] = weight;
                }
                Op::Advance { seconds } => {
                    now += seconds;
                    h.env.ledger().set_timestamp(now);
                    model.advance(seconds);
                }
            }
            check_invariants(&h, &model, step as i128 + 1)?;
        }
    }
}
