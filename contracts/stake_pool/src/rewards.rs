//! Fixed-point reward accounting.
//!
//! `acc_reward_per_share` is the cumulative reward earned by one unit of
//! stake, multiplied by [`SCALE`]. A position's entitlement at any instant is
//! `staked * acc / SCALE`; the part already priced in at its last settlement
//! is kept as `reward_debt`, so the difference is what it has earned since.
//!
//! Every division truncates toward zero, which can only leave dust inside the
//! contract and never pays out more than was emitted.

use crate::{pool::Pool, ContractError};

/// Precision of `acc_reward_per_share` (twelve decimal places).
pub const SCALE: i128 = 1_000_000_000_000;

/// Global emission parameters read by a single accrual step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Emission {
    pub reward_rate: i128,
    pub total_weight: u64,
}

/// Reward emitted to one pool over `elapsed` seconds.
///
/// `rate * elapsed * weight / total_weight`, zero when the pool or the
/// registry carries no weight.
pub fn pool_reward(
    emission: &Emission,
    weight: u64,
    elapsed: u64,
) -> Result<i128, ContractError> {
    if emission.total_weight == 0 || weight == 0 || elapsed == 0 {
        return Ok(0);
    }
    emission
        .reward_rate
        .checked_mul(i128::from(elapsed))
        .and_then(|r| r.checked_mul(i128::from(weight)))
        .and_then(|r| r.checked_div(i128::from(emission.total_weight)))
        .ok_or(ContractError::ArithmeticFault)
}

/// Brings `pool` up to `now`, returning the reward credited to its stakers.
///
/// The step is a no-op if `now` does not lie after `last_accrual_time`
/// (same-instant calls, or a start time still in the future). An empty or
/// weightless pool only advances its clock.
pub fn accrue(pool: &mut Pool, emission: &Emission, now: u64) -> Result<i128, ContractError> {
    if now <= pool.last_accrual_time {
        return Ok(0);
    }
    let elapsed = now - pool.last_accrual_time;

    if pool.total_staked == 0 {
        pool.last_accrual_time = now;
        return Ok(0);
    }

    let reward = pool_reward(emission, pool.weight, elapsed)?;
    if reward > 0 {
        let per_share = reward
            .checked_mul(SCALE)
            .and_then(|r| r.checked_div(pool.total_staked))
            .ok_or(ContractError::ArithmeticFault)?;
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(per_share)
            .ok_or(ContractError::ArithmeticFault)?;
    }
    pool.last_accrual_time = now;

    Ok(reward)
}

/// `staked * acc / SCALE`: the entitlement a position would carry as its new
/// `reward_debt`.
pub fn accumulated(staked: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    staked
        .checked_mul(acc_reward_per_share)
        .map(|v| v / SCALE)
        .ok_or(ContractError::ArithmeticFault)
}

/// Reward earned since the last settlement, plus anything already settled.
pub fn pending(
    staked: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
    settled: i128,
) -> Result<i128, ContractError> {
    accumulated(staked, acc_reward_per_share)?
        .checked_sub(reward_debt)
        .and_then(|fresh| fresh.checked_add(settled))
        .ok_or(ContractError::ArithmeticFault)
}
