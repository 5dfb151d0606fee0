use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{
    rewards::{self, Emission},
    ContractError,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// The asset a pool accepts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// The network's native currency, moved through the configured native
    /// token contract.
    Native,
    /// Any fungible token implementing the standard token interface.
    Token(Address),
}

/// A staking bucket. Pools are deactivated, never removed, so the id of a
/// pool is also its index in creation order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub asset: Asset,
    pub weight: u64,
    pub min_deposit: i128,
    /// Seconds an unstake request waits before it can be withdrawn.
    pub lock_duration: u64,
    pub total_staked: i128,
    /// Cumulative reward per staked unit, scaled by [`rewards::SCALE`].
    pub acc_reward_per_share: i128,
    pub last_accrual_time: u64,
    pub active: bool,
    /// Reward actually paid out of this pool by `claim`.
    pub rewards_paid: i128,
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn reward_rate(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
}

pub fn set_reward_rate(env: &Env, rate: i128) {
    env.storage().instance().set(&REWARD_RATE, &rate);
}

pub fn emission(env: &Env) -> Emission {
    Emission {
        reward_rate: reward_rate(env),
        total_weight: total_weight(env),
    }
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    let key = pool_key(id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::InvalidPoolId)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn store(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Accrual ──────────────────────────────────────────────────────────────────

/// Loads pool `id`, brings its accumulator up to the current ledger time and
/// writes it back.
pub fn accrue_and_store(env: &Env, id: u32) -> Result<Pool, ContractError> {
    let mut pool = load(env, id)?;
    accrue_in_place(env, &mut pool, &emission(env))?;
    store(env, &pool);
    Ok(pool)
}

pub(crate) fn accrue_in_place(
    env: &Env,
    pool: &mut Pool,
    emission: &Emission,
) -> Result<(), ContractError> {
    let reward = rewards::accrue(pool, emission, env.ledger().timestamp())?;
    if reward > 0 {
        soroban_sdk::log!(
            env,
            "pool {} accrued {} (acc {})",
            pool.id,
            reward,
            pool.acc_reward_per_share
        );
    }
    Ok(())
}

/// Accrues every pool against the current emission parameters. Run before
/// anything that changes `total_weight` or the reward rate, so the change
/// only applies from now on.
pub fn accrue_all(env: &Env) -> Result<(), ContractError> {
    let emission = emission(env);
    for id in 0..pool_count(env) {
        let mut pool = load(env, id)?;
        accrue_in_place(env, &mut pool, &emission)?;
        store(env, &pool);
    }
    Ok(())
}

/// Read-only accrual: the pool as it would look after accruing to now.
pub fn simulate(env: &Env, id: u32) -> Result<Pool, ContractError> {
    let mut pool = load(env, id)?;
    rewards::accrue(&mut pool, &emission(env), env.ledger().timestamp())?;
    Ok(pool)
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Appends a pool and adds its weight to the registry total.
pub fn add(
    env: &Env,
    asset: Asset,
    weight: u64,
    min_deposit: i128,
    lock_duration: u64,
    start_time: u64,
) -> Result<Pool, ContractError> {
    accrue_all(env)?;

    let id = pool_count(env);
    let new_total = total_weight(env)
        .checked_add(weight)
        .ok_or(ContractError::ArithmeticFault)?;

    let pool = Pool {
        id,
        asset,
        weight,
        min_deposit,
        lock_duration,
        total_staked: 0,
        acc_reward_per_share: 0,
        last_accrual_time: env.ledger().timestamp().max(start_time),
        active: true,
        rewards_paid: 0,
    };
    store(env, &pool);
    env.storage().instance().set(&POOL_COUNT, &(id + 1));
    env.storage().instance().set(&TOTAL_WEIGHT, &new_total);

    Ok(pool)
}

/// Re-weights and re-parameterises pool `id`.
pub fn update(
    env: &Env,
    id: u32,
    weight: u64,
    min_deposit: i128,
    lock_duration: u64,
) -> Result<Pool, ContractError> {
    // Validate the id before touching any accumulator.
    load(env, id)?;
    accrue_all(env)?;

    let mut pool = load(env, id)?;
    let new_total = total_weight(env)
        .checked_sub(pool.weight)
        .and_then(|t| t.checked_add(weight))
        .ok_or(ContractError::ArithmeticFault)?;

    pool.weight = weight;
    pool.min_deposit = min_deposit;
    pool.lock_duration = lock_duration;
    store(env, &pool);
    env.storage().instance().set(&TOTAL_WEIGHT, &new_total);

    Ok(pool)
}

pub fn set_active(env: &Env, id: u32, active: bool) -> Result<Pool, ContractError> {
    let mut pool = load(env, id)?;
    pool.active = active;
    store(env, &pool);
    Ok(pool)
}

/// Returns true if any pool stakes `token`, resolving `Asset::Native` to
/// `native_token`.
pub fn is_staked_asset(env: &Env, token: &Address, native_token: &Address) -> bool {
    for id in 0..pool_count(env) {
        if let Ok(pool) = load(env, id) {
            let staked = match &pool.asset {
                Asset::Native => native_token,
                Asset::Token(address) => address,
            };
            if staked == token {
                return true;
            }
        }
    }
    false
}
