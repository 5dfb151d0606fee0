use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{pool::Pool, rewards, timelock::UnstakeRequest, ContractError};

const POSITION: Symbol = symbol_short!("POS");
const TOTAL_CLAIMED: Symbol = symbol_short!("CLAIMED");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// One account's stake in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub staked: i128,
    /// `staked * acc / SCALE` at the last settlement.
    pub reward_debt: i128,
    /// Reward settled by a stake or unstake but not yet claimed.
    pub settled_rewards: i128,
    pub requests: Vec<UnstakeRequest>,
}

impl Position {
    pub fn empty(env: &Env) -> Self {
        Position {
            staked: 0,
            reward_debt: 0,
            settled_rewards: 0,
            requests: Vec::new(env),
        }
    }

    /// What `claim` would pay against `pool`'s current accumulator.
    pub fn pending(&self, pool: &Pool) -> Result<i128, ContractError> {
        rewards::pending(
            self.staked,
            pool.acc_reward_per_share,
            self.reward_debt,
            self.settled_rewards,
        )
    }

    /// Moves everything earned since the last snapshot into
    /// `settled_rewards`. The caller must reprice the debt once `staked`
    /// has its new value.
    pub fn settle(&mut self, pool: &Pool) -> Result<(), ContractError> {
        self.settled_rewards = self.pending(pool)?;
        Ok(())
    }

    pub fn reprice(&mut self, pool: &Pool) -> Result<(), ContractError> {
        self.reward_debt = rewards::accumulated(self.staked, pool.acc_reward_per_share)?;
        Ok(())
    }
}

fn position_key(pool_id: u32, account: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, account.clone())
}

pub fn load(env: &Env, pool_id: u32, account: &Address) -> Position {
    let key = position_key(pool_id, account);
    match env.storage().persistent().get::<_, Position>(&key) {
        Some(position) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            position
        }
        None => Position::empty(env),
    }
}

pub fn store(env: &Env, pool_id: u32, account: &Address, position: &Position) {
    let key = position_key(pool_id, account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn clear(env: &Env, pool_id: u32, account: &Address) {
    env.storage()
        .persistent()
        .remove(&position_key(pool_id, account));
}

// ── Lifetime claims ──────────────────────────────────────────────────────────

fn claimed_key(account: &Address) -> (Symbol, Address) {
    (TOTAL_CLAIMED, account.clone())
}

/// Reward `account` has claimed across every pool since it first staked.
pub fn total_claimed(env: &Env, account: &Address) -> i128 {
    let key = claimed_key(account);
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(total) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            total
        }
        None => 0,
    }
}

/// Adds `amount` to the lifetime counter and returns the new total.
pub fn record_claim(env: &Env, account: &Address, amount: i128) -> Result<i128, ContractError> {
    let total = total_claimed(env, account)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticFault)?;
    let key = claimed_key(account);
    env.storage().persistent().set(&key, &total);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(total)
}
