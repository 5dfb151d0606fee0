#![allow(deprecated)] // events().publish migration tracked separately

use common::roles::Role;
use soroban_sdk::{symbol_short, Address, Env};

use crate::pause::PauseScope;
use crate::pool::Asset;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub native_token: Address,
    pub reward_rate: i128,
    pub start_time: u64,
    pub timestamp: u64,
}

/// Fired when an admin registers a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub asset: Asset,
    pub weight: u64,
    pub min_deposit: i128,
    pub lock_duration: u64,
    pub timestamp: u64,
}

/// Fired when an admin changes pool parameters.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub weight: u64,
    pub min_deposit: i128,
    pub lock_duration: u64,
    pub total_weight: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolActiveSetEvent {
    pub pool_id: u32,
    pub active: bool,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user queues an unstake request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequestedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when matured requests are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user abandons a position for its principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub forfeited_requests: u32,
    pub timestamp: u64,
}

/// Fired when a user claims accumulated rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub pool_id: u32,
    pub amount: i128,
    /// Lifetime reward claimed by `staker` across all pools, this claim
    /// included.
    pub user_total_claimed: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the reward rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub new_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub from: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub operator: Address,
    pub scope: PauseScope,
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub admin: Address,
    pub account: Address,
    pub role: Role,
    pub granted: bool,
    pub timestamp: u64,
}

/// Fired when an admin sweeps a stray token balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRecoveredEvent {
    pub admin: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    native_token: Address,
    reward_rate: i128,
    start_time: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            native_token,
            reward_rate,
            start_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    asset: Asset,
    weight: u64,
    min_deposit: i128,
    lock_duration: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            asset,
            weight,
            min_deposit,
            lock_duration,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pool_id: u32,
    weight: u64,
    min_deposit: i128,
    lock_duration: u64,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            weight,
            min_deposit,
            lock_duration,
            total_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_active_set(env: &Env, pool_id: u32, active: bool) {
    env.events().publish(
        (symbol_short!("POOL_ACT"), pool_id),
        PoolActiveSetEvent {
            pool_id,
            active,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone(), pool_id),
        StakedEvent {
            staker,
            pool_id,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstake_requested(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTK_REQ"), staker.clone(), pool_id),
        UnstakeRequestedEvent {
            staker,
            pool_id,
            amount,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone(), pool_id),
        WithdrawnEvent {
            staker,
            pool_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    forfeited_requests: u32,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), staker.clone(), pool_id),
        EmergencyWithdrawnEvent {
            staker,
            pool_id,
            amount,
            forfeited_requests,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(
    env: &Env,
    staker: Address,
    pool_id: u32,
    amount: i128,
    user_total_claimed: i128,
) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone(), pool_id),
        RewardClaimedEvent {
            staker,
            pool_id,
            amount,
            user_total_claimed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, from: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_FUND"), from.clone()),
        RewardsFundedEvent {
            from,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, operator: Address, scope: PauseScope, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events().publish(
        (topic, operator.clone()),
        PauseChangedEvent {
            operator,
            scope,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_changed(
    env: &Env,
    admin: Address,
    account: Address,
    role: Role,
    granted: bool,
) {
    let topic = if granted {
        symbol_short!("ROLE_GRNT")
    } else {
        symbol_short!("ROLE_RVK")
    };
    env.events().publish(
        (topic, account.clone()),
        RoleChangedEvent {
            admin,
            account,
            role,
            granted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_recovered(env: &Env, admin: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RECOVER"), admin.clone()),
        TokenRecoveredEvent {
            admin,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
