#![no_std]

pub mod events;
pub mod guard;
pub mod pause;
pub mod pool;
pub mod position;
pub mod rewards;
pub mod timelock;
pub mod vault;

use common::roles::{self, Role};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec};

use pause::PauseScope;
use pool::{Asset, Pool};
use timelock::UnstakeRequest;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const START_TIME: Symbol = symbol_short!("START");

/// Layout version of pool and position records.
const STATE_VERSION: u32 = 1;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PoolInactive = 4,
    BelowMinDeposit = 5,
    InvalidAttachedValue = 6,
    InsufficientStake = 7,
    ZeroAmount = 8,
    NoPendingRewards = 9,
    NothingWithdrawable = 10,
    NoStake = 11,
    Paused = 12,
    InvalidPoolId = 13,
    CannotRecoverProtectedAsset = 14,
    ArithmeticFault = 15,
    InvalidInput = 16,
    ReentrantCall = 17,
    TokensIdentical = 18,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of an account's position in one pool, returned by
/// `get_user_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserInfo {
    pub staked: i128,
    pub reward_debt: i128,
    pub pending_rewards: i128,
    pub withdrawable: i128,
    pub requests: Vec<UnstakeRequest>,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakePoolContract;

#[contractimpl]
impl StakePoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `reward_token` – SAC address of the token distributed as rewards.
    /// * `native_token` – SAC address that custodies native-currency pools.
    /// * `reward_rate`  – reward emitted **per second** across all pools.
    /// * `start_time`   – no pool accrues before this ledger timestamp.
    ///
    /// `admin` receives the `Admin`, `Operator` and `Upgrader` roles.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        native_token: Address,
        reward_rate: i128,
        start_time: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidInput);
        }
        if native_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&START_TIME, &start_time);
        vault::set_native_token(&env, &native_token);
        pool::set_reward_rate(&env, reward_rate);

        roles::grant_role(&env, Role::Admin, &admin);
        roles::grant_role(&env, Role::Operator, &admin);
        roles::grant_role(&env, Role::Upgrader, &admin);

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            native_token,
            reward_rate,
            start_time,
        );

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a new pool and return its id.
    ///
    /// Every existing pool is accrued first: the new weight dilutes the
    /// others only from this instant on. A pool may not stake the reward
    /// token, or claims would be paid out of principal.
    pub fn add_pool(
        env: Env,
        caller: Address,
        asset: Asset,
        weight: u64,
        min_deposit: i128,
        lock_duration: u64,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if min_deposit < 0 {
            return Err(ContractError::InvalidInput);
        }
        if vault::token_address(&env, &asset)? == Self::get_reward_token(env.clone())? {
            return Err(ContractError::TokensIdentical);
        }

        let start_time = Self::get_start_time(env.clone());
        let pool = pool::add(
            &env,
            asset.clone(),
            weight,
            min_deposit,
            lock_duration,
            start_time,
        )?;

        events::publish_pool_added(&env, pool.id, asset, weight, min_deposit, lock_duration);

        Ok(pool.id)
    }

    /// Change a pool's weight, minimum deposit and lock duration.
    ///
    /// A new lock duration applies only to requests made after the change.
    pub fn update_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u64,
        min_deposit: i128,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if min_deposit < 0 {
            return Err(ContractError::InvalidInput);
        }

        pool::update(&env, pool_id, weight, min_deposit, lock_duration)?;

        events::publish_pool_updated(
            &env,
            pool_id,
            weight,
            min_deposit,
            lock_duration,
            pool::total_weight(&env),
        );

        Ok(())
    }

    /// Open or close a pool to new stakes. Existing positions keep accruing
    /// and can still unstake, claim and withdraw.
    pub fn set_pool_active(
        env: Env,
        caller: Address,
        pool_id: u32,
        active: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        pool::set_active(&env, pool_id, active)?;

        events::publish_pool_active_set(&env, pool_id, active);

        Ok(())
    }

    /// Update the reward emission rate.
    ///
    /// Every pool is flushed at the old rate first, so existing stakers
    /// never lose or gain rewards retroactively.
    pub fn set_reward_rate(env: Env, caller: Address, new_rate: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        pool::accrue_all(&env)?;
        pool::set_reward_rate(&env, new_rate);

        events::publish_reward_rate_set(&env, new_rate);

        Ok(())
    }

    /// Bring one pool's accumulator up to the current time.
    pub fn update_pool_reward(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Global)?;

        pool::accrue_and_store(&env, pool_id)
    }

    /// Bring every pool's accumulator up to the current time.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Global)?;

        pool::accrue_all(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` into pool `pool_id`.
    ///
    /// `attached_value` declares the native currency sent along with the
    /// call: it must equal `amount` for a native pool and be zero for a
    /// token pool. Reward earned so far is settled into the position but not
    /// paid; use `claim` for that.
    pub fn stake(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
        attached_value: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Stake)?;
        staker.require_auth();

        let pool = pool::load(&env, pool_id)?;
        if !pool.active {
            return Err(ContractError::PoolInactive);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < pool.min_deposit {
            return Err(ContractError::BelowMinDeposit);
        }
        let expected_attached = match pool.asset {
            Asset::Native => amount,
            Asset::Token(_) => 0,
        };
        if attached_value != expected_attached {
            return Err(ContractError::InvalidAttachedValue);
        }
        let token = vault::token_address(&env, &pool.asset)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::accrue_and_store(&env, pool_id)?;
            let mut position = position::load(&env, pool_id, &staker);

            position.settle(&pool)?;
            position.staked = position
                .staked
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticFault)?;
            position.reprice(&pool)?;

            pool.total_staked = pool
                .total_staked
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticFault)?;

            position::store(&env, pool_id, &staker, &position);
            pool::store(&env, &pool);

            vault::pull(&env, &token, &staker, amount);

            events::publish_staked(&env, staker.clone(), pool_id, amount, pool.total_staked);
            Ok(())
        })
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Queue `amount` for withdrawal after the pool's lock duration and
    /// return the unlock time.
    ///
    /// The stake shrinks immediately, so the queued amount stops earning.
    pub fn unstake(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Global)?;
        staker.require_auth();

        pool::load(&env, pool_id)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        let mut position = position::load(&env, pool_id, &staker);
        if amount > position.staked {
            return Err(ContractError::InsufficientStake);
        }

        let mut pool = pool::accrue_and_store(&env, pool_id)?;

        position.settle(&pool)?;
        position.staked -= amount;
        position.reprice(&pool)?;

        let request = timelock::new_request(amount, env.ledger().timestamp(), pool.lock_duration)?;
        let unlock_at = request.unlock_at;
        position.requests.push_back(request);

        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticFault)?;

        position::store(&env, pool_id, &staker, &position);
        pool::store(&env, &pool);

        events::publish_unstake_requested(&env, staker, pool_id, amount, unlock_at);

        Ok(unlock_at)
    }

    /// Pay out every matured unstake request in pool `pool_id` at once.
    ///
    /// Fails with `NothingWithdrawable` while every request is still locked,
    /// and on a repeat call once the matured ones are gone.
    pub fn withdraw(env: Env, staker: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Global)?;
        staker.require_auth();

        let pool = pool::load(&env, pool_id)?;
        let token = vault::token_address(&env, &pool.asset)?;

        guard::non_reentrant(&env, || {
            let mut position = position::load(&env, pool_id, &staker);
            let (amount, locked) =
                timelock::drain_matured(&env, &position.requests, env.ledger().timestamp())?;
            if amount == 0 {
                return Err(ContractError::NothingWithdrawable);
            }

            // Matured requests leave the queue before any tokens move.
            position.requests = locked;
            position::store(&env, pool_id, &staker, &position);

            vault::push(&env, &token, &staker, amount);

            events::publish_withdrawn(&env, staker.clone(), pool_id, amount);
            Ok(amount)
        })
    }

    /// Return the whole stake of `staker` in pool `pool_id` immediately.
    ///
    /// Skips the lock and reward settlement: unclaimed reward and every
    /// queued unstake request, matured or not, are forfeited. Available even
    /// while the contract is paused.
    ///
    /// This is the only operation that accrues a pool under a global pause:
    /// the accumulator is brought up to now before the stake leaves, so the
    /// remaining stakers keep what the departing stake helped them earn.
    pub fn emergency_withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let pool = pool::load(&env, pool_id)?;
        let token = vault::token_address(&env, &pool.asset)?;
        let position = position::load(&env, pool_id, &staker);
        if position.staked == 0 {
            return Err(ContractError::NoStake);
        }

        guard::non_reentrant(&env, || {
            let amount = position.staked;
            let mut pool = pool::accrue_and_store(&env, pool_id)?;
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticFault)?;

            position::clear(&env, pool_id, &staker);
            pool::store(&env, &pool);

            vault::push(&env, &token, &staker, amount);

            events::publish_emergency_withdrawn(
                &env,
                staker.clone(),
                pool_id,
                amount,
                position.requests.len(),
            );
            Ok(amount)
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim everything `staker` has earned in pool `pool_id`.
    ///
    /// Rewards are transferred from the contract's reward-token balance,
    /// which must be funded beforehand (`fund_rewards` or a direct mint).
    pub fn claim(env: Env, staker: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env, PauseScope::Global)?;
        staker.require_auth();

        pool::load(&env, pool_id)?;
        let reward_token = Self::get_reward_token(env.clone())?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::accrue_and_store(&env, pool_id)?;
            let mut position = position::load(&env, pool_id, &staker);

            let amount = position.pending(&pool)?;
            if amount <= 0 {
                return Err(ContractError::NoPendingRewards);
            }

            position.settled_rewards = 0;
            position.reprice(&pool)?;
            pool.rewards_paid = pool
                .rewards_paid
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticFault)?;

            position::store(&env, pool_id, &staker, &position);
            pool::store(&env, &pool);
            let user_total = position::record_claim(&env, &staker, amount)?;

            vault::push(&env, &reward_token, &staker, amount);

            events::publish_reward_claimed(&env, staker.clone(), pool_id, amount, user_total);
            Ok(amount)
        })
    }

    /// Top up the reward reserve from `from`.
    pub fn fund_rewards(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        let reward_token = Self::get_reward_token(env.clone())?;

        guard::non_reentrant(&env, || {
            vault::pull(&env, &reward_token, &from, amount);
            events::publish_rewards_funded(&env, from.clone(), amount);
            Ok(())
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `account` could claim from pool `pool_id` right now, computed
    /// without writing any state.
    pub fn pending_reward(env: Env, pool_id: u32, account: Address) -> Result<i128, ContractError> {
        let pool = pool::simulate(&env, pool_id)?;
        position::load(&env, pool_id, &account).pending(&pool)
    }

    /// Return the combined position of `account` in pool `pool_id`.
    pub fn get_user_info(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<UserInfo, ContractError> {
        let pool = pool::simulate(&env, pool_id)?;
        let position = position::load(&env, pool_id, &account);

        Ok(UserInfo {
            staked: position.staked,
            reward_debt: position.reward_debt,
            pending_rewards: position.pending(&pool)?,
            withdrawable: timelock::withdrawable(&position.requests, env.ledger().timestamp())?,
            requests: position.requests,
        })
    }

    /// Sum of the matured unstake requests `account` could withdraw now.
    pub fn get_withdrawable_amount(
        env: Env,
        pool_id: u32,
        account: Address,
    ) -> Result<i128, ContractError> {
        pool::load(&env, pool_id)?;
        let position = position::load(&env, pool_id, &account);
        timelock::withdrawable(&position.requests, env.ledger().timestamp())
    }

    /// Lifetime reward `account` has claimed, summed over every pool.
    pub fn get_user_total_claimed(env: Env, account: Address) -> i128 {
        position::total_claimed(&env, &account)
    }

    /// Return the stored pool record (accumulator as of its last accrual).
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn get_pool_length(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn get_total_weight(env: Env) -> u64 {
        pool::total_weight(&env)
    }

    /// Return the current global reward rate (tokens per second).
    pub fn get_reward_rate(env: Env) -> i128 {
        pool::reward_rate(&env)
    }

    pub fn get_start_time(env: Env) -> u64 {
        env.storage().instance().get(&START_TIME).unwrap_or(0)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env, PauseScope::Global)
    }

    pub fn is_stake_paused(env: Env) -> bool {
        pause::is_paused(&env, PauseScope::Stake)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Layout version of stored pool and position records.
    pub fn version() -> u32 {
        STATE_VERSION
    }

    // ── Pause switches ──────────────────────────────────────────────────────

    /// Halt stake, unstake, claim and withdraw. Requires `Operator`.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused(&env, &caller, PauseScope::Global, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused(&env, &caller, PauseScope::Global, false)
    }

    /// Halt or resume new stakes only. Requires `Operator`.
    pub fn set_stake_paused(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused(&env, &caller, PauseScope::Stake, paused)
    }

    // ── Role management ─────────────────────────────────────────────────────

    /// Grant `role` to `account`. Only an `Admin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if roles::grant_role(&env, role, &account) {
            events::publish_role_changed(&env, caller, account, role, true);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Only an `Admin` may call this.
    ///
    /// Revoking the last `Admin` is refused so the registry can never lock
    /// itself out.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if role == Role::Admin
            && roles::has_role(&env, Role::Admin, &account)
            && roles::role_members(&env, Role::Admin).len() == 1
        {
            return Err(ContractError::InvalidInput);
        }

        if roles::revoke_role(&env, role, &account) {
            events::publish_role_changed(&env, caller, account, role, false);
        }
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        roles::role_members(&env, role)
    }

    // ── Recovery ────────────────────────────────────────────────────────────

    /// Sweep `amount` of a stray asset to the calling admin.
    ///
    /// The reward token and every pool's staked asset are protected:
    /// they back claims and withdrawals.
    pub fn emergency_recover_token(
        env: Env,
        caller: Address,
        asset: Asset,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let token = vault::token_address(&env, &asset)?;
        let reward_token = Self::get_reward_token(env.clone())?;
        let native_token = vault::native_token(&env)?;
        if token == reward_token || pool::is_staked_asset(&env, &token, &native_token) {
            return Err(ContractError::CannotRecoverProtectedAsset);
        }

        guard::non_reentrant(&env, || {
            vault::push(&env, &token, &caller, amount);
            events::publish_token_recovered(&env, caller.clone(), token.clone(), amount);
            Ok(())
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold `role`.
    fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
        if !roles::has_role(env, role, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_roles;
