use common::roles::{self, Role};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

// ── Types ─────────────────────────────────────────────────────

/// The two independent pause switches.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts stake, unstake, claim and withdraw.
    Global,
    /// Halts new stakes only.
    Stake,
}

// ── Storage Keys ─────────────────────────────────────────────

const GLOBAL_PAUSE: Symbol = symbol_short!("P_GLOB");
const STAKE_PAUSE: Symbol = symbol_short!("P_STAKE");

fn scope_key(scope: PauseScope) -> Symbol {
    match scope {
        PauseScope::Global => GLOBAL_PAUSE,
        PauseScope::Stake => STAKE_PAUSE,
    }
}

// ── Core Logistics ───────────────────────────────────────────

pub fn is_paused(env: &Env, scope: PauseScope) -> bool {
    env.storage()
        .instance()
        .get(&scope_key(scope))
        .unwrap_or(false)
}

/// Fails with `Paused` if the global switch, or `scope` itself, is engaged.
pub fn require_not_paused(env: &Env, scope: PauseScope) -> Result<(), ContractError> {
    if is_paused(env, PauseScope::Global) || is_paused(env, scope) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Flips the switch for `scope`. Requires the `Operator` role.
pub fn set_paused(
    env: &Env,
    caller: &Address,
    scope: PauseScope,
    paused: bool,
) -> Result<(), ContractError> {
    if !roles::has_role(env, Role::Operator, caller) {
        return Err(ContractError::Unauthorized);
    }

    env.storage().instance().set(&scope_key(scope), &paused);

    events::publish_pause_changed(env, caller.clone(), scope, paused);

    Ok(())
}
