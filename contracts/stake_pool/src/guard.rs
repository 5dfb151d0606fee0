use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const ENTERED: Symbol = symbol_short!("ENTERED");

/// True while a guarded call is in progress.
pub fn is_entered(env: &Env) -> bool {
    env.storage().instance().get(&ENTERED).unwrap_or(false)
}

/// Runs `body` with the reentrancy flag raised.
///
/// Every asset transfer happens inside `body` after its state writes, so a
/// token contract calling back into this one finds the flag set and fails
/// with `ReentrantCall`. On error the host discards the whole invocation,
/// flag included.
pub fn non_reentrant<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    if is_entered(env) {
        return Err(ContractError::ReentrantCall);
    }
    env.storage().instance().set(&ENTERED, &true);
    let result = body();
    env.storage().instance().set(&ENTERED, &false);
    result
}
