//! Asset custody. The contract never touches balances itself; it asks the
//! asset's token contract to move them.

use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::{pool::Asset, ContractError};

const NATIVE_TOKEN: Symbol = symbol_short!("NTV_TOK");

pub fn set_native_token(env: &Env, native_token: &Address) {
    env.storage().instance().set(&NATIVE_TOKEN, native_token);
}

pub fn native_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&NATIVE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

/// The token contract that holds balances of `asset`.
pub fn token_address(env: &Env, asset: &Asset) -> Result<Address, ContractError> {
    match asset {
        Asset::Native => native_token(env),
        Asset::Token(address) => Ok(address.clone()),
    }
}

/// Moves `amount` of `token` from `from` into the contract.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) {
    token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
}

/// Moves `amount` of `token` from the contract to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}
