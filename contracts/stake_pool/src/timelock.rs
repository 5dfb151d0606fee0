use soroban_sdk::{contracttype, Env, Vec};

use crate::ContractError;

/// A queued unstake: funds already left the stake but are held until
/// `unlock_at`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequest {
    pub amount: i128,
    pub unlock_at: u64,
}

pub fn new_request(
    amount: i128,
    now: u64,
    lock_duration: u64,
) -> Result<UnstakeRequest, ContractError> {
    let unlock_at = now
        .checked_add(lock_duration)
        .ok_or(ContractError::ArithmeticFault)?;
    Ok(UnstakeRequest { amount, unlock_at })
}

/// Sum of every request matured at `now`.
pub fn withdrawable(requests: &Vec<UnstakeRequest>, now: u64) -> Result<i128, ContractError> {
    let mut total: i128 = 0;
    for request in requests.iter() {
        if request.unlock_at <= now {
            total = total
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticFault)?;
        }
    }
    Ok(total)
}

/// Splits `requests` at `now`: returns the matured total and the requests
/// still locked, in their original order.
pub fn drain_matured(
    env: &Env,
    requests: &Vec<UnstakeRequest>,
    now: u64,
) -> Result<(i128, Vec<UnstakeRequest>), ContractError> {
    let mut total: i128 = 0;
    let mut locked = Vec::new(env);
    for request in requests.iter() {
        if request.unlock_at <= now {
            total = total
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticFault)?;
        } else {
            locked.push_back(request);
        }
    }
    Ok((total, locked))
}
