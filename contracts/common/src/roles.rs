use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_LIST_PREFIX: Symbol = symbol_short!("ROLE_LST");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Flat set of capabilities. Unlike a tier ladder, holding one role grants
/// nothing implied by another: an account that should both configure pools
/// and pause must hold `Admin` and `Operator`.
///
/// - `Admin`    – Pool creation and parameter changes, reward-rate changes,
///                emergency recovery, role grants.
/// - `Operator` – Pause / unpause switches only.
/// - `Upgrader` – Reserved for code upgrades; only surfaced as a check.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Operator = 2,
    Upgrader = 3,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_LIST_PREFIX, role)
}

fn extend_member_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_list_ttl(env: &Env, key: &(Symbol, Role)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        extend_member_ttl(env, &key);
    }
    held
}

/// Grants `role` to `account`.
/// Callers must verify authorization beforehand.
///
/// Returns `false` if the account already held the role.
pub fn grant_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_member_ttl(env, &key);

    let list_key = members_key(role);
    let mut members: Vec<Address> = env
        .storage()
        .persistent()
        .get(&list_key)
        .unwrap_or(Vec::new(env));
    members.push_back(account.clone());
    env.storage().persistent().set(&list_key, &members);
    extend_list_ttl(env, &list_key);
    true
}

/// Revokes `role` from `account`.
///
/// Returns `false` if the account did not hold the role.
pub fn revoke_role(env: &Env, role: Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));

    let list_key = members_key(role);
    let members: Vec<Address> = env
        .storage()
        .persistent()
        .get(&list_key)
        .unwrap_or(Vec::new(env));

    let mut kept = Vec::new(env);
    for member in members.iter() {
        if member != *account {
            kept.push_back(member);
        }
    }
    env.storage().persistent().set(&list_key, &kept);
    extend_list_ttl(env, &list_key);
    true
}

/// Returns every account currently holding `role`, in grant order.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    let key = members_key(role);
    match env.storage().persistent().get::<_, Vec<Address>>(&key) {
        Some(members) => {
            extend_list_ttl(env, &key);
            members
        }
        None => Vec::new(env),
    }
}
