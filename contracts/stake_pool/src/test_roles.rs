extern crate std;

use common::roles::Role;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{pool::Asset, ContractError, StakePoolContract, StakePoolContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakePoolContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let native_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakePoolContract, ());
    let client = StakePoolContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &reward_token.address(),
        &native_token.address(),
        &10,
        &0,
    );

    (env, client, admin)
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_initializer_holds_every_role() {
    let (_env, client, admin) = setup();

    for role in [Role::Admin, Role::Operator, Role::Upgrader] {
        assert!(client.has_role(&role, &admin));
        assert_eq!(client.get_role_members(&role).len(), 1);
    }
}

// ── Grant / revoke ───────────────────────────────────────────────────────────

#[test]
fn test_operator_can_pause_but_not_configure() {
    let (env, client, admin) = setup();
    let operator = Address::generate(&env);

    client.grant_role(&admin, &Role::Operator, &operator);
    assert!(client.has_role(&Role::Operator, &operator));

    client.pause(&operator);
    client.unpause(&operator);

    assert_eq!(
        client
            .try_add_pool(&operator, &Asset::Native, &100, &1, &0)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
}

#[test]
fn test_admin_without_operator_cannot_pause() {
    let (env, client, admin) = setup();
    let second_admin = Address::generate(&env);

    client.grant_role(&admin, &Role::Admin, &second_admin);
    client.add_pool(&second_admin, &Asset::Native, &100, &1, &0);

    assert_eq!(
        client.try_pause(&second_admin).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
}

#[test]
fn test_revoke_role() {
    let (env, client, admin) = setup();
    let operator = Address::generate(&env);

    client.grant_role(&admin, &Role::Operator, &operator);
    assert_eq!(client.get_role_members(&Role::Operator).len(), 2);

    client.revoke_role(&admin, &Role::Operator, &operator);
    assert!(!client.has_role(&Role::Operator, &operator));
    assert_eq!(client.get_role_members(&Role::Operator).len(), 1);
    assert_eq!(
        client.try_pause(&operator).unwrap_err().unwrap(),
        ContractError::Unauthorized
    );
}

#[test]
fn test_grant_is_idempotent() {
    let (env, client, admin) = setup();
    let operator = Address::generate(&env);

    client.grant_role(&admin, &Role::Operator, &operator);
    client.grant_role(&admin, &Role::Operator, &operator);

    assert_eq!(client.get_role_members(&Role::Operator).len(), 2);
}

#[test]
fn test_non_admin_cannot_grant() {
    let (env, client, _admin) = setup();
    let stranger = Address::generate(&env);

    assert_eq!(
        client
            .try_grant_role(&stranger, &Role::Admin, &stranger)
            .unwrap_err()
            .unwrap(),
        ContractError::Unauthorized
    );
    assert!(!client.has_role(&Role::Admin, &stranger));
}

#[test]
fn test_last_admin_cannot_be_revoked() {
    let (env, client, admin) = setup();

    assert_eq!(
        client
            .try_revoke_role(&admin, &Role::Admin, &admin)
            .unwrap_err()
            .unwrap(),
        ContractError::InvalidInput
    );

    let successor = Address::generate(&env);
    client.grant_role(&admin, &Role::Admin, &successor);
    client.revoke_role(&successor, &Role::Admin, &admin);

    assert!(!client.has_role(&Role::Admin, &admin));
    assert_eq!(client.get_role_members(&Role::Admin).len(), 1);
}
