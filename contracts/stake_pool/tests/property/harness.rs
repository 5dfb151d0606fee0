use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use stake_pool::{pool::Asset, StakePoolContract, StakePoolContractClient};

pub const USERS: usize = 3;
pub const FUNDING: i128 = 1_000_000;

pub struct Harness {
    pub env: Env,
    pub client: StakePoolContractClient<'static>,
    pub admin: Address,
    pub users: std::vec::Vec<Address>,
}

impl Harness {
    /// Contract with one pool per entry of `weights`, alternating native and
    /// token pools, and `USERS` accounts funded in both assets.
    pub fn new(reward_rate: i128, weights: &[u64], lock_duration: u64) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let native_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let stake_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();

        let contract_id = env.register(StakePoolContract, ());
        let client = StakePoolContractClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        client.initialize(&admin, &reward_token, &native_token, &reward_rate, &0);
        StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i128::from(u64::MAX));

        for (i, weight) in weights.iter().enumerate() {
            let asset = if i % 2 == 0 {
                Asset::Native
            } else {
                Asset::Token(stake_token.clone())
            };
            client.add_pool(&admin, &asset, weight, &1, &lock_duration);
        }

        let mut users = std::vec::Vec::new();
        for _ in 0..USERS {
            let user = Address::generate(&env);
            StellarAssetClient::new(&env, &native_token).mint(&user, &FUNDING);
            StellarAssetClient::new(&env, &stake_token).mint(&user, &FUNDING);
            users.push(user);
        }

        Harness {
            env,
            client,
            admin,
            users,
        }
    }

    /// Stake with the attached value each pool kind expects.
    pub fn stake(&self, user: usize, pool_id: u32, amount: i128) -> bool {
        let attached = match self.client.get_pool(&pool_id).asset {
            Asset::Native => amount,
            Asset::Token(_) => 0,
        };
        self.client
            .try_stake(&self.users[user], &pool_id, &amount, &attached)
            .is_ok()
    }
}
