#![no_std]

mod custody;
mod invariants;
mod liquidity;
mod storage;
mod swap;

use amm_types::{
    fee_config_valid, DepositQuote, PoolConfig, PoolError, PoolInfo, PoolState, SwapDirection,
    SwapQuote, WithdrawQuote,
};
use custody::{read_reserves, ShareRegistry, ShareTokenRegistry, TokenCustody};
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};
use storage::{get_config, get_state, is_initialized, set_config, set_state};

#[contract]
pub struct AmmPool;

#[contractimpl]
impl AmmPool {
    /// Initialize a new pool
    ///
    /// Called once by the factory right after deployment. The share token
    /// must already exist with this pool as its admin and zero supply.
    pub fn initialize(
        env: Env,
        factory: Address,
        asset0: Address,
        asset1: Address,
        share_token: Address,
        fee_numerator: u64,
        fee_denominator: u64,
    ) -> Result<(), PoolError> {
        factory.require_auth();

        if is_initialized(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        if !fee_config_valid(fee_numerator, fee_denominator) {
            return Err(PoolError::InvalidFee);
        }
        if asset0 == asset1 {
            return Err(PoolError::IdenticalAssets);
        }

        let config = PoolConfig {
            factory,
            asset0,
            asset1,
            share_token,
            fee_numerator,
            fee_denominator,
        };
        set_config(&env, &config);
        set_state(&env, &PoolState::new());

        env.events().publish(
            (Symbol::new(&env, "init"),),
            (
                config.asset0,
                config.asset1,
                config.share_token,
                fee_numerator,
                fee_denominator,
            ),
        );
        Ok(())
    }

    /// Deposit both assets and receive shares
    ///
    /// # Arguments
    /// * `desired0`, `desired1` - Upper bounds on what the provider pays
    /// * `min_shares` - Fail with `SlippageExceeded` below this; 0 disables
    ///
    /// # Returns
    /// The amounts actually taken and the shares minted
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        desired0: i128,
        desired1: i128,
        min_shares: i128,
    ) -> Result<DepositQuote, PoolError> {
        provider.require_auth();
        let registry = share_registry(&env)?;
        liquidity::add_liquidity(
            &env,
            &TokenCustody::new(&env),
            &registry,
            &provider,
            desired0,
            desired1,
            min_shares,
        )
    }

    /// Burn shares and receive the pro-rata reserves
    ///
    /// # Arguments
    /// * `min_amount0`, `min_amount1` - Fail with `SlippageExceeded` below
    ///   these; 0 disables
    pub fn remove_liquidity(
        env: Env,
        provider: Address,
        share_amount: i128,
        min_amount0: i128,
        min_amount1: i128,
    ) -> Result<WithdrawQuote, PoolError> {
        provider.require_auth();
        let registry = share_registry(&env)?;
        liquidity::remove_liquidity(
            &env,
            &TokenCustody::new(&env),
            &registry,
            &provider,
            share_amount,
            min_amount0,
            min_amount1,
        )
    }

    /// Execute an exact-input swap
    ///
    /// # Arguments
    /// * `direction` - Which asset is paid in
    /// * `amount_in` - Gross input, fee included
    /// * `min_amount_out` - Fail with `SlippageExceeded` below this
    pub fn swap(
        env: Env,
        trader: Address,
        direction: SwapDirection,
        amount_in: i128,
        min_amount_out: i128,
    ) -> Result<SwapQuote, PoolError> {
        trader.require_auth();
        let registry = share_registry(&env)?;
        swap::execute_swap(
            &env,
            &TokenCustody::new(&env),
            &registry,
            &trader,
            direction,
            amount_in,
            min_amount_out,
        )
    }

    // === View Functions ===

    /// Reserves, supply and fee in one snapshot
    pub fn query(env: Env) -> Result<PoolInfo, PoolError> {
        let config = get_config(&env)?;
        let state = get_state(&env)?;
        let (reserve0, reserve1) =
            read_reserves(&TokenCustody::new(&env), &config, &env.current_contract_address());

        Ok(PoolInfo {
            reserve0,
            reserve1,
            total_shares: state.total_shares,
            fee_numerator: config.fee_numerator,
            fee_denominator: config.fee_denominator,
        })
    }

    /// Get pool configuration
    pub fn get_config(env: Env) -> Result<PoolConfig, PoolError> {
        get_config(&env)
    }

    /// Get share ledger state
    pub fn get_state(env: Env) -> Result<PoolState, PoolError> {
        get_state(&env)
    }

    pub fn share_balance(env: Env, owner: Address) -> Result<i128, PoolError> {
        Ok(share_registry(&env)?.balance_of(&owner))
    }

    /// What `add_liquidity` would take and mint right now
    pub fn quote_add(env: Env, desired0: i128, desired1: i128) -> Result<DepositQuote, PoolError> {
        let info = Self::query(env.clone())?;
        liquidity::price_deposit(
            &env,
            info.reserve0,
            info.reserve1,
            info.total_shares,
            desired0,
            desired1,
        )
    }

    /// What `remove_liquidity` would pay out right now
    pub fn quote_remove(env: Env, share_amount: i128) -> Result<WithdrawQuote, PoolError> {
        let info = Self::query(env.clone())?;
        liquidity::price_withdraw(
            &env,
            info.reserve0,
            info.reserve1,
            info.total_shares,
            share_amount,
        )
    }

    /// What `swap` would pay out right now
    pub fn quote_swap(
        env: Env,
        direction: SwapDirection,
        amount_in: i128,
    ) -> Result<SwapQuote, PoolError> {
        let config = get_config(&env)?;
        let (reserve0, reserve1) =
            read_reserves(&TokenCustody::new(&env), &config, &env.current_contract_address());
        let (reserve_src, reserve_dst) = if direction.is_zero_for_one() {
            (reserve0, reserve1)
        } else {
            (reserve1, reserve0)
        };

        swap::price_swap(&env, &config, reserve_src, reserve_dst, amount_in)
    }
}

fn share_registry(env: &Env) -> Result<ShareTokenRegistry<'_>, PoolError> {
    let config = get_config(env)?;
    Ok(ShareTokenRegistry::new(env, &config.share_token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_share::{ShareToken, ShareTokenClient};
    use amm_types::sort_assets;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::token::{StellarAssetClient, TokenClient};
    use soroban_sdk::{Address, Env, String};

    const M: i128 = 1_000_000;

    /// Registers two assets, a share token owned by a fresh pool, and the
    /// pool itself, without initializing the pool
    fn register_pool(env: &Env) -> (Address, Address, Address, Address) {
        let issuer = Address::generate(env);
        let asset_a = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let asset_b = env.register_stellar_asset_contract_v2(issuer).address();
        let (asset0, asset1) = sort_assets(asset_a, asset_b);

        let pool_id = env.register(AmmPool, ());
        let share_id = env.register(ShareToken, ());
        ShareTokenClient::new(env, &share_id).initialize(
            &pool_id,
            &7u32,
            &String::from_str(env, "Pool Share"),
            &String::from_str(env, "POOL"),
        );

        (pool_id, share_id, asset0, asset1)
    }

    fn create_pool(
        env: &Env,
        fee_numerator: u64,
        fee_denominator: u64,
    ) -> (AmmPoolClient<'_>, Address, Address) {
        let (pool_id, share_id, asset0, asset1) = register_pool(env);
        let factory = Address::generate(env);
        let client = AmmPoolClient::new(env, &pool_id);
        client.initialize(
            &factory,
            &asset0,
            &asset1,
            &share_id,
            &fee_numerator,
            &fee_denominator,
        );
        (client, asset0, asset1)
    }

    fn funded_user(env: &Env, asset0: &Address, asset1: &Address, amount0: i128, amount1: i128) -> Address {
        let user = Address::generate(env);
        if amount0 > 0 {
            StellarAssetClient::new(env, asset0).mint(&user, &amount0);
        }
        if amount1 > 0 {
            StellarAssetClient::new(env, asset1).mint(&user, &amount1);
        }
        user
    }

    fn balance(env: &Env, asset: &Address, owner: &Address) -> i128 {
        TokenClient::new(env, asset).balance(owner)
    }

    // === Initialization Tests ===

    #[test]
    fn test_initialize_pool() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);

        let config = client.get_config();
        assert_eq!(config.asset0, asset0);
        assert_eq!(config.asset1, asset1);
        assert_eq!(config.fee_numerator, 3);
        assert_eq!(config.fee_denominator, 1_000);

        let info = client.query();
        assert_eq!(info.reserve0, 0);
        assert_eq!(info.reserve1, 0);
        assert_eq!(info.total_shares, 0);
        assert_eq!(client.get_state().total_shares, 0);
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let config = client.get_config();

        let result = client.try_initialize(
            &config.factory,
            &asset0,
            &asset1,
            &config.share_token,
            &3,
            &1_000,
        );
        assert_eq!(result, Err(Ok(PoolError::AlreadyInitialized)));
    }

    #[test]
    fn test_initialize_invalid_fee() {
        let env = Env::default();
        env.mock_all_auths();
        let (pool_id, share_id, asset0, asset1) = register_pool(&env);
        let client = AmmPoolClient::new(&env, &pool_id);
        let factory = Address::generate(&env);

        assert_eq!(
            client.try_initialize(&factory, &asset0, &asset1, &share_id, &1, &0),
            Err(Ok(PoolError::InvalidFee))
        );
        assert_eq!(
            client.try_initialize(&factory, &asset0, &asset1, &share_id, &1_000, &1_000),
            Err(Ok(PoolError::InvalidFee))
        );
        assert_eq!(client.try_query(), Err(Ok(PoolError::NotInitialized)));
    }

    #[test]
    fn test_initialize_identical_assets() {
        let env = Env::default();
        env.mock_all_auths();
        let (pool_id, share_id, asset0, _) = register_pool(&env);
        let client = AmmPoolClient::new(&env, &pool_id);
        let factory = Address::generate(&env);

        assert_eq!(
            client.try_initialize(&factory, &asset0, &asset0, &share_id, &3, &1_000),
            Err(Ok(PoolError::IdenticalAssets))
        );
    }

    #[test]
    fn test_uninitialized_pool_rejects_operations() {
        let env = Env::default();
        env.mock_all_auths();
        let pool_id = env.register(AmmPool, ());
        let client = AmmPoolClient::new(&env, &pool_id);
        let user = Address::generate(&env);

        assert_eq!(
            client.try_add_liquidity(&user, &10, &10, &0),
            Err(Ok(PoolError::NotInitialized))
        );
        assert_eq!(
            client.try_swap(&user, &SwapDirection::ZeroForOne, &10, &0),
            Err(Ok(PoolError::NotInitialized))
        );
    }

    // === Add Liquidity Tests ===

    #[test]
    fn test_seed_deposit() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 50, 50);

        let deposit = client.add_liquidity(&lp, &50, &50, &0);
        assert_eq!(
            deposit,
            DepositQuote {
                amount0: 50,
                amount1: 50,
                shares: 50
            }
        );

        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1, info.total_shares), (50, 50, 50));
        assert_eq!(client.share_balance(&lp), 50);
        assert_eq!(balance(&env, &asset0, &lp), 0);
    }

    #[test]
    fn test_deposit_moves_only_accepted_amounts() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let seeder = funded_user(&env, &asset0, &asset1, 100, 100);
        client.add_liquidity(&seeder, &100, &100, &0);

        let lp = funded_user(&env, &asset0, &asset1, 25, 100);
        assert_eq!(
            client.quote_add(&25, &100),
            DepositQuote {
                amount0: 25,
                amount1: 25,
                shares: 25
            }
        );
        let deposit = client.add_liquidity(&lp, &25, &100, &0);

        assert_eq!((deposit.amount0, deposit.amount1, deposit.shares), (25, 25, 25));
        assert_eq!(balance(&env, &asset0, &lp), 0);
        assert_eq!(balance(&env, &asset1, &lp), 75);

        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1, info.total_shares), (125, 125, 125));
    }

    #[test]
    fn test_deposit_invalid_amounts() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 50, 50);

        assert_eq!(
            client.try_add_liquidity(&lp, &0, &50, &0),
            Err(Ok(PoolError::InvalidAmount))
        );
        assert_eq!(
            client.try_add_liquidity(&lp, &50, &-1, &0),
            Err(Ok(PoolError::InvalidAmount))
        );
    }

    #[test]
    fn test_deposit_insufficient_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 50, 10);

        assert_eq!(
            client.try_add_liquidity(&lp, &50, &50, &0),
            Err(Ok(PoolError::InsufficientBalance))
        );
        assert_eq!(client.query().total_shares, 0);
        assert_eq!(balance(&env, &asset0, &lp), 50);
    }

    #[test]
    fn test_deposit_min_shares() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 50, 50);

        assert_eq!(
            client.try_add_liquidity(&lp, &50, &50, &51),
            Err(Ok(PoolError::SlippageExceeded))
        );
        assert_eq!(client.add_liquidity(&lp, &50, &50, &50).shares, 50);
    }

    // === Remove Liquidity Tests ===

    #[test]
    fn test_full_withdrawal_drains_and_reseeds() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp1 = funded_user(&env, &asset0, &asset1, 50, 50);
        let lp2 = funded_user(&env, &asset0, &asset1, 30, 30);
        client.add_liquidity(&lp1, &50, &50, &0);
        client.add_liquidity(&lp2, &30, &30, &0);

        client.remove_liquidity(&lp1, &50, &0, &0);
        client.remove_liquidity(&lp2, &30, &0, &0);

        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1, info.total_shares), (0, 0, 0));
        assert_eq!(balance(&env, &asset0, &lp1), 50);
        assert_eq!(balance(&env, &asset1, &lp2), 30);

        // The next deposit prices as a fresh seed: floor(sqrt(30 * 120)) = 60
        let lp3 = funded_user(&env, &asset0, &asset1, 30, 120);
        let deposit = client.add_liquidity(&lp3, &30, &120, &0);
        assert_eq!((deposit.amount0, deposit.amount1, deposit.shares), (30, 120, 60));
    }

    #[test]
    fn test_withdraw_more_than_held() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp1 = funded_user(&env, &asset0, &asset1, 50, 50);
        let lp2 = funded_user(&env, &asset0, &asset1, 50, 50);
        client.add_liquidity(&lp1, &50, &50, &0);
        client.add_liquidity(&lp2, &50, &50, &0);

        assert_eq!(
            client.try_remove_liquidity(&lp1, &51, &0, &0),
            Err(Ok(PoolError::InsufficientShares))
        );
        assert_eq!(
            client.try_remove_liquidity(&lp1, &0, &0, &0),
            Err(Ok(PoolError::InsufficientShares))
        );
        assert_eq!(client.query().total_shares, 100);
    }

    #[test]
    fn test_withdraw_min_amounts() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 100, 300);
        client.add_liquidity(&lp, &100, &300, &0);

        let quote = client.quote_remove(&50);
        assert_eq!(
            client.try_remove_liquidity(&lp, &50, &quote.amount0, &(quote.amount1 + 1)),
            Err(Ok(PoolError::SlippageExceeded))
        );
        let withdraw = client.remove_liquidity(&lp, &50, &quote.amount0, &quote.amount1);
        assert_eq!(withdraw, quote);
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let seeder = funded_user(&env, &asset0, &asset1, 5_000, 7_000);
        client.add_liquidity(&seeder, &5_000, &7_000, &0);
        let supply_before = client.query().total_shares;

        let lp = funded_user(&env, &asset0, &asset1, 1_000, 2_000);
        let deposit = client.add_liquidity(&lp, &1_000, &2_000, &0);
        let withdraw = client.remove_liquidity(&lp, &deposit.shares, &0, &0);

        assert_eq!(client.query().total_shares, supply_before);
        assert!(withdraw.amount0 <= deposit.amount0);
        assert!(withdraw.amount1 <= deposit.amount1);
        assert!(deposit.amount0 - withdraw.amount0 <= 1);
        assert!(deposit.amount1 - withdraw.amount1 <= 2);
        assert_eq!(client.share_balance(&lp), 0);
    }

    // === Swap Tests ===

    #[test]
    fn test_swap_grows_product() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 1_000_000, 1_000_000);
        client.add_liquidity(&lp, &1_000_000, &1_000_000, &0);

        let trader = funded_user(&env, &asset0, &asset1, 50_000, 0);
        let before = client.query();
        let swap = client.swap(&trader, &SwapDirection::ZeroForOne, &50_000, &0);
        let after = client.query();

        assert_eq!(swap.fee, 150);
        assert_eq!(after.reserve0, before.reserve0 + 50_000);
        assert_eq!(after.reserve1, before.reserve1 - swap.amount_out);
        assert_eq!(balance(&env, &asset1, &trader), swap.amount_out);
        assert!(after.reserve0 * after.reserve1 > before.reserve0 * before.reserve1);
        assert_eq!(after.total_shares, before.total_shares);
    }

    #[test]
    fn test_swap_one_for_zero() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 2_000_000, 1_000_000);
        client.add_liquidity(&lp, &2_000_000, &1_000_000, &0);

        let trader = funded_user(&env, &asset0, &asset1, 0, 10_000);
        let quote = client.quote_swap(&SwapDirection::OneForZero, &10_000);
        let swap = client.swap(&trader, &SwapDirection::OneForZero, &10_000, &quote.amount_out);

        assert_eq!(swap, quote);
        assert_eq!(balance(&env, &asset0, &trader), swap.amount_out);
        assert_eq!(balance(&env, &asset1, &trader), 0);
        assert_eq!(client.query().reserve1, 1_010_000);
    }

    #[test]
    fn test_swap_slippage_leaves_pool_unchanged() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 1_000_000, 1_000_000);
        client.add_liquidity(&lp, &1_000_000, &1_000_000, &0);

        let trader = funded_user(&env, &asset0, &asset1, 10_000, 0);
        let quote = client.quote_swap(&SwapDirection::ZeroForOne, &10_000);
        let before = client.query();

        assert_eq!(
            client.try_swap(
                &trader,
                &SwapDirection::ZeroForOne,
                &10_000,
                &(quote.amount_out + 1)
            ),
            Err(Ok(PoolError::SlippageExceeded))
        );
        assert_eq!(client.query(), before);
        assert_eq!(balance(&env, &asset0, &trader), 10_000);
    }

    #[test]
    fn test_swap_input_validation() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let trader = funded_user(&env, &asset0, &asset1, 100, 100);

        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &0, &0),
            Err(Ok(PoolError::InvalidAmount))
        );
        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &10, &-1),
            Err(Ok(PoolError::InvalidAmount))
        );
        // Empty pool
        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &10, &0),
            Err(Ok(PoolError::InsufficientLiquidity))
        );
    }

    #[test]
    fn test_swap_insufficient_balance() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 1_000_000, 1_000_000);
        client.add_liquidity(&lp, &1_000_000, &1_000_000, &0);

        let trader = funded_user(&env, &asset0, &asset1, 9_999, 0);
        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &10_000, &0),
            Err(Ok(PoolError::InsufficientBalance))
        );
    }

    #[test]
    fn test_swap_paying_nothing_is_refused() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 1_000_000, 1_000_000);
        client.add_liquidity(&lp, &1_000_000, &1_000_000, &0);

        // fee = 1 swallows the whole input
        let trader = funded_user(&env, &asset0, &asset1, 1, 0);
        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &1, &0),
            Err(Ok(PoolError::InsufficientLiquidity))
        );
    }

    #[test]
    fn test_dust_swap_shrinking_product_is_refused() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 75, 75);
        client.add_liquidity(&lp, &75, &75, &0);

        // fee 1, out = 75 - floor(5625 / 84) = 9, and 85 * 66 < 75 * 75
        let trader = funded_user(&env, &asset0, &asset1, 10, 0);
        assert_eq!(
            client.try_quote_swap(&SwapDirection::ZeroForOne, &10),
            Err(Ok(PoolError::InsufficientLiquidity))
        );
        assert_eq!(
            client.try_swap(&trader, &SwapDirection::ZeroForOne, &10, &0),
            Err(Ok(PoolError::InsufficientLiquidity))
        );
        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1), (75, 75));
        assert_eq!(balance(&env, &asset0, &trader), 10);
    }

    #[test]
    fn test_lopsided_swap_shrinking_product_is_refused() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);
        let lp = funded_user(&env, &asset0, &asset1, 1_000_000_000_000, 1_000_000);
        client.add_liquidity(&lp, &1_000_000_000_000, &1_000_000, &0);

        let trader = funded_user(&env, &asset0, &asset1, 2_000_002, 0);
        for amount_in in [1_000_000i128, 1_000_001] {
            assert_eq!(
                client.try_quote_swap(&SwapDirection::ZeroForOne, &amount_in),
                Err(Ok(PoolError::InsufficientLiquidity))
            );
            assert_eq!(
                client.try_swap(&trader, &SwapDirection::ZeroForOne, &amount_in, &0),
                Err(Ok(PoolError::InsufficientLiquidity))
            );
        }
        let before = client.query();
        assert_eq!((before.reserve0, before.reserve1), (1_000_000_000_000, 1_000_000));

        // One more unit of input covers the rounding
        let quote = client.quote_swap(&SwapDirection::ZeroForOne, &1_000_002);
        let swap = client.swap(&trader, &SwapDirection::ZeroForOne, &1_000_002, &0);
        assert_eq!(swap, quote);
        assert_eq!(swap.amount_out, 1);

        let after = client.query();
        assert_eq!(after.reserve0, 1_000_001_000_002);
        assert_eq!(after.reserve1, 999_999);
        assert_eq!(balance(&env, &asset1, &trader), 1);
    }

    // === Scenario Tests ===

    #[test]
    fn test_liquidity_and_swap_scenario() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, asset0, asset1) = create_pool(&env, 3, 1_000);

        let lp1 = funded_user(&env, &asset0, &asset1, 50 * M, 50 * M);
        let lp2 = funded_user(&env, &asset0, &asset1, 50 * M, 50 * M);
        let lp3 = funded_user(&env, &asset0, &asset1, 25 * M, 100 * M);

        assert_eq!(client.add_liquidity(&lp1, &(50 * M), &(50 * M), &0).shares, 50 * M);
        assert_eq!(client.add_liquidity(&lp2, &(50 * M), &(50 * M), &0).shares, 50 * M);
        assert_eq!(client.add_liquidity(&lp3, &(25 * M), &(100 * M), &0).shares, 25 * M);
        assert_eq!(balance(&env, &asset1, &lp3), 75 * M);

        let withdraw = client.remove_liquidity(&lp1, &(50 * M), &0, &0);
        assert_eq!((withdraw.amount0, withdraw.amount1), (50 * M, 50 * M));

        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1, info.total_shares), (75 * M, 75 * M, 75 * M));
        let naive = client.quote_remove(&(50 * M));

        // fee = ceil(10M * 3 / 1000) = 30_000, out = 75M - floor(75M^2 / 84_970_000)
        let trader = funded_user(&env, &asset0, &asset1, 10 * M, 0);
        let swap = client.swap(&trader, &SwapDirection::ZeroForOne, &(10 * M), &0);
        assert_eq!(swap.fee, 30_000);
        assert_eq!(swap.amount_out, 8_800_165);

        let info = client.query();
        assert_eq!((info.reserve0, info.reserve1), (85 * M, 66_199_835));
        assert_eq!(info.total_shares, 75 * M);

        // The LP leaves with more of the asset traded in and less of the other
        let withdraw = client.remove_liquidity(&lp2, &(50 * M), &0, &0);
        assert_eq!(withdraw.amount0, 56_666_666);
        assert_eq!(withdraw.amount1, 44_133_223);
        assert!(withdraw.amount0 > naive.amount0);
        assert!(withdraw.amount1 < naive.amount1);
        assert_eq!(client.share_balance(&lp2), 0);
        assert_eq!(client.query().total_shares, 25 * M);
    }
}
