#![no_std]

mod identity;

use amm_types::{fee_config_valid, sort_assets, PoolError, SHARE_DECIMALS};
use soroban_sdk::{
    contract, contractimpl, contracttype, Address, BytesN, Env, IntoVal, String, Symbol, Vec,
};

#[contract]
pub struct AmmFactory;

/// Storage keys for Factory contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin address
    Admin,
    /// Pool WASM hash for deployment
    PoolWasmHash,
    /// Share token WASM hash for deployment
    ShareWasmHash,
    /// (asset0, asset1) -> pool address
    Pool(Address, Address),
    /// Total number of pools created (counter for indexed storage)
    PoolCount,
    /// Pool address at index (indexed storage to avoid unbounded Vec)
    PoolAt(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Page size cap for `get_pools_paginated`
const MAX_PAGE_SIZE: u32 = 50;

// ============================================================================
// SOROBAN RESOURCE LIMITS
// ============================================================================
// - Read entries per tx: 100 entries / 200 KB
// - Write entries per tx: 50 entries / 132 KB
//
// Design choices to stay within limits:
// - Pool list uses indexed storage (PoolCount + PoolAt) instead of Vec
//   to avoid a single unbounded ledger entry
// - Pagination is capped at 50 entries per call
// - create_pool deploys two contracts and writes 3 factory entries
// ============================================================================

#[contractimpl]
impl AmmFactory {
    /// Initialize factory with admin and the two WASM hashes it deploys
    pub fn initialize(
        env: Env,
        admin: Address,
        pool_wasm_hash: BytesN<32>,
        share_wasm_hash: BytesN<32>,
    ) -> Result<(), PoolError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(PoolError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::PoolWasmHash, &pool_wasm_hash);
        env.storage()
            .instance()
            .set(&DataKey::ShareWasmHash, &share_wasm_hash);
        env.storage().instance().set(&DataKey::PoolCount, &0u32);

        extend_instance_ttl(&env);
        Ok(())
    }

    /// Create the pool for an asset pair
    ///
    /// The pair is sorted first, so (a, b) and (b, a) name the same pool.
    /// Deploys the share token and the pool at addresses derived from the
    /// pair, hands the share token's admin role to the pool, and registers
    /// the pool.
    pub fn create_pool(
        env: Env,
        asset_a: Address,
        asset_b: Address,
        fee_numerator: u64,
        fee_denominator: u64,
    ) -> Result<Address, PoolError> {
        let (asset0, asset1) = sort_assets(asset_a, asset_b);

        if asset0 == asset1 {
            return Err(PoolError::IdenticalAssets);
        }
        if !fee_config_valid(fee_numerator, fee_denominator) {
            return Err(PoolError::InvalidFee);
        }

        let pool_wasm_hash = Self::get_pool_wasm_hash(env.clone())?;
        let share_wasm_hash = Self::get_share_wasm_hash(env.clone())?;

        let pool_key = DataKey::Pool(asset0.clone(), asset1.clone());
        if env.storage().persistent().has(&pool_key) {
            return Err(PoolError::PoolAlreadyExists);
        }

        let identity = identity::derive(&env, &asset0, &asset1);

        // Deploy share token and pool
        let share_address = env
            .deployer()
            .with_current_contract(identity.share_salt.clone())
            .deploy_v2(share_wasm_hash, ());
        let pool_address = env
            .deployer()
            .with_current_contract(identity.pool_salt.clone())
            .deploy_v2(pool_wasm_hash, ());

        install_pool(
            &env,
            &asset0,
            &asset1,
            &pool_address,
            &share_address,
            fee_numerator,
            fee_denominator,
        );

        extend_instance_ttl(&env);
        Ok(pool_address)
    }

    /// Get pool address for an asset pair, in either order
    pub fn get_pool(env: Env, asset_a: Address, asset_b: Address) -> Option<Address> {
        let (asset0, asset1) = sort_assets(asset_a, asset_b);
        let pool_key = DataKey::Pool(asset0, asset1);
        env.storage().persistent().get(&pool_key)
    }

    /// Deterministic address of the pair's pool, whether or not it exists yet
    pub fn pool_address(env: Env, asset_a: Address, asset_b: Address) -> Address {
        let (asset0, asset1) = sort_assets(asset_a, asset_b);
        let identity = identity::derive(&env, &asset0, &asset1);
        identity::pool_address(&env, &identity)
    }

    /// Get total number of pools created
    pub fn get_pool_count(env: Env) -> u32 {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolCount)
            .unwrap_or(0)
    }

    /// Get pool address at specific index
    pub fn get_pool_at(env: Env, index: u32) -> Option<Address> {
        let pool_at_key = DataKey::PoolAt(index);
        env.storage().persistent().get(&pool_at_key)
    }

    /// Get pools with pagination
    /// Returns up to `limit` pools starting from `start_index`, at most 50
    pub fn get_pools_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Address> {
        let safe_limit = limit.min(MAX_PAGE_SIZE);
        let pool_count = Self::get_pool_count(env.clone());
        let end_index = start_index.saturating_add(safe_limit).min(pool_count);

        let mut pools: Vec<Address> = Vec::new(&env);
        for i in start_index..end_index {
            if let Some(pool) = env.storage().persistent().get(&DataKey::PoolAt(i)) {
                pools.push_back(pool);
            }
        }

        pools
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, PoolError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(PoolError::NotInitialized)
    }

    /// Get pool WASM hash
    pub fn get_pool_wasm_hash(env: Env) -> Result<BytesN<32>, PoolError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::PoolWasmHash)
            .ok_or(PoolError::NotInitialized)
    }

    /// Get share token WASM hash
    pub fn get_share_wasm_hash(env: Env) -> Result<BytesN<32>, PoolError> {
        extend_instance_ttl(&env);
        env.storage()
            .instance()
            .get(&DataKey::ShareWasmHash)
            .ok_or(PoolError::NotInitialized)
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

/// Record a pool under its pair and append it to the index
fn register_pool(env: &Env, pool_key: &DataKey, pool_address: &Address) {
    env.storage().persistent().set(pool_key, pool_address);
    extend_persistent_ttl(env, pool_key);

    let pool_count: u32 = env
        .storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0);

    let pool_at_key = DataKey::PoolAt(pool_count);
    env.storage().persistent().set(&pool_at_key, pool_address);
    extend_persistent_ttl(env, &pool_at_key);

    env.storage()
        .instance()
        .set(&DataKey::PoolCount, &(pool_count + 1));
}

/// Wire a freshly deployed pool and share token together and register them
#[allow(clippy::too_many_arguments)]
fn install_pool(
    env: &Env,
    asset0: &Address,
    asset1: &Address,
    pool_address: &Address,
    share_address: &Address,
    fee_numerator: u64,
    fee_denominator: u64,
) {
    // The pool becomes the only minter of its shares
    init_share(env, share_address, pool_address);
    init_pool(
        env,
        pool_address,
        &env.current_contract_address(),
        asset0,
        asset1,
        share_address,
        fee_numerator,
        fee_denominator,
    );

    let pool_key = DataKey::Pool(asset0.clone(), asset1.clone());
    register_pool(env, &pool_key, pool_address);

    env.events().publish(
        (Symbol::new(env, "pool_created"),),
        (
            asset0.clone(),
            asset1.clone(),
            pool_address.clone(),
            share_address.clone(),
        ),
    );
}

// Share token initialization via invoke
fn init_share(env: &Env, share_address: &Address, pool_address: &Address) {
    env.invoke_contract::<()>(
        share_address,
        &Symbol::new(env, "initialize"),
        (
            pool_address,
            SHARE_DECIMALS,
            String::from_str(env, "Pool Share"),
            String::from_str(env, "POOL"),
        )
            .into_val(env),
    );
}

// Pool initialization via invoke
#[allow(clippy::too_many_arguments)]
fn init_pool(
    env: &Env,
    pool_address: &Address,
    factory: &Address,
    asset0: &Address,
    asset1: &Address,
    share_address: &Address,
    fee_numerator: u64,
    fee_denominator: u64,
) {
    env.invoke_contract::<()>(
        pool_address,
        &Symbol::new(env, "initialize"),
        (
            factory,
            asset0,
            asset1,
            share_address,
            fee_numerator,
            fee_denominator,
        )
            .into_val(env),
    );
}
