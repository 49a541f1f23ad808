#![no_std]

//! Pool share token.
//!
//! A minimal fungible token whose supply only the admin (the pool contract)
//! can change. Holders may transfer shares freely; minting and burning
//! happen exclusively through the pool's liquidity operations.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env,
    String, Symbol,
};

#[contract]
pub struct ShareToken;

/// Storage keys for the share token
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Token metadata and admin (Instance storage)
    Metadata,
    /// Outstanding supply (Instance storage)
    TotalSupply,
    /// Holder balance (Persistent storage)
    Balance(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    pub admin: Address,
    pub decimals: u32,
    pub name: String,
    pub symbol: String,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ShareError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidAmount = 3,
    InsufficientBalance = 4,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl ShareToken {
    /// Set the admin and metadata; callable once
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), ShareError> {
        if env.storage().instance().has(&DataKey::Metadata) {
            return Err(ShareError::AlreadyInitialized);
        }

        let metadata = Metadata {
            admin,
            decimals,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Create `amount` new shares for `to`; admin only
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), ShareError> {
        let metadata = get_metadata(&env)?;
        metadata.admin.require_auth();

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }

        let supply = get_total_supply(&env)
            .checked_add(amount)
            .ok_or(ShareError::InvalidAmount)?;
        let balance = get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(ShareError::InvalidAmount)?;

        set_balance(&env, &to, balance);
        set_total_supply(&env, supply);

        env.events()
            .publish((Symbol::new(&env, "mint"), metadata.admin, to), amount);
        Ok(())
    }

    /// Destroy `amount` shares held by `from`; admin only
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ShareError> {
        let metadata = get_metadata(&env)?;
        metadata.admin.require_auth();

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }

        let balance = get_balance(&env, &from);
        if balance < amount {
            return Err(ShareError::InsufficientBalance);
        }

        set_balance(&env, &from, balance - amount);
        set_total_supply(&env, get_total_supply(&env) - amount);

        env.events()
            .publish((Symbol::new(&env, "burn"), from), amount);
        Ok(())
    }

    /// Move shares between holders
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ShareError> {
        from.require_auth();

        if amount <= 0 {
            return Err(ShareError::InvalidAmount);
        }

        let from_balance = get_balance(&env, &from);
        if from_balance < amount {
            return Err(ShareError::InsufficientBalance);
        }
        set_balance(&env, &from, from_balance - amount);

        let to_balance = get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(ShareError::InvalidAmount)?;
        set_balance(&env, &to, to_balance);

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        get_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn admin(env: Env) -> Result<Address, ShareError> {
        Ok(get_metadata(&env)?.admin)
    }

    pub fn decimals(env: Env) -> Result<u32, ShareError> {
        Ok(get_metadata(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, ShareError> {
        Ok(get_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, ShareError> {
        Ok(get_metadata(&env)?.symbol)
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn get_metadata(env: &Env) -> Result<Metadata, ShareError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .ok_or(ShareError::NotInitialized)
}

fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn set_total_supply(env: &Env, supply: i128) {
    if supply < 0 {
        panic_with_error!(env, ShareError::InsufficientBalance);
    }
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

fn get_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

fn set_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    if balance == 0 {
        // Remove empty balance
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
    }
}
