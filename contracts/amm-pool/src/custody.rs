//! Adapters for the two external ledgers the pool depends on.
//!
//! Asset balances are held by SEP-41 token contracts and shares by the
//! pool's share token. The engine only talks to them through [`Custody`]
//! and [`ShareRegistry`], so the pricing and guard code never names a
//! concrete client.

use amm_types::PoolConfig;
use soroban_sdk::{contractclient, token, Address, Env};

/// Asset custody: balances and transfers of a fungible asset
pub trait Custody {
    fn balance_of(&self, asset: &Address, account: &Address) -> i128;

    /// Move `amount` of `asset`; `from` must have authorized the call or be
    /// the invoking contract
    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128);
}

/// Share registry: the fungible claim on pool reserves
pub trait ShareRegistry {
    fn mint(&self, to: &Address, amount: i128);
    fn burn(&self, from: &Address, amount: i128);
    fn total_supply(&self) -> i128;
    fn balance_of(&self, owner: &Address) -> i128;
}

/// Custody backed by Soroban token contracts
pub struct TokenCustody<'a> {
    env: &'a Env,
}

impl<'a> TokenCustody<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl Custody for TokenCustody<'_> {
    fn balance_of(&self, asset: &Address, account: &Address) -> i128 {
        token::Client::new(self.env, asset).balance(account)
    }

    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128) {
        token::Client::new(self.env, asset).transfer(from, to, &amount);
    }
}

/// Admin surface of the share token the pool relies on
#[allow(dead_code)]
#[contractclient(name = "ShareClient")]
pub trait ShareTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn total_supply(env: Env) -> i128;
    fn balance(env: Env, id: Address) -> i128;
}

/// Share registry backed by the pool's share token contract
pub struct ShareTokenRegistry<'a> {
    client: ShareClient<'a>,
}

impl<'a> ShareTokenRegistry<'a> {
    pub fn new(env: &'a Env, share_token: &Address) -> Self {
        Self {
            client: ShareClient::new(env, share_token),
        }
    }
}

impl ShareRegistry for ShareTokenRegistry<'_> {
    fn mint(&self, to: &Address, amount: i128) {
        self.client.mint(to, &amount);
    }

    fn burn(&self, from: &Address, amount: i128) {
        self.client.burn(from, &amount);
    }

    fn total_supply(&self) -> i128 {
        self.client.total_supply()
    }

    fn balance_of(&self, owner: &Address) -> i128 {
        self.client.balance(owner)
    }
}

/// Current vault balances as (reserve0, reserve1)
pub fn read_reserves<C: Custody>(custody: &C, config: &PoolConfig, pool: &Address) -> (i128, i128) {
    (
        custody.balance_of(&config.asset0, pool),
        custody.balance_of(&config.asset1, pool),
    )
}
