use soroban_sdk::{contracttype, Address};

/// Pool configuration - immutable after creation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Factory contract that created the pool
    pub factory: Address,
    /// Asset held in vault0 (lower address)
    pub asset0: Address,
    /// Asset held in vault1 (higher address)
    pub asset1: Address,
    /// Share token contract; the pool is its only minter
    pub share_token: Address,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
}

/// Mutable ledger state - stored in Instance storage
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Shares outstanding; always equal to the share token's total supply
    pub total_shares: i128,
}

impl PoolState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Snapshot returned by `query`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub reserve0: i128,
    pub reserve1: i128,
    pub total_shares: i128,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
}

/// Which vault receives the input of a swap
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapDirection {
    /// Pay asset0, receive asset1
    ZeroForOne,
    /// Pay asset1, receive asset0
    OneForZero,
}

impl SwapDirection {
    pub fn is_zero_for_one(&self) -> bool {
        matches!(self, SwapDirection::ZeroForOne)
    }
}
