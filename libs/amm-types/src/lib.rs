#![no_std]

mod error;
mod pool;
mod quote;

pub use error::*;
pub use pool::*;
pub use quote::*;

/// Decimals of the share token deployed alongside every pool
pub const SHARE_DECIMALS: u32 = 7;

/// Returns true when `numerator / denominator` is a usable fee rate.
///
/// A pool must keep at least part of every input, so the rate is strictly
/// below one. A zero numerator (fee-free pool) is allowed.
pub fn fee_config_valid(fee_numerator: u64, fee_denominator: u64) -> bool {
    fee_denominator > 0 && fee_numerator < fee_denominator
}

/// Order two asset addresses so the lower one comes first
pub fn sort_assets(
    asset_a: soroban_sdk::Address,
    asset_b: soroban_sdk::Address,
) -> (soroban_sdk::Address, soroban_sdk::Address) {
    if asset_a < asset_b {
        (asset_a, asset_b)
    } else {
        (asset_b, asset_a)
    }
}
