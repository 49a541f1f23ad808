use crate::full_math::{mul_div, mul_div_rounding_up};
use amm_types::{fee_config_valid, PoolError};
use soroban_sdk::Env;

/// Result of pricing an exact-input swap against one pair of reserves
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapAmounts {
    /// Gross input paid by the trader
    pub amount_in: u128,
    /// Portion of the input kept by the pool
    pub fee_amount: u128,
    /// Input that moves the price: amount_in - fee_amount
    pub amount_in_net: u128,
    /// Output paid to the trader
    pub amount_out: u128,
}

/// Fee charged on a gross input
/// fee = ceil(amount_in * fee_numerator / fee_denominator)
///
/// Rounds up so the pool, never the trader, keeps the fractional unit.
pub fn get_fee_amount(
    env: &Env,
    amount_in: u128,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<u128, PoolError> {
    if !fee_config_valid(fee_numerator, fee_denominator) {
        return Err(PoolError::InvalidFee);
    }
    mul_div_rounding_up(env, amount_in, fee_numerator as u128, fee_denominator as u128)
}

/// Constant-product output for a net input
/// amount_out = reserve_out - floor(reserve_in * reserve_out / (reserve_in + amount_in_net))
pub fn get_amount_out(
    env: &Env,
    amount_in_net: u128,
    reserve_in: u128,
    reserve_out: u128,
) -> Result<u128, PoolError> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let new_reserve_in = reserve_in
        .checked_add(amount_in_net)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_reserve_out = mul_div(env, reserve_in, reserve_out, new_reserve_in)?;

    // new_reserve_in >= reserve_in, so the quotient never exceeds reserve_out
    reserve_out
        .checked_sub(new_reserve_out)
        .ok_or(PoolError::ArithmeticOverflow)
}

/// Price an exact-input swap: fee first, then the constant-product curve
pub fn compute_swap(
    env: &Env,
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<SwapAmounts, PoolError> {
    if amount_in == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let fee_amount = get_fee_amount(env, amount_in, fee_numerator, fee_denominator)?;
    // fee_numerator < fee_denominator keeps the ceiling at or below amount_in
    let amount_in_net = amount_in
        .checked_sub(fee_amount)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let amount_out = get_amount_out(env, amount_in_net, reserve_in, reserve_out)?;

    Ok(SwapAmounts {
        amount_in,
        fee_amount,
        amount_in_net,
        amount_out,
    })
}
