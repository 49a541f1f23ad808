use crate::full_math::{mul_div, sqrt_product};
use amm_types::PoolError;
use soroban_sdk::Env;

/// Amounts accepted by a deposit and the shares they earn
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositAmounts {
    pub amount0: u128,
    pub amount1: u128,
    pub shares: u128,
}

/// Amounts released by burning shares
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawAmounts {
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

/// Shares minted for the first deposit into an empty pool
/// shares = floor(sqrt(amount0 * amount1))
pub fn get_seed_shares(env: &Env, amount0: u128, amount1: u128) -> Result<u128, PoolError> {
    if amount0 == 0 || amount1 == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let shares = sqrt_product(env, amount0, amount1)?;
    if shares == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    Ok(shares)
}

/// Compute the accepted amounts and minted shares for a deposit
///
/// With no shares outstanding the whole deposit is accepted and priced by
/// the geometric mean. Otherwise the deposit is trimmed to the current
/// reserve ratio: the side that would over-supply is cut back, the other is
/// taken in full, and shares are minted pro rata on the binding side. The
/// excess on the trimmed side never leaves the provider.
pub fn get_deposit_amounts(
    env: &Env,
    desired0: u128,
    desired1: u128,
    reserve0: u128,
    reserve1: u128,
    total_shares: u128,
) -> Result<DepositAmounts, PoolError> {
    if desired0 == 0 || desired1 == 0 {
        return Err(PoolError::InvalidAmount);
    }

    if total_shares == 0 {
        let shares = get_seed_shares(env, desired0, desired1)?;
        return Ok(DepositAmounts {
            amount0: desired0,
            amount1: desired1,
            shares,
        });
    }

    if reserve0 == 0 || reserve1 == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let amount1_optimal = mul_div(env, desired0, reserve1, reserve0)?;
    let amounts = if amount1_optimal <= desired1 {
        DepositAmounts {
            amount0: desired0,
            amount1: amount1_optimal,
            shares: mul_div(env, total_shares, desired0, reserve0)?,
        }
    } else {
        DepositAmounts {
            amount0: mul_div(env, desired1, reserve0, reserve1)?,
            amount1: desired1,
            shares: mul_div(env, total_shares, desired1, reserve1)?,
        }
    };

    // A side rounded to zero would mint shares backed by one asset only
    if amounts.shares == 0 || amounts.amount0 == 0 || amounts.amount1 == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    Ok(amounts)
}

/// Compute the reserves released by burning `shares`
/// amount_i = floor(shares * reserve_i / total_shares)
pub fn get_withdraw_amounts(
    env: &Env,
    shares: u128,
    reserve0: u128,
    reserve1: u128,
    total_shares: u128,
) -> Result<WithdrawAmounts, PoolError> {
    if shares == 0 || shares > total_shares {
        return Err(PoolError::InsufficientShares);
    }

    Ok(WithdrawAmounts {
        shares,
        amount0: mul_div(env, shares, reserve0, total_shares)?,
        amount1: mul_div(env, shares, reserve1, total_shares)?,
    })
}
