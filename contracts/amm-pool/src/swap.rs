use crate::custody::{read_reserves, Custody, ShareRegistry};
use crate::invariants::{self, Expected};
use crate::storage::{get_config, get_state};
use amm_math::{compute_swap, to_amount, to_unsigned};
use amm_types::{PoolConfig, PoolError, SwapDirection, SwapQuote};
use soroban_sdk::{Address, Env, Symbol};

/// (source asset, destination asset) for a direction
pub fn route(config: &PoolConfig, direction: SwapDirection) -> (Address, Address) {
    if direction.is_zero_for_one() {
        (config.asset0.clone(), config.asset1.clone())
    } else {
        (config.asset1.clone(), config.asset0.clone())
    }
}

/// Price an exact-input swap against (source, destination) reserves
///
/// Refuses trades that would empty the destination vault, pay nothing, or
/// leave `reserve_src * reserve_dst` smaller than before. The floored curve
/// output can overshoot by one unit when the fee is too small to cover the
/// rounding, which happens on lopsided or tiny reserves.
pub fn price_swap(
    env: &Env,
    config: &PoolConfig,
    reserve_src: i128,
    reserve_dst: i128,
    amount_in: i128,
) -> Result<SwapQuote, PoolError> {
    if amount_in <= 0 {
        return Err(PoolError::InvalidAmount);
    }
    if reserve_src <= 0 || reserve_dst <= 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let amounts = compute_swap(
        env,
        to_unsigned(amount_in)?,
        to_unsigned(reserve_src)?,
        to_unsigned(reserve_dst)?,
        config.fee_numerator,
        config.fee_denominator,
    )?;
    let amount_out = to_amount(amounts.amount_out)?;

    if amount_out >= reserve_dst || amount_out == 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    let new_reserve_src = reserve_src
        .checked_add(amount_in)
        .ok_or(PoolError::ArithmeticOverflow)?;
    if !invariants::product_non_decreasing(
        env,
        reserve_src,
        reserve_dst,
        new_reserve_src,
        reserve_dst - amount_out,
    ) {
        return Err(PoolError::InsufficientLiquidity);
    }

    Ok(SwapQuote {
        amount_in,
        fee: to_amount(amounts.fee_amount)?,
        amount_out,
    })
}

/// Execute an exact-input swap for `trader`
///
/// The gross input, fee included, goes into the source vault; the fee is
/// never split out, so it accrues to share holders through the reserves.
pub fn execute_swap<C: Custody, R: ShareRegistry>(
    env: &Env,
    custody: &C,
    registry: &R,
    trader: &Address,
    direction: SwapDirection,
    amount_in: i128,
    min_amount_out: i128,
) -> Result<SwapQuote, PoolError> {
    if amount_in <= 0 || min_amount_out < 0 {
        return Err(PoolError::InvalidAmount);
    }

    let config = get_config(env)?;
    let state = get_state(env)?;
    let pool = env.current_contract_address();

    let (reserve0, reserve1) = read_reserves(custody, &config, &pool);
    invariants::check_pre(env, reserve0, reserve1, state.total_shares, registry.total_supply());

    let zero_for_one = direction.is_zero_for_one();
    let (asset_src, asset_dst) = route(&config, direction);
    let (reserve_src, reserve_dst) = if zero_for_one {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };

    let quote = price_swap(env, &config, reserve_src, reserve_dst, amount_in)?;

    if quote.amount_out < min_amount_out {
        return Err(PoolError::SlippageExceeded);
    }
    if custody.balance_of(&asset_src, trader) < amount_in {
        return Err(PoolError::InsufficientBalance);
    }

    let new_reserve_src = reserve_src
        .checked_add(amount_in)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_reserve_dst = reserve_dst - quote.amount_out;
    invariants::check_projected_swap(env, reserve_src, reserve_dst, new_reserve_src, new_reserve_dst);

    // Effects
    custody.transfer(&asset_src, trader, &pool, amount_in);
    custody.transfer(&asset_dst, &pool, trader, quote.amount_out);

    let (delta0, delta1) = if zero_for_one {
        (amount_in, -quote.amount_out)
    } else {
        (-quote.amount_out, amount_in)
    };
    let (observed0, observed1) = invariants::check_observed(
        env,
        custody,
        registry,
        &config,
        &pool,
        &Expected {
            reserve0_before: reserve0,
            reserve1_before: reserve1,
            delta0,
            delta1,
            total_shares: state.total_shares,
        },
    );
    let (observed_src, observed_dst) = if zero_for_one {
        (observed0, observed1)
    } else {
        (observed1, observed0)
    };
    invariants::check_projected_swap(env, reserve_src, reserve_dst, observed_src, observed_dst);

    env.events().publish(
        (Symbol::new(env, "swap"), trader.clone()),
        (direction, quote.amount_in, quote.fee, quote.amount_out),
    );

    Ok(quote)
}
