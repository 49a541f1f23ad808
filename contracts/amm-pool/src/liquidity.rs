use crate::custody::{read_reserves, Custody, ShareRegistry};
use crate::invariants::{self, Expected};
use crate::storage::{get_config, get_state, set_state};
use amm_math::{get_deposit_amounts, get_withdraw_amounts, to_amount, to_unsigned};
use amm_types::{DepositQuote, PoolError, WithdrawQuote};
use soroban_sdk::{Address, Env, Symbol};

/// Price a deposit against the given reserves and supply
pub fn price_deposit(
    env: &Env,
    reserve0: i128,
    reserve1: i128,
    total_shares: i128,
    desired0: i128,
    desired1: i128,
) -> Result<DepositQuote, PoolError> {
    if desired0 <= 0 || desired1 <= 0 {
        return Err(PoolError::InvalidAmount);
    }

    let amounts = get_deposit_amounts(
        env,
        to_unsigned(desired0)?,
        to_unsigned(desired1)?,
        to_unsigned(reserve0)?,
        to_unsigned(reserve1)?,
        to_unsigned(total_shares)?,
    )?;

    Ok(DepositQuote {
        amount0: to_amount(amounts.amount0)?,
        amount1: to_amount(amounts.amount1)?,
        shares: to_amount(amounts.shares)?,
    })
}

/// Price a withdrawal of `share_amount` against the given reserves and supply
pub fn price_withdraw(
    env: &Env,
    reserve0: i128,
    reserve1: i128,
    total_shares: i128,
    share_amount: i128,
) -> Result<WithdrawQuote, PoolError> {
    if share_amount <= 0 {
        return Err(PoolError::InsufficientShares);
    }

    let amounts = get_withdraw_amounts(
        env,
        to_unsigned(share_amount)?,
        to_unsigned(reserve0)?,
        to_unsigned(reserve1)?,
        to_unsigned(total_shares)?,
    )?;

    Ok(WithdrawQuote {
        shares: to_amount(amounts.shares)?,
        amount0: to_amount(amounts.amount0)?,
        amount1: to_amount(amounts.amount1)?,
    })
}

/// Deposit both assets and mint shares to `provider`
///
/// Only the accepted amounts leave the provider; whatever exceeds the
/// current reserve ratio stays with them.
pub fn add_liquidity<C: Custody, R: ShareRegistry>(
    env: &Env,
    custody: &C,
    registry: &R,
    provider: &Address,
    desired0: i128,
    desired1: i128,
    min_shares: i128,
) -> Result<DepositQuote, PoolError> {
    if desired0 <= 0 || desired1 <= 0 || min_shares < 0 {
        return Err(PoolError::InvalidAmount);
    }

    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let pool = env.current_contract_address();

    let (reserve0, reserve1) = read_reserves(custody, &config, &pool);
    invariants::check_pre(env, reserve0, reserve1, state.total_shares, registry.total_supply());

    let quote = price_deposit(env, reserve0, reserve1, state.total_shares, desired0, desired1)?;

    if quote.shares < min_shares {
        return Err(PoolError::SlippageExceeded);
    }
    if custody.balance_of(&config.asset0, provider) < quote.amount0
        || custody.balance_of(&config.asset1, provider) < quote.amount1
    {
        return Err(PoolError::InsufficientBalance);
    }

    let new_reserve0 = reserve0
        .checked_add(quote.amount0)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_reserve1 = reserve1
        .checked_add(quote.amount1)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_total_shares = state
        .total_shares
        .checked_add(quote.shares)
        .ok_or(PoolError::ArithmeticOverflow)?;
    invariants::check_projected(env, new_reserve0, new_reserve1, new_total_shares);

    // Effects
    custody.transfer(&config.asset0, provider, &pool, quote.amount0);
    custody.transfer(&config.asset1, provider, &pool, quote.amount1);
    registry.mint(provider, quote.shares);

    state.total_shares = new_total_shares;
    set_state(env, &state);

    invariants::check_observed(
        env,
        custody,
        registry,
        &config,
        &pool,
        &Expected {
            reserve0_before: reserve0,
            reserve1_before: reserve1,
            delta0: quote.amount0,
            delta1: quote.amount1,
            total_shares: new_total_shares,
        },
    );

    env.events().publish(
        (Symbol::new(env, "deposit"), provider.clone()),
        (quote.amount0, quote.amount1, quote.shares),
    );

    Ok(quote)
}

/// Burn `share_amount` of the provider's shares and pay out the pro-rata
/// reserves
pub fn remove_liquidity<C: Custody, R: ShareRegistry>(
    env: &Env,
    custody: &C,
    registry: &R,
    provider: &Address,
    share_amount: i128,
    min_amount0: i128,
    min_amount1: i128,
) -> Result<WithdrawQuote, PoolError> {
    if min_amount0 < 0 || min_amount1 < 0 {
        return Err(PoolError::InvalidAmount);
    }
    if share_amount <= 0 {
        return Err(PoolError::InsufficientShares);
    }

    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let pool = env.current_contract_address();

    if registry.balance_of(provider) < share_amount {
        return Err(PoolError::InsufficientShares);
    }

    let (reserve0, reserve1) = read_reserves(custody, &config, &pool);
    invariants::check_pre(env, reserve0, reserve1, state.total_shares, registry.total_supply());

    let quote = price_withdraw(env, reserve0, reserve1, state.total_shares, share_amount)?;

    if quote.amount0 < min_amount0 || quote.amount1 < min_amount1 {
        return Err(PoolError::SlippageExceeded);
    }

    let new_reserve0 = reserve0
        .checked_sub(quote.amount0)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_reserve1 = reserve1
        .checked_sub(quote.amount1)
        .ok_or(PoolError::ArithmeticOverflow)?;
    let new_total_shares = state
        .total_shares
        .checked_sub(quote.shares)
        .ok_or(PoolError::ArithmeticOverflow)?;
    invariants::check_projected(env, new_reserve0, new_reserve1, new_total_shares);

    // Effects
    registry.burn(provider, quote.shares);
    if quote.amount0 > 0 {
        custody.transfer(&config.asset0, &pool, provider, quote.amount0);
    }
    if quote.amount1 > 0 {
        custody.transfer(&config.asset1, &pool, provider, quote.amount1);
    }

    state.total_shares = new_total_shares;
    set_state(env, &state);

    invariants::check_observed(
        env,
        custody,
        registry,
        &config,
        &pool,
        &Expected {
            reserve0_before: reserve0,
            reserve1_before: reserve1,
            delta0: -quote.amount0,
            delta1: -quote.amount1,
            total_shares: new_total_shares,
        },
    );

    env.events().publish(
        (Symbol::new(env, "withdraw"), provider.clone()),
        (quote.shares, quote.amount0, quote.amount1),
    );

    Ok(quote)
}
