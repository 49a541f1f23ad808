use amm_types::PoolError;
use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns floor((a * b) / denominator)
///
/// A zero denominator or a quotient above `u128::MAX` is reported as
/// `ArithmeticOverflow`; nothing is ever truncated.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, PoolError> {
    if denominator == 0 {
        return Err(PoolError::ArithmeticOverflow);
    }

    // Most pool arithmetic fits in 128 bits; skip the host round trip then
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }

    let product = product(env, a, b);
    let result = product.div(&U256::from_u128(env, denominator));
    u128_from_u256(&result)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(
    env: &Env,
    a: u128,
    b: u128,
    denominator: u128,
) -> Result<u128, PoolError> {
    if denominator == 0 {
        return Err(PoolError::ArithmeticOverflow);
    }

    let has_remainder = match a.checked_mul(b) {
        Some(product) => product % denominator != 0,
        None => {
            let remainder = product(env, a, b).rem_euclid(&U256::from_u128(env, denominator));
            remainder > U256::from_u32(env, 0)
        }
    };

    let result = mul_div(env, a, b, denominator)?;
    if has_remainder {
        result.checked_add(1).ok_or(PoolError::ArithmeticOverflow)
    } else {
        Ok(result)
    }
}

/// Full 256-bit product of two u128 values
pub fn product(env: &Env, a: u128, b: u128) -> U256 {
    U256::from_u128(env, a).mul(&U256::from_u128(env, b))
}

/// Integer square root (floor) of a u128
pub fn sqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }

    // Start from a power of two at or above the root
    let bits = 128 - n.leading_zeros();
    let mut x = 1u128 << ((bits + 1) / 2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// floor(sqrt(a * b)) without overflowing on the product
pub fn sqrt_product(env: &Env, a: u128, b: u128) -> Result<u128, PoolError> {
    if let Some(n) = a.checked_mul(b) {
        return Ok(sqrt(n));
    }

    // sqrt(a) * sqrt(b) bounds the root from above; Newton descends from there
    let guess = (sqrt(a) + 1)
        .checked_mul(sqrt(b) + 1)
        .unwrap_or(u128::MAX);

    let n = product(env, a, b);
    let two = U256::from_u32(env, 2);
    let mut x = U256::from_u128(env, guess);
    loop {
        let y = x.add(&n.div(&x)).div(&two);
        if y >= x {
            break;
        }
        x = y;
    }
    u128_from_u256(&x)
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: u128, b: u128) -> Result<u128, PoolError> {
    if b == 0 {
        return Err(PoolError::ArithmeticOverflow);
    }
    if a == 0 {
        return Ok(0);
    }
    Ok((a - 1) / b + 1)
}

/// Convert U256 to u128, `ArithmeticOverflow` if it does not fit
fn u128_from_u256(value: &U256) -> Result<u128, PoolError> {
    value.to_u128().ok_or(PoolError::ArithmeticOverflow)
}

/// Convert a token amount to the engine's unsigned domain
pub fn to_unsigned(amount: i128) -> Result<u128, PoolError> {
    u128::try_from(amount).map_err(|_| PoolError::InvalidAmount)
}

/// Convert an engine result back to a token amount
pub fn to_amount(value: u128) -> Result<i128, PoolError> {
    i128::try_from(value).map_err(|_| PoolError::ArithmeticOverflow)
}
