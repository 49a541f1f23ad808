// ============================================================================
// INVARIANTS MODULE - Invariant Guard
// ============================================================================
//
// This module defines the properties every pool operation must preserve and
// the checkpoints that enforce them. The predicates are pure and return
// bool; the `check_*` functions evaluate them at three points of every
// mutating operation and trap with `PoolError::InvariantBreach` on failure.
//
// INVARIANT CATEGORIES:
//
// 1. RESERVE INVARIANTS
//    - Reserves are never negative
//    - Outstanding shares are always backed by both reserves
//
// 2. SUPPLY INVARIANTS
//    - Ledger supply is never negative
//    - Ledger supply equals the share token's total supply
//
// 3. CONSTANT-PRODUCT INVARIANTS
//    - reserve0 * reserve1 never decreases across a swap
//
// 4. CONSERVATION INVARIANTS
//    - Observed vault balances move exactly by the computed deltas
//
// CHECKPOINTS:
//
//   pre        - state read before pricing
//   projected  - computed post-state, before the first transfer
//   observed   - post-state re-read from custody and registry after effects
//
// A breach is a defect, not a caller error: it is raised with
// `panic_with_error!` so the host aborts the invocation and rolls back every
// effect. It is never returned as an ordinary `Err`.
// ============================================================================

use crate::custody::{read_reserves, Custody, ShareRegistry};
use amm_math::product;
use amm_types::{PoolConfig, PoolError};
use soroban_sdk::{log, panic_with_error, Address, Env, Symbol};

// ============================================================================
// RESERVE INVARIANTS
// ============================================================================

/// Invariant: reserves are non-negative
///
/// Property:
///   reserve0 >= 0 && reserve1 >= 0
pub fn reserves_non_negative(reserve0: i128, reserve1: i128) -> bool {
    reserve0 >= 0 && reserve1 >= 0
}

/// Invariant: outstanding shares are backed by both assets
///
/// Property:
///   total_shares > 0 => reserve0 > 0 && reserve1 > 0
///
/// Shares with an empty vault behind them would price at zero and let the
/// next depositor take the other side for free.
pub fn supply_backed(total_shares: i128, reserve0: i128, reserve1: i128) -> bool {
    total_shares == 0 || (reserve0 > 0 && reserve1 > 0)
}

// ============================================================================
// SUPPLY INVARIANTS
// ============================================================================

/// Invariant: ledger supply is non-negative
///
/// Property:
///   total_shares >= 0
pub fn supply_non_negative(total_shares: i128) -> bool {
    total_shares >= 0
}

/// Invariant: the ledger and the share token agree on supply
///
/// Property:
///   state.total_shares == share_token.total_supply()
pub fn supply_matches_registry(ledger_shares: i128, registry_shares: i128) -> bool {
    ledger_shares == registry_shares
}

// ============================================================================
// CONSTANT-PRODUCT INVARIANTS
// ============================================================================

/// Invariant: the reserve product does not decrease
///
/// Property:
///   reserve_in_after * reserve_out_after >= reserve_in_before * reserve_out_before
///
/// Compared in 256 bits. Negative reserves fail the check outright.
pub fn product_non_decreasing(
    env: &Env,
    reserve_in_before: i128,
    reserve_out_before: i128,
    reserve_in_after: i128,
    reserve_out_after: i128,
) -> bool {
    let values = (
        u128::try_from(reserve_in_before),
        u128::try_from(reserve_out_before),
        u128::try_from(reserve_in_after),
        u128::try_from(reserve_out_after),
    );
    match values {
        (Ok(in_before), Ok(out_before), Ok(in_after), Ok(out_after)) => {
            product(env, in_after, out_after) >= product(env, in_before, out_before)
        }
        _ => false,
    }
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: a balance moved by exactly the computed delta
///
/// Property:
///   after - before == delta
pub fn delta_matches(before: i128, after: i128, delta: i128) -> bool {
    after.checked_sub(before) == Some(delta)
}

// ============================================================================
// CHECKPOINTS
// ============================================================================

fn enforce(env: &Env, holds: bool, check: &str) {
    if !holds {
        log!(env, "invariant breach", Symbol::new(env, check));
        panic_with_error!(env, PoolError::InvariantBreach);
    }
}

/// Pre-check on the state an operation starts from
pub fn check_pre(env: &Env, reserve0: i128, reserve1: i128, ledger_shares: i128, registry_shares: i128) {
    enforce(env, reserves_non_negative(reserve0, reserve1), "reserves_non_negative");
    enforce(env, supply_non_negative(ledger_shares), "supply_non_negative");
    enforce(env, supply_backed(ledger_shares, reserve0, reserve1), "supply_backed");
    enforce(
        env,
        supply_matches_registry(ledger_shares, registry_shares),
        "supply_matches_registry",
    );
}

/// Projected check on a liquidity operation's computed post-state
pub fn check_projected(env: &Env, reserve0: i128, reserve1: i128, total_shares: i128) {
    enforce(env, reserves_non_negative(reserve0, reserve1), "reserves_non_negative");
    enforce(env, supply_non_negative(total_shares), "supply_non_negative");
    enforce(env, supply_backed(total_shares, reserve0, reserve1), "supply_backed");
}

/// Projected check on a swap's computed post-state, in (src, dst) order
pub fn check_projected_swap(
    env: &Env,
    reserve_src: i128,
    reserve_dst: i128,
    new_reserve_src: i128,
    new_reserve_dst: i128,
) {
    enforce(
        env,
        reserves_non_negative(new_reserve_src, new_reserve_dst),
        "reserves_non_negative",
    );
    enforce(
        env,
        product_non_decreasing(env, reserve_src, reserve_dst, new_reserve_src, new_reserve_dst),
        "product_non_decreasing",
    );
}

/// Reserves and supply an operation expects to leave behind
pub struct Expected {
    pub reserve0_before: i128,
    pub reserve1_before: i128,
    pub delta0: i128,
    pub delta1: i128,
    pub total_shares: i128,
}

/// Observed check: re-read custody and registry after all effects
///
/// Returns the observed reserves so a swap can run its product check on
/// what the vaults actually hold.
pub fn check_observed<C: Custody, R: ShareRegistry>(
    env: &Env,
    custody: &C,
    registry: &R,
    config: &PoolConfig,
    pool: &Address,
    expected: &Expected,
) -> (i128, i128) {
    let (reserve0, reserve1) = read_reserves(custody, config, pool);
    let registry_shares = registry.total_supply();

    enforce(env, reserves_non_negative(reserve0, reserve1), "reserves_non_negative");
    enforce(
        env,
        delta_matches(expected.reserve0_before, reserve0, expected.delta0),
        "delta0_matches",
    );
    enforce(
        env,
        delta_matches(expected.reserve1_before, reserve1, expected.delta1),
        "delta1_matches",
    );
    enforce(
        env,
        supply_matches_registry(expected.total_shares, registry_shares),
        "supply_matches_registry",
    );
    enforce(
        env,
        supply_backed(expected.total_shares, reserve0, reserve1),
        "supply_backed",
    );

    (reserve0, reserve1)
}
