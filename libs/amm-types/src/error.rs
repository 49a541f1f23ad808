use soroban_sdk::contracterror;

/// Errors raised by the pool, its math and the factory.
///
/// Codes are grouped by range so a caller can classify a failure without
/// matching every variant:
///
/// | Range   | Kind            | Retry?                                   |
/// |---------|-----------------|------------------------------------------|
/// | 1-99    | Configuration   | never                                    |
/// | 100-199 | UserInput       | after correcting the input               |
/// | 200-299 | EconomicGuard   | only with a fresh quote                  |
/// | 300-399 | Arithmetic      | never                                    |
/// | 400-    | InvariantBreach | never, it is a defect                    |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    /// Fee denominator is zero or the numerator is not below it
    InvalidFee = 1,
    /// Both sides of the pair are the same asset
    IdenticalAssets = 2,
    /// Contract already holds its configuration
    AlreadyInitialized = 3,
    /// Factory already registered a pool for the pair
    PoolAlreadyExists = 4,
    /// Contract has no configuration yet
    NotInitialized = 5,

    /// Non-positive amount, or an amount the pool cannot represent
    InvalidAmount = 100,
    /// Caller does not hold the assets the operation would move
    InsufficientBalance = 101,
    /// Caller does not hold the shares to burn, or more than the supply
    InsufficientShares = 102,

    /// Result is worse than the caller's minimum
    SlippageExceeded = 200,
    /// Reserves cannot serve the operation (empty side, zero result, drain)
    InsufficientLiquidity = 201,

    /// An intermediate or result does not fit its integer type
    ArithmeticOverflow = 300,

    /// A ledger, custody or pricing invariant does not hold
    InvariantBreach = 400,
}

/// Coarse classification of a `PoolError`
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Configuration,
    UserInput,
    EconomicGuard,
    Arithmetic,
    InvariantBreach,
}

impl PoolError {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            0..=99 => ErrorKind::Configuration,
            100..=199 => ErrorKind::UserInput,
            200..=299 => ErrorKind::EconomicGuard,
            300..=399 => ErrorKind::Arithmetic,
            _ => ErrorKind::InvariantBreach,
        }
    }

    /// Whether resubmitting the same operation can ever succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::UserInput | ErrorKind::EconomicGuard)
    }
}
