use soroban_sdk::contracttype;

/// Amounts moved by a deposit (or that would be, for a quote)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositQuote {
    /// Asset0 taken from the provider
    pub amount0: i128,
    /// Asset1 taken from the provider
    pub amount1: i128,
    /// Shares minted to the provider
    pub shares: i128,
}

/// Amounts moved by a withdrawal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawQuote {
    /// Shares burned from the provider
    pub shares: i128,
    /// Asset0 paid out
    pub amount0: i128,
    /// Asset1 paid out
    pub amount1: i128,
}

/// Amounts moved by a swap
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapQuote {
    /// Gross input, fee included
    pub amount_in: i128,
    /// Part of the input retained by the pool as fee
    pub fee: i128,
    /// Output paid to the trader
    pub amount_out: i128,
}
