//! Error types for the zap liquidity surface

use ethers_core::types::U256;
use thiserror::Error;

/// Terminal failures of a zap call.
///
/// Every variant identifies the precondition or external guarantee that was
/// violated; nothing is retried internally because a retry needs a fresh
/// reserve snapshot, which is caller policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZapError {
    #[error("arithmetic overflow: value exceeds 256 bits")]
    ArithmeticOverflow,

    #[error("division by zero denominator")]
    DivisionByZero,

    #[error("pool has no reserves; the first deposit must go through the pool's own bootstrap path")]
    EmptyPool,

    #[error("input of {amount} is too small to split against current reserves")]
    DustInput { amount: U256 },

    #[error("pool reported insufficient output or liquidity for the deposit")]
    InsufficientOutput,

    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares { requested: U256, available: U256 },

    #[error("zero amount: nothing to deposit or redeem")]
    ZeroShares,

    #[error("deadline {deadline} already passed at pool time {now}")]
    DeadlineExceeded { deadline: u64, now: u64 },

    #[error("slippage exceeded: output {actual} below minimum {minimum}")]
    SlippageExceeded { minimum: U256, actual: U256 },
}

pub type Result<T> = std::result::Result<T, ZapError>;
