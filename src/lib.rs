//! # AMM Zap - Single-Sided Liquidity Provisioning
//!
//! ## Purpose
//!
//! Deterministic math and orchestration for supplying one asset to a
//! constant-product AMM pool and receiving pool shares back, and for the
//! reverse redemption. The core problem is the split: how much of the single
//! input to swap into the counter-asset so the resulting pair deposits at the
//! pool's post-swap reserve ratio with only a provably bounded rounding dust
//! left over. All arithmetic is exact integer math mirrored bit-for-bit
//! against the pool's own fee formula.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots from a [`PoolOracle`] implementation
//! - **Output Destinations**: swap/deposit/withdraw primitives on a [`PoolRouter`]
//! - **Protocol Support**: Uniswap V2-style constant-product pools with a
//!   proportional input fee (fee tier injected at construction)
//! - **Precision**: 256-bit amounts, 512-bit intermediates, no floating point
//!
//! ## Architecture Role
//!
//! The crate is a stateless per-call computation layer: the external pool
//! owns balances, the constant-product invariant and the exact rounding of
//! its primitives; this crate computes against one consistent snapshot,
//! drives the primitives, and returns every residual to the caller.

pub mod add;
pub mod error;
pub mod fixed_point;
pub mod pool;
pub mod remove;
pub mod split;

pub use add::{AddOutcome, LiquidityAdder};
pub use error::{Result, ZapError};
pub use fixed_point::{apply_bps_floor, mul_div, Rounding, BPS_DENOMINATOR};
pub use pool::{AssetSide, CallParams, DepositReceipt, PoolOracle, PoolRouter, PoolSnapshot};
pub use remove::{LiquidityRemover, RemoveOutcome};
pub use split::{SplitCalculator, SplitResult};

/// Common amount and handle types, re-exported for implementors.
pub use ethers_core::types::{Address, U256};
