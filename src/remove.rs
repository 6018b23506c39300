//! Liquidity remover
//!
//! Redeems pool shares into the two underlying assets and forwards them to
//! the caller. The pool owns the exact redemption rounding; this side only
//! bounds it with slippage-derived minimums and forwards what the pool
//! reports.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ZapError};
use crate::fixed_point::{apply_bps_floor, mul_div, Rounding};
use crate::pool::{check_deadline, CallParams, PoolOracle, PoolRouter};

/// Underlying amounts a redemption paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveOutcome {
    pub amount_x: U256,
    pub amount_y: U256,
}

/// Redeems shares back into the pool's two assets.
#[derive(Debug, Clone, Default)]
pub struct LiquidityRemover;

impl LiquidityRemover {
    pub fn new() -> Self {
        Self
    }

    /// Burns `share_amount` (the caller must have authorized it) and forwards
    /// the proportional underlying amounts to the recipient.
    pub fn remove<R>(
        &self,
        router: &mut R,
        pool: Address,
        share_amount: U256,
        params: &CallParams,
    ) -> Result<RemoveOutcome>
    where
        R: PoolOracle + PoolRouter,
    {
        if share_amount.is_zero() {
            return Err(ZapError::ZeroShares);
        }
        check_deadline(&*router, params)?;

        let snapshot = router.snapshot(pool)?;
        if snapshot.total_shares.is_zero() {
            return Err(ZapError::EmptyPool);
        }

        // proportional floor estimate; the pool's reported amounts are
        // authoritative, these only feed the minimum bounds
        let expected_x = mul_div(
            snapshot.reserve_x,
            share_amount,
            snapshot.total_shares,
            Rounding::Floor,
        )?;
        let expected_y = mul_div(
            snapshot.reserve_y,
            share_amount,
            snapshot.total_shares,
            Rounding::Floor,
        )?;
        let min_x = apply_bps_floor(expected_x, params.slippage_bps)?;
        let min_y = apply_bps_floor(expected_y, params.slippage_bps)?;

        let (amount_x, amount_y) = router.remove_liquidity(
            pool,
            share_amount,
            min_x,
            min_y,
            params.recipient,
            params.deadline,
        )?;
        debug!(
            ?pool,
            shares = %share_amount,
            amount_x = %amount_x,
            amount_y = %amount_y,
            "liquidity removed"
        );
        Ok(RemoveOutcome { amount_x, amount_y })
    }
}
