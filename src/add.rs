//! Liquidity adder
//!
//! Orchestrates snapshot → split → swap → deposit against the external pool
//! and returns whatever the deposit did not consume. The core holds no
//! balances across calls; every residual is reported back to the caller.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{Result, ZapError};
use crate::fixed_point::{apply_bps_floor, mul_div, Rounding};
use crate::pool::{check_deadline, AssetSide, CallParams, PoolOracle, PoolRouter};
use crate::split::SplitCalculator;

/// Result of an add operation: shares minted plus the leftover amounts the
/// deposit did not consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOutcome {
    pub shares_minted: U256,
    pub residual_x: U256,
    pub residual_y: U256,
}

/// Adds liquidity from a single asset or a pre-held pair.
#[derive(Debug, Clone)]
pub struct LiquidityAdder {
    splitter: SplitCalculator,
}

impl LiquidityAdder {
    pub fn new(splitter: SplitCalculator) -> Self {
        Self { splitter }
    }

    /// Converts a single-asset amount into a balanced deposit.
    ///
    /// The swap leg uses the calculator's estimate only for minimum-output
    /// protection; the deposit uses the pool's actually reported output. If
    /// the deposit fails after the swap landed, the swapped amount is traded
    /// back before the error propagates so nothing is stranded.
    pub fn add_single_asset<R>(
        &self,
        router: &mut R,
        pool: Address,
        in_x: U256,
        params: &CallParams,
    ) -> Result<AddOutcome>
    where
        R: PoolOracle + PoolRouter,
    {
        if in_x.is_zero() {
            return Err(ZapError::ZeroShares);
        }
        check_deadline(&*router, params)?;

        let snapshot = router.snapshot(pool)?;
        let split = self
            .splitter
            .split(in_x, snapshot.reserve_x, snapshot.reserve_y)?;
        debug!(
            ?pool,
            amount_to_swap = %split.amount_to_swap,
            amount_to_keep = %split.amount_to_keep,
            "split single-sided input"
        );

        let min_out = apply_bps_floor(split.expected_out, params.slippage_bps)?;
        let y_out = router.swap_exact_in(
            pool,
            AssetSide::X,
            split.amount_to_swap,
            min_out,
            params.recipient,
            params.deadline,
        )?;

        // project the deposit at post-swap reserves so the mins match what
        // the pool's optimal-amount rule will actually consume
        let reserve_x_post = snapshot
            .reserve_x
            .checked_add(split.amount_to_swap)
            .ok_or(ZapError::ArithmeticOverflow)?;
        let reserve_y_post = snapshot
            .reserve_y
            .checked_sub(y_out)
            .ok_or(ZapError::ArithmeticOverflow)?;
        let (expected_x, expected_y) = expected_deposit(
            reserve_x_post,
            reserve_y_post,
            split.amount_to_keep,
            y_out,
        )?;
        let min_x = apply_bps_floor(expected_x, params.slippage_bps)?;
        let min_y = apply_bps_floor(expected_y, params.slippage_bps)?;
        let receipt = match router.add_liquidity(
            pool,
            split.amount_to_keep,
            y_out,
            min_x,
            min_y,
            params.recipient,
            params.deadline,
        ) {
            Ok(receipt) => receipt,
            Err(deposit_err) => {
                // the swap already settled; unwind it so the counter-asset
                // is not left behind as an untracked balance
                warn!(?pool, amount = %y_out, "deposit failed after swap, reversing trade");
                if let Err(reverse_err) = router.swap_exact_in(
                    pool,
                    AssetSide::Y,
                    y_out,
                    U256::zero(),
                    params.recipient,
                    params.deadline,
                ) {
                    error!(
                        ?pool,
                        stranded = %y_out,
                        %reverse_err,
                        "reverse trade failed, counter-asset left with recipient"
                    );
                }
                return Err(deposit_err);
            }
        };

        let outcome = AddOutcome {
            shares_minted: receipt.shares_minted,
            residual_x: split
                .amount_to_keep
                .checked_sub(receipt.used_x)
                .ok_or(ZapError::ArithmeticOverflow)?,
            residual_y: y_out
                .checked_sub(receipt.used_y)
                .ok_or(ZapError::ArithmeticOverflow)?,
        };
        debug!(
            ?pool,
            shares = %outcome.shares_minted,
            residual_x = %outcome.residual_x,
            residual_y = %outcome.residual_y,
            "single-asset liquidity added"
        );
        Ok(outcome)
    }

    /// Deposits a pre-held pair directly.
    ///
    /// The pool decides how much of the larger-supplied asset it actually
    /// needs at the current ratio; the excess comes back as residual.
    pub fn add_two_assets<R>(
        &self,
        router: &mut R,
        pool: Address,
        in_x: U256,
        in_y: U256,
        params: &CallParams,
    ) -> Result<AddOutcome>
    where
        R: PoolOracle + PoolRouter,
    {
        if in_x.is_zero() || in_y.is_zero() {
            return Err(ZapError::ZeroShares);
        }
        check_deadline(&*router, params)?;

        let snapshot = router.snapshot(pool)?;
        if snapshot.reserve_x.is_zero() || snapshot.reserve_y.is_zero() {
            return Err(ZapError::EmptyPool);
        }
        let (expected_x, expected_y) =
            expected_deposit(snapshot.reserve_x, snapshot.reserve_y, in_x, in_y)?;
        let min_x = apply_bps_floor(expected_x, params.slippage_bps)?;
        let min_y = apply_bps_floor(expected_y, params.slippage_bps)?;
        let receipt = router.add_liquidity(
            pool,
            in_x,
            in_y,
            min_x,
            min_y,
            params.recipient,
            params.deadline,
        )?;

        let outcome = AddOutcome {
            shares_minted: receipt.shares_minted,
            residual_x: in_x
                .checked_sub(receipt.used_x)
                .ok_or(ZapError::ArithmeticOverflow)?,
            residual_y: in_y
                .checked_sub(receipt.used_y)
                .ok_or(ZapError::ArithmeticOverflow)?,
        };
        debug!(
            ?pool,
            shares = %outcome.shares_minted,
            residual_x = %outcome.residual_x,
            residual_y = %outcome.residual_y,
            "two-asset liquidity added"
        );
        Ok(outcome)
    }
}

/// Projects which portions of the desired amounts a ratio-constrained deposit
/// will consume, mirroring the pool's own quote rule: the side in excess is
/// cut back to `other · reserve_ratio`, floor-rounded.
fn expected_deposit(
    reserve_x: U256,
    reserve_y: U256,
    x_desired: U256,
    y_desired: U256,
) -> Result<(U256, U256)> {
    let y_optimal = mul_div(x_desired, reserve_y, reserve_x, Rounding::Floor)?;
    if y_optimal <= y_desired {
        Ok((x_desired, y_optimal))
    } else {
        let x_optimal = mul_div(y_desired, reserve_x, reserve_y, Rounding::Floor)?;
        Ok((x_optimal, y_desired))
    }
}
