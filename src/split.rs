//! Single-sided deposit split
//!
//! Given one input amount of asset X and a reserve snapshot, decides how much
//! of it to swap into asset Y so that the remaining X and the received Y are
//! depositable at the pool's post-swap ratio with only rounding dust left
//! over. The swap-output formula here must stay bit-exact with the pool's
//! own; any deviation in fee precision or rounding direction breaks the
//! convergence bound.

use ethers_core::types::{U256, U512};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZapError};
use crate::fixed_point::{mul_div, narrow, Rounding, BPS_DENOMINATOR};

/// How one input amount divides between the swap leg and the deposit leg.
///
/// Invariant: `amount_to_swap + amount_to_keep` equals the input exactly; the
/// split itself neither creates nor destroys value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    /// Portion of the input to trade into the counter-asset.
    pub amount_to_swap: U256,
    /// Portion of the input to deposit as-is.
    pub amount_to_keep: U256,
    /// Counter-asset output the pool's formula yields for `amount_to_swap`
    /// at the snapshot reserves. An estimate for minimum-output protection;
    /// the deposit step must use the pool's actual reported output.
    pub expected_out: U256,
}

/// Solves the swap/keep split for single-sided deposits.
///
/// The pool's proportional fee is injected at construction so the calculator
/// can be validated against pools with different fee tiers.
#[derive(Debug, Clone)]
pub struct SplitCalculator {
    fee_bps: u32,
}

impl SplitCalculator {
    pub fn new(fee_bps: u32) -> Self {
        debug_assert!(fee_bps < BPS_DENOMINATOR, "fee must be a strict fraction");
        Self { fee_bps }
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Mirror of the pool's constant-product-with-fee output formula:
    /// `floor(in·F·reserve_out / (reserve_in·B + in·F))` with `B = 10_000`
    /// and `F = B − fee_bps`.
    pub fn swap_out(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(ZapError::EmptyPool);
        }
        let fee_adjusted = amount_in
            .checked_mul(U256::from(BPS_DENOMINATOR - self.fee_bps))
            .ok_or(ZapError::ArithmeticOverflow)?;
        let denominator = reserve_in
            .checked_mul(U256::from(BPS_DENOMINATOR))
            .and_then(|scaled| scaled.checked_add(fee_adjusted))
            .ok_or(ZapError::ArithmeticOverflow)?;
        mul_div(fee_adjusted, reserve_out, denominator, Rounding::Floor)
    }

    /// Splits `in_x` against reserves `(reserve_x, reserve_y)`.
    ///
    /// # Errors
    /// [`ZapError::EmptyPool`] if either reserve is zero (first deposits take
    /// a different path, outside this crate), [`ZapError::DustInput`] if the
    /// input is too small for the fee-adjusted formula to produce a positive
    /// swap output.
    pub fn split(&self, in_x: U256, reserve_x: U256, reserve_y: U256) -> Result<SplitResult> {
        if reserve_x.is_zero() || reserve_y.is_zero() {
            return Err(ZapError::EmptyPool);
        }

        let amount_to_swap = self.solve_swap_amount(in_x, reserve_x)?;
        if amount_to_swap.is_zero() {
            return Err(ZapError::DustInput { amount: in_x });
        }
        let expected_out = self.swap_out(amount_to_swap, reserve_x, reserve_y)?;
        if expected_out.is_zero() {
            return Err(ZapError::DustInput { amount: in_x });
        }

        Ok(SplitResult {
            amount_to_swap,
            // swap amount is clamped to [0, in_x] by the solver
            amount_to_keep: in_x - amount_to_swap,
            expected_out,
        })
    }

    /// Positive root of the split quadratic.
    ///
    /// Requiring the post-swap deposit `(in − s, y_out)` to match the
    /// post-swap ratio `(rx + s, ry − y_out)` with `y_out = swap_out(s)`
    /// reduces to `F·s² + rx·(B + F)·s − B·rx·in = 0`, so
    /// `s = (sqrt(rx²·(B+F)² + 4·F·B·rx·in) − rx·(B+F)) / (2F)`.
    /// The root is floor-rounded before clamping: floor keeps `s` at or
    /// under the exact root, so leftover lands on the still-held supplied
    /// asset instead of over-swapping into the counter-asset.
    fn solve_swap_amount(&self, in_x: U256, reserve_x: U256) -> Result<U256> {
        let b = U512::from(BPS_DENOMINATOR);
        let f = U512::from(BPS_DENOMINATOR - self.fee_bps);
        let rx = U512::from(reserve_x);

        // rx·(B+F) and the discriminant, all in 512 bits
        let rx_scaled = rx
            .checked_mul(b + f)
            .ok_or(ZapError::ArithmeticOverflow)?;
        let linear_term = (U512::from(4u64) * f * b)
            .checked_mul(rx)
            .and_then(|term| term.checked_mul(U512::from(in_x)))
            .ok_or(ZapError::ArithmeticOverflow)?;
        let discriminant = rx_scaled
            .checked_mul(rx_scaled)
            .and_then(|squared| squared.checked_add(linear_term))
            .ok_or(ZapError::ArithmeticOverflow)?;

        let root = discriminant.integer_sqrt();
        if root <= rx_scaled {
            return Ok(U256::zero());
        }

        let swap = (root - rx_scaled) / (f * U512::from(2u64));
        narrow(swap.min(U512::from(in_x)))
    }
}
