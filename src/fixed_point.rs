//! Overflow-checked multiply-then-divide for EVM-width amounts
//!
//! Every multiply-divide in this crate routes through [`mul_div`]: a naive
//! `a * b` at 256 bits overflows before the division can reduce it, so the
//! product is taken through a 512-bit intermediate and only the final
//! quotient is narrowed back.

use ethers_core::types::{U256, U512};

use crate::error::{Result, ZapError};

/// Basis-point scale shared by fees and slippage tolerances (30 = 0.3%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Rounding direction for [`mul_div`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

/// Computes `a * b / denominator` with an explicit rounding direction.
///
/// The product is held in 512 bits, so the only overflow possible is the
/// final result not fitting 256 bits.
///
/// # Errors
/// [`ZapError::DivisionByZero`] if `denominator` is zero,
/// [`ZapError::ArithmeticOverflow`] if the quotient exceeds [`U256::MAX`].
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(ZapError::DivisionByZero);
    }

    let product = a.full_mul(b);
    let denominator = U512::from(denominator);
    let quotient = product / denominator;
    let quotient = match rounding {
        Rounding::Floor => quotient,
        Rounding::Ceil => {
            if (product % denominator).is_zero() {
                quotient
            } else {
                quotient
                    .checked_add(U512::one())
                    .ok_or(ZapError::ArithmeticOverflow)?
            }
        }
    };

    narrow(quotient)
}

/// Narrows a 512-bit intermediate back to 256 bits.
pub(crate) fn narrow(value: U512) -> Result<U256> {
    let mut bytes = [0u8; 64];
    value.to_big_endian(&mut bytes);
    if bytes[..32].iter().any(|&byte| byte != 0) {
        return Err(ZapError::ArithmeticOverflow);
    }
    Ok(U256::from_big_endian(&bytes[32..]))
}

/// Reduces `amount` by `bps` basis points, floor-rounded.
///
/// Used for slippage haircuts: the result is the minimum acceptable amount
/// for an external call quoted at `amount`.
pub fn apply_bps_floor(amount: U256, bps: u32) -> Result<U256> {
    if bps >= BPS_DENOMINATOR {
        return Ok(U256::zero());
    }
    mul_div(
        amount,
        U256::from(BPS_DENOMINATOR - bps),
        U256::from(BPS_DENOMINATOR),
        Rounding::Floor,
    )
}
