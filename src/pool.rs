//! Pool collaborator contract
//!
//! The external constant-product pool is reached through two trait seams: a
//! read-only [`PoolOracle`] and a mutating [`PoolRouter`]. The crate never
//! implements a pool itself; it computes against one consistent snapshot and
//! drives the router's primitives.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZapError};

/// One consistent view of a pool's state.
///
/// `reserve_x` and `reserve_y` come from a single atomic read; liquidity math
/// against two interleaved reads is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub reserve_x: U256,
    pub reserve_y: U256,
    pub total_shares: U256,
    /// Pool-side timestamp of the last reserve sync.
    pub last_sync: u64,
}

/// Which side of the pair an amount belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetSide {
    X,
    Y,
}

/// Read-only pool queries. Pure; never mutates pool state.
pub trait PoolOracle {
    /// Returns `(reserve_x, reserve_y, last_sync_time)` from one atomic read.
    fn get_reserves(&self, pool: Address) -> Result<(U256, U256, u64)>;

    /// Total outstanding pool shares.
    fn get_total_shares(&self, pool: Address) -> Result<U256>;

    /// The collaborator's clock, i.e. block time in the reference
    /// environment. Deadlines are checked against this, not wall-clock.
    fn current_time(&self) -> u64;

    /// Reserves and share supply bundled into one snapshot value.
    fn snapshot(&self, pool: Address) -> Result<PoolSnapshot> {
        let (reserve_x, reserve_y, last_sync) = self.get_reserves(pool)?;
        let total_shares = self.get_total_shares(pool)?;
        Ok(PoolSnapshot {
            reserve_x,
            reserve_y,
            total_shares,
            last_sync,
        })
    }
}

/// Amounts the pool actually consumed for a deposit, and the shares it minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub used_x: U256,
    pub used_y: U256,
    pub shares_minted: U256,
}

/// Mutating pool primitives.
///
/// A deposit consumes at most the offered amounts; leftovers stay with the
/// caller. Every primitive enforces its own deadline and minimum-output
/// protection and reports the amounts it actually moved.
pub trait PoolRouter {
    fn swap_exact_in(
        &mut self,
        pool: Address,
        asset_in: AssetSide,
        amount_in: U256,
        min_amount_out: U256,
        recipient: Address,
        deadline: u64,
    ) -> Result<U256>;

    #[allow(clippy::too_many_arguments)]
    fn add_liquidity(
        &mut self,
        pool: Address,
        amount_x_desired: U256,
        amount_y_desired: U256,
        amount_x_min: U256,
        amount_y_min: U256,
        recipient: Address,
        deadline: u64,
    ) -> Result<DepositReceipt>;

    fn remove_liquidity(
        &mut self,
        pool: Address,
        share_amount: U256,
        amount_x_min: U256,
        amount_y_min: U256,
        recipient: Address,
        deadline: u64,
    ) -> Result<(U256, U256)>;
}

/// Per-call parameters shared by every public operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallParams {
    /// Receiver of shares, swap output and residuals.
    pub recipient: Address,
    /// Pool-time deadline; the call fails rather than settle a stale snapshot.
    pub deadline: u64,
    /// Tolerance applied to every minimum-output bound, in basis points.
    pub slippage_bps: u32,
}

/// Rejects the call up front when the deadline has already passed.
pub(crate) fn check_deadline<O: PoolOracle>(oracle: &O, params: &CallParams) -> Result<()> {
    let now = oracle.current_time();
    if params.deadline < now {
        return Err(ZapError::DeadlineExceeded {
            deadline: params.deadline,
            now,
        });
    }
    Ok(())
}
