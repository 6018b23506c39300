//! In-memory constant-product pool for integration tests.
//!
//! Implements both collaborator traits with Uniswap V2 semantics: input-fee
//! swaps, optimal-amount deposits, proportional burns and a share ledger
//! with explicit authorization. The clock is manual so deadline behavior is
//! deterministic, and failures can be injected to exercise the unwind path.

use std::collections::HashMap;

use amm_zap::{
    mul_div, Address, AssetSide, DepositReceipt, PoolOracle, PoolRouter, Result, Rounding, U256,
    ZapError, BPS_DENOMINATOR,
};

pub const POOL: Address = Address::repeat_byte(0xaa);
pub const OWNER: Address = Address::repeat_byte(0x01);
pub const USER: Address = Address::repeat_byte(0x02);

pub struct MockPool {
    reserve_x: U256,
    reserve_y: U256,
    total_shares: U256,
    fee_bps: u32,
    now: u64,
    last_sync: u64,
    share_balances: HashMap<Address, U256>,
    authorized: HashMap<Address, U256>,
    /// When set, the next deposit fails with `InsufficientOutput`.
    pub fail_next_deposit: bool,
    /// Shaved off every swap output before the minimum check, to simulate
    /// an adverse move between quote and execution.
    pub swap_output_penalty: U256,
    pub swap_count: u32,
}

impl MockPool {
    /// Pool seeded with reserves and `sqrt(x·y)` shares minted to `OWNER`.
    pub fn seeded(fee_bps: u32, reserve_x: U256, reserve_y: U256) -> Self {
        let total_shares = (reserve_x * reserve_y).integer_sqrt();
        let mut share_balances = HashMap::new();
        share_balances.insert(OWNER, total_shares);
        Self {
            reserve_x,
            reserve_y,
            total_shares,
            fee_bps,
            now: 1_000,
            last_sync: 1_000,
            share_balances,
            authorized: HashMap::new(),
            fail_next_deposit: false,
            swap_output_penalty: U256::zero(),
            swap_count: 0,
        }
    }

    pub fn reserves(&self) -> (U256, U256) {
        (self.reserve_x, self.reserve_y)
    }

    pub fn total_shares(&self) -> U256 {
        self.total_shares
    }

    pub fn shares_of(&self, holder: Address) -> U256 {
        self.share_balances.get(&holder).copied().unwrap_or_default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.now += seconds;
    }

    pub fn authorize_shares(&mut self, holder: Address, amount: U256) {
        self.authorized.insert(holder, amount);
    }

    fn check_deadline(&self, deadline: u64) -> Result<()> {
        if deadline < self.now {
            return Err(ZapError::DeadlineExceeded {
                deadline,
                now: self.now,
            });
        }
        Ok(())
    }

    fn output_for(&self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
        let fee_adjusted = amount_in * U256::from(BPS_DENOMINATOR - self.fee_bps);
        let denominator = reserve_in * U256::from(BPS_DENOMINATOR) + fee_adjusted;
        mul_div(fee_adjusted, reserve_out, denominator, Rounding::Floor)
    }
}

impl PoolOracle for MockPool {
    fn get_reserves(&self, _pool: Address) -> Result<(U256, U256, u64)> {
        Ok((self.reserve_x, self.reserve_y, self.last_sync))
    }

    fn get_total_shares(&self, _pool: Address) -> Result<U256> {
        Ok(self.total_shares)
    }

    fn current_time(&self) -> u64 {
        self.now
    }
}

impl PoolRouter for MockPool {
    fn swap_exact_in(
        &mut self,
        _pool: Address,
        asset_in: AssetSide,
        amount_in: U256,
        min_amount_out: U256,
        _recipient: Address,
        deadline: u64,
    ) -> Result<U256> {
        self.check_deadline(deadline)?;
        let (reserve_in, reserve_out) = match asset_in {
            AssetSide::X => (self.reserve_x, self.reserve_y),
            AssetSide::Y => (self.reserve_y, self.reserve_x),
        };
        let amount_out = self
            .output_for(amount_in, reserve_in, reserve_out)?
            .saturating_sub(self.swap_output_penalty);
        if amount_out < min_amount_out {
            return Err(ZapError::SlippageExceeded {
                minimum: min_amount_out,
                actual: amount_out,
            });
        }
        match asset_in {
            AssetSide::X => {
                self.reserve_x += amount_in;
                self.reserve_y -= amount_out;
            }
            AssetSide::Y => {
                self.reserve_y += amount_in;
                self.reserve_x -= amount_out;
            }
        }
        self.swap_count += 1;
        self.last_sync = self.now;
        Ok(amount_out)
    }

    fn add_liquidity(
        &mut self,
        _pool: Address,
        amount_x_desired: U256,
        amount_y_desired: U256,
        amount_x_min: U256,
        amount_y_min: U256,
        recipient: Address,
        deadline: u64,
    ) -> Result<DepositReceipt> {
        self.check_deadline(deadline)?;
        if self.fail_next_deposit {
            self.fail_next_deposit = false;
            return Err(ZapError::InsufficientOutput);
        }

        // router optimal-amount rule: cut the oversupplied side to the ratio
        let y_optimal = mul_div(
            amount_x_desired,
            self.reserve_y,
            self.reserve_x,
            Rounding::Floor,
        )?;
        let (used_x, used_y) = if y_optimal <= amount_y_desired {
            (amount_x_desired, y_optimal)
        } else {
            let x_optimal = mul_div(
                amount_y_desired,
                self.reserve_x,
                self.reserve_y,
                Rounding::Floor,
            )?;
            (x_optimal, amount_y_desired)
        };
        if used_x < amount_x_min || used_y < amount_y_min {
            return Err(ZapError::InsufficientOutput);
        }

        let shares_minted = mul_div(used_x, self.total_shares, self.reserve_x, Rounding::Floor)?
            .min(mul_div(used_y, self.total_shares, self.reserve_y, Rounding::Floor)?);
        if shares_minted.is_zero() {
            return Err(ZapError::InsufficientOutput);
        }

        self.reserve_x += used_x;
        self.reserve_y += used_y;
        self.total_shares += shares_minted;
        *self.share_balances.entry(recipient).or_default() += shares_minted;
        self.last_sync = self.now;

        Ok(DepositReceipt {
            used_x,
            used_y,
            shares_minted,
        })
    }

    fn remove_liquidity(
        &mut self,
        _pool: Address,
        share_amount: U256,
        amount_x_min: U256,
        amount_y_min: U256,
        recipient: Address,
        deadline: u64,
    ) -> Result<(U256, U256)> {
        self.check_deadline(deadline)?;
        let balance = self.shares_of(recipient);
        let authorized = self.authorized.get(&recipient).copied().unwrap_or_default();
        let available = balance.min(authorized);
        if share_amount > available {
            return Err(ZapError::InsufficientShares {
                requested: share_amount,
                available,
            });
        }

        let amount_x = mul_div(self.reserve_x, share_amount, self.total_shares, Rounding::Floor)?;
        let amount_y = mul_div(self.reserve_y, share_amount, self.total_shares, Rounding::Floor)?;
        if amount_x < amount_x_min || amount_y < amount_y_min {
            return Err(ZapError::SlippageExceeded {
                minimum: amount_x_min.max(amount_y_min),
                actual: amount_x.min(amount_y),
            });
        }

        self.reserve_x -= amount_x;
        self.reserve_y -= amount_y;
        self.total_shares -= share_amount;
        *self.share_balances.entry(recipient).or_default() -= share_amount;
        *self.authorized.entry(recipient).or_default() -= share_amount;
        self.last_sync = self.now;

        Ok((amount_x, amount_y))
    }
}
