//! Exact-input trade construction against pool reserves

use ethers::types::U256;
use tracing::debug;

use crate::shared::errors::BuildError;
use crate::shared::types::{Amount, Pool, SlippageTolerance, Trade};

/// PancakeSwap V2 charges 0.25%: inputs count at 9975/10000.
pub const FEE_NUMERATOR: u64 = 9975;
pub const FEE_DENOMINATOR: u64 = 10_000;

pub struct TradeBuilder {
    slippage: SlippageTolerance,
}

impl TradeBuilder {
    pub fn new(slippage: SlippageTolerance) -> Self {
        Self { slippage }
    }

    /// Build an exact-input trade: derive the pool-curve output for
    /// `input` and bound it with the slippage tolerance. The output is a
    /// deterministic function of the input and the reserves at call time.
    pub fn build_trade(&self, pool: &Pool, input: Amount) -> Result<Trade, BuildError> {
        if input.is_zero() {
            return Err(BuildError::ZeroInput);
        }
        if !pool.is_usable() {
            return Err(BuildError::DegeneratePool);
        }

        let out_raw = amount_out(
            input.raw(),
            pool.base_reserve.raw(),
            pool.target_reserve.raw(),
        )?;
        let min_raw = self.slippage.minimum_out(out_raw);
        debug!(
            "Trade priced: in={} out_raw={} min_raw={}",
            input, out_raw, min_raw
        );

        let target = pool.target_reserve.token().clone();
        Ok(Trade {
            pool: pool.clone(),
            input,
            output: Amount::from_raw(target.clone(), out_raw),
            minimum_output: Amount::from_raw(target, min_raw),
        })
    }
}

impl Default for TradeBuilder {
    fn default() -> Self {
        Self::new(SlippageTolerance::default())
    }
}

/// Constant-product output with the pool fee applied to the input:
/// `out = in*9975*reserve_out / (reserve_in*10000 + in*9975)`.
/// Reserves are uint112 on-chain, but the input is caller-supplied and
/// unbounded; an input whose intermediates overflow U256 cannot be
/// honored and is rejected.
fn amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, BuildError> {
    let amount_in_with_fee = amount_in
        .checked_mul(U256::from(FEE_NUMERATOR))
        .ok_or(BuildError::InputTooLarge)?;
    let numerator = amount_in_with_fee
        .checked_mul(reserve_out)
        .ok_or(BuildError::InputTooLarge)?;
    let denominator = reserve_in
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|d| d.checked_add(amount_in_with_fee))
        .ok_or(BuildError::InputTooLarge)?;
    Ok(numerator / denominator)
}
