//! Router transaction assembly
//!
//! Turns a built trade into a signed-ready `swapExactETHForTokens` call:
//! input amount attached as value, minimum output as the slippage guard,
//! deadline enforced by the router contract, nonce from a fresh
//! transaction-count read.

use chrono::Utc;
use ethers::abi::parse_abi;
use ethers::contract::BaseContract;
use ethers::types::{Address, U256};
use std::sync::Arc;
use tracing::info;

use crate::chain::ChainReader;
use crate::shared::errors::AssembleError;
use crate::shared::types::{Trade, TransactionRequest};

pub struct TransactionAssembler {
    chain: Arc<dyn ChainReader>,
    router: Address,
    wbnb: Address,
    gas_price: U256,
    gas_limit: U256,
    deadline_secs: u64,
    router_abi: BaseContract,
}

impl TransactionAssembler {
    pub fn new(
        chain: Arc<dyn ChainReader>,
        router: Address,
        wbnb: Address,
        gas_price_wei: u64,
        gas_limit: u64,
        deadline_secs: u64,
    ) -> Self {
        // Static ABI; a typo here is a programming error.
        let router_abi = BaseContract::from(
            parse_abi(&[
                "function swapExactETHForTokens(uint256 amountOutMin, address[] path, address to, uint256 deadline) returns (uint256[])",
            ])
            .expect("static router abi"),
        );
        Self {
            chain,
            router,
            wbnb,
            gas_price: U256::from(gas_price_wei),
            gas_limit: U256::from(gas_limit),
            deadline_secs,
            router_abi,
        }
    }

    /// Assemble the router call for `trade` from `wallet`. The deadline is
    /// a pass-through safety bound checked by the chain, not re-validated
    /// here before submission.
    pub async fn assemble(
        &self,
        trade: &Trade,
        wallet: Address,
    ) -> Result<TransactionRequest, AssembleError> {
        let deadline = U256::from(Utc::now().timestamp() as u64 + self.deadline_secs);
        let path = vec![self.wbnb, trade.output.token().address];
        let data = self
            .router_abi
            .encode(
                "swapExactETHForTokens",
                (trade.minimum_output.raw(), path, wallet, deadline),
            )
            .map_err(|e| AssembleError::Encode(e.to_string()))?;

        // Raced against broadcast; the engine holds the per-wallet lock
        // across this read and the submission.
        let nonce = self.chain.transaction_count(wallet).await?;

        let request = TransactionRequest {
            from: wallet,
            to: self.router,
            value: trade.input.raw(),
            data,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            nonce,
        };
        info!(
            "Assembled swap tx: value={} min_out={} nonce={}",
            trade.input, trade.minimum_output, nonce
        );
        Ok(request)
    }
}
