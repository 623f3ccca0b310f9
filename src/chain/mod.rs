//! Chain-read capability over BSC JSON-RPC

pub mod rpc_client;

use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::shared::errors::ChainError;

pub use rpc_client::BscRpcClient;

/// Raw reserves of one pair contract. Pair contracts order reserves by
/// token address (token0 < token1), so callers re-orient them locally.
#[derive(Debug, Clone, Copy)]
pub struct PairState {
    pub reserve0: U256,
    pub reserve1: U256,
}

/// Every on-chain read the engine performs, as an explicit capability
/// so resolution and assembly are testable without a live endpoint.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Factory lookup; returns the zero address when no pair exists.
    async fn pair_for(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, ChainError>;

    async fn pair_state(&self, pair: Address) -> Result<PairState, ChainError>;

    async fn balance_of(&self, wallet: Address) -> Result<U256, ChainError>;

    /// Current transaction count, used as the next nonce. Not atomic with
    /// broadcast; the engine serializes assemble-then-submit per wallet.
    async fn transaction_count(&self, wallet: Address) -> Result<U256, ChainError>;
}
