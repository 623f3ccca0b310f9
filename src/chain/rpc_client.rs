//! BSC RPC client for direct chain reading

use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U256};
use std::sync::Arc;

use super::{ChainReader, PairState};
use crate::shared::config::DEFAULT_RPC_URL;
use crate::shared::errors::{ChainError, InitError};

abigen!(
    IPancakeFactory,
    r#"[
        function getPair(address tokenA, address tokenB) external view returns (address pair)
    ]"#
);

abigen!(
    IPancakePair,
    r#"[
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast)
    ]"#
);

/// `ethers` JSON-RPC provider wrapper
pub struct BscRpcClient {
    provider: Arc<Provider<Http>>,
}

impl BscRpcClient {
    pub fn new(rpc_url: &str) -> Result<Self, InitError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| InitError::Config(format!("invalid RPC URL {}: {}", rpc_url, e)))?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Default public BSC mainnet endpoint.
    pub fn new_mainnet() -> Result<Self, InitError> {
        Self::new(DEFAULT_RPC_URL)
    }
}

#[async_trait]
impl ChainReader for BscRpcClient {
    async fn pair_for(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, ChainError> {
        let factory = IPancakeFactory::new(factory, self.provider.clone());
        factory
            .get_pair(token_a, token_b)
            .call()
            .await
            .map_err(|e| ChainError::Rpc(format!("getPair failed: {}", e)))
    }

    async fn pair_state(&self, pair: Address) -> Result<PairState, ChainError> {
        let pair = IPancakePair::new(pair, self.provider.clone());
        let (reserve0, reserve1, _last_update) = pair
            .get_reserves()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(format!("getReserves failed: {}", e)))?;
        Ok(PairState {
            reserve0: U256::from(reserve0),
            reserve1: U256::from(reserve1),
        })
    }

    async fn balance_of(&self, wallet: Address) -> Result<U256, ChainError> {
        self.provider
            .get_balance(wallet, None)
            .await
            .map_err(|e| ChainError::Rpc(format!("balance read failed: {}", e)))
    }

    async fn transaction_count(&self, wallet: Address) -> Result<U256, ChainError> {
        self.provider
            .get_transaction_count(wallet, None)
            .await
            .map_err(|e| ChainError::Rpc(format!("nonce read failed: {}", e)))
    }
}
