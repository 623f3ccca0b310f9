//! Pool resolution against the pair factory
//!
//! Every swap attempt re-resolves; nothing is cached, so pricing never
//! runs against stale reserves.

use ethers::types::Address;
use std::sync::Arc;
use tracing::info;

use crate::chain::ChainReader;
use crate::shared::errors::ResolveError;
use crate::shared::types::{Amount, Pool, Token};

pub struct PoolResolver {
    chain: Arc<dyn ChainReader>,
    factory: Address,
    wbnb: Address,
    chain_id: u64,
}

impl PoolResolver {
    pub fn new(
        chain: Arc<dyn ChainReader>,
        factory: Address,
        wbnb: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            chain,
            factory,
            wbnb,
            chain_id,
        }
    }

    /// Locate the unique WBNB/token pair and read its current reserves.
    pub async fn resolve_pool(&self, token: &Token) -> Result<Pool, ResolveError> {
        let pair = self
            .chain
            .pair_for(self.factory, self.wbnb, token.address)
            .await?;
        if pair.is_zero() {
            return Err(ResolveError::PoolNotFound(token.symbol.clone()));
        }

        let state = self.chain.pair_state(pair).await?;

        // Pair contracts store reserve0 for the lower-addressed token.
        let (base_raw, target_raw) = if self.wbnb < token.address {
            (state.reserve0, state.reserve1)
        } else {
            (state.reserve1, state.reserve0)
        };

        let base_token = Token::new(self.chain_id, self.wbnb, 18, "BNB");
        let pool = Pool {
            pair_address: pair,
            base_reserve: Amount::from_raw(base_token, base_raw),
            target_reserve: Amount::from_raw(token.clone(), target_raw),
        };
        info!(
            "Resolved pool {:?} for {}: reserves {} / {}",
            pair, token.symbol, pool.base_reserve, pool.target_reserve
        );
        Ok(pool)
    }
}
