//! Off-chain reference price clients

pub mod pancake;

use async_trait::async_trait;
use ethers::types::Address;

use crate::shared::errors::OracleError;
use crate::shared::types::ReferencePrice;

pub use pancake::PancakePriceClient;

/// A third-party index quoting a token's price in base currency.
/// A failed fetch means "price unknown": live quoting degrades but
/// on-chain execution is unaffected.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn fetch_reference_price(&self, token: Address) -> Result<ReferencePrice, OracleError>;
}
