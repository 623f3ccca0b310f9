//! Swap pipeline orchestration
//!
//! Wires the resolver, builder, assembler and gateway behind one
//! `swap` operation. Owns no persistent market state: every attempt
//! re-reads reserves, balance and nonce.

use ethers::utils::ConversionError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::assembler::TransactionAssembler;
use crate::chain::ChainReader;
use crate::gateway::{
    SubmissionGateway, SubmissionOutcome, TransactionCompleteFn, TransactionErrorFn,
    WalletProvider,
};
use crate::oracle::PriceOracle;
use crate::quote;
use crate::resolver::PoolResolver;
use crate::shared::config::SwapConfig;
use crate::shared::errors::{ChainError, OracleError, SwapError};
use crate::shared::types::{Amount, ReferencePrice};
use crate::trade::TradeBuilder;

pub struct SwapEngine {
    config: SwapConfig,
    chain: Arc<dyn ChainReader>,
    oracle: Arc<dyn PriceOracle>,
    resolver: PoolResolver,
    builder: TradeBuilder,
    assembler: TransactionAssembler,
    gateway: SubmissionGateway,
    // Serializes assemble-then-submit per wallet so two rapid attempts
    // cannot read the same nonce.
    submit_lock: Mutex<()>,
}

impl SwapEngine {
    pub fn new(
        config: SwapConfig,
        chain: Arc<dyn ChainReader>,
        oracle: Arc<dyn PriceOracle>,
        wallet: Arc<dyn WalletProvider>,
        on_transaction_complete: TransactionCompleteFn,
        on_transaction_error: TransactionErrorFn,
    ) -> Self {
        let resolver = PoolResolver::new(
            chain.clone(),
            config.factory,
            config.wbnb,
            config.chain_id,
        );
        let builder = TradeBuilder::new(config.slippage);
        let assembler = TransactionAssembler::new(
            chain.clone(),
            config.router,
            config.wbnb,
            config.gas_price_wei,
            config.gas_limit,
            config.deadline_secs,
        );
        let gateway =
            SubmissionGateway::new(wallet, on_transaction_complete, on_transaction_error);
        Self {
            config,
            chain,
            oracle,
            resolver,
            builder,
            assembler,
            gateway,
            submit_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// One reference-price read for live quoting. Failure here only
    /// degrades the display path.
    pub async fn fetch_reference_price(&self) -> Result<ReferencePrice, OracleError> {
        self.oracle
            .fetch_reference_price(self.config.token_address)
            .await
    }

    /// Display-only estimate of tokens for a BNB amount.
    pub fn quote_from_base(&self, base_amount: f64, price: &ReferencePrice) -> f64 {
        quote::quote_from_base(base_amount, price.as_f64().unwrap_or(0.0))
    }

    /// Display-only estimate of BNB for a token amount.
    pub fn quote_from_target(&self, target_amount: f64, price: &ReferencePrice) -> f64 {
        quote::quote_from_target(target_amount, price.as_f64().unwrap_or(0.0))
    }

    /// The wallet's current spendable BNB balance.
    pub async fn max_spendable(&self) -> Result<Amount, ChainError> {
        let raw = self.chain.balance_of(self.config.wallet_address).await?;
        Ok(Amount::from_raw(self.config.base_token(), raw))
    }

    /// Parse a human-entered BNB amount into a base-currency Amount.
    pub fn base_amount(&self, value: &str) -> Result<Amount, ConversionError> {
        Amount::from_units(self.config.base_token(), value)
    }

    /// Run the full pipeline for an exact BNB input: resolve the pool
    /// fresh, price the trade, assemble the router call and hand it to
    /// the wallet. Errors before submission leave all state untouched;
    /// a retry re-reads everything.
    pub async fn swap(&self, base_amount: Amount) -> Result<SubmissionOutcome, SwapError> {
        let _guard = self.submit_lock.lock().await;

        let token = self.config.target_token();
        info!("Swap attempt: {} -> {}", base_amount, token.symbol);

        let pool = self.resolver.resolve_pool(&token).await?;
        let trade = self.builder.build_trade(&pool, base_amount)?;
        let request = self
            .assembler
            .assemble(&trade, self.config.wallet_address)
            .await?;
        Ok(self.gateway.submit(request).await)
    }
}
