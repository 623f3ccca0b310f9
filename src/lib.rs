//! Panswap - PancakeSwap buy-side swap engine
//! Quote, build and submit exact-input BNB-to-token trades on BSC

pub mod shared;
pub mod quote;
pub mod oracle;
pub mod chain;
pub mod resolver;
pub mod trade;
pub mod assembler;
pub mod gateway;
pub mod engine;

// Re-export main types for convenience
pub use assembler::TransactionAssembler;
pub use chain::{BscRpcClient, ChainReader};
pub use engine::SwapEngine;
pub use gateway::{SubmissionGateway, SubmissionOutcome, WalletProvider};
pub use oracle::{PancakePriceClient, PriceOracle};
pub use resolver::PoolResolver;
pub use shared::config::SwapConfig;
pub use trade::TradeBuilder;
