//! Error handling for the engine

use thiserror::Error;

/// Initialization failures, raised synchronously before any swap attempt
#[derive(Error, Debug)]
pub enum InitError {
    #[error("wallet/provider unavailable: {0}")]
    Wallet(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Price oracle failures; degrade live quoting only, never block execution
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("price request failed: {0}")]
    Http(String),

    #[error("malformed price response: {0}")]
    Malformed(String),
}

/// Raw chain-read failures (JSON-RPC)
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Pool resolution failures; abort the attempt before any transaction exists
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no pool found for token {0}")]
    PoolNotFound(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Trade construction failures on degenerate input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("input amount is zero")]
    ZeroInput,

    #[error("pool has a zero reserve")]
    DegeneratePool,

    #[error("input amount too large to price")]
    InputTooLarge,

    #[error("invalid slippage tolerance: {0}/{1}")]
    InvalidSlippage(u64, u64),
}

/// Transaction assembly failures
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("calldata encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Structured rejection from the wallet/provider boundary
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("user rejected the signature request: {0}")]
    Rejected(String),

    #[error("insufficient funds for value plus gas")]
    InsufficientFunds,

    #[error("broadcast failed: {0}")]
    Rpc(String),

    #[error("transaction reverted on-chain: {0}")]
    Reverted(String),
}

/// Umbrella error for the swap pipeline
#[derive(Error, Debug)]
pub enum SwapError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),
}
