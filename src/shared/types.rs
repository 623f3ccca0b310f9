//! Common types used across the engine

use chrono::{DateTime, Utc};
use ethers::types::{Address, Bytes, U256};
use ethers::utils::{format_units, parse_units, ConversionError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::hash::{Hash, Hasher};

use crate::shared::errors::BuildError;

/// Token identity on one chain
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: &str) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.to_string(),
        }
    }
}

// Equality is address + chain; symbol and decimals are display metadata.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.chain_id == other.chain_id
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.chain_id.hash(state);
    }
}

/// A token quantity in the token's smallest unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    token: Token,
    raw: U256,
}

impl Amount {
    pub fn from_raw(token: Token, raw: U256) -> Self {
        Self { token, raw }
    }

    /// Parse a human-readable decimal string, exact for the token's decimals.
    /// More fractional digits than the token declares is an error.
    pub fn from_units(token: Token, value: &str) -> Result<Self, ConversionError> {
        let raw = parse_units(value, u32::from(token.decimals))?.into();
        Ok(Self { token, raw })
    }

    pub fn raw(&self) -> U256 {
        self.raw
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Render back to a human-readable decimal string.
    pub fn to_units(&self) -> String {
        format_units(self.raw, u32::from(self.token.decimals))
            .unwrap_or_else(|_| self.raw.to_string())
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_units(), self.token.symbol)
    }
}

/// One WBNB/token pair's reserves on one chain, fetched fresh per attempt
#[derive(Debug, Clone)]
pub struct Pool {
    pub pair_address: Address,
    pub base_reserve: Amount,
    pub target_reserve: Amount,
}

impl Pool {
    /// Both reserves strictly positive or the pool cannot price a trade.
    pub fn is_usable(&self) -> bool {
        !self.base_reserve.is_zero() && !self.target_reserve.is_zero()
    }
}

/// Maximum acceptable adverse price movement, as an exact rational fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageTolerance {
    numerator: u64,
    denominator: u64,
}

impl SlippageTolerance {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, BuildError> {
        if denominator == 0 || numerator >= denominator {
            return Err(BuildError::InvalidSlippage(numerator, denominator));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Worst-acceptable output for a nominal output, computed as
    /// `out * (denominator - numerator) / denominator` in integer math.
    /// Reserves are uint112 on-chain, so this stays well inside U256.
    pub fn minimum_out(&self, amount_out: U256) -> U256 {
        amount_out * U256::from(self.denominator - self.numerator) / U256::from(self.denominator)
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl Default for SlippageTolerance {
    /// The fixed 14% tolerance this engine ships with.
    fn default() -> Self {
        Self {
            numerator: 1400,
            denominator: 10_000,
        }
    }
}

/// Exact-input trade priced against one pool's reserves at construction time
#[derive(Debug, Clone)]
pub struct Trade {
    pub pool: Pool,
    pub input: Amount,
    pub output: Amount,
    pub minimum_output: Amount,
}

/// Signed-ready transaction payload, consumed exactly once by the gateway
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub gas_price: U256,
    pub gas_limit: U256,
    pub nonce: U256,
}

impl TransactionRequest {
    /// The `eth_sendTransaction`-shaped parameter object the wallet boundary
    /// expects, with every integer hex-encoded.
    pub fn to_rpc_params(&self) -> serde_json::Value {
        json!({
            "from": format!("{:?}", self.from),
            "to": format!("{:?}", self.to),
            "value": format!("{:#x}", self.value),
            "data": format!("0x{}", hex::encode(&self.data)),
            "gasPrice": format!("{:#x}", self.gas_price),
            "gasLimit": format!("{:#x}", self.gas_limit),
            "nonce": format!("{:#x}", self.nonce),
        })
    }
}

/// Off-chain reference price in BNB, display-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePrice {
    /// Decimal string exactly as the index quoted it.
    pub price_bnb: String,
    /// The index's own update timestamp (milliseconds).
    pub updated_at_ms: u64,
    pub fetched_at: DateTime<Utc>,
}

impl ReferencePrice {
    pub fn as_f64(&self) -> Option<f64> {
        self.price_bnb.parse::<f64>().ok()
    }
}
