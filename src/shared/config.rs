//! Engine configuration with documented BSC defaults

use anyhow::{Context, Result};
use ethers::types::Address;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::shared::errors::InitError;
use crate::shared::types::{SlippageTolerance, Token};

/// BSC mainnet chain id.
pub const BSC_CHAIN_ID: u64 = 56;
/// Public default RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://bsc-dataseed.binance.org/";
/// PancakeSwap V2 router.
pub const DEFAULT_ROUTER: &str = "0x10ED43C718714eb63d5aA57B78B54704E256024E";
/// PancakeSwap V2 factory.
pub const DEFAULT_FACTORY: &str = "0xcA143Ce32Fe78f1f7019d7d551a6402fC5350c73";
/// Wrapped BNB, the base-currency side of every pair.
pub const WBNB_ADDRESS: &str = "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c";
/// PancakeSwap token price index.
pub const DEFAULT_PRICE_API_URL: &str = "https://api.pancakeswap.info/api/v2";
/// Fixed gas price in wei (no dynamic estimation in this version).
pub const DEFAULT_GAS_PRICE_WEI: u64 = 2_100_000_000;
/// Fixed gas limit (no dynamic estimation in this version).
pub const DEFAULT_GAS_LIMIT: u64 = 210_000;
/// Deadline window for the router call, enforced on-chain.
pub const DEADLINE_WINDOW_SECS: u64 = 20 * 60;

/// Full caller-supplied configuration for one wallet and one target token
#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub router: Address,
    pub factory: Address,
    pub wbnb: Address,
    pub price_api_url: String,

    pub wallet_address: Address,
    pub token_address: Address,
    pub token_decimals: u8,
    pub token_symbol: String,

    pub slippage: SlippageTolerance,
    pub gas_price_wei: u64,
    pub gas_limit: u64,
    pub deadline_secs: u64,
}

impl SwapConfig {
    /// Defaults for a target token on BSC mainnet.
    pub fn for_token(
        token_address: Address,
        token_decimals: u8,
        token_symbol: &str,
        wallet_address: Address,
    ) -> Self {
        Self {
            chain_id: BSC_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            router: static_address(DEFAULT_ROUTER),
            factory: static_address(DEFAULT_FACTORY),
            wbnb: static_address(WBNB_ADDRESS),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            wallet_address,
            token_address,
            token_decimals,
            token_symbol: token_symbol.to_string(),
            slippage: SlippageTolerance::default(),
            gas_price_wei: DEFAULT_GAS_PRICE_WEI,
            gas_limit: DEFAULT_GAS_LIMIT,
            deadline_secs: DEADLINE_WINDOW_SECS,
        }
    }

    /// The token being bought.
    pub fn target_token(&self) -> Token {
        Token::new(
            self.chain_id,
            self.token_address,
            self.token_decimals,
            &self.token_symbol,
        )
    }

    /// Native BNB, identified by its wrapped form on-chain.
    pub fn base_token(&self) -> Token {
        Token::new(self.chain_id, self.wbnb, 18, "BNB")
    }
}

/// Per-field overrides applied on top of a file-derived config.
/// Callers (the CLI) win over the file, which wins over defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub token_address: Option<Address>,
    pub token_decimals: Option<u8>,
    pub token_symbol: Option<String>,
    pub wallet_address: Option<Address>,
}

impl SwapConfig {
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(rpc_url) = overrides.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(token_address) = overrides.token_address {
            self.token_address = token_address;
        }
        if let Some(token_decimals) = overrides.token_decimals {
            self.token_decimals = token_decimals;
        }
        if let Some(token_symbol) = overrides.token_symbol {
            self.token_symbol = token_symbol;
        }
        if let Some(wallet_address) = overrides.wallet_address {
            self.wallet_address = wallet_address;
        }
    }
}

/// On-disk configuration, merged over defaults
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub rpc: Option<RpcCfg>,
    pub wallet: WalletCfg,
    pub token: TokenCfg,
    pub contracts: Option<ContractsCfg>,
    pub gas: Option<GasCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletCfg {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCfg {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractsCfg {
    pub router: Option<String>,
    pub factory: Option<String>,
    pub wbnb: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GasCfg {
    pub gas_price_wei: Option<u64>,
    pub gas_limit: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse config file")?;
        Ok(cfg)
    }
}

impl TryFrom<FileConfig> for SwapConfig {
    type Error = InitError;

    fn try_from(file: FileConfig) -> Result<Self, InitError> {
        let wallet = parse_address(&file.wallet.address)?;
        let token = parse_address(&file.token.address)?;
        let mut cfg =
            SwapConfig::for_token(token, file.token.decimals, &file.token.symbol, wallet);
        if let Some(rpc) = file.rpc {
            cfg.rpc_url = rpc.url;
        }
        if let Some(contracts) = file.contracts {
            if let Some(router) = contracts.router {
                cfg.router = parse_address(&router)?;
            }
            if let Some(factory) = contracts.factory {
                cfg.factory = parse_address(&factory)?;
            }
            if let Some(wbnb) = contracts.wbnb {
                cfg.wbnb = parse_address(&wbnb)?;
            }
        }
        if let Some(gas) = file.gas {
            if let Some(gas_price) = gas.gas_price_wei {
                cfg.gas_price_wei = gas_price;
            }
            if let Some(gas_limit) = gas.gas_limit {
                cfg.gas_limit = gas_limit;
            }
        }
        Ok(cfg)
    }
}

pub fn parse_address(s: &str) -> Result<Address, InitError> {
    s.parse::<Address>()
        .map_err(|e| InitError::Config(format!("invalid address {}: {}", s, e)))
}

// Known-good literals above; a typo here is a programming error.
fn static_address(s: &str) -> Address {
    s.parse().expect("static address literal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bsc_mainnet() {
        let cfg = SwapConfig::for_token(
            static_address("0x000000000000000000000000000000000000dEaD"),
            18,
            "BITC",
            static_address("0x000000000000000000000000000000000000bEEF"),
        );
        assert_eq!(cfg.chain_id, 56);
        assert_eq!(cfg.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(cfg.router, static_address(DEFAULT_ROUTER));
        assert_eq!(cfg.gas_price_wei, 2_100_000_000);
        assert_eq!(cfg.gas_limit, 210_000);
        assert_eq!(cfg.deadline_secs, 1_200);
        assert_eq!(cfg.base_token().symbol, "BNB");
    }

    #[test]
    fn file_config_merges_over_defaults() {
        let toml_src = r#"
            [rpc]
            url = "https://bsc-dataseed1.defibit.io/"

            [wallet]
            address = "0x000000000000000000000000000000000000bEEF"

            [token]
            address = "0x000000000000000000000000000000000000dEaD"
            decimals = 9
            symbol = "BITC"

            [gas]
            gas_limit = 300000
        "#;
        let file: FileConfig = toml::from_str(toml_src).unwrap();
        let cfg = SwapConfig::try_from(file).unwrap();
        assert_eq!(cfg.rpc_url, "https://bsc-dataseed1.defibit.io/");
        assert_eq!(cfg.token_decimals, 9);
        assert_eq!(cfg.gas_limit, 300_000);
        // untouched defaults survive the merge
        assert_eq!(cfg.gas_price_wei, DEFAULT_GAS_PRICE_WEI);
        assert_eq!(cfg.factory, static_address(DEFAULT_FACTORY));
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let toml_src = r#"
            [wallet]
            address = "0x000000000000000000000000000000000000bEEF"

            [token]
            address = "0x000000000000000000000000000000000000dEaD"
            decimals = 18
            symbol = "BITC"
        "#;
        let file: FileConfig = toml::from_str(toml_src).unwrap();
        let mut cfg = SwapConfig::try_from(file).unwrap();
        cfg.apply_overrides(ConfigOverrides {
            rpc_url: Some("https://bsc-dataseed1.ninicoin.io/".to_string()),
            token_address: Some(static_address(
                "0x0000000000000000000000000000000000000Fee",
            )),
            token_decimals: Some(9),
            token_symbol: Some("OTHER".to_string()),
            wallet_address: None,
        });
        assert_eq!(cfg.rpc_url, "https://bsc-dataseed1.ninicoin.io/");
        assert_eq!(
            cfg.token_address,
            static_address("0x0000000000000000000000000000000000000Fee")
        );
        assert_eq!(cfg.token_decimals, 9);
        assert_eq!(cfg.token_symbol, "OTHER");
        // absent override leaves the file value in place
        assert_eq!(
            cfg.wallet_address,
            static_address("0x000000000000000000000000000000000000bEEF")
        );
    }

    #[test]
    fn bad_address_is_a_config_error() {
        assert!(parse_address("not-an-address").is_err());
    }
}
