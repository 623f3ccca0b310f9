use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use panswap::chain::BscRpcClient;
use panswap::gateway::WalletProvider;
use panswap::oracle::PancakePriceClient;
use panswap::shared::config::{parse_address, ConfigOverrides, FileConfig, SwapConfig};
use panswap::shared::errors::{InitError, WalletError};
use panswap::shared::types::TransactionRequest;
use panswap::SwapEngine;

#[derive(Parser, Debug)]
#[command(version, about = "PancakeSwap buy-side swap CLI for BSC pools")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// RPC endpoint URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Target token contract address
    #[arg(long)]
    token: Option<String>,

    /// Target token decimals
    #[arg(long)]
    token_decimals: Option<u8>,

    /// Target token symbol
    #[arg(long)]
    token_symbol: Option<String>,

    /// Wallet address the swap spends from
    #[arg(long)]
    wallet: Option<String>,

    /// BNB amount to spend, e.g. "0.5"
    #[arg(long)]
    amount: String,

    /// Only assemble the transaction without broadcasting
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    dry_run: bool,
}

/// Wallet stub for dry runs: logs the request instead of broadcasting.
struct DryRunWallet;

#[async_trait]
impl WalletProvider for DryRunWallet {
    async fn request_signature_and_broadcast(
        &self,
        request: &TransactionRequest,
    ) -> Result<String, WalletError> {
        info!(
            "Dry run, not broadcasting:\n{}",
            serde_json::to_string_pretty(&request.to_rpc_params()).unwrap_or_default()
        );
        Ok(format!("dry-run-{}", panswap::shared::utils::generate_id()))
    }
}

fn build_config(args: &Args) -> Result<SwapConfig> {
    // Priority: CLI args > config file > defaults
    let mut cfg = if let Some(path) = &args.config {
        SwapConfig::try_from(FileConfig::from_file(path)?)?
    } else {
        let token = args
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("--token is required when not using --config"))?;
        let wallet = args
            .wallet
            .as_deref()
            .ok_or_else(|| anyhow!("--wallet is required when not using --config"))?;
        SwapConfig::for_token(
            parse_address(token)?,
            args.token_decimals.unwrap_or(18),
            args.token_symbol.as_deref().unwrap_or("TOKEN"),
            parse_address(wallet)?,
        )
    };
    cfg.apply_overrides(ConfigOverrides {
        rpc_url: args.rpc_url.clone(),
        token_address: args.token.as_deref().map(parse_address).transpose()?,
        token_decimals: args.token_decimals,
        token_symbol: args.token_symbol.clone(),
        wallet_address: args.wallet.as_deref().map(parse_address).transpose()?,
    });
    Ok(cfg)
}

/// The CLI carries no key material, so live submission has no wallet
/// capability to delegate to.
fn ensure_dry_run(dry_run: bool) -> Result<(), InitError> {
    if dry_run {
        Ok(())
    } else {
        Err(InitError::Wallet(
            "live submission needs an injected wallet capability; this CLI only supports --dry-run true".to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    ensure_dry_run(args.dry_run)?;

    let cfg = build_config(&args)?;
    info!(
        "Buying {} with {} BNB via router {:?}",
        cfg.token_symbol, args.amount, cfg.router
    );

    let chain = Arc::new(BscRpcClient::new(&cfg.rpc_url)?);
    let oracle = Arc::new(PancakePriceClient::with_base_url(&cfg.price_api_url));
    let engine = SwapEngine::new(
        cfg,
        chain,
        oracle,
        Arc::new(DryRunWallet),
        Box::new(|tx_hash| println!("transaction complete: {}", tx_hash)),
        Box::new(|err| eprintln!("transaction failed: {}", err)),
    );

    // Display-only estimate; a failed fetch degrades quoting, not the swap.
    match engine.fetch_reference_price().await {
        Ok(price) => {
            let base: f64 = args.amount.parse()?;
            info!(
                "Reference price {} BNB; ~{:.6} {} for {} BNB",
                price.price_bnb,
                engine.quote_from_base(base, &price),
                engine.config().token_symbol,
                base
            );
        }
        Err(e) => warn!("Price unavailable, continuing without a live quote: {}", e),
    }

    let balance = engine.max_spendable().await?;
    info!("Wallet balance: {}", balance);

    let input = engine.base_amount(&args.amount)?;
    let outcome = engine.swap(input).await?;
    info!("Outcome: {:?}", outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            config: None,
            rpc_url: None,
            token: None,
            token_decimals: None,
            token_symbol: None,
            wallet: None,
            amount: "1.0".to_string(),
            dry_run: true,
        }
    }

    #[test]
    fn live_mode_is_an_init_failure() {
        assert!(ensure_dry_run(true).is_ok());
        let err = ensure_dry_run(false).unwrap_err();
        assert!(matches!(err, InitError::Wallet(_)));
    }

    #[test]
    fn cli_flags_override_the_config_file() {
        let path = std::env::temp_dir().join(format!(
            "panswap-cli-{}.toml",
            panswap::shared::utils::generate_id()
        ));
        std::fs::write(
            &path,
            r#"
                [wallet]
                address = "0x000000000000000000000000000000000000bEEF"

                [token]
                address = "0x000000000000000000000000000000000000dEaD"
                decimals = 18
                symbol = "BITC"
            "#,
        )
        .unwrap();

        let mut a = args();
        a.config = Some(path.to_string_lossy().into_owned());
        a.rpc_url = Some("https://bsc-dataseed1.defibit.io/".to_string());
        a.token = Some("0x0000000000000000000000000000000000000Fee".to_string());
        a.token_decimals = Some(9);
        a.token_symbol = Some("OTHER".to_string());

        let cfg = build_config(&a).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.rpc_url, "https://bsc-dataseed1.defibit.io/");
        assert_eq!(
            cfg.token_address,
            parse_address("0x0000000000000000000000000000000000000Fee").unwrap()
        );
        assert_eq!(cfg.token_decimals, 9);
        assert_eq!(cfg.token_symbol, "OTHER");
        // flags left unset keep the file values
        assert_eq!(
            cfg.wallet_address,
            parse_address("0x000000000000000000000000000000000000bEEF").unwrap()
        );
    }
}
