//! Submission gateway over the injected wallet capability
//!
//! Never signs and holds no key material; a failed submission is terminal
//! for that attempt.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::shared::errors::WalletError;
use crate::shared::types::TransactionRequest;
use crate::shared::utils::generate_id;

/// The wallet/provider boundary: one signing-and-broadcast operation.
/// Implementations receive the fully-formed request and return the
/// transaction hash or a structured rejection.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request_signature_and_broadcast(
        &self,
        request: &TransactionRequest,
    ) -> Result<String, WalletError>;
}

/// Why a submission failed, for exhaustive matching by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitFailureKind {
    Rejected,
    InsufficientFunds,
    Rpc,
    Reverted,
}

impl WalletError {
    pub fn kind(&self) -> SubmitFailureKind {
        match self {
            WalletError::Rejected(_) => SubmitFailureKind::Rejected,
            WalletError::InsufficientFunds => SubmitFailureKind::InsufficientFunds,
            WalletError::Rpc(_) => SubmitFailureKind::Rpc,
            WalletError::Reverted(_) => SubmitFailureKind::Reverted,
        }
    }
}

/// Tagged outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        tx_hash: String,
    },
    Failure {
        kind: SubmitFailureKind,
        detail: String,
    },
}

pub type TransactionCompleteFn = Box<dyn Fn(&str) + Send + Sync>;
pub type TransactionErrorFn = Box<dyn Fn(&WalletError) + Send + Sync>;

pub struct SubmissionGateway {
    wallet: Arc<dyn WalletProvider>,
    on_complete: TransactionCompleteFn,
    on_error: TransactionErrorFn,
}

impl SubmissionGateway {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        on_complete: TransactionCompleteFn,
        on_error: TransactionErrorFn,
    ) -> Self {
        Self {
            wallet,
            on_complete,
            on_error,
        }
    }

    /// Hand the request to the wallet and report the outcome. Exactly one
    /// of the two callbacks fires per attempt; no retry.
    pub async fn submit(&self, request: TransactionRequest) -> SubmissionOutcome {
        let attempt = generate_id();
        info!(
            "Submitting swap attempt {}: nonce={} value={:#x}",
            attempt, request.nonce, request.value
        );

        match self.wallet.request_signature_and_broadcast(&request).await {
            Ok(tx_hash) => {
                info!("Attempt {} broadcast as {}", attempt, tx_hash);
                (self.on_complete)(&tx_hash);
                SubmissionOutcome::Success { tx_hash }
            }
            Err(err) => {
                error!("Attempt {} failed: {}", attempt, err);
                (self.on_error)(&err);
                SubmissionOutcome::Failure {
                    kind: err.kind(),
                    detail: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, Bytes, U256};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RejectingWallet;

    #[async_trait]
    impl WalletProvider for RejectingWallet {
        async fn request_signature_and_broadcast(
            &self,
            _request: &TransactionRequest,
        ) -> Result<String, WalletError> {
            Err(WalletError::Rejected("user declined".into()))
        }
    }

    struct AcceptingWallet;

    #[async_trait]
    impl WalletProvider for AcceptingWallet {
        async fn request_signature_and_broadcast(
            &self,
            _request: &TransactionRequest,
        ) -> Result<String, WalletError> {
            Ok("0xabc123".to_string())
        }
    }

    fn request() -> TransactionRequest {
        TransactionRequest {
            from: Address::zero(),
            to: Address::zero(),
            value: U256::one(),
            data: Bytes::new(),
            gas_price: U256::one(),
            gas_limit: U256::one(),
            nonce: U256::zero(),
        }
    }

    #[tokio::test]
    async fn rejection_fires_error_callback_exactly_once() {
        static COMPLETED: AtomicUsize = AtomicUsize::new(0);
        static ERRORED: AtomicUsize = AtomicUsize::new(0);

        let gateway = SubmissionGateway::new(
            Arc::new(RejectingWallet),
            Box::new(|_| {
                COMPLETED.fetch_add(1, Ordering::SeqCst);
            }),
            Box::new(|_| {
                ERRORED.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let outcome = gateway.submit(request()).await;
        assert_eq!(COMPLETED.load(Ordering::SeqCst), 0);
        assert_eq!(ERRORED.load(Ordering::SeqCst), 1);
        match outcome {
            SubmissionOutcome::Failure { kind, detail } => {
                assert_eq!(kind, SubmitFailureKind::Rejected);
                assert!(detail.contains("user declined"));
            }
            SubmissionOutcome::Success { .. } => panic!("rejection must not succeed"),
        }
    }

    #[tokio::test]
    async fn success_surfaces_the_provider_hash() {
        static COMPLETED: AtomicUsize = AtomicUsize::new(0);

        let gateway = SubmissionGateway::new(
            Arc::new(AcceptingWallet),
            Box::new(|hash| {
                assert_eq!(hash, "0xabc123");
                COMPLETED.fetch_add(1, Ordering::SeqCst);
            }),
            Box::new(|_| panic!("no error expected")),
        );

        let outcome = gateway.submit(request()).await;
        assert_eq!(COMPLETED.load(Ordering::SeqCst), 1);
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                tx_hash: "0xabc123".to_string()
            }
        );
    }
}
