use ethers::types::{Address, H256};
use jsonrpsee::core::ClientError as RpcClientError;
use smartsend_contracts::ContractError;
use smartsend_primitives::{UserOperationHash, WalletError};
use std::time::Duration;
use thiserror::Error;

/// Errors of the bundler, paymaster and smart account clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint URL was rejected by the HTTP client
    #[error("invalid endpoint {url}: {inner}")]
    InvalidEndpoint {
        /// The rejected URL (without the credential)
        url: String,
        /// The inner error message
        inner: String,
    },

    /// JSON-RPC error returned by the bundler
    #[error("rpc error: {0}")]
    Rpc(RpcClientError),

    /// The remote call did not answer in time
    #[error("request timed out")]
    Timeout,

    /// The paymaster refused to sponsor the user operation
    #[error("sponsorship rejected: {0}")]
    Sponsorship(String),

    /// The bundler does not accept user operations for the entry point
    #[error("entry point {0:?} is not supported by the bundler")]
    UnsupportedEntryPoint(Address),

    /// Contract call error
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Signing error
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The user operation was included but its execution failed
    #[error("user operation {hash} reverted in transaction {tx:?}: {reason}")]
    Reverted {
        /// Hash of the user operation
        hash: UserOperationHash,
        /// Hash of the bundle transaction
        tx: H256,
        /// Revert reason reported by the bundler
        reason: String,
    },

    /// No receipt appeared before the deadline
    #[error("user operation {hash} was not included within {timeout:?}")]
    ReceiptTimeout {
        /// Hash of the user operation
        hash: UserOperationHash,
        /// How long was waited
        timeout: Duration,
    },
}

impl From<RpcClientError> for ClientError {
    fn from(err: RpcClientError) -> Self {
        match err {
            RpcClientError::RequestTimeout => ClientError::Timeout,
            err => ClientError::Rpc(err),
        }
    }
}

/// Strips the query (which carries the API key) from an endpoint URL before it is logged
pub(crate) fn redact_url(url: &str) -> &str {
    url.split_once('?').map(|(base, _)| base).unwrap_or(url)
}
