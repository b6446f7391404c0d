use ethers::types::{Address, U256};
use smartsend_client::ClientError;
use smartsend_contracts::ContractError;
use smartsend_primitives::{TransferError, WalletError};
use thiserror::Error;

/// Errors ending a run
#[derive(Debug, Error)]
pub enum SessionError {
    /// The bundler/paymaster credential is not configured
    #[error("{var} is not set, pass --api-key or add {var}=<key> to the env file")]
    MissingCredential {
        /// Name of the env entry
        var: &'static str,
    },

    /// The smart account cannot cover the transfer
    #[error(
        "smart account {account:?} holds {balance} base units, at least {required} are required \
         (request test tokens at {faucet})"
    )]
    InsufficientBalance {
        /// The smart account
        account: Address,
        /// Its balance in base units
        balance: U256,
        /// The required balance in base units
        required: U256,
        /// Where test tokens can be requested
        faucet: String,
    },

    /// The chain RPC endpoint serves another chain than the configured one
    #[error("chain mismatch: configured chain id {expected}, RPC endpoint serves {actual}")]
    ChainMismatch {
        /// Id of the configured chain
        expected: u64,
        /// Id reported by the endpoint
        actual: u64,
    },

    /// The chain RPC endpoint failed
    #[error("provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
