use crate::utils::{parse_address, parse_bytes, parse_chain, parse_gas_tier, parse_u256};
use alloy_chains::Chain;
use clap::Parser;
use ethers::types::{Address, Bytes, U256};
use expanded_pathbuf::ExpandedPathBuf;
use smartsend_primitives::{
    constants::{
        defaults::{
            API_KEY_VAR, ENV_FILE, MIN_BALANCE, NATIVE_CALL_DATA, PRIVATE_KEY_VAR, RECIPIENT,
            TRANSFER_AMOUNT,
        },
        entry_point,
        rpc::SEPOLIA_RPC_URL,
        simple_account::FACTORY_ADDRESS,
        tokens::{USDC_FAUCET, USDC_SEPOLIA},
    },
    GasTier,
};
use std::time::Duration;

/// Credentials, endpoints and account parameters shared by all commands
#[derive(Debug, Clone, Parser)]
pub struct SessionArgs {
    /// Bundler and paymaster API key.
    ///
    /// Falls back to the entry in the env file.
    #[clap(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Private key of the account owner (hex).
    ///
    /// Falls back to the entry in the env file; a new key is generated and appended to the env
    /// file when there is none.
    #[clap(long, env = PRIVATE_KEY_VAR, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Env file holding the private key and the API key.
    #[clap(long, default_value = ENV_FILE)]
    pub env_file: ExpandedPathBuf,

    /// Chain RPC endpoint.
    #[clap(long, env = "RPC_URL", default_value = SEPOLIA_RPC_URL)]
    pub rpc_url: String,

    /// Bundler and paymaster endpoint.
    ///
    /// By default, the Pimlico endpoint of the chain is used.
    #[clap(long, env = "BUNDLER_URL")]
    pub bundler_url: Option<String>,

    /// Chain name or id.
    #[clap(long, default_value = "sepolia", value_parser = parse_chain)]
    pub chain: Chain,

    /// Entry point address.
    #[clap(long, default_value = entry_point::ADDRESS, value_parser = parse_address)]
    pub entry_point: Address,

    /// Simple account factory address.
    #[clap(long, default_value = FACTORY_ADDRESS, value_parser = parse_address)]
    pub factory: Address,

    /// Salt (index) of the smart account.
    #[clap(long, default_value = "0", value_parser = parse_u256)]
    pub salt: U256,

    /// Which of the bundler's suggested gas prices is paid.
    #[clap(long, default_value = "fast", value_parser = parse_gas_tier)]
    pub gas_tier: GasTier,

    /// Timeout of every single remote call.
    #[clap(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// How long to wait for the user operation to be included.
    #[clap(long, default_value = "2m", value_parser = humantime::parse_duration)]
    pub receipt_timeout: Duration,

    /// Interval between receipt polls.
    #[clap(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,
}

/// Native transaction args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct NativeArgs {
    /// Target of the call.
    #[clap(long, default_value = RECIPIENT, value_parser = parse_address)]
    pub to: Address,

    /// Wei sent along with the call.
    #[clap(long, default_value = "0", value_parser = parse_u256)]
    pub value: U256,

    /// Call data (hex).
    #[clap(long, default_value = NATIVE_CALL_DATA, value_parser = parse_bytes)]
    pub data: Bytes,
}

/// ERC-20 transfer args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct Erc20Args {
    /// Token contract.
    #[clap(long, default_value = USDC_SEPOLIA, value_parser = parse_address)]
    pub token: Address,

    /// Recipient of the tokens.
    #[clap(long, default_value = RECIPIENT, value_parser = parse_address)]
    pub recipient: Address,

    /// Amount in whole tokens (e.g. `0.5`).
    #[clap(long, default_value = TRANSFER_AMOUNT)]
    pub amount: String,

    /// Decimals of the token.
    ///
    /// Read from the token contract when not given.
    #[clap(long)]
    pub decimals: Option<u8>,

    /// Balance (in whole tokens) the smart account must hold besides the amount itself.
    #[clap(long, default_value = MIN_BALANCE)]
    pub min_balance: String,

    /// Token symbol used in log lines.
    ///
    /// Read from the token contract when not given.
    #[clap(long)]
    pub symbol: Option<String>,

    /// Where to get test tokens when the balance is too low.
    #[clap(long, default_value = USDC_FAUCET)]
    pub faucet: String,
}
