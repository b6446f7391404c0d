//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x0000000071727De22E5E9d8B686d4b6B3E8Aa8a9";
    /// Version of the entry point smart contract
    pub const VERSION: &str = "0.7.0";
}

/// Simple account (eth-infinitism reference account)
pub mod simple_account {
    /// Address of the simple account factory deployed for entry point v0.7
    pub const FACTORY_ADDRESS: &str = "0x91E60e0613810449d098b0b5Ec8b51A0FE8c8985";
    /// Default salt passed to `createAccount`/`getAddress`
    pub const DEFAULT_SALT: u64 = 0;
    /// Signature with the right length and shape used while the user operation is still being
    /// priced and sponsored (ecrecover on it never fails, so validation gas is estimated
    /// correctly)
    pub const DUMMY_SIGNATURE: &str = "0xfffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c";
}

/// Pimlico bundler and paymaster service
pub mod pimlico {
    /// Base URL of the v2 API, the chain name and `rpc?apikey=` follow
    pub const API_URL: &str = "https://api.pimlico.io/v2";
}

/// Chain access
pub mod rpc {
    /// Public Sepolia JSON-RPC endpoint
    pub const SEPOLIA_RPC_URL: &str = "https://rpc.ankr.com/eth_sepolia";
    /// Default timeout for a single remote call (in seconds)
    pub const REQUEST_TIMEOUT: u64 = 30;
    /// Default time to wait for a user operation to be included (in seconds)
    pub const RECEIPT_TIMEOUT: u64 = 120;
    /// Default interval between receipt polls (in milliseconds)
    pub const RECEIPT_POLL_INTERVAL: u64 = 1000;
}

/// Tokens used by the transfer flow
pub mod tokens {
    /// Circle USDC on Sepolia
    pub const USDC_SEPOLIA: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";
    /// Where testnet USDC can be requested
    pub const USDC_FAUCET: &str = "https://faucet.circle.com/";
}

/// Defaults of the command line flows
pub mod defaults {
    /// Recipient of the tutorial transfers
    pub const RECIPIENT: &str = "0x3bC25D139069Ca06f7079fE67dcEd166b40edA9e";
    /// Amount (in whole tokens) of the transfer flow
    pub const TRANSFER_AMOUNT: &str = "0.5";
    /// Balance (in whole tokens) the account must hold before the transfer flow
    pub const MIN_BALANCE: &str = "1";
    /// Call data of the native flow
    pub const NATIVE_CALL_DATA: &str = "0x1234";
    /// Name of the env file holding the signing key
    pub const ENV_FILE: &str = ".env";
    /// Env entry holding the signing key
    pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";
    /// Env entry holding the bundler/paymaster credential
    pub const API_KEY_VAR: &str = "PIMLICO_API_KEY";
}
