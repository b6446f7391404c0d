//! One run of the tool: configuration, clients, the derived account and the two flows
use crate::{cli::args::SessionArgs, error::SessionError};
use alloy_chains::Chain;
use ethers::{
    providers::{Http, Provider},
    types::{Address, H256, U256},
};
use smartsend_client::{
    BundlerClient, PaymasterClient, SimpleAccount, SmartAccount, SmartAccountClient,
};
use smartsend_contracts::Erc20;
use smartsend_primitives::{
    chain::ChainExt, constants::defaults::API_KEY_VAR, provider::create_http_provider,
    scale_amount, Call, TransferPayload, Wallet, WalletError,
};
use std::{path::Path, sync::Arc};
use tracing::{debug, info};

/// An ERC-20 transfer requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct TokenTransfer {
    pub token: Address,
    pub recipient: Address,
    /// Amount in whole tokens (decimal string)
    pub amount: String,
    /// Read from the token when not given
    pub decimals: Option<u8>,
    /// Balance (in whole tokens) the account must hold before the transfer is built; the
    /// amount itself is always required
    pub min_balance: String,
    /// Read from the token when not given
    pub symbol: Option<String>,
    pub faucet: String,
}

pub struct Session {
    chain: Chain,
    eth_client: Arc<Provider<Http>>,
    client: SmartAccountClient<Provider<Http>, SimpleAccount>,
}

impl Session {
    /// Loads the configuration, the owner key and connects all clients
    ///
    /// The credential is checked before the key is touched or any network request is made.
    pub async fn bootstrap(args: &SessionArgs) -> Result<Self, SessionError> {
        let api_key = resolve_api_key(args.api_key.as_deref(), &args.env_file)?;
        let bundler_url = match &args.bundler_url {
            Some(url) => url.clone(),
            None => args.chain.pimlico_url(&api_key),
        };

        let owner = Wallet::load_or_create(args.private_key.as_deref(), &args.env_file)?;
        debug!("Account owner: {:?}", owner.address());

        let (eth_client, chain_id) = create_http_provider(&args.rpc_url, args.timeout)
            .await
            .map_err(|err| SessionError::Provider(err.to_string()))?;
        let eth_client = Arc::new(eth_client);
        if chain_id != args.chain.id() {
            return Err(SessionError::ChainMismatch { expected: args.chain.id(), actual: chain_id });
        }

        let bundler = BundlerClient::new(&bundler_url, args.entry_point, args.timeout)?
            .with_receipt_polling(args.poll_interval, args.receipt_timeout);
        let paymaster = PaymasterClient::new(&bundler_url, args.entry_point, args.timeout)?;

        let account = SimpleAccount::derive(
            eth_client.clone(),
            owner,
            args.entry_point,
            args.factory,
            args.salt,
        )
        .await?;
        info!("Smart account address: {}", args.chain.address_url(&account.address()));

        let client =
            SmartAccountClient::new(account, eth_client.clone(), bundler, paymaster, chain_id)
                .with_gas_tier(args.gas_tier);

        Ok(Self { chain: args.chain, eth_client, client })
    }

    pub fn account(&self) -> &SimpleAccount {
        self.client.account()
    }

    /// Sends one sponsored call from the smart account
    pub async fn send_native(&self, call: Call) -> Result<H256, SessionError> {
        info!("Sending {} wei to {:?} with data {}", call.value, call.to, call.data);
        let tx = self.client.send_transaction(call).await?;
        info!("User operation included: {}", self.chain.tx_url(&tx));
        Ok(tx)
    }

    /// Checks the token balance of the smart account and sends the transfer
    ///
    /// The balance must cover both the amount and `min_balance`, otherwise nothing is built or
    /// sent.
    pub async fn send_erc20(&self, transfer: &TokenTransfer) -> Result<H256, SessionError> {
        let account = self.account().address();
        let token = Erc20::new(self.eth_client.clone(), transfer.token);

        let decimals = match transfer.decimals {
            Some(decimals) => decimals,
            None => token.decimals().await?,
        };
        let symbol = match &transfer.symbol {
            Some(symbol) => symbol.clone(),
            None => token.symbol().await?,
        };
        let amount = scale_amount(&transfer.amount, decimals)?;
        let required = scale_amount(&transfer.min_balance, decimals)?.max(amount);

        let balance = token.balance_of(&account).await?;
        info!("Smart account balance: {} {symbol}", format_units(balance, decimals));
        ensure_balance(account, balance, required, &transfer.faucet)?;

        let nonce = self.client.nonce().await?;
        let payload = TransferPayload::new(
            account,
            transfer.recipient,
            amount,
            transfer.token,
            nonce.low_u64(),
            self.client.chain_id(),
        );
        info!(
            "Transfer payload: {}",
            serde_json::to_string(&payload).unwrap_or_else(|_| format!("{payload:?}"))
        );

        let tx = self.client.send_transaction(payload.into()).await?;
        info!("User operation included: {}", self.chain.tx_url(&tx));
        Ok(tx)
    }
}

/// The credential from the flags/process environment, otherwise from the env file
pub fn resolve_api_key(api_key: Option<&str>, env_file: &Path) -> Result<String, SessionError> {
    if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    if env_file.exists() {
        let entries = dotenv::from_path_iter(env_file)
            .map_err(|err| WalletError::EnvFile(err.to_string()))?;
        for (key, value) in entries.flatten() {
            if key == API_KEY_VAR && !value.trim().is_empty() {
                return Ok(value.trim().to_string());
            }
        }
    }

    Err(SessionError::MissingCredential { var: API_KEY_VAR })
}

/// Fails with [SessionError::InsufficientBalance] when `balance < required`
pub fn ensure_balance(
    account: Address,
    balance: U256,
    required: U256,
    faucet: &str,
) -> Result<(), SessionError> {
    if balance < required {
        return Err(SessionError::InsufficientBalance {
            account,
            balance,
            required,
            faucet: faucet.to_string(),
        });
    }
    Ok(())
}

fn format_units(amount: U256, decimals: u8) -> String {
    ethers::utils::format_units(amount, decimals as u32).unwrap_or_else(|_| amount.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::SessionArgs;
    use clap::Parser;
    use std::fs;

    #[test]
    fn ensure_balance_precondition() {
        let account = Address::repeat_byte(1);
        assert!(ensure_balance(account, 1_000_000.into(), 1_000_000.into(), "faucet").is_ok());

        match ensure_balance(account, 999_999.into(), 1_000_000.into(), "https://faucet") {
            Err(SessionError::InsufficientBalance { balance, required, faucet, .. }) => {
                assert_eq!(balance, U256::from(999_999));
                assert_eq!(required, U256::from(1_000_000));
                assert_eq!(faucet, "https://faucet");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn api_key_from_flag_or_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");

        assert_eq!(resolve_api_key(Some("flag"), &path).unwrap(), "flag");

        fs::write(&path, "PRIVATE_KEY=0x01\nPIMLICO_API_KEY=from-file\n").unwrap();
        assert_eq!(resolve_api_key(None, &path).unwrap(), "from-file");
        assert_eq!(resolve_api_key(Some(" "), &path).unwrap(), "from-file");
    }

    #[tokio::test]
    async fn missing_credential_aborts_before_key_generation() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        let args = SessionArgs::parse_from([
            "session",
            "--env-file",
            env_file.to_str().unwrap(),
            // unreachable, must never be contacted
            "--rpc-url",
            "http://127.0.0.1:1",
        ]);

        // clear values clap may have taken from the process environment
        let args = SessionArgs { api_key: None, private_key: None, ..args };

        match Session::bootstrap(&args).await {
            Err(SessionError::MissingCredential { var }) => assert_eq!(var, API_KEY_VAR),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("bootstrap must fail"),
        }
        assert!(!env_file.exists());
    }

    #[test]
    fn format_units_uses_decimals() {
        assert_eq!(format_units(500_000.into(), 6), "0.500000");
    }
}
