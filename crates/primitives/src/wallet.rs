//! A `Wallet` holds the key that owns the smart account and persists it in an env file
use crate::{constants::defaults::PRIVATE_KEY_VAR, UserOperation};
use ethers::{
    prelude::{k256::ecdsa::SigningKey, rand},
    signers::{LocalWallet, Signer, WalletError as SignerError},
    types::{Address, Bytes},
    utils::hex,
};
use std::{
    fs::OpenOptions,
    io::{Read, Write},
    path::Path,
};
use thiserror::Error;
use tracing::{debug, info};

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// The env file could not be read or written
    #[error("env file error: {0}")]
    Io(#[from] std::io::Error),

    /// The env file is not in `KEY=value` format
    #[error("malformed env file: {0}")]
    EnvFile(String),

    /// The stored key is not a 32-byte hex secret
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Signing failed
    #[error("signing error: {0}")]
    Signing(#[from] SignerError),
}

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Builds a `Wallet` from a randomly generated key
    pub fn build_random() -> Self {
        let mut rng = rand::thread_rng();
        Self { signer: LocalWallet::new(&mut rng) }
    }

    /// Create a new wallet from a hex encoded private key (with or without `0x`)
    pub fn from_key(key: &str) -> Result<Self, WalletError> {
        let trimmed = key.trim();
        let hex_key = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if hex_key.len() != 64 || !hex_key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKey("expected 32 bytes of hex".into()));
        }

        let signer = hex_key
            .parse::<LocalWallet>()
            .map_err(|err| WalletError::InvalidKey(err.to_string()))?;
        Ok(Self { signer })
    }

    /// Reads the private key stored in the env file, if there is one
    ///
    /// # Arguments
    /// * `path` - The path to the env file
    ///
    /// # Returns
    /// * `Option<Self>` - The stored wallet or `None` if the file or the entry is missing
    pub fn from_env_file(path: &Path) -> Result<Option<Self>, WalletError> {
        if !path.exists() {
            return Ok(None);
        }

        let entries =
            dotenv::from_path_iter(path).map_err(|err| WalletError::EnvFile(err.to_string()))?;
        for entry in entries {
            let (key, value) = entry.map_err(|err| WalletError::EnvFile(err.to_string()))?;
            if key == PRIVATE_KEY_VAR {
                return Self::from_key(&value).map(Some);
            }
        }

        Ok(None)
    }

    /// Loads the signing key, generating and persisting one if none exists yet
    ///
    /// The precedence is: `key` (from flags or the process environment), then the env file,
    /// then a fresh key which is appended to the env file. An existing key is never
    /// overwritten.
    ///
    /// # Arguments
    /// * `key` - Private key supplied explicitly, if any
    /// * `path` - The path to the env file
    ///
    /// # Returns
    /// * `Self` - The loaded or generated wallet
    pub fn load_or_create(key: Option<&str>, path: &Path) -> Result<Self, WalletError> {
        if let Some(key) = key {
            debug!("Using the supplied private key");
            return Self::from_key(key);
        }

        if let Some(wallet) = Self::from_env_file(path)? {
            debug!("Loaded private key from {path:?}");
            return Ok(wallet);
        }

        let wallet = Self::build_random();
        wallet.persist(path)?;
        info!("Generated a new private key for {:?} and stored it in {path:?}", wallet.address());
        Ok(wallet)
    }

    /// Appends `PRIVATE_KEY=0x…` to the env file, creating the file if needed
    fn persist(&self, path: &Path) -> Result<(), WalletError> {
        let mut file = OpenOptions::new().create(true).read(true).append(true).open(path)?;

        let mut existing = String::new();
        file.read_to_string(&mut existing)?;
        let separator = if existing.is_empty() || existing.ends_with('\n') { "" } else { "\n" };

        writeln!(file, "{separator}{PRIVATE_KEY_VAR}={}", self.private_key())?;
        Ok(())
    }

    /// Address of the key (owner of the smart account)
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Hex encoded private key with `0x` prefix
    pub fn private_key(&self) -> String {
        format!("0x{}", hex::encode(self.signer.signer().to_bytes()))
    }

    /// Signs the user operation
    ///
    /// # Arguments
    /// * `uo` - The [UserOperation](UserOperation) to be signed
    /// * `ep` - The entry point contract address
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `UserOperation` - The signed [UserOperation](UserOperation)
    pub async fn sign_uo(
        &self,
        uo: &UserOperation,
        ep: &Address,
        chain_id: u64,
    ) -> Result<UserOperation, WalletError> {
        let signature = self.sign_uo_hash(uo, ep, chain_id).await?;
        Ok(uo.clone().signature(signature))
    }

    /// Signs the hash of the user operation as an EIP-191 personal message
    pub async fn sign_uo_hash(
        &self,
        uo: &UserOperation,
        ep: &Address,
        chain_id: u64,
    ) -> Result<Bytes, WalletError> {
        let h = uo.hash(ep, chain_id);
        let sig = self.signer.sign_message(h.0.as_bytes()).await?;
        Ok(sig.to_vec().into())
    }
}
