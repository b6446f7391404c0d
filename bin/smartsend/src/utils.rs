use alloy_chains::Chain;
use ethers::types::{Address, Bytes, U256};
use pin_utils::pin_mut;
use smartsend_primitives::GasTier;
use std::{future::Future, str::FromStr};
use tracing::info;

/// Parses address from string
pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::from_str(s).map_err(|_| format!("String {s} is not a valid address"))
}

/// Parses U256 from string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_dec_str(s).map_err(|_| format!("String {s} is not a valid U256"))
}

/// Parses hex encoded bytes from string
pub fn parse_bytes(s: &str) -> Result<Bytes, String> {
    Bytes::from_str(s).map_err(|_| format!("String {s} is not valid hex data"))
}

/// Parses chain from its name or id
pub fn parse_chain(s: &str) -> Result<Chain, String> {
    Chain::from_str(s).map_err(|_| format!("String {s} is not a known chain"))
}

/// Parses GasTier from string
pub fn parse_gas_tier(s: &str) -> Result<GasTier, String> {
    GasTier::from_str(s).map_err(|_| format!("String {s} is not a valid GasTier"))
}

/// Runs the future to completion or until:
/// - `ctrl-c` is received.
/// - `SIGTERM` is received (unix only).
pub async fn run_until_ctrl_c<F, E>(fut: F) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    E: Send + Sync + 'static + From<std::io::Error>,
{
    let ctrl_c = tokio::signal::ctrl_c();

    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let sigterm = stream.recv();
    pin_mut!(sigterm, ctrl_c, fut);

    tokio::select! {
        _ = ctrl_c => {
            info!("Received ctrl-c signal.");
        },
        _ = sigterm => {
            info!("Received SIGTERM signal.");
        },
        res = fut => res?,
    }

    Ok(())
}
