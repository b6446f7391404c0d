//! Calls executed by the smart account and the ERC-20 transfer payload builder

use crate::utils::as_checksum_addr;
use ethers::{
    abi::{AbiDecode, AbiEncode},
    contract::{EthCall, EthDisplay},
    types::{Address, Bytes, U256},
    utils::{parse_units, ParseUnits},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// `transfer(address,uint256) returns (bool)` of an ERC-20 token
#[derive(Clone, Debug, Default, Eq, PartialEq, EthCall, EthDisplay)]
#[ethcall(name = "transfer", abi = "transfer(address,uint256)")]
pub struct TransferCall {
    pub recipient: Address,
    pub amount: U256,
}

/// Errors raised while validating transfer inputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferError {
    /// One of the address arguments is not a 20-byte hex address
    #[error("invalid {field} address: {value:?}")]
    InvalidAddress {
        /// Which argument was rejected
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// The amount cannot be represented as a token amount
    #[error("invalid amount {amount:?}: {reason}")]
    InvalidAmount {
        /// The rejected input
        amount: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// A single call executed by the smart account
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Target of the call
    pub to: Address,
    /// Native currency sent along
    pub value: U256,
    /// Call data
    pub data: Bytes,
}

/// Transaction descriptor of an ERC-20 transfer
///
/// `to` is the token contract, the human recipient is encoded into `data`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub nonce: u64,
    pub value: U256,
    pub data: Bytes,
    #[serde(serialize_with = "as_checksum_addr")]
    pub from: Address,
    #[serde(serialize_with = "as_checksum_addr")]
    pub to: Address,
    pub chain_id: u64,
}

impl TransferPayload {
    /// Builds the payload from already validated values; `amount` is in the token's base units
    pub fn new(
        from: Address,
        recipient: Address,
        amount: U256,
        token: Address,
        nonce: u64,
        chain_id: u64,
    ) -> Self {
        Self {
            nonce,
            value: U256::zero(),
            data: TransferCall { recipient, amount }.encode().into(),
            from,
            to: token,
            chain_id,
        }
    }

    /// Recipient and base-unit amount encoded in `data`
    pub fn decode(&self) -> Result<(Address, U256), ethers::abi::AbiError> {
        decode_transfer(&self.data)
    }
}

impl From<TransferPayload> for Call {
    fn from(payload: TransferPayload) -> Self {
        Self { to: payload.to, value: payload.value, data: payload.data }
    }
}

/// Builds the transfer payload of `amount` whole tokens (a token with `decimals` decimals)
///
/// # Arguments
/// * `from` - The account sending the tokens
/// * `recipient` - The account receiving the tokens
/// * `amount` - The amount in whole token units, as a decimal string (`"0.5"`)
/// * `token_address` - The ERC-20 token contract
/// * `nonce` - Nonce recorded in the payload
/// * `chain_id` - The chain id of the blockchain network to be used
/// * `decimals` - Decimals of the token (6 for USDC)
///
/// # Returns
/// * `TransferPayload` - The payload, or the first rejected input
pub fn build_transfer(
    from: &str,
    recipient: &str,
    amount: &str,
    token_address: &str,
    nonce: u64,
    chain_id: u64,
    decimals: u8,
) -> Result<TransferPayload, TransferError> {
    let from = parse_address("from", from)?;
    let recipient = parse_address("recipient", recipient)?;
    let token = parse_address("token", token_address)?;
    let amount = scale_amount(amount, decimals)?;

    Ok(TransferPayload::new(from, recipient, amount, token, nonce, chain_id))
}

/// Converts a decimal amount of whole tokens into base units: `amount * 10^decimals`
///
/// The conversion is exact. Amounts with more fractional digits than the token has decimals
/// are rejected instead of being rounded.
pub fn scale_amount(amount: &str, decimals: u8) -> Result<U256, TransferError> {
    let invalid = |reason| TransferError::InvalidAmount { amount: amount.to_string(), reason };

    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(invalid("must not be negative"));
    }
    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if (int_part.is_empty() && frac_part.is_empty()) ||
        !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a decimal number"));
    }
    if frac_part.len() > decimals as usize {
        return Err(invalid("more fractional digits than the token has decimals"));
    }
    // 10^77 < 2^256
    if int_part.trim_start_matches('0').len() + decimals as usize > 77 {
        return Err(invalid("does not fit into 256 bits"));
    }

    match parse_units(trimmed, decimals as u32) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(invalid("must not be negative")),
        Err(_) => Err(invalid("not a decimal number")),
    }
}

/// Recovers recipient and base-unit amount from `transfer` call data
pub fn decode_transfer(data: &[u8]) -> Result<(Address, U256), ethers::abi::AbiError> {
    let call = TransferCall::decode(data)?;
    Ok((call.recipient, call.amount))
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, TransferError> {
    let invalid = || TransferError::InvalidAddress { field, value: value.to_string() };

    let hex = value.strip_prefix("0x").ok_or_else(invalid)?;
    if hex.len() != 40 {
        return Err(invalid());
    }
    Address::from_str(hex).map_err(|_| invalid())
}
