use crate::gen::entry_point_api::{EntryPointAPIErrors, FailedOp};
use ethers::{
    abi::AbiDecode,
    prelude::ContractError as EthersContractError,
    providers::{JsonRpcError, Middleware, MiddlewareError, ProviderError},
    types::Bytes,
};
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

/// Errors of calls to the entry point, the account factory and token contracts
#[derive(Debug, Error, Clone)]
pub enum ContractError {
    /// Failed user operation error
    #[error("{0}")]
    FailedOp(FailedOp),

    /// execution reverted
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// ABI error
    #[error("abi error: {inner}")]
    ABI {
        /// The inner error message
        inner: String,
    },

    /// Data decoding error
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message
        inner: String,
    },

    /// Any other error
    #[error("other error: {inner}")]
    Other {
        /// The inner error message
        inner: String,
    },
}

impl ContractError {
    /// Maps the error of an abigen contract call
    pub fn from_contract_error<M: Middleware>(err: EthersContractError<M>) -> Self {
        match err {
            EthersContractError::DecodingError(e) => Self::Decode { inner: e.to_string() },
            EthersContractError::AbiError(e) => Self::ABI { inner: e.to_string() },
            EthersContractError::MiddlewareError { e } => Self::from_middleware_error::<M>(e),
            EthersContractError::ProviderError { e } => Self::from_provider_error(&e),
            EthersContractError::Revert(data) => Self::from_revert(data),
            _ => Self::Other { inner: err.to_string() },
        }
    }

    pub fn from_provider_error(err: &ProviderError) -> Self {
        match err {
            ProviderError::JsonRpcClientError(err) => err
                .as_error_response()
                .map(Self::from_json_rpc_error)
                .unwrap_or(ContractError::Provider {
                    inner: format!("unknown json-rpc client error: {err:?}"),
                }),
            ProviderError::HTTPError(err) => {
                ContractError::Provider { inner: format!("HTTP error: {err:?}") }
            }
            _ => ContractError::Provider { inner: format!("unknown provider error: {err:?}") },
        }
    }

    pub fn from_json_rpc_error(err: &JsonRpcError) -> Self {
        if let Some(ref value) = err.data {
            return match value {
                serde_json::Value::String(data) => {
                    let re = Regex::new(r"0x[0-9a-fA-F]+").expect("Regex rules valid");

                    let hex = if let Some(hex) = re.find(data) {
                        hex
                    } else {
                        return ContractError::Decode {
                            inner: format!("hex string not found in {data:?}"),
                        };
                    };

                    match Bytes::from_str(hex.as_str()) {
                        Ok(bytes) => Self::from_revert(bytes),
                        Err(e) => ContractError::Decode {
                            inner: format!("string {data:?} could not be converted to bytes: {e:?}"),
                        },
                    }
                }
                other => ContractError::Decode {
                    inner: format!("json-rpc return data is not a string: {other:?}"),
                },
            };
        }

        if err.message.contains("execution reverted") {
            return ContractError::ExecutionReverted(err.message.clone());
        }

        ContractError::Provider { inner: format!("json-rpc error: {err:?}") }
    }

    pub fn from_middleware_error<M: Middleware>(err: M::Error) -> Self {
        if let Some(err) = err.as_error_response() {
            return Self::from_json_rpc_error(err);
        }

        if let Some(err) = err.as_provider_error() {
            return Self::from_provider_error(err);
        }

        ContractError::Provider { inner: format!("middleware error: {err:?}") }
    }

    fn from_revert(data: Bytes) -> Self {
        match decode_revert_error(data) {
            Ok(EntryPointAPIErrors::FailedOp(op)) => ContractError::FailedOp(op),
            Ok(EntryPointAPIErrors::FailedOpWithRevert(op)) => ContractError::FailedOp(FailedOp {
                op_index: op.op_index,
                reason: format!("{} ({})", op.reason, op.inner),
            }),
            Ok(EntryPointAPIErrors::RevertString(reason)) => {
                ContractError::ExecutionReverted(reason)
            }
            Err(err) => err,
        }
    }
}

// ethers-rs could not handle `require (true, "reason")` or `revert("test failed")` well in this
// case revert with `require` error would ends up with error event signature `0x08c379a0`
// we need to handle it manually
pub fn decode_revert_string(data: Bytes) -> Option<String> {
    if data.len() < 4 {
        return None;
    }
    let (error_sig, reason) = data.split_at(4);
    if error_sig == [0x08, 0xc3, 0x79, 0xa0] {
        <String as AbiDecode>::decode(reason).ok()
    } else {
        None
    }
}

pub fn decode_revert_error(data: Bytes) -> Result<EntryPointAPIErrors, ContractError> {
    let decoded = EntryPointAPIErrors::decode(data.as_ref());
    match decoded {
        Ok(res) => Ok(res),
        Err(e) => {
            if let Some(error_str) = decode_revert_string(data) {
                return Ok(EntryPointAPIErrors::RevertString(error_str));
            };

            Err(ContractError::Decode {
                inner: format!("data field can't be deserialized to EntryPointAPIErrors error: {e:?}",),
            })
        }
    }
}
