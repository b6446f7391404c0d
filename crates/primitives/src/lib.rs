//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains the v0.7 user operation, bundler and paymaster response types, the
//! signing wallet and the ERC-20 transfer payload builder.

pub mod bundler;
pub mod chain;
pub mod constants;
pub mod paymaster;
pub mod provider;
pub mod transaction;
mod user_operation;
mod utils;
mod wallet;

pub use bundler::{GasFees, GasPrice, GasTier};
pub use paymaster::Sponsorship;
pub use transaction::{
    build_transfer, decode_transfer, scale_amount, Call, TransferError, TransferPayload,
};
pub use user_operation::{
    InclusionReceipt, PackedUserOperation, UserOperation, UserOperationGasEstimation,
    UserOperationHash, UserOperationReceipt,
};
pub use utils::{
    pack_factory_data, pack_paymaster_data, pack_uint128, unpack_factory_data,
    unpack_paymaster_data, unpack_uint128,
};
pub use wallet::{Wallet, WalletError};
