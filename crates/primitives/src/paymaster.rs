//! Paymaster-related primitives

use crate::UserOperation;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Sponsorship granted by a paymaster (returned from the RPC endpoint pm_sponsorUserOperation)
///
/// Besides its own fields the paymaster re-estimates the gas limits of the user operation, since
/// validating the paymaster changes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub paymaster: Address,
    pub paymaster_verification_gas_limit: U256,
    pub paymaster_post_op_gas_limit: U256,
    pub paymaster_data: Bytes,
    pub pre_verification_gas: U256,
    pub verification_gas_limit: U256,
    pub call_gas_limit: U256,
}

impl Sponsorship {
    /// Copies the sponsorship into the user operation
    pub fn apply(&self, uo: UserOperation) -> UserOperation {
        uo.paymaster(
            self.paymaster,
            self.paymaster_verification_gas_limit,
            self.paymaster_post_op_gas_limit,
            self.paymaster_data.clone(),
        )
        .pre_verification_gas(self.pre_verification_gas)
        .verification_gas_limit(self.verification_gas_limit)
        .call_gas_limit(self.call_gas_limit)
    }
}
