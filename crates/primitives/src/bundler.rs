//! Bundler-related primitives

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, EnumVariantNames};

/// Fees of a single speed tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFees {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

/// Gas prices suggested by the bundler (returned from the RPC endpoint
/// pimlico_getUserOperationGasPrice)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPrice {
    pub slow: GasFees,
    pub standard: GasFees,
    pub fast: GasFees,
}

impl GasPrice {
    /// Fees of the given tier
    pub fn tier(&self, tier: GasTier) -> GasFees {
        match tier {
            GasTier::Slow => self.slow,
            GasTier::Standard => self.standard,
            GasTier::Fast => self.fast,
        }
    }
}

/// Determines which of the suggested gas prices is used
#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, EnumVariantNames, PartialEq, Eq,
)]
#[strum(serialize_all = "kebab_case")]
pub enum GasTier {
    Slow,
    Standard,
    #[default]
    Fast,
}
