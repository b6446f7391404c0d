//! Chain extensions
use crate::constants::pimlico;
use alloy_chains::Chain;
use ethers::{
    types::{Address, H256},
    utils::to_checksum,
};

pub trait ChainExt {
    /// Base URL of the chain's block explorer, if one is known
    fn explorer_url(&self) -> Option<&'static str>;

    /// Explorer link for an account
    fn address_url(&self, address: &Address) -> String;

    /// Explorer link for a transaction
    fn tx_url(&self, hash: &H256) -> String;

    /// Combined bundler and paymaster endpoint of the Pimlico v2 API
    fn pimlico_url(&self, api_key: &str) -> String;
}

impl ChainExt for Chain {
    fn explorer_url(&self) -> Option<&'static str> {
        self.etherscan_urls().map(|(_, browser)| browser)
    }

    fn address_url(&self, address: &Address) -> String {
        match self.explorer_url() {
            Some(base) => {
                format!("{}/address/{}", base.trim_end_matches('/'), to_checksum(address, None))
            }
            None => to_checksum(address, None),
        }
    }

    fn tx_url(&self, hash: &H256) -> String {
        match self.explorer_url() {
            Some(base) => format!("{}/tx/{hash:?}", base.trim_end_matches('/')),
            None => format!("{hash:?}"),
        }
    }

    fn pimlico_url(&self, api_key: &str) -> String {
        let name = match self.named() {
            Some(named) => named.to_string(),
            None => self.id().to_string(),
        };
        format!("{}/{name}/rpc?apikey={api_key}", pimlico::API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_chains::NamedChain;

    #[test]
    fn sepolia_explorer_links() {
        let chain = Chain::from(NamedChain::Sepolia);
        let address: Address = "0x3bC25D139069Ca06f7079fE67dcEd166b40edA9e".parse().unwrap();
        assert_eq!(
            chain.address_url(&address),
            format!("https://sepolia.etherscan.io/address/{}", to_checksum(&address, None))
        );

        let hash = H256::repeat_byte(0xab);
        assert!(chain.tx_url(&hash).starts_with("https://sepolia.etherscan.io/tx/0xabab"));
    }

    #[test]
    fn pimlico_url_uses_chain_name() {
        let chain = Chain::from(NamedChain::Sepolia);
        assert_eq!(chain.pimlico_url("key"), "https://api.pimlico.io/v2/sepolia/rpc?apikey=key");
    }

    #[test]
    fn unknown_chain_falls_back_to_raw_values() {
        let chain = Chain::from_id(999_999_999);
        let address = Address::zero();
        assert_eq!(chain.address_url(&address), to_checksum(&address, None));
        assert_eq!(
            chain.pimlico_url("key"),
            "https://api.pimlico.io/v2/999999999/rpc?apikey=key"
        );
    }
}
