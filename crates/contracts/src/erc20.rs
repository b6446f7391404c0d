//! Read-only view of an ERC-20 token
use crate::{error::ContractError, gen::TokenAPI};
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Erc20<M: Middleware + 'static> {
    address: Address,
    token_api: TokenAPI<M>,
}

impl<M: Middleware + 'static> Erc20<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        Self { address, token_api: TokenAPI::new(address, eth_client) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Balance of `owner` in base units
    pub async fn balance_of(&self, owner: &Address) -> Result<U256, ContractError> {
        self.token_api.balance_of(*owner).call().await.map_err(ContractError::from_contract_error)
    }

    pub async fn decimals(&self) -> Result<u8, ContractError> {
        self.token_api.decimals().call().await.map_err(ContractError::from_contract_error)
    }

    pub async fn symbol(&self) -> Result<String, ContractError> {
        self.token_api.symbol().call().await.map_err(ContractError::from_contract_error)
    }
}
