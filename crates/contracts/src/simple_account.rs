//! Counterfactual address and call encoding of the reference simple account
use crate::{
    error::ContractError,
    gen::{
        simple_account_api::{ExecuteBatchCall, ExecuteCall},
        simple_account_factory_api::CreateAccountCall,
        SimpleAccountFactoryAPI,
    },
};
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use smartsend_primitives::Call;
use std::sync::Arc;

#[derive(Clone)]
pub struct SimpleAccountFactory<M: Middleware + 'static> {
    address: Address,
    factory_api: SimpleAccountFactoryAPI<M>,
}

impl<M: Middleware + 'static> SimpleAccountFactory<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        Self { address, factory_api: SimpleAccountFactoryAPI::new(address, eth_client) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Address the account of `owner` has (or will have once deployed) for `salt`
    pub async fn get_address(&self, owner: Address, salt: U256) -> Result<Address, ContractError> {
        self.factory_api
            .get_address(owner, salt)
            .call()
            .await
            .map_err(ContractError::from_contract_error)
    }
}

/// Factory data deploying the account of `owner` with `salt`
pub fn create_account_data(owner: Address, salt: U256) -> Bytes {
    CreateAccountCall { owner, salt }.encode().into()
}

/// Account call data executing `calls`
///
/// A single call is encoded as `execute`, several calls as `executeBatch`.
pub fn encode_calls(calls: &[Call]) -> Bytes {
    match calls {
        [call] => ExecuteCall { dest: call.to, value: call.value, func: call.data.clone() }
            .encode()
            .into(),
        _ => ExecuteBatchCall {
            dest: calls.iter().map(|c| c.to).collect(),
            value: calls.iter().map(|c| c.value).collect(),
            func: calls.iter().map(|c| c.data.clone()).collect(),
        }
        .encode()
        .into(),
    }
}
