use crate::{error::ContractError, gen::EntryPointAPI};
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use smartsend_primitives::{UserOperation, UserOperationHash};
use std::sync::Arc;

/// Read-only view of the v0.7 entry point contract
#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        Self { address, entry_point_api: EntryPointAPI::new(address, eth_client) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Next nonce of `address` in the nonce sequence `key` (key 0 is the default sequence)
    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, ContractError> {
        self.entry_point_api
            .get_nonce(*address, key)
            .call()
            .await
            .map_err(ContractError::from_contract_error)
    }

    /// Hash of the user operation as computed on chain
    pub async fn get_user_op_hash(
        &self,
        uo: &UserOperation,
    ) -> Result<UserOperationHash, ContractError> {
        self.entry_point_api
            .get_user_op_hash(uo.into())
            .call()
            .await
            .map(UserOperationHash::from)
            .map_err(ContractError::from_contract_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::AbiEncode,
        providers::{MockProvider, Provider},
    };
    use smartsend_primitives::constants::entry_point::ADDRESS;

    fn entry_point() -> (EntryPoint<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        (EntryPoint::new(Arc::new(provider), ADDRESS.parse().unwrap()), mock)
    }

    #[tokio::test]
    async fn get_nonce_decodes_return_data() {
        let (ep, mock) = entry_point();
        mock.push::<String, _>(U256::from(5).encode_hex()).unwrap();

        let nonce = ep.get_nonce(&Address::repeat_byte(1), U256::zero()).await.unwrap();
        assert_eq!(nonce, U256::from(5));
    }

    #[tokio::test]
    async fn get_user_op_hash_matches_local_hash() {
        let (ep, mock) = entry_point();
        let uo = UserOperation::default().sender(Address::repeat_byte(1)).nonce(2.into());
        let local = uo.hash(&ep.address(), 11_155_111);
        mock.push::<String, _>(local.0.encode_hex()).unwrap();

        assert_eq!(ep.get_user_op_hash(&uo).await.unwrap(), local);
    }
}
