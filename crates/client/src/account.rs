//! Smart accounts the client can build user operations for
use crate::error::ClientError;
use async_trait::async_trait;
use ethers::{
    providers::Middleware,
    types::{Address, Bytes, U256},
    utils::hex,
};
use smartsend_contracts::{
    simple_account::{create_account_data, encode_calls},
    SimpleAccountFactory,
};
use smartsend_primitives::{constants::simple_account::DUMMY_SIGNATURE, Call, UserOperation, Wallet};
use std::{fmt, sync::Arc};
use tracing::debug;

/// A smart account: its address, how it is deployed, how calls are encoded and how user
/// operations are signed
#[async_trait]
pub trait SmartAccount: Send + Sync {
    /// Counterfactual address of the account
    fn address(&self) -> Address;

    /// Entry point the account is bound to
    fn entry_point(&self) -> Address;

    /// Factory and factory data deploying the account
    fn factory_data(&self) -> (Address, Bytes);

    /// Account call data executing the calls
    fn encode_execute(&self, calls: &[Call]) -> Bytes;

    /// Signature of the right shape used while the user operation is priced and sponsored
    fn dummy_signature(&self) -> Bytes;

    /// Signs the user operation for `chain_id`
    async fn sign_user_operation(
        &self,
        uo: &UserOperation,
        chain_id: u64,
    ) -> Result<UserOperation, ClientError>;
}

/// The eth-infinitism `SimpleAccount`, owned by a single key
#[derive(Clone)]
pub struct SimpleAccount {
    owner: Wallet,
    entry_point: Address,
    factory: Address,
    salt: U256,
    address: Address,
}

impl SimpleAccount {
    /// Derives the account of `owner` from the factory's `getAddress(owner, salt)`
    ///
    /// The result only depends on the inputs, so deriving twice yields the same account. The
    /// account does not need to be deployed.
    pub async fn derive<M: Middleware + 'static>(
        eth_client: Arc<M>,
        owner: Wallet,
        entry_point: Address,
        factory: Address,
        salt: U256,
    ) -> Result<Self, ClientError> {
        let address = SimpleAccountFactory::new(eth_client, factory)
            .get_address(owner.address(), salt)
            .await?;
        debug!("Derived simple account {address:?} of owner {:?} (salt {salt})", owner.address());

        Ok(Self { owner, entry_point, factory, salt, address })
    }

    pub fn owner(&self) -> Address {
        self.owner.address()
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    pub fn salt(&self) -> U256 {
        self.salt
    }
}

impl fmt::Debug for SimpleAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleAccount")
            .field("owner", &self.owner())
            .field("entry_point", &self.entry_point)
            .field("factory", &self.factory)
            .field("salt", &self.salt)
            .field("address", &self.address)
            .finish()
    }
}

#[async_trait]
impl SmartAccount for SimpleAccount {
    fn address(&self) -> Address {
        self.address
    }

    fn entry_point(&self) -> Address {
        self.entry_point
    }

    fn factory_data(&self) -> (Address, Bytes) {
        (self.factory, create_account_data(self.owner(), self.salt))
    }

    fn encode_execute(&self, calls: &[Call]) -> Bytes {
        encode_calls(calls)
    }

    fn dummy_signature(&self) -> Bytes {
        hex::decode(DUMMY_SIGNATURE.trim_start_matches("0x")).unwrap_or_default().into()
    }

    async fn sign_user_operation(
        &self,
        uo: &UserOperation,
        chain_id: u64,
    ) -> Result<UserOperation, ClientError> {
        Ok(self.owner.sign_uo(uo, &self.entry_point, chain_id).await?)
    }
}
