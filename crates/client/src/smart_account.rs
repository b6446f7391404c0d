//! Turns calls into sponsored, signed user operations and submits them
use crate::{
    account::SmartAccount, bundler::BundlerClient, error::ClientError, paymaster::PaymasterClient,
};
use ethers::{
    providers::Middleware,
    types::{H256, U256},
};
use smartsend_contracts::{ContractError, EntryPoint};
use smartsend_primitives::{Call, GasTier, UserOperation, UserOperationHash, UserOperationReceipt};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SmartAccountClient<M: Middleware + 'static, A: SmartAccount> {
    account: A,
    eth_client: Arc<M>,
    entry_point: EntryPoint<M>,
    bundler: BundlerClient,
    paymaster: PaymasterClient,
    chain_id: u64,
    gas_tier: GasTier,
}

impl<M: Middleware + 'static, A: SmartAccount> SmartAccountClient<M, A> {
    pub fn new(
        account: A,
        eth_client: Arc<M>,
        bundler: BundlerClient,
        paymaster: PaymasterClient,
        chain_id: u64,
    ) -> Self {
        let entry_point = EntryPoint::new(eth_client.clone(), account.entry_point());
        Self {
            account,
            eth_client,
            entry_point,
            bundler,
            paymaster,
            chain_id,
            gas_tier: GasTier::default(),
        }
    }

    /// Selects which of the bundler's suggested gas prices is paid (fast by default)
    pub fn with_gas_tier(mut self, gas_tier: GasTier) -> Self {
        self.gas_tier = gas_tier;
        self
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    pub fn bundler(&self) -> &BundlerClient {
        &self.bundler
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Next nonce of the account in the default nonce sequence of the entry point
    pub async fn nonce(&self) -> Result<U256, ClientError> {
        Ok(self.entry_point.get_nonce(&self.account.address(), U256::zero()).await?)
    }

    /// Builds the sponsored but still unsigned user operation executing `calls`
    ///
    /// The returned operation carries the account's dummy signature.
    pub async fn prepare_user_operation(
        &self,
        calls: &[Call],
    ) -> Result<UserOperation, ClientError> {
        let sender = self.account.address();

        let nonce = self.nonce().await?;

        let mut uo = UserOperation::default()
            .sender(sender)
            .nonce(nonce)
            .call_data(self.account.encode_execute(calls))
            .signature(self.account.dummy_signature());

        if !self.is_deployed().await? {
            let (factory, factory_data) = self.account.factory_data();
            debug!("Account {sender:?} is not deployed yet, deploying through {factory:?}");
            uo = uo.factory(factory, factory_data);
        }

        let fees = self.bundler.get_user_operation_gas_price().await?.tier(self.gas_tier);
        uo = uo
            .max_fee_per_gas(fees.max_fee_per_gas)
            .max_priority_fee_per_gas(fees.max_priority_fee_per_gas);

        let sponsorship = self.paymaster.sponsor_user_operation(&uo).await?;
        debug!("User operation sponsored by paymaster {:?}", sponsorship.paymaster);

        Ok(sponsorship.apply(uo))
    }

    /// Signs and submits a user operation executing `calls`, without waiting for inclusion
    pub async fn send_user_operation(
        &self,
        calls: &[Call],
    ) -> Result<UserOperationHash, ClientError> {
        let uo = self.prepare_user_operation(calls).await?;
        let uo = self.account.sign_user_operation(&uo, self.chain_id).await?;

        let local = uo.hash(&self.account.entry_point(), self.chain_id);
        let hash = self.bundler.send_user_operation(&uo).await?;
        if hash != local {
            warn!("Bundler returned user operation hash {hash}, expected {local}");
        }
        info!("User operation {hash} submitted");

        Ok(hash)
    }

    /// Executes `calls` and waits until the user operation is included
    ///
    /// # Returns
    /// * `H256` - The hash of the transaction that included the user operation
    pub async fn send_calls(&self, calls: &[Call]) -> Result<H256, ClientError> {
        let hash = self.send_user_operation(calls).await?;
        let receipt = self.bundler.wait_for_receipt(hash).await?;
        Self::check_receipt(hash, receipt)
    }

    /// Executes a single call and waits until the user operation is included
    pub async fn send_transaction(&self, call: Call) -> Result<H256, ClientError> {
        self.send_calls(&[call]).await
    }

    async fn is_deployed(&self) -> Result<bool, ClientError> {
        let code = self
            .eth_client
            .get_code(self.account.address(), None)
            .await
            .map_err(ContractError::from_middleware_error::<M>)?;
        Ok(!code.is_empty())
    }

    fn check_receipt(
        hash: UserOperationHash,
        receipt: UserOperationReceipt,
    ) -> Result<H256, ClientError> {
        let tx = receipt.tx_receipt.transaction_hash;
        if receipt.success {
            Ok(tx)
        } else {
            Err(ClientError::Reverted { hash, tx, reason: receipt.reason })
        }
    }
}
