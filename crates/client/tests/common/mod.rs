use async_trait::async_trait;
use ethers::{
    abi::AbiEncode,
    contract::EthCall,
    providers::{Http, Provider},
    types::{Address, Bytes, H256, U256, U64},
};
use jsonrpsee::{
    core::RpcResult,
    server::{ServerBuilder, ServerHandle},
    types::{ErrorObject, ErrorObjectOwned, Params},
    RpcModule,
};
use smartsend_client::{
    BundlerApiServer, BundlerClient, PaymasterApiServer, PaymasterClient, PimlicoApiServer,
    SimpleAccount, SmartAccountClient,
};
use smartsend_contracts::{
    entry_point_api::GetNonceCall, simple_account_factory_api::GetAddressCall,
    token_api::BalanceOfCall,
};
use smartsend_primitives::{
    constants::{entry_point, simple_account::FACTORY_ADDRESS},
    GasFees, GasPrice, InclusionReceipt, Sponsorship, UserOperation, UserOperationGasEstimation,
    UserOperationHash, UserOperationReceipt, Wallet,
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

pub const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const CHAIN_ID: u64 = 11_155_111;
pub const ACCOUNT: Address = Address::repeat_byte(0x5a);
pub const NONCE: u64 = 7;
pub const BUNDLE_TX: H256 = H256::repeat_byte(0x22);

pub fn entry_point() -> Address {
    entry_point::ADDRESS.parse().unwrap()
}

pub fn paymaster() -> Address {
    Address::repeat_byte(0x90)
}

pub fn gas_price() -> GasPrice {
    GasPrice {
        slow: GasFees { max_fee_per_gas: 1_000.into(), max_priority_fee_per_gas: 100.into() },
        standard: GasFees { max_fee_per_gas: 2_000.into(), max_priority_fee_per_gas: 200.into() },
        fast: GasFees { max_fee_per_gas: 3_000.into(), max_priority_fee_per_gas: 300.into() },
    }
}

/// Bundler and paymaster behind one endpoint, the way the hosted service serves them
#[derive(Clone)]
pub struct MockBundler {
    pub sponsored: Arc<Mutex<Vec<UserOperation>>>,
    pub sent: Arc<Mutex<Vec<UserOperation>>>,
    pub receipt_polls: Arc<AtomicUsize>,
    /// Poll on which the receipt appears, `None` never includes the user operation
    pub included_after: Option<usize>,
    pub reject_sponsorship: bool,
    pub revert: bool,
}

impl Default for MockBundler {
    fn default() -> Self {
        Self {
            sponsored: Default::default(),
            sent: Default::default(),
            receipt_polls: Default::default(),
            included_after: Some(2),
            reject_sponsorship: false,
            revert: false,
        }
    }
}

#[async_trait]
impl BundlerApiServer for MockBundler {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(CHAIN_ID.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<Address>> {
        Ok(vec![entry_point()])
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        let hash = user_operation.hash(&entry_point, CHAIN_ID);
        self.sent.lock().unwrap().push(user_operation);
        Ok(hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        _user_operation: UserOperation,
        _entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        Ok(UserOperationGasEstimation {
            pre_verification_gas: 50_000.into(),
            verification_gas_limit: 300_000.into(),
            call_gas_limit: 80_000.into(),
            ..Default::default()
        })
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let polls = self.receipt_polls.fetch_add(1, Ordering::SeqCst) + 1;
        let included = self.included_after.map(|after| polls >= after).unwrap_or(false);
        let sent = self.sent.lock().unwrap().last().cloned();

        Ok(match sent {
            Some(uo) if included => Some(UserOperationReceipt {
                user_operation_hash,
                sender: uo.sender,
                nonce: uo.nonce,
                paymaster: uo.paymaster,
                actual_gas_cost: 1_000_000.into(),
                actual_gas_used: 150_000.into(),
                success: !self.revert,
                reason: if self.revert { "AA23 reverted".into() } else { String::new() },
                tx_receipt: InclusionReceipt {
                    transaction_hash: BUNDLE_TX,
                    block_hash: Some(H256::repeat_byte(0x33)),
                    block_number: Some(6_000_000.into()),
                },
            }),
            _ => None,
        })
    }
}

#[async_trait]
impl PimlicoApiServer for MockBundler {
    async fn get_user_operation_gas_price(&self) -> RpcResult<GasPrice> {
        Ok(gas_price())
    }
}

#[async_trait]
impl PaymasterApiServer for MockBundler {
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperation,
        _entry_point: Address,
    ) -> RpcResult<Sponsorship> {
        if self.reject_sponsorship {
            return Err(ErrorObject::owned(-32500, "sponsorship policy rejected", None::<()>));
        }
        self.sponsored.lock().unwrap().push(user_operation);

        Ok(Sponsorship {
            paymaster: paymaster(),
            paymaster_verification_gas_limit: 40_000.into(),
            paymaster_post_op_gas_limit: 1.into(),
            paymaster_data: "0xdeadbeef".parse().unwrap(),
            pre_verification_gas: 50_000.into(),
            verification_gas_limit: 300_000.into(),
            call_gas_limit: 80_000.into(),
        })
    }
}

/// The chain as seen through `eth_call`, `eth_getCode` and `eth_chainId`
#[derive(Clone, Debug)]
pub struct MockChain {
    pub deployed: bool,
    pub token_balance: U256,
}

impl Default for MockChain {
    fn default() -> Self {
        Self { deployed: false, token_balance: U256::from(1_500_000) }
    }
}

fn invalid_params(msg: &str) -> ErrorObjectOwned {
    ErrorObject::owned(-32602, msg.to_string(), None::<()>)
}

fn eth_call(params: Params, chain: &MockChain) -> Result<Bytes, ErrorObjectOwned> {
    let params: Vec<serde_json::Value> = params.parse()?;
    let tx = params.first().ok_or_else(|| invalid_params("missing transaction"))?;
    let data = tx
        .get("input")
        .or_else(|| tx.get("data"))
        .and_then(|data| data.as_str())
        .ok_or_else(|| invalid_params("missing call data"))?;
    let data: Bytes = data.parse().map_err(|_| invalid_params("call data is not hex"))?;

    if data.len() < 4 {
        return Err(invalid_params("call data too short"));
    }
    let selector: [u8; 4] = [data[0], data[1], data[2], data[3]];

    if selector == GetAddressCall::selector() {
        Ok(ACCOUNT.encode().into())
    } else if selector == GetNonceCall::selector() {
        Ok(U256::from(NONCE).encode().into())
    } else if selector == BalanceOfCall::selector() {
        Ok(chain.token_balance.encode().into())
    } else {
        Err(invalid_params("unknown selector"))
    }
}

pub fn chain_module(chain: MockChain) -> RpcModule<MockChain> {
    let mut module = RpcModule::new(chain);
    module
        .register_method("eth_chainId", |_, _| Ok::<U64, ErrorObjectOwned>(CHAIN_ID.into()))
        .unwrap();
    module
        .register_method("eth_getCode", |_, chain| {
            let code: Bytes =
                if chain.deployed { vec![0x60, 0x80].into() } else { Bytes::default() };
            Ok::<Bytes, ErrorObjectOwned>(code)
        })
        .unwrap();
    module.register_method("eth_call", eth_call).unwrap();
    module
}

pub fn bundler_module(bundler: MockBundler) -> RpcModule<()> {
    let mut module = RpcModule::new(());
    module.merge(BundlerApiServer::into_rpc(bundler.clone())).unwrap();
    module.merge(PimlicoApiServer::into_rpc(bundler.clone())).unwrap();
    module.merge(PaymasterApiServer::into_rpc(bundler)).unwrap();
    module
}

pub async fn start_server<C: Send + Sync + 'static>(
    module: RpcModule<C>,
) -> eyre::Result<(String, ServerHandle)> {
    let server = ServerBuilder::default().build("127.0.0.1:0").await?;
    let addr = server.local_addr()?;
    let handle = server.start(module);
    Ok((format!("http://{addr}"), handle))
}

pub struct TestContext {
    pub client: SmartAccountClient<Provider<Http>, SimpleAccount>,
    pub bundler: MockBundler,
    pub owner: Wallet,
    _handles: Vec<ServerHandle>,
}

pub async fn setup(bundler: MockBundler, chain: MockChain) -> eyre::Result<TestContext> {
    let (chain_url, chain_handle) = start_server(chain_module(chain)).await?;
    let (bundler_url, bundler_handle) = start_server(bundler_module(bundler.clone())).await?;

    let eth_client = Arc::new(Provider::<Http>::try_from(chain_url.as_str())?);
    let owner = Wallet::from_key(KEY)?;
    let account = SimpleAccount::derive(
        eth_client.clone(),
        owner.clone(),
        entry_point(),
        FACTORY_ADDRESS.parse()?,
        U256::zero(),
    )
    .await?;

    let timeout = Duration::from_secs(5);
    let bundler_client = BundlerClient::new(&bundler_url, entry_point(), timeout)?
        .with_receipt_polling(Duration::from_millis(10), Duration::from_millis(500));
    let paymaster_client = PaymasterClient::new(&bundler_url, entry_point(), timeout)?;

    let client =
        SmartAccountClient::new(account, eth_client, bundler_client, paymaster_client, CHAIN_ID);

    Ok(TestContext { client, bundler, owner, _handles: vec![chain_handle, bundler_handle] })
}
