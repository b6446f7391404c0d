use async_trait::async_trait;
use clap::Parser;
use ethers::{
    abi::AbiEncode,
    contract::EthCall,
    types::{Address, Bytes, H256, U256, U64},
};
use jsonrpsee::{
    core::RpcResult,
    server::{ServerBuilder, ServerHandle},
    types::{ErrorObject, ErrorObjectOwned, Params},
    RpcModule,
};
use smartsend::cli::args::SessionArgs;
use smartsend_client::{BundlerApiServer, PaymasterApiServer, PimlicoApiServer};
use smartsend_contracts::{
    entry_point_api::GetNonceCall,
    simple_account_factory_api::GetAddressCall,
    token_api::{BalanceOfCall, DecimalsCall, SymbolCall},
};
use smartsend_primitives::{
    constants::entry_point, GasFees, GasPrice, InclusionReceipt, Sponsorship, UserOperation,
    UserOperationGasEstimation, UserOperationHash, UserOperationReceipt,
};
use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

pub const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const CHAIN_ID: u64 = 11_155_111;
pub const ACCOUNT: Address = Address::repeat_byte(0x5a);
pub const NONCE: u64 = 3;
pub const BUNDLE_TX: H256 = H256::repeat_byte(0x22);
pub const USDC: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";
pub const RECIPIENT: &str = "0x3bC25D139069Ca06f7079fE67dcEd166b40edA9e";

/// Bundler and paymaster behind one endpoint
#[derive(Clone, Default)]
pub struct MockBundler {
    pub sponsored: Arc<Mutex<Vec<UserOperation>>>,
    pub sent: Arc<Mutex<Vec<UserOperation>>>,
}

#[async_trait]
impl BundlerApiServer for MockBundler {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(CHAIN_ID.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<Address>> {
        Ok(vec![entry_point::ADDRESS.parse().unwrap()])
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
        Ok(UserOperationGasEstimation::default())
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let sent = self.sent.lock().unwrap().last().cloned();
        Ok(sent.map(|uo| UserOperationReceipt {
            user_operation_hash,
            sender: uo.sender,
            nonce: uo.nonce,
            paymaster: uo.paymaster,
            actual_gas_cost: 1_000_000.into(),
            actual_gas_used: 150_000.into(),
            success: true,
            reason: String::new(),
            tx_receipt: InclusionReceipt {
                transaction_hash: BUNDLE_TX,
                block_hash: Some(H256::repeat_byte(0x33)),
                block_number: Some(6_000_000.into()),
            },
        }))
    }
}

#[async_trait]
impl PimlicoApiServer for MockBundler {
    async fn get_user_operation_gas_price(&self) -> RpcResult<GasPrice> {
        let fees = GasFees { max_fee_per_gas: 3_000.into(), max_priority_fee_per_gas: 300.into() };
        Ok(GasPrice { slow: fees, standard: fees, fast: fees })
    }
}

#[async_trait]
impl PaymasterApiServer for MockBundler {
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperation,
        _entry_point: Address,
    ) -> RpcResult<Sponsorship> {
        self.sponsored.lock().unwrap().push(user_operation);
        Ok(Sponsorship {
            paymaster: Address::repeat_byte(0x90),
            paymaster_verification_gas_limit: 40_000.into(),
            paymaster_post_op_gas_limit: 1.into(),
            paymaster_data: "0xdeadbeef".parse().unwrap(),
            pre_verification_gas: 50_000.into(),
            verification_gas_limit: 300_000.into(),
            call_gas_limit: 80_000.into(),
        })
    }
}

/// Chain holding the account factory, the entry point and a 6 decimals token
#[derive(Clone)]
pub struct MockChain {
    pub token_balance: U256,
    pub chain_id_calls: Arc<AtomicUsize>,
}

impl MockChain {
    pub fn with_balance(token_balance: U256) -> Self {
        Self { token_balance, chain_id_calls: Default::default() }
    }
}

fn invalid_params(msg: &str) -> ErrorObjectOwned {
    ErrorObject::owned(-32602, msg.to_string(), None::<()>)
}

fn eth_call(params: Params, chain: &MockChain) -> Result<Bytes, ErrorObjectOwned> {
    let params: Vec<serde_json::Value> = params.parse()?;
    let data = params
        .first()
        .and_then(|tx| tx.get("input").or_else(|| tx.get("data")))
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
    } else if selector == DecimalsCall::selector() {
        Ok(U256::from(6).encode().into())
    } else if selector == SymbolCall::selector() {
        Ok("USDC".to_string().encode().into())
    } else {
        Err(invalid_params("unknown selector"))
    }
}

pub fn chain_module(chain: MockChain) -> RpcModule<MockChain> {
    let mut module = RpcModule::new(chain);
    module
        .register_method("eth_chainId", |_, chain| {
            chain.chain_id_calls.fetch_add(1, Ordering::SeqCst);
            Ok::<U64, ErrorObjectOwned>(CHAIN_ID.into())
        })
        .unwrap();
    module
        .register_method("eth_getCode", |_, _| Ok::<Bytes, ErrorObjectOwned>(Bytes::default()))
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
    pub args: SessionArgs,
    pub chain: MockChain,
    pub bundler: MockBundler,
    _handles: Vec<ServerHandle>,
}

/// Starts both servers; the owner key is only stored in the env file under `dir`
pub async fn setup(chain: MockChain, dir: &Path) -> eyre::Result<TestContext> {
    let bundler = MockBundler::default();
    let (chain_url, chain_handle) = start_server(chain_module(chain.clone())).await?;
    let (bundler_url, bundler_handle) = start_server(bundler_module(bundler.clone())).await?;

    let env_file = dir.join("smartsend.env");
    std::fs::write(&env_file, format!("PRIVATE_KEY={KEY}\n"))?;

    let args = SessionArgs::try_parse_from([
        "session",
        "--api-key",
        "test-key",
        "--env-file",
        env_file.to_str().unwrap(),
        "--rpc-url",
        &chain_url,
        "--bundler-url",
        &bundler_url,
        "--timeout",
        "5s",
        "--receipt-timeout",
        "2s",
        "--poll-interval",
        "10ms",
    ])?;
    // only the env file provides the key
    let args = SessionArgs { private_key: None, ..args };

    Ok(TestContext { args, chain, bundler, _handles: vec![chain_handle, bundler_handle] })
}
