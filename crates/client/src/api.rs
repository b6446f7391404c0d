use ethers::types::{Address, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use smartsend_primitives::{
    GasPrice, Sponsorship, UserOperation, UserOperationGasEstimation, UserOperationHash,
    UserOperationReceipt,
};

/// The ERC-4337 `eth` namespace RPC methods of a bundler
#[rpc(client, server, namespace = "eth")]
pub trait BundlerApi {
    /// Retrieve the current [EIP-155](https://eips.ethereum.org/EIPS/eip-155) chain ID.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Get the entry points the bundler accepts user operations for.
    #[method(name = "supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<Address>>;

    /// Send a [UserOperation](UserOperation).
    ///
    /// # Arguments
    /// * `user_operation: UserOperation` - The signed [UserOperation](UserOperation).
    /// * `entry_point: Address` - The address of the entry point.
    ///
    /// # Returns
    /// * `RpcResult<UserOperationHash>` - The hash of the sent [UserOperation](UserOperation).
    #[method(name = "sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    /// Estimate the gas limits of a user operation.
    #[method(name = "estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    /// Retrieve the receipt of a [UserOperation](UserOperation), `None` while it is not included.
    #[method(name = "getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>>;
}

/// Pimlico specific bundler methods
#[rpc(client, server, namespace = "pimlico")]
pub trait PimlicoApi {
    /// Gas prices (slow, standard, fast) the bundler accepts right now.
    #[method(name = "getUserOperationGasPrice")]
    async fn get_user_operation_gas_price(&self) -> RpcResult<GasPrice>;
}

/// Paymaster methods
#[rpc(client, server, namespace = "pm")]
pub trait PaymasterApi {
    /// Ask the paymaster to pay for the user operation.
    ///
    /// The returned [Sponsorship](Sponsorship) carries the paymaster fields and gas limits
    /// re-estimated with the paymaster in place.
    #[method(name = "sponsorUserOperation")]
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperation,
        entry_point: Address,
    ) -> RpcResult<Sponsorship>;
}
