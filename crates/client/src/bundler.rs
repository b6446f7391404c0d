//! Client of the bundler JSON-RPC endpoint
use crate::{
    api::{BundlerApiClient, PimlicoApiClient},
    error::{redact_url, ClientError},
};
use ethers::types::Address;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use smartsend_primitives::{
    constants::rpc::{RECEIPT_POLL_INTERVAL, RECEIPT_TIMEOUT},
    GasPrice, UserOperation, UserOperationGasEstimation, UserOperationHash, UserOperationReceipt,
};
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct BundlerClient {
    client: HttpClient,
    entry_point: Address,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

impl BundlerClient {
    /// Creates a client for the bundler at `url`
    ///
    /// # Arguments
    /// * `url` - The bundler endpoint
    /// * `entry_point` - The entry point user operations are sent to
    /// * `request_timeout` - Upper bound of every single request
    pub fn new(
        url: &str,
        entry_point: Address,
        request_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = HttpClientBuilder::default()
            .request_timeout(request_timeout)
            .build(url)
            .map_err(|err| ClientError::InvalidEndpoint {
                url: redact_url(url).to_string(),
                inner: err.to_string(),
            })?;
        debug!("Bundler client connected to {}", redact_url(url));

        Ok(Self {
            client,
            entry_point,
            poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL),
            receipt_timeout: Duration::from_secs(RECEIPT_TIMEOUT),
        })
    }

    /// Sets how often and for how long [wait_for_receipt](Self::wait_for_receipt) polls
    pub fn with_receipt_polling(
        mut self,
        poll_interval: Duration,
        receipt_timeout: Duration,
    ) -> Self {
        self.poll_interval = poll_interval;
        self.receipt_timeout = receipt_timeout;
        self
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    pub async fn chain_id(&self) -> Result<u64, ClientError> {
        Ok(BundlerApiClient::chain_id(&self.client).await?.as_u64())
    }

    pub async fn supported_entry_points(&self) -> Result<Vec<Address>, ClientError> {
        Ok(BundlerApiClient::supported_entry_points(&self.client).await?)
    }

    /// Fails unless the bundler accepts user operations for the configured entry point
    pub async fn ensure_entry_point_supported(&self) -> Result<(), ClientError> {
        let supported = self.supported_entry_points().await?;
        if supported.contains(&self.entry_point) {
            Ok(())
        } else {
            Err(ClientError::UnsupportedEntryPoint(self.entry_point))
        }
    }

    pub async fn get_user_operation_gas_price(&self) -> Result<GasPrice, ClientError> {
        let price = PimlicoApiClient::get_user_operation_gas_price(&self.client).await?;
        trace!("Bundler gas price: {price:?}");
        Ok(price)
    }

    pub async fn estimate_user_operation_gas(
        &self,
        uo: &UserOperation,
    ) -> Result<UserOperationGasEstimation, ClientError> {
        Ok(BundlerApiClient::estimate_user_operation_gas(&self.client, uo.clone(), self.entry_point)
            .await?)
    }

    pub async fn send_user_operation(
        &self,
        uo: &UserOperation,
    ) -> Result<UserOperationHash, ClientError> {
        trace!("Sending user operation {uo:?} to entry point {:?}", self.entry_point);
        Ok(BundlerApiClient::send_user_operation(&self.client, uo.clone(), self.entry_point).await?)
    }

    pub async fn get_user_operation_receipt(
        &self,
        hash: UserOperationHash,
    ) -> Result<Option<UserOperationReceipt>, ClientError> {
        Ok(BundlerApiClient::get_user_operation_receipt(&self.client, hash).await?)
    }

    /// Polls the receipt of the user operation until it is included or the receipt timeout
    /// elapses
    pub async fn wait_for_receipt(
        &self,
        hash: UserOperationHash,
    ) -> Result<UserOperationReceipt, ClientError> {
        let poll = async {
            let mut interval = tokio::time::interval(self.poll_interval);
            loop {
                interval.tick().await;
                if let Some(receipt) = self.get_user_operation_receipt(hash).await? {
                    return Ok::<_, ClientError>(receipt);
                }
                trace!("User operation {hash} not included yet");
            }
        };

        tokio::time::timeout(self.receipt_timeout, poll)
            .await
            .map_err(|_| ClientError::ReceiptTimeout { hash, timeout: self.receipt_timeout })?
    }
}
