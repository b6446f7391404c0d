//! Client of the paymaster JSON-RPC endpoint
use crate::{
    api::PaymasterApiClient,
    error::{redact_url, ClientError},
};
use ethers::types::Address;
use jsonrpsee::{
    core::ClientError as RpcClientError,
    http_client::{HttpClient, HttpClientBuilder},
};
use smartsend_primitives::{Sponsorship, UserOperation};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct PaymasterClient {
    client: HttpClient,
    entry_point: Address,
}

impl PaymasterClient {
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
        debug!("Paymaster client connected to {}", redact_url(url));

        Ok(Self { client, entry_point })
    }

    /// Requests sponsorship of the user operation
    ///
    /// An error object returned by the paymaster means it refused to pay and is reported as
    /// [ClientError::Sponsorship].
    pub async fn sponsor_user_operation(
        &self,
        uo: &UserOperation,
    ) -> Result<Sponsorship, ClientError> {
        let res =
            PaymasterApiClient::sponsor_user_operation(&self.client, uo.clone(), self.entry_point)
                .await;

        match res {
            Ok(sponsorship) if sponsorship.paymaster.is_zero() => {
                Err(ClientError::Sponsorship("paymaster address is missing".into()))
            }
            Ok(sponsorship) => Ok(sponsorship),
            Err(RpcClientError::Call(err)) => Err(ClientError::Sponsorship(err.message().into())),
            Err(err) => Err(err.into()),
        }
    }
}
