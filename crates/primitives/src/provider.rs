//! Utils for creating ethers providers

use ethers::{
    providers::{Http, Middleware, Provider},
    types::Chain,
};
use reqwest::{Client, Url};
use std::time::Duration;

/// Creates ethers provider with HTTP connection, together with the chain id the endpoint serves
///
/// Every request made through the provider is bounded by `timeout`.
pub async fn create_http_provider(
    addr: &str,
    timeout: Duration,
) -> eyre::Result<(Provider<Http>, u64)> {
    let url = Url::parse(addr)?;
    let client = Client::builder().timeout(timeout).build()?;
    let provider = Provider::new(Http::new_with_client(url, client));

    let chain_id = provider.get_chainid().await?;

    let provider = provider.interval(if chain_id == Chain::Dev.into() {
        Duration::from_millis(5u64)
    } else {
        Duration::from_millis(500u64)
    });

    Ok((provider, chain_id.as_u64()))
}
