//! Clients of the bundler and paymaster JSON-RPC services and the smart account client which
//! turns calls into sponsored user operations.

mod account;
mod api;
mod bundler;
mod error;
mod paymaster;
mod smart_account;

pub use account::{SimpleAccount, SmartAccount};
pub use api::{
    BundlerApiClient, BundlerApiServer, PaymasterApiClient, PaymasterApiServer, PimlicoApiClient,
    PimlicoApiServer,
};
pub use bundler::BundlerClient;
pub use error::ClientError;
pub use paymaster::PaymasterClient;
pub use smart_account::SmartAccountClient;
