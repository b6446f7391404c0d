pub mod entry_point;
pub mod erc20;
mod error;
mod gen;
pub mod simple_account;
pub mod utils;

pub use entry_point::EntryPoint;
pub use erc20::Erc20;
pub use error::{decode_revert_error, decode_revert_string, ContractError};
pub use gen::{
    entry_point_api, simple_account_api, simple_account_factory_api, token_api, EntryPointAPI,
    FailedOp, SimpleAccountAPI, SimpleAccountFactoryAPI, TokenAPI,
};
pub use simple_account::SimpleAccountFactory;
