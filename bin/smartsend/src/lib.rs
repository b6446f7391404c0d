pub mod cli;
pub mod error;
pub mod session;
pub mod utils;
