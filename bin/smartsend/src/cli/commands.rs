use super::args::{Erc20Args, NativeArgs, SessionArgs};
use crate::session::{Session, TokenTransfer};
use clap::Parser;
use smartsend_client::SmartAccount;
use smartsend_primitives::Call;
use tracing::info;

/// Send a sponsored call from the smart account
#[derive(Debug, Parser)]
pub struct NativeCommand {
    #[clap(flatten)]
    pub session: SessionArgs,

    #[clap(flatten)]
    native: NativeArgs,
}

impl NativeCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let session = Session::bootstrap(&self.session).await?;
        let call = Call { to: self.native.to, value: self.native.value, data: self.native.data };
        session.send_native(call).await?;
        Ok(())
    }
}

/// Send a sponsored ERC-20 transfer from the smart account
#[derive(Debug, Parser)]
pub struct Erc20Command {
    #[clap(flatten)]
    pub session: SessionArgs,

    #[clap(flatten)]
    erc20: Erc20Args,
}

impl Erc20Command {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let session = Session::bootstrap(&self.session).await?;
        let transfer = TokenTransfer {
            token: self.erc20.token,
            recipient: self.erc20.recipient,
            amount: self.erc20.amount,
            decimals: self.erc20.decimals,
            min_balance: self.erc20.min_balance,
            symbol: self.erc20.symbol,
            faucet: self.erc20.faucet,
        };
        session.send_erc20(&transfer).await?;
        Ok(())
    }
}

/// Derive the smart account and print its address
#[derive(Debug, Parser)]
pub struct AccountCommand {
    #[clap(flatten)]
    pub session: SessionArgs,
}

impl AccountCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let session = Session::bootstrap(&self.session).await?;
        let account = session.account();
        info!("Owner: {:?}, salt: {}", account.owner(), account.salt());
        println!("{:?}", account.address());
        Ok(())
    }
}
