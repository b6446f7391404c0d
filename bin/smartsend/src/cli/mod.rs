use crate::utils::run_until_ctrl_c;
use args::SessionArgs;
use clap::{value_parser, Parser, Subcommand};
use std::ffi::OsString;

pub mod args;
pub mod commands;

/// The main smartsend CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "smartsend", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }

    /// Parses the command line twice: the entries of `--env-file` are loaded in between so they
    /// back the `env` flags. Values already set in the process environment win over the file.
    pub fn try_parse_with_env_file<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let cli = Self::try_parse_from(args.clone())?;

        match dotenv::from_path(cli.command.session().env_file.as_path()) {
            Ok(()) => Self::try_parse_from(args),
            Err(_) => Ok(cli),
        }
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a sponsored call (native transaction) from the smart account
    #[command(name = "native")]
    Native(commands::NativeCommand),

    /// Send a sponsored ERC-20 transfer from the smart account
    #[command(name = "erc20")]
    Erc20(commands::Erc20Command),

    /// Derive the smart account and print its address
    #[command(name = "account")]
    Account(commands::AccountCommand),
}

impl Commands {
    pub fn session(&self) -> &SessionArgs {
        match self {
            Commands::Native(command) => &command.session,
            Commands::Erc20(command) => &command.session,
            Commands::Account(command) => &command.session,
        }
    }
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::try_parse_with_env_file(std::env::args_os()).unwrap_or_else(|err| err.exit());

    let rust_log = match std::env::var("RUST_LOG") {
        Ok(val) => format!("{val},smartsend={}", cli.get_log_level()),
        Err(_) => format!("smartsend={}", cli.get_log_level()),
    };
    std::env::set_var("RUST_LOG", rust_log);
    tracing_subscriber::fmt::init();

    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    let task = async move {
        match cli.command {
            Commands::Native(command) => command.execute().await,
            Commands::Erc20(command) => command.execute().await,
            Commands::Account(command) => command.execute().await,
        }
    };

    rt.block_on(run_until_ctrl_c(task))
}
