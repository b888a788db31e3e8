//! hbc CLI
//!
//! Command-line client for the human-being collection server

use std::time::Duration;

use clap::{Parser, Subcommand};
use hbc_cli::UdpClient;
use hbc_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "hbc")]
#[command(about = "hbc - human-being collection client", long_about = None)]
struct Cli {
    /// Server address as host:port
    #[arg(long, env = "HBC_SERVER", default_value = "127.0.0.1:5454", global = true)]
    server: String,

    /// How long to wait for each reply
    #[arg(long, default_value_t = 2000, global = true)]
    timeout_ms: u64,

    /// Resends after a timed-out attempt
    #[arg(long, default_value_t = 3, global = true)]
    retries: u32,

    #[arg(long, env = "HBC_LOG_PROFILE", default_value = "development", global = true)]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the commands the server accepts
    Commands,
    /// Send one command
    Send(commands::send::SendArgs),
    /// Run the commands listed in a script file
    Script(commands::script::ScriptArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match UdpClient::connect(
        &cli.server,
        Duration::from_millis(cli.timeout_ms),
        cli.retries,
    )
    .await
    {
        Ok(client) => match cli.command {
            Commands::Commands => commands::list::execute(&client),
            Commands::Send(args) => commands::send::execute(&client, args).await,
            Commands::Script(args) => commands::script::execute(&client, args).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
