//! hbc server
//!
//! Serves the human-being collection over UDP while accepting operator
//! commands on the terminal

use clap::Parser;
use hbc_core::logging_facility;
use hbc_core::{HbcError, Result};
use hbc_server::startup::negotiate_port;
use hbc_server::{Server, ServerConfig};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    logging_facility::init(config.log_profile);

    match execute(config).await {
        Ok(()) => {}
        // Closing the terminal during startup is a normal way to quit
        Err(e @ HbcError::NoInput) => {
            eprintln!("Error: {}", e);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn execute(config: ServerConfig) -> Result<()> {
    let port = match config.port {
        Some(port) => port,
        None => negotiate_port(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };
    let server = Server::start(&config, port).await?;
    server.run().await;
    Ok(())
}
