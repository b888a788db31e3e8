//! Run a script file

use std::path::PathBuf;

use clap::Args;
use hbc_cli::{expand_script, ScriptStep, UdpClient};
use hbc_core::ErrorKind;

use super::print_response;

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Script file, one command per line
    pub path: PathBuf,
}

/// Send every step in order; rejected commands are reported and skipped,
/// an unreachable server stops the run
pub async fn execute(client: &UdpClient, args: ScriptArgs) -> Result<(), Box<dyn std::error::Error>> {
    for step in expand_script(&args.path)? {
        match step {
            ScriptStep::Skipped { message } => eprintln!("{message}"),
            ScriptStep::Send {
                source,
                line,
                request,
            } => match client.send(request).await {
                Ok(response) => print_response(&response),
                Err(e) if matches!(e.kind(), ErrorKind::Io | ErrorKind::Protocol) => {
                    return Err(e.into())
                }
                Err(e) => eprintln!("{}:{line}: {e}", source.display()),
            },
        }
    }
    Ok(())
}
