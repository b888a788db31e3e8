//! Send a single command

use clap::Args;
use hbc_cli::UdpClient;
use hbc_core::model::HumanBeingDraft;
use hbc_core::{CommandArgument, Request};

use super::print_response;

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Command name
    pub name: String,

    /// Command arguments
    pub args: Vec<String>,

    /// Element as JSON, for commands that need one
    #[arg(long)]
    pub element: Option<String>,
}

pub async fn execute(client: &UdpClient, args: SendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut argument = CommandArgument::from_tokens(&args.args);
    if let Some(json) = args.element {
        let element: HumanBeingDraft =
            serde_json::from_str(&json).map_err(|e| format!("Invalid element: {e}"))?;
        argument = argument.with_element(element);
    }

    let response = client.send(Request::new(args.name, argument)).await?;
    print_response(&response);
    if response.is_error() {
        return Err("server rejected the command".into());
    }
    Ok(())
}
