//! List advertised commands

use hbc_cli::UdpClient;

pub fn execute(client: &UdpClient) -> Result<(), Box<dyn std::error::Error>> {
    for data in client.commands() {
        println!("{}", data.help_line());
    }
    Ok(())
}
