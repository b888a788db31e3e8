//! hbc server - runs the console line and the network line over one invoker

pub mod config;
pub mod console;
pub mod server;
pub mod startup;
pub mod transport;

pub use config::ServerConfig;
pub use console::{run_console_line, TerminalConsole};
pub use server::Server;
pub use transport::UdpEndpoint;
