//! hbc client library - datagram client and script expansion used by `hbc`

pub mod client;
pub mod script;

pub use client::UdpClient;
pub use script::{expand_script, parse_script_line, ScriptStep};
