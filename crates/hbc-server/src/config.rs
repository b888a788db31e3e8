//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use hbc_core::logging_facility::Profile;

/// Port used when the operator accepts the default
pub const DEFAULT_PORT: u16 = 5454;
pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = 65535;

#[derive(Debug, Clone, Parser)]
#[command(name = "hbc-server")]
#[command(about = "Human-being collection server", long_about = None)]
pub struct ServerConfig {
    /// Address the datagram socket binds to
    #[arg(long, env = "HBC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind; skips the interactive port prompts when given
    #[arg(long, env = "HBC_PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// JSON file the collection is loaded from and saved to
    #[arg(long, env = "HBC_DATA_FILE", default_value = "humans.json")]
    pub data_file: PathBuf,

    #[arg(long, env = "HBC_LOG_PROFILE", default_value = "development")]
    pub log_profile: Profile,
}
