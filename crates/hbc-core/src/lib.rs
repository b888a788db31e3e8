//! hbc core - command invocation layer for the human-being collection service
//!
//! This crate provides everything both execution lines share:
//! - the command contract and the argument/metadata model
//! - the validation pipeline guarding command arguments
//! - the invoker with its server and client dispatch tables
//! - the datagram wire protocol
//! - the collection, its storage and the shutdown signal
//! - error and logging facilities

pub mod argument;
pub mod commands;
pub mod console;
pub mod contract;
pub mod errors;
pub mod invoker;
pub mod logging_facility;
pub mod model;
pub mod protocol;
pub mod rules;
pub mod shutdown;
pub mod storage;

// Macros refer to schema constants through this path
pub use hbc_core_types;

// Re-export commonly used types
pub use argument::{parse_command_line, CommandArgument, CommandData};
pub use console::Console;
pub use contract::{Command, ExecutionContext, Outcome};
pub use errors::{ErrorKind, HbcError, Result};
pub use invoker::{Invoker, InvokerBuilder};
pub use model::{CollectionOfHumanBeings, SharedCollection};
pub use protocol::{ClientFrame, Request, Response, ServerFrame};
pub use shutdown::ShutdownSignal;
pub use storage::CollectionStore;
