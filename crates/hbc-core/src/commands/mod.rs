//! Built-in commands
//!
//! `client` commands are invokable over the network and advertised on
//! handshake; `server` commands are only reachable from the console.

pub mod client;
pub mod server;

pub use client::{
    ClearCommand, CountGreaterThanMoodCommand, CountLessThanMinutesOfWaitingCommand,
    ExecuteScriptCommand, FilterByCarCommand, InfoCommand, InsertCommand, RemoveGreaterCommand,
    RemoveKeyCommand, RemoveLowerKeyCommand, ShowCommand, UpdateCommand,
};
pub use server::{ExitCommand, HelpCommand, SaveCommand};
