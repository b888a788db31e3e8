mod mutate;
mod query;
mod script;

pub use mutate::{
    ClearCommand, InsertCommand, RemoveGreaterCommand, RemoveKeyCommand, RemoveLowerKeyCommand,
    UpdateCommand,
};
pub use query::{
    CountGreaterThanMoodCommand, CountLessThanMinutesOfWaitingCommand, FilterByCarCommand,
    InfoCommand, ShowCommand,
};
pub use script::ExecuteScriptCommand;
