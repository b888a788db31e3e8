//! Console-only administrative commands

use hbc_core_types::schema::OP_SAVE_COLLECTION;

use crate::argument::{CommandArgument, CommandData};
use crate::contract::{Command, ExecutionContext, Outcome};
use crate::errors::Result;
use crate::protocol::Response;
use crate::{log_op_end, log_op_error, log_op_start};

/// Write the collection to the configured data file
fn save_collection(ctx: &ExecutionContext) -> Result<Response> {
    log_op_start!(OP_SAVE_COLLECTION, path = %ctx.store.path().display());
    let start = std::time::Instant::now();

    let snapshot = ctx.collection.snapshot();
    ctx.store.save(&snapshot).map_err(|e| {
        log_op_error!(
            OP_SAVE_COLLECTION,
            e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        OP_SAVE_COLLECTION,
        duration_ms = start.elapsed().as_millis() as u64,
        elements = snapshot.len() as u64
    );
    Ok(Response::text(format!(
        "Collection saved to {}",
        ctx.store.path().display()
    )))
}

pub struct SaveCommand {
    data: CommandData,
}

impl Default for SaveCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new("save", "Save the collection to the data file", 0, ""),
        }
    }
}

impl Command for SaveCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        save_collection(ctx).map(Outcome::Done)
    }
}

/// Stop the server, optionally saving first
///
/// Asks the operator whether to save; an unanswered prompt means no.
pub struct ExitCommand {
    data: CommandData,
}

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub const PROMPT: &'static str = "Save collection before exit?";

    pub fn new() -> Self {
        Self {
            data: CommandData::new("exit", "Stop the server", 0, ""),
        }
    }
}

impl Command for ExitCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, _ctx: &ExecutionContext) -> Result<Outcome> {
        Ok(Outcome::Confirm {
            prompt: Self::PROMPT.to_string(),
            fallback: Response::error("exit can only be confirmed from the server console"),
        })
    }

    fn resume(
        &self,
        _argument: &CommandArgument,
        confirmed: bool,
        ctx: &ExecutionContext,
    ) -> Result<Response> {
        let mut lines = Vec::new();
        if confirmed {
            lines.push(save_collection(ctx)?.payload);
        }
        ctx.shutdown.trigger();
        lines.push("Server is shutting down".to_string());
        Ok(Response::text(lines.join("\n")))
    }
}

/// List server commands with their usage
pub struct HelpCommand {
    data: CommandData,
    entries: Vec<CommandData>,
}

impl HelpCommand {
    /// `entries` are the other server commands; help lists itself too
    pub fn new(mut entries: Vec<CommandData>) -> Self {
        let data = CommandData::new("help", "Show available server commands", 0, "");
        entries.retain(|entry| entry.name != data.name);
        entries.push(data.clone());
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { data, entries }
    }
}

impl Command for HelpCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, _ctx: &ExecutionContext) -> Result<Outcome> {
        let listing = self
            .entries
            .iter()
            .map(CommandData::help_line)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Outcome::Done(Response::text(listing)))
    }
}
