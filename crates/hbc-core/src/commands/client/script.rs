use crate::argument::{CommandArgument, CommandData};
use crate::contract::{Command, ExecutionContext, Outcome};
use crate::errors::Result;
use crate::protocol::Response;

/// Acknowledges a script run
///
/// Scripts live on the client's filesystem; the client expands them into
/// one request per line and only reports the run here.
pub struct ExecuteScriptCommand {
    data: CommandData,
}

impl Default for ExecuteScriptCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecuteScriptCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "execute_script",
                "Run the commands listed in @file_name, one per line",
                1,
                "@file_name",
            ),
        }
    }
}

impl Command for ExecuteScriptCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, argument: &CommandArgument, _ctx: &ExecutionContext) -> Result<Outcome> {
        Ok(Outcome::Done(Response::text(format!(
            "Executing script {}",
            argument.raw()
        ))))
    }
}
