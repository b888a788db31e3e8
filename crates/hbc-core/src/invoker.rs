//! Dispatch tables and the two execution paths
//!
//! The tables are filled through [`InvokerBuilder`] before any line starts
//! and are read-only afterwards, so the built [`Invoker`] is shared by `Arc`
//! without a lock. Only the collection inside the context is locked.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use hbc_core_types::schema::{OP_CLIENT_COMMAND, OP_SERVER_COMMAND};
use hbc_core_types::DispatchContext;

use crate::argument::{CommandArgument, CommandData};
use crate::commands::{
    ClearCommand, CountGreaterThanMoodCommand, CountLessThanMinutesOfWaitingCommand,
    ExecuteScriptCommand, ExitCommand, FilterByCarCommand, HelpCommand, InfoCommand,
    InsertCommand, RemoveGreaterCommand, RemoveKeyCommand, RemoveLowerKeyCommand, SaveCommand,
    ShowCommand, UpdateCommand,
};
use crate::console::Console;
use crate::contract::{Command, ExecutionContext, Outcome};
use crate::errors::{HbcError, Result};
use crate::protocol::{Request, Response};
use crate::{log_op_end, log_op_error, log_op_start};

type CommandTable = HashMap<String, Arc<dyn Command>>;

/// Collects commands before the tables are frozen
#[derive(Default)]
pub struct InvokerBuilder {
    server: CommandTable,
    client: CommandTable,
}

impl InvokerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a console-only command; a later command with the same name wins
    pub fn register_server_command(&mut self, command: impl Command + 'static) -> &mut Self {
        let name = command.data().name.clone();
        self.server.insert(name, Arc::new(command));
        self
    }

    /// Add a network-invokable command; a later command with the same name wins
    pub fn register_client_command(&mut self, command: impl Command + 'static) -> &mut Self {
        let name = command.data().name.clone();
        self.client.insert(name, Arc::new(command));
        self
    }

    /// Shapes of the server commands registered so far
    pub fn server_command_data(&self) -> Vec<CommandData> {
        self.server.values().map(|c| c.data().clone()).collect()
    }

    pub fn build(self, context: ExecutionContext) -> Invoker {
        Invoker {
            server: self.server,
            client: self.client,
            context,
        }
    }
}

/// Owns both dispatch tables and mediates every execution
pub struct Invoker {
    server: CommandTable,
    client: CommandTable,
    context: ExecutionContext,
}

impl Invoker {
    pub fn builder() -> InvokerBuilder {
        InvokerBuilder::new()
    }

    /// Invoker with every built-in client and server command
    pub fn with_builtin_commands(context: ExecutionContext) -> Self {
        let mut builder = InvokerBuilder::new();
        builder
            .register_client_command(ClearCommand::new())
            .register_client_command(CountGreaterThanMoodCommand::new())
            .register_client_command(CountLessThanMinutesOfWaitingCommand::new())
            .register_client_command(FilterByCarCommand::new())
            .register_client_command(InfoCommand::new())
            .register_client_command(InsertCommand::new())
            .register_client_command(RemoveGreaterCommand::new())
            .register_client_command(RemoveKeyCommand::new())
            .register_client_command(RemoveLowerKeyCommand::new())
            .register_client_command(ShowCommand::new())
            .register_client_command(UpdateCommand::new())
            .register_client_command(ExecuteScriptCommand::new());

        builder
            .register_server_command(ExitCommand::new())
            .register_server_command(SaveCommand::new());
        let help = HelpCommand::new(builder.server_command_data());
        builder.register_server_command(help);

        builder.build(context)
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Server command shapes, sorted by name
    pub fn server_commands(&self) -> Vec<CommandData> {
        sorted_data(&self.server)
    }

    /// Client command shapes, sorted by name; this is what clients are sent
    pub fn advertised_commands(&self) -> Vec<CommandData> {
        sorted_data(&self.client)
    }

    pub fn is_client_command(&self, name: &str) -> bool {
        self.client.contains_key(name)
    }

    /// Run a request received from the network
    ///
    /// Always produces a response. Unknown names, invalid arguments and
    /// command failures become error responses; a confirmation request is
    /// answered with its fallback since nobody can be asked.
    pub fn execute_client_command(&self, request: Request, dispatch: &DispatchContext) -> Response {
        let Request {
            command_name,
            argument,
        } = request;
        log_op_start!(
            OP_CLIENT_COMMAND,
            command = %command_name,
            origin = %dispatch.origin,
            request_id = %dispatch.request_id,
            peer = %dispatch.peer_label()
        );
        let start = Instant::now();

        let result = self
            .client
            .get(&command_name)
            .ok_or_else(|| HbcError::CommandNotFound {
                name: command_name.clone(),
            })
            .and_then(|command| run(command.as_ref(), argument, &self.context))
            .map(|(outcome, _)| outcome.into_response());

        match result {
            Ok(response) => {
                log_op_end!(
                    OP_CLIENT_COMMAND,
                    duration_ms = start.elapsed().as_millis() as u64,
                    command = %command_name,
                    request_id = %dispatch.request_id,
                    is_error = response.is_error()
                );
                response
            }
            Err(err) => {
                log_op_error!(
                    OP_CLIENT_COMMAND,
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    command = %command_name,
                    request_id = %dispatch.request_id
                );
                Response::from(&err)
            }
        }
    }

    /// Run a command typed on the server console
    ///
    /// Every outcome ends up as text on `console`; errors are reported as one
    /// line and never stop the caller.
    pub fn execute_server_command(
        &self,
        name: &str,
        argument: CommandArgument,
        console: &mut dyn Console,
    ) {
        let dispatch = DispatchContext::console();
        log_op_start!(
            OP_SERVER_COMMAND,
            command = %name,
            origin = %dispatch.origin,
            request_id = %dispatch.request_id
        );
        let start = Instant::now();

        let result = self
            .server
            .get(name)
            .ok_or_else(|| HbcError::CommandNotFound {
                name: name.to_string(),
            })
            .and_then(|command| {
                let (outcome, argument) = run(command.as_ref(), argument, &self.context)?;
                match outcome {
                    Outcome::Done(response) => Ok(response),
                    Outcome::Confirm { prompt, .. } => {
                        let confirmed = console.confirm(&prompt).unwrap_or(false);
                        command.resume(&argument, confirmed, &self.context)
                    }
                }
            });

        match result {
            Ok(response) => {
                log_op_end!(
                    OP_SERVER_COMMAND,
                    duration_ms = start.elapsed().as_millis() as u64,
                    command = %name,
                    request_id = %dispatch.request_id
                );
                if response.is_error() {
                    console.print_error(&response.render());
                } else {
                    console.print(&response.render());
                }
            }
            Err(err) => {
                log_op_error!(
                    OP_SERVER_COMMAND,
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    command = %name,
                    request_id = %dispatch.request_id
                );
                console.print_error(&err.to_string());
            }
        }
    }
}

/// Validate then execute, handing back the validated argument for `resume`
fn run(
    command: &dyn Command,
    argument: CommandArgument,
    context: &ExecutionContext,
) -> Result<(Outcome, CommandArgument)> {
    let argument = command.validate(argument)?;
    let outcome = command.execute(&argument, context)?;
    Ok((outcome, argument))
}

fn sorted_data(table: &CommandTable) -> Vec<CommandData> {
    let mut data: Vec<CommandData> = table.values().map(|c| c.data().clone()).collect();
    data.sort_by(|a, b| a.name.cmp(&b.name));
    data
}
