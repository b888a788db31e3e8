//! The surface every executable command implements

use crate::argument::{CommandArgument, CommandData};
use crate::errors::{HbcError, Result};
use crate::model::SharedCollection;
use crate::protocol::Response;
use crate::rules::validation;
use crate::shutdown::ShutdownSignal;
use crate::storage::CollectionStore;

/// Handles a command executes against
///
/// Passed in on every call; commands keep no references of their own.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub collection: SharedCollection,
    pub shutdown: ShutdownSignal,
    pub store: CollectionStore,
}

/// What a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Finished; send or print this
    Done(Response),
    /// The command wants a yes/no decision before finishing
    ///
    /// Only the console may ask the operator and call [`Command::resume`].
    /// Any other caller uses `fallback` as the final response.
    Confirm { prompt: String, fallback: Response },
}

impl Outcome {
    /// Final response for callers that cannot ask for confirmation
    pub fn into_response(self) -> Response {
        match self {
            Outcome::Done(response) => response,
            Outcome::Confirm { fallback, .. } => fallback,
        }
    }
}

/// A named unit of work with a declared argument shape
pub trait Command: Send + Sync {
    /// Declared shape, also advertised to clients
    fn data(&self) -> &CommandData;

    /// Check and coerce the raw invocation
    ///
    /// The default checks the argument count and, for commands that declare
    /// one, the element payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumberOfArgs` or `Validation`.
    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(self.data(), &argument)?;
        Ok(argument)
    }

    /// Perform the command's effect on a validated argument
    ///
    /// # Errors
    ///
    /// Returns `Validation` for domain refusals (e.g. taken key) and
    /// `Persistence` for storage failures.
    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome>;

    /// Finish a command that returned [`Outcome::Confirm`]
    ///
    /// # Errors
    ///
    /// The default returns `Internal`: commands that never ask have nothing
    /// to resume.
    fn resume(
        &self,
        _argument: &CommandArgument,
        _confirmed: bool,
        _ctx: &ExecutionContext,
    ) -> Result<Response> {
        Err(HbcError::Internal {
            reason: format!("command {} has nothing to confirm", self.data().name),
        })
    }
}
