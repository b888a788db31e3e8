//! Commands that change the collection

use crate::argument::{CommandArgument, CommandData};
use crate::contract::{Command, ExecutionContext, Outcome};
use crate::errors::{HbcError, Result};
use crate::model::HumanBeingDraft;
use crate::protocol::Response;
use crate::rules::validation;

fn key_arg(argument: &CommandArgument) -> Result<i64> {
    validation::validate_int_arg(argument.arg.as_deref(), |_: &i64| true, "")
}

fn element(data: &CommandData, argument: &CommandArgument) -> Result<HumanBeingDraft> {
    validation::require_element(data, argument).cloned()
}

pub struct ClearCommand {
    data: CommandData,
}

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new("clear", "Remove every collection element", 0, ""),
        }
    }
}

impl Command for ClearCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        ctx.collection.lock().clear();
        Ok(Outcome::Done(Response::text("Collection cleared")))
    }
}

pub struct InsertCommand {
    data: CommandData,
}

impl Default for InsertCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "insert",
                "Add a new element under @key",
                1,
                "@key {element}",
            )
            .with_element(),
        }
    }
}

impl Command for InsertCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        key_arg(&argument)?;
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let key = key_arg(argument)?;
        let draft = element(&self.data, argument)?;
        let id = ctx.collection.lock().insert(key, draft)?;
        Ok(Outcome::Done(Response::text(format!(
            "Element inserted under key {key} with id {id}"
        ))))
    }
}

pub struct UpdateCommand {
    data: CommandData,
}

impl Default for UpdateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "update",
                "Replace the element whose id is @id",
                1,
                "@id {element}",
            )
            .with_element(),
        }
    }
}

impl Command for UpdateCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        validation::validate_int_arg(
            argument.arg.as_deref(),
            |id: &i64| *id > 0,
            "Id should be positive",
        )?;
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let id = key_arg(argument)?;
        let draft = element(&self.data, argument)?;
        ctx.collection.lock().update_by_id(id, draft)?;
        Ok(Outcome::Done(Response::text(format!("Element {id} updated"))))
    }
}

pub struct RemoveKeyCommand {
    data: CommandData,
}

impl Default for RemoveKeyCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoveKeyCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new("remove_key", "Remove the element under @key", 1, "@key"),
        }
    }
}

impl Command for RemoveKeyCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        key_arg(&argument)?;
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let key = key_arg(argument)?;
        match ctx.collection.lock().remove_key(key) {
            Some(_) => Ok(Outcome::Done(Response::text(format!(
                "Element under key {key} removed"
            )))),
            None => Err(HbcError::validation(format!("No element under key {key}"))),
        }
    }
}

pub struct RemoveLowerKeyCommand {
    data: CommandData,
}

impl Default for RemoveLowerKeyCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoveLowerKeyCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "remove_lower_key",
                "Remove every element whose key is lower than @key",
                1,
                "@key",
            ),
        }
    }
}

impl Command for RemoveLowerKeyCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        key_arg(&argument)?;
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let key = key_arg(argument)?;
        let removed = ctx.collection.lock().remove_lower_keys(key);
        Ok(Outcome::Done(Response::text(format!(
            "Removed {removed} element(s) with key lower than {key}"
        ))))
    }
}

pub struct RemoveGreaterCommand {
    data: CommandData,
}

impl Default for RemoveGreaterCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoveGreaterCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "remove_greater",
                "Remove every element greater than the given one",
                0,
                "{element}",
            )
            .with_element(),
        }
    }
}

impl Command for RemoveGreaterCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let draft = element(&self.data, argument)?;
        let removed = ctx.collection.lock().remove_greater(&draft);
        Ok(Outcome::Done(Response::text(format!(
            "Removed {removed} element(s) greater than {}",
            draft.name
        ))))
    }
}
