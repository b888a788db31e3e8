//! Read-only commands

use crate::argument::{CommandArgument, CommandData};
use crate::contract::{Command, ExecutionContext, Outcome};
use crate::errors::{HbcError, Result};
use crate::model::{HumanBeing, Mood};
use crate::protocol::Response;
use crate::rules::validation;

pub struct CountGreaterThanMoodCommand {
    data: CommandData,
}

impl Default for CountGreaterThanMoodCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CountGreaterThanMoodCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "count_greater_than_mood",
                "Count collection elements which mood is greater than @mood",
                1,
                "@mood from Mood enum",
            ),
        }
    }
}

impl Command for CountGreaterThanMoodCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, mut argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        let number = validation::validate_enum_index(
            argument.arg.as_deref(),
            Mood::count(),
            &format!("Pick a Mood number:\n{}", Mood::show()),
        )?;
        argument.enum_number = Some(number);
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let mood = argument
            .enum_number
            .and_then(Mood::from_number)
            .ok_or_else(|| HbcError::Internal {
                reason: "count_greater_than_mood executed without a resolved mood".to_string(),
            })?;
        let greater = ctx
            .collection
            .lock()
            .iter()
            .filter(|(_, human)| human.mood > mood)
            .count();
        Ok(Outcome::Done(Response::text(format!(
            "People with Mood greater than {mood}: {greater}"
        ))))
    }
}

pub struct CountLessThanMinutesOfWaitingCommand {
    data: CommandData,
}

impl Default for CountLessThanMinutesOfWaitingCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CountLessThanMinutesOfWaitingCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "count_less_than_minutes_of_waiting",
                "Count collection elements which waited less than @minutes",
                1,
                "@minutes",
            ),
        }
    }

    fn minutes(argument: &CommandArgument) -> Result<i64> {
        validation::validate_int_arg(
            argument.arg.as_deref(),
            |m: &i64| *m >= 0,
            "Minutes of waiting should not be negative",
        )
    }
}

impl Command for CountLessThanMinutesOfWaitingCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn validate(&self, argument: CommandArgument) -> Result<CommandArgument> {
        validation::validate_shape(&self.data, &argument)?;
        Self::minutes(&argument)?;
        Ok(argument)
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let minutes = Self::minutes(argument)?;
        let less = ctx
            .collection
            .lock()
            .iter()
            .filter(|(_, human)| human.minutes_of_waiting < minutes)
            .count();
        Ok(Outcome::Done(Response::text(format!(
            "People waiting less than {minutes} minutes: {less}"
        ))))
    }
}

pub struct FilterByCarCommand {
    data: CommandData,
}

impl Default for FilterByCarCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterByCarCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new(
                "filter_by_car",
                "Show collection elements which car is named @car_name",
                1,
                "@car_name",
            ),
        }
    }
}

impl Command for FilterByCarCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let car_name = argument.raw();
        let matching: Vec<HumanBeing> = ctx
            .collection
            .lock()
            .iter()
            .filter(|(_, human)| human.car_name() == Some(car_name))
            .map(|(_, human)| human.clone())
            .collect();
        Ok(Outcome::Done(Response::with_elements(
            format!("People with car {car_name}: {}", matching.len()),
            matching,
        )))
    }
}

pub struct InfoCommand {
    data: CommandData,
}

impl Default for InfoCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new("info", "Show information about the collection", 0, ""),
        }
    }
}

impl Command for InfoCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let collection = ctx.collection.lock();
        Ok(Outcome::Done(Response::text(format!(
            "Type: collection of human beings keyed by i64\nCreated: {}\nElements: {}",
            collection.created_at().to_rfc3339(),
            collection.len()
        ))))
    }
}

pub struct ShowCommand {
    data: CommandData,
}

impl Default for ShowCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowCommand {
    pub fn new() -> Self {
        Self {
            data: CommandData::new("show", "Show every collection element", 0, ""),
        }
    }
}

impl Command for ShowCommand {
    fn data(&self) -> &CommandData {
        &self.data
    }

    fn execute(&self, _argument: &CommandArgument, ctx: &ExecutionContext) -> Result<Outcome> {
        let elements: Vec<HumanBeing> = ctx
            .collection
            .lock()
            .iter()
            .map(|(_, human)| human.clone())
            .collect();
        let payload = if elements.is_empty() {
            "Collection is empty".to_string()
        } else {
            format!("Collection elements: {}", elements.len())
        };
        Ok(Outcome::Done(Response::with_elements(payload, elements)))
    }
}
