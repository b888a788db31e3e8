//! Shared argument checks used by every command's `validate`
//!
//! All failures are recoverable: the dispatcher reports the message and
//! moves on to the next command.

use std::str::FromStr;

use crate::argument::{CommandArgument, CommandData};
use crate::errors::{HbcError, Result};
use crate::model::HumanBeingDraft;

/// Message used when an integer argument does not parse
pub const EXPECTED_INTEGER: &str = "Expected integer value";

/// Check that exactly `data.required_args` raw arguments were supplied
///
/// # Errors
///
/// Returns `InvalidNumberOfArgs` on any mismatch.
pub fn validate_number_of_args(data: &CommandData, actual: usize) -> Result<()> {
    if actual != data.required_args {
        return Err(HbcError::InvalidNumberOfArgs {
            command: data.name.clone(),
            expected: data.required_args,
            actual,
        });
    }
    Ok(())
}

/// Argument count plus, for commands that declare one, the element payload
///
/// # Errors
///
/// Returns `InvalidNumberOfArgs` or `Validation`.
pub fn validate_shape(data: &CommandData, argument: &CommandArgument) -> Result<()> {
    validate_number_of_args(data, argument.number_of_args)?;
    if data.requires_element {
        require_element(data, argument)?;
    }
    Ok(())
}

/// Parse `raw` and check it against `predicate`
///
/// A parse failure (or a missing argument) yields `parse_message`; a value
/// the predicate rejects yields `message`.
///
/// # Errors
///
/// Returns `Validation` carrying one of the two messages.
pub fn validate_arg<T, E>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
    predicate: impl FnOnce(&T) -> bool,
    parse_message: &str,
    message: &str,
) -> Result<T> {
    let raw = raw.ok_or_else(|| HbcError::validation(parse_message))?;
    let value = parse(raw.trim()).map_err(|_| HbcError::validation(parse_message))?;
    if !predicate(&value) {
        return Err(HbcError::validation(message));
    }
    Ok(value)
}

/// Integer flavour of [`validate_arg`]
///
/// # Errors
///
/// Returns `Validation` with [`EXPECTED_INTEGER`] or `message`.
pub fn validate_int_arg<T: FromStr>(
    raw: Option<&str>,
    predicate: impl FnOnce(&T) -> bool,
    message: &str,
) -> Result<T> {
    validate_arg(raw, str::parse::<T>, predicate, EXPECTED_INTEGER, message)
}

/// Check a 1-based index into a closed set of `size` values
///
/// # Errors
///
/// Returns `Validation` when `raw` is not an integer in `[1, size]`.
pub fn validate_enum_index(raw: Option<&str>, size: usize, message: &str) -> Result<usize> {
    validate_int_arg(raw, |n: &usize| (1..=size).contains(n), message)
}

/// Fetch the element payload of commands that need one
///
/// # Errors
///
/// Returns `Validation` when the payload is absent or violates a field rule.
pub fn require_element<'a>(
    data: &CommandData,
    argument: &'a CommandArgument,
) -> Result<&'a HumanBeingDraft> {
    let element = argument.element.as_ref().ok_or_else(|| {
        HbcError::validation(format!("Command {} needs an element", data.name))
    })?;
    element.validate()?;
    Ok(element)
}
