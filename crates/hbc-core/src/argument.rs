//! Command shape descriptors and per-invocation argument carriers

use serde::{Deserialize, Serialize};

use crate::model::HumanBeingDraft;

/// Declared shape of a command
///
/// Built once when the command is constructed and never mutated. The client
/// table's shapes are advertised to remote clients on handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    pub description: String,
    pub required_args: usize,
    pub usage: String,
    /// Whether the invocation must carry an element payload
    #[serde(default)]
    pub requires_element: bool,
}

impl CommandData {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required_args: usize,
        usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required_args,
            usage: usage.into(),
            requires_element: false,
        }
    }

    /// Mark the command as needing an element payload
    pub fn with_element(mut self) -> Self {
        self.requires_element = true;
        self
    }

    /// One help line: `name usage : description`
    pub fn help_line(&self) -> String {
        if self.usage.is_empty() {
            format!("{} : {}", self.name, self.description)
        } else {
            format!("{} {} : {}", self.name, self.usage, self.description)
        }
    }
}

/// Arguments of a single invocation
///
/// `arg` is the first raw argument, `None` when nothing was supplied.
/// Validation may fill `enum_number` for commands whose argument selects
/// from a closed set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandArgument {
    pub arg: Option<String>,
    pub number_of_args: usize,
    #[serde(default)]
    pub enum_number: Option<usize>,
    #[serde(default)]
    pub element: Option<HumanBeingDraft>,
}

impl CommandArgument {
    /// Invocation with no arguments
    pub fn none() -> Self {
        Self::default()
    }

    /// Invocation with a single raw argument
    pub fn single(arg: impl Into<String>) -> Self {
        Self {
            arg: Some(arg.into()),
            number_of_args: 1,
            ..Self::default()
        }
    }

    /// Invocation built from whitespace-separated raw tokens
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            arg: tokens.first().map(|t| t.as_ref().to_string()),
            number_of_args: tokens.len(),
            ..Self::default()
        }
    }

    pub fn with_element(mut self, element: HumanBeingDraft) -> Self {
        self.element = Some(element);
        self
    }

    /// Raw argument text, empty when absent
    pub fn raw(&self) -> &str {
        self.arg.as_deref().unwrap_or_default()
    }
}

/// Split a console line into a command name and its raw arguments
///
/// Returns `None` for blank lines.
pub fn parse_command_line(line: &str) -> Option<(String, CommandArgument)> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?.to_string();
    let rest: Vec<&str> = tokens.collect();
    Some((name, CommandArgument::from_tokens(&rest)))
}
