//! Script files: one command per line, nested `execute_script` expanded

use std::fs;
use std::path::{Path, PathBuf};

use hbc_core::model::HumanBeingDraft;
use hbc_core::{parse_command_line, CommandArgument, HbcError, Request, Result};

const EXECUTE_SCRIPT: &str = "execute_script";

/// One unit of work produced by expanding a script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// A request to send, with where it came from
    Send {
        source: PathBuf,
        line: usize,
        request: Request,
    },
    /// A line that will not be sent, with the reason to show
    Skipped { message: String },
}

/// Parse one script line
///
/// Blank lines and lines starting with `#` yield `None`. Everything from
/// the first `{` on is the element, as JSON.
///
/// # Errors
///
/// Returns `Validation` when the element JSON does not describe an element.
pub fn parse_script_line(line: &str) -> Result<Option<(String, CommandArgument)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (head, element) = match line.find('{') {
        Some(at) => {
            let element: HumanBeingDraft = serde_json::from_str(&line[at..])
                .map_err(|e| HbcError::validation(format!("Invalid element: {e}")))?;
            (&line[..at], Some(element))
        }
        None => (line, None),
    };
    Ok(parse_command_line(head).map(|(name, argument)| match element {
        Some(element) => (name, argument.with_element(element)),
        None => (name, argument),
    }))
}

/// Expand `path` into the requests it sends, in order
///
/// A nested `execute_script` line is sent itself and then replaced by the
/// file it names. A script already being expanded is skipped, as are lines
/// that do not parse and nested files that cannot be read.
///
/// # Errors
///
/// Returns `Io` if the top-level script cannot be read.
pub fn expand_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    let mut stack = Vec::new();
    expand_into(path, &mut stack, &mut steps)?;
    Ok(steps)
}

fn expand_into(path: &Path, stack: &mut Vec<PathBuf>, steps: &mut Vec<ScriptStep>) -> Result<()> {
    let canonical = fs::canonicalize(path)
        .map_err(|e| HbcError::io(format!("open script {}", path.display()), &e))?;
    let content = fs::read_to_string(&canonical)
        .map_err(|e| HbcError::io(format!("read script {}", path.display()), &e))?;
    stack.push(canonical);

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let (name, argument) = match parse_script_line(raw) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(err) => {
                steps.push(ScriptStep::Skipped {
                    message: format!("{}:{line}: {err}", path.display()),
                });
                continue;
            }
        };

        let nested = (name == EXECUTE_SCRIPT && argument.number_of_args == 1)
            .then(|| PathBuf::from(argument.raw()));
        steps.push(ScriptStep::Send {
            source: path.to_path_buf(),
            line,
            request: Request::new(name, argument),
        });

        if let Some(nested) = nested {
            let already_running = fs::canonicalize(&nested)
                .map(|c| stack.contains(&c))
                .unwrap_or(false);
            if already_running {
                steps.push(ScriptStep::Skipped {
                    message: format!(
                        "Script {} is already running, skipping it",
                        nested.display()
                    ),
                });
            } else if let Err(err) = expand_into(&nested, stack, steps) {
                steps.push(ScriptStep::Skipped {
                    message: err.to_string(),
                });
            }
        }
    }

    stack.pop();
    Ok(())
}
