//! Output sink and yes/no source for server-local commands

use std::collections::VecDeque;

/// The operator's terminal as seen by the dispatcher
pub trait Console {
    fn print(&mut self, text: &str);

    /// Print one line of user-facing error text
    fn print_error(&mut self, text: &str);

    /// Ask a yes/no question; `None` once input is exhausted
    fn confirm(&mut self, prompt: &str) -> Option<bool>;
}

/// Parse a yes/no answer (`y`, `yes`, `n`, `no`, any case)
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// In-memory console with canned answers, for tests and embedding
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<bool>,
    pub output: Vec<String>,
    pub errors: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn print_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn confirm(&mut self, prompt: &str) -> Option<bool> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
    }
}
