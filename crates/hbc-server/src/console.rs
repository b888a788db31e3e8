//! The console line: operator commands typed on the server terminal

use std::io::{BufRead, Write};

use hbc_core::console::{parse_yes_no, Console};
use hbc_core::{parse_command_line, Invoker};

/// Terminal-backed [`Console`] over any reader and pair of writers
pub struct TerminalConsole<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> TerminalConsole<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Next input line without its terminator; `None` at end of input
    pub fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "console input failed");
                None
            }
        }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }
}

impl<R: BufRead, W: Write, E: Write> Console for TerminalConsole<R, W, E> {
    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "console output failed");
        }
    }

    fn print_error(&mut self, text: &str) {
        if let Err(e) = writeln!(self.err, "{text}").and_then(|()| self.err.flush()) {
            tracing::warn!(error = %e, "console output failed");
        }
    }

    fn confirm(&mut self, prompt: &str) -> Option<bool> {
        loop {
            self.print(&format!("{prompt} [y/n]"));
            let answer = self.next_line()?;
            if let Some(confirmed) = parse_yes_no(&answer) {
                return Some(confirmed);
            }
        }
    }
}

/// Read and dispatch server commands until shutdown or end of input
///
/// Blank lines are ignored. The shutdown signal is checked after every
/// command, so `exit` ends the loop immediately.
pub fn run_console_line<R, W, E>(invoker: &Invoker, console: &mut TerminalConsole<R, W, E>)
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let shutdown = &invoker.context().shutdown;
    while !shutdown.is_triggered() {
        let Some(line) = console.next_line() else {
            tracing::info!("console input closed");
            break;
        };
        if let Some((name, argument)) = parse_command_line(&line) {
            invoker.execute_server_command(&name, argument, console);
        }
    }
}
