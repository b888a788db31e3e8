//! Interactive port negotiation before the server binds

use std::io::{BufRead, Write};

use hbc_core::console::parse_yes_no;
use hbc_core::rules::validation;
use hbc_core::{HbcError, Result};

use crate::config::{DEFAULT_PORT, MAX_PORT, MIN_PORT};

/// Ask the operator which port to bind
///
/// Invalid answers are reported and the question is asked again.
///
/// # Errors
///
/// Returns `NoInput` once `input` is exhausted and `Io` if the prompt cannot
/// be written.
pub fn negotiate_port<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u16> {
    if ask_yes_no(input, output, "Do you want to use a default server port?")? {
        return Ok(DEFAULT_PORT);
    }

    let range = format!("[{MIN_PORT};{MAX_PORT}]");
    let out_of_range = format!("Server port should be in {range}");
    loop {
        say(output, &format!("Enter server port, it should be in {range}"))?;
        let answer = read_answer(input)?;
        match validation::validate_int_arg::<i64>(
            Some(&answer),
            |port| (i64::from(MIN_PORT)..=i64::from(MAX_PORT)).contains(port),
            &out_of_range,
        ) {
            Ok(port) => {
                return u16::try_from(port).map_err(|e| HbcError::Internal {
                    reason: format!("port {port} passed range check: {e}"),
                })
            }
            Err(err) => say(output, &err.to_string())?,
        }
    }
}

fn ask_yes_no<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    loop {
        say(output, &format!("{question} [y/n]"))?;
        if let Some(answer) = parse_yes_no(&read_answer(input)?) {
            return Ok(answer);
        }
    }
}

fn say<W: Write>(output: &mut W, text: &str) -> Result<()> {
    writeln!(output, "{text}")
        .and_then(|()| output.flush())
        .map_err(|e| HbcError::io("write prompt", &e))
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| HbcError::io("read answer", &e))?;
    if read == 0 {
        return Err(HbcError::NoInput);
    }
    Ok(line.trim().to_string())
}
