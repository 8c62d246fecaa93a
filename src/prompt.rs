//! The re-prompting input primitive every multi-step menu flow is built on.

use std::io::{self, BufRead, Write};

/// Prompts until `validate` accepts the input or the user aborts.
///
/// Returns `Ok(None)` on abort: end of input, or an empty line. A rejected
/// input prints the validator's message and asks again; no value is consumed
/// by a rejected input.
pub fn prompt_until<T, R, W, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    validate: F,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input; drop to a fresh line so later output stays tidy.
            writeln!(output)?;
            return Ok(None);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match validate(trimmed) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => writeln!(output, "Error: {message}. Please try again.")?,
        }
    }
}
