//! Line-oriented input helpers for the interactive flows.

use std::io::{self, Write};

use anyhow::Result;

/// Prints a prompt and reads one trimmed line from stdin.
///
/// Returns `None` on end-of-input (ctrl-d), which callers treat like a
/// cancellation request.
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{} ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
