//! Terminal output helpers shared by command handlers.

use serde::Serialize;

use crate::error::CliError;

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| CliError::Service(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

/// Status marker for a pass/fail line.
pub const fn mark(ok: bool) -> &'static str {
    if ok { "PASS" } else { "FAIL" }
}
