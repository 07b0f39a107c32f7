//! CLI output formatting.
//!
//! Operation results go to **stdout**, one line per operation, as plain
//! sentences:
//!
//! ```text
//! Image resized successfully and saved to small.png
//! Error: Input file not found at missing.png
//! ```
//!
//! Diagnostics (log lines) go to stderr through `tracing`, so stdout stays
//! a clean record of what happened.
//!
//! Each `format_*` function is pure and returns the text; the `print_*`
//! wrappers write it out.

use crate::cli::DispatchError;
use crate::outcome::OperationOutcome;

/// The line reported for an operation outcome.
pub fn format_outcome(outcome: &OperationOutcome) -> String {
    match outcome {
        Ok(done) => done.to_string(),
        Err(err) => err.to_string(),
    }
}

/// Verbose variant: appends the written dimensions on success.
///
/// ```text
/// Image resized successfully and saved to small.png (640x480)
/// ```
pub fn format_outcome_verbose(outcome: &OperationOutcome) -> String {
    match outcome {
        Ok(done) => format!(
            "{} ({}x{})",
            done,
            done.dimensions.width,
            done.dimensions.height
        ),
        Err(_) => format_outcome(outcome),
    }
}

pub fn print_outcome(outcome: &OperationOutcome, verbose: bool) {
    if verbose {
        println!("{}", format_outcome_verbose(outcome));
    } else {
        println!("{}", format_outcome(outcome));
    }
}

pub fn print_dispatch_error(err: &DispatchError) {
    println!("{}", err);
}
