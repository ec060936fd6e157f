//! Top-level reporting of errors that no handler caught.
//!
//! The report lists the oldest cause first, the way an interpreter prints a
//! traceback, so the last line is always the error that reached the top.

use crate::error::Error;
use std::fmt::Write as _;
use tracing::error;

/// Separator printed between an error and the one raised while handling it.
pub const DURING_HANDLING: &str = "During handling of the above error, another error occurred:";

/// Render `err` and its causes as a multi-line report.
pub fn render(err: &Error) -> String {
    let mut chain: Vec<&Error> = err.chain().collect();
    chain.reverse();

    let mut out = String::new();
    for (i, e) in chain.iter().enumerate() {
        if i > 0 {
            let _ = write!(out, "\n{DURING_HANDLING}\n\n");
        }
        let origin = e.origin();
        let _ = writeln!(out, "Traceback (most recent call last):");
        let _ = writeln!(
            out,
            "  File \"{}\", line {}, column {}",
            origin.file(),
            origin.line(),
            origin.column()
        );
        if e.message().is_empty() {
            let _ = writeln!(out, "{}", e.kind());
        } else {
            let _ = writeln!(out, "{}: {}", e.kind(), e.message());
        }
    }
    out
}

/// Report an error that propagated out of every layer.
///
/// Writes the rendered report to stderr and logs the error. The caller
/// decides how to end the process.
pub fn unhandled(err: &Error) {
    eprint!("{}", render(err));
    error!(kind = err.kind().name(), origin = %err.origin(), "unhandled error: {}", err.message());
}
