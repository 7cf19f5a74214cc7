//! Verbose diagnostics on stderr

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose diagnostics for the rest of the process
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a diagnostic line to stderr when verbose mode is on
pub fn debug(message: impl AsRef<str>) {
    if is_verbose() {
        eprintln!("{} {}", "[autolinking]".dimmed(), message.as_ref());
    }
}

/// Print a warning line to stderr (always shown)
pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.as_ref());
}
