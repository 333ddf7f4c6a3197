//! Terminal colors for command output

use colored::*;

pub fn success(msg: &str) -> ColoredString {
    msg.green()
}

pub fn error(msg: &str) -> ColoredString {
    msg.red()
}

pub fn warning(msg: &str) -> ColoredString {
    msg.yellow()
}

pub fn info(msg: &str) -> ColoredString {
    msg.cyan()
}

/// A file path in status lines
pub fn path(msg: &str) -> ColoredString {
    msg.bold()
}

/// A breadcrumb link target
pub fn link(msg: &str) -> ColoredString {
    msg.dimmed()
}

/// The breadcrumb for the current page
pub fn current(msg: &str) -> ColoredString {
    msg.bold()
}

pub fn success_symbol() -> &'static str {
    "✓"
}

pub fn error_symbol() -> &'static str {
    "✗"
}

pub fn warning_symbol() -> &'static str {
    "⚠"
}

pub fn info_symbol() -> &'static str {
    "→"
}
