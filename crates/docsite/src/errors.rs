//! Reporting failures on stderr

use colored::*;

use crate::theme;

/// Print `context` followed by the error and each of its causes
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {} {}", theme::error(theme::error_symbol()), "Error:".red().bold(), context);

    let mut chain = error.chain();
    if let Some(top) = chain.next() {
        eprintln!("  {}", top.to_string().red());
    }
    for cause in chain {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
    }
}

/// Print an error with a hint on how to fix it
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", theme::warning(theme::warning_symbol()), message.yellow());
}
