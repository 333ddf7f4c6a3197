//! Md command implementation

use anyhow::{bail, Context, Result};
use docsite::config::Config;
use docsite::markdown::{format_markdown, FormatMode};
use docsite::theme;
use std::fs;
use std::path::Path;

/// What to do with the rewritten document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdAction {
    Print,
    Write,
    Check,
}

impl MdAction {
    pub fn from_flags(write: bool, check: bool) -> Self {
        if check {
            MdAction::Check
        } else if write {
            MdAction::Write
        } else {
            MdAction::Print
        }
    }
}

pub fn format_document(
    config: &Config,
    file: &Path,
    action: MdAction,
    mode: FormatMode,
) -> Result<()> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let outcome = format_markdown(&source, &config.formatter(), mode);
    let display = file.display().to_string();

    match action {
        MdAction::Print => print!("{}", outcome.text),
        MdAction::Write => {
            if outcome.text != source {
                fs::write(file, &outcome.text)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
            }
            println!(
                "{} {} ({} code block(s) reformatted)",
                theme::success(theme::success_symbol()),
                theme::path(&display),
                outcome.changed
            );
        }
        MdAction::Check => {
            if outcome.changed > 0 {
                bail!("{} code block(s) in {} would be reformatted", outcome.changed, display);
            }
            println!(
                "{} {} is formatted",
                theme::success(theme::success_symbol()),
                theme::path(&display)
            );
        }
    }

    Ok(())
}
