//! Fmt command implementation

use anyhow::{Context, Result};
use docsite::config::Config;
use docsite::markdown::FormatMode;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

pub fn format_snippet(
    config: &Config,
    file: Option<&Path>,
    lang: Option<&str>,
    mode: FormatMode,
) -> Result<()> {
    let text = read_input(file)?;

    // Without --lang, the file extension doubles as the tag
    let tag = lang
        .map(str::to_string)
        .or_else(|| file.and_then(|f| f.extension()).and_then(|e| e.to_str()).map(str::to_string));
    debug!(tag = tag.as_deref().unwrap_or(""), "formatting snippet");

    let formatter = config.formatter();
    let formatted = match mode {
        FormatMode::Full => formatter.format(&text, tag.as_deref()),
        FormatMode::Lightweight => formatter.format_lightweight(&text, tag.as_deref()),
    };

    // A snippet kept as written may already end in a newline
    if formatted.is_empty() || formatted.ends_with('\n') {
        print!("{}", formatted);
    } else {
        println!("{}", formatted);
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
