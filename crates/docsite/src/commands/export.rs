//! Export command implementation

use anyhow::{Context, Result};
use docsite::config::Config;
use docsite::constants::{LLMS_FULL_FILENAME, LLMS_INDEX_FILENAME};
use docsite::errors::print_warning;
use docsite::export::{collect_pages, render_full, render_index};
use docsite::theme;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn export_docs(config: &Config, full: bool, output: Option<&Path>) -> Result<()> {
    let pages = collect_pages(&config.docs_dir, &config.export, &config.formatter())
        .with_context(|| format!("Failed to collect pages from {}", config.docs_dir.display()))?;

    if pages.is_empty() {
        print_warning(&format!("No pages found under {}", config.docs_dir.display()));
    }
    info!(pages = pages.len(), full, "rendering export");

    let rendered =
        if full { render_full(&pages, &config.site) } else { render_index(&pages, &config.site) };

    match output {
        Some(output) => {
            let path = output_file(output, full);
            fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} page(s) to {}",
                theme::success(theme::success_symbol()),
                pages.len(),
                theme::path(&path.display().to_string())
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// A directory output gets the conventional `llms.txt` / `llms-full.txt` name
fn output_file(output: &Path, full: bool) -> PathBuf {
    if output.is_dir() {
        output.join(if full { LLMS_FULL_FILENAME } else { LLMS_INDEX_FILENAME })
    } else {
        output.to_path_buf()
    }
}
