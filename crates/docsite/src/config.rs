use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use snippet_fmt::{ArrowParens, CodeFormatter, FormatOptions, QuoteStyle, TrailingCommas};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{CONFIG_FILENAME, DEFAULT_DOCS_DIR, DEFAULT_SITE_TITLE};

/// Site identity used by the export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: Option<String>,
    /// Prefix for page links, e.g. `https://docs.example.com`
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { title: DEFAULT_SITE_TITLE.to_string(), description: None, base_url: String::new() }
    }
}

impl SiteConfig {
    /// Absolute link for a route
    pub fn url_for(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }
}

/// Which files under the docs directory the export considers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Globs relative to the docs directory
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { include: vec!["**/*.md".to_string(), "**/*.mdx".to_string()], exclude: Vec::new() }
    }
}

/// Application configuration with layered defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Documentation directory
    pub docs_dir: PathBuf,

    pub site: SiteConfig,

    /// Style for structured snippet formatting
    pub format: FormatOptions,

    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            site: SiteConfig::default(),
            format: FormatOptions::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then `docs_dir/docsite.toml` or the
    /// explicit `config_path`, which must exist when given.
    pub fn load(docs_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config { docs_dir: docs_dir.to_path_buf(), ..Default::default() };

        let path = match config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => docs_dir.join(CONFIG_FILENAME),
        };

        if let Some(file_config) = Self::load_from_file(&path)? {
            config.merge(file_config);
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Option<PartialConfig>> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        debug!(path = %path.display(), "loaded config file");
        Ok(Some(config))
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(site) = other.site {
            if let Some(val) = site.title {
                self.site.title = val;
            }
            if let Some(val) = site.description {
                self.site.description = Some(val);
            }
            if let Some(val) = site.base_url {
                self.site.base_url = val;
            }
        }

        if let Some(format) = other.format {
            if let Some(val) = format.indent_width {
                self.format.indent_width = val;
            }
            if let Some(val) = format.line_width {
                self.format.line_width = val;
            }
            if let Some(val) = format.quote_style {
                self.format.quote_style = val;
            }
            if let Some(val) = format.trailing_commas {
                self.format.trailing_commas = val;
            }
            if let Some(val) = format.bracket_spacing {
                self.format.bracket_spacing = val;
            }
            if let Some(val) = format.arrow_parens {
                self.format.arrow_parens = val;
            }
        }

        if let Some(export) = other.export {
            if let Some(val) = export.include {
                self.export.include = val;
            }
            if let Some(val) = export.exclude {
                self.export.exclude = val;
            }
        }
    }

    /// Snippet formatter using the configured style
    pub fn formatter(&self) -> CodeFormatter {
        CodeFormatter::new(self.format.clone())
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Deserialize)]
struct PartialConfig {
    site: Option<PartialSite>,
    format: Option<PartialFormat>,
    export: Option<PartialExport>,
}

#[derive(Debug, Deserialize)]
struct PartialSite {
    title: Option<String>,
    description: Option<String>,
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PartialFormat {
    indent_width: Option<usize>,
    line_width: Option<usize>,
    quote_style: Option<QuoteStyle>,
    trailing_commas: Option<TrailingCommas>,
    bracket_spacing: Option<bool>,
    arrow_parens: Option<ArrowParens>,
}

#[derive(Debug, Deserialize)]
struct PartialExport {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}
