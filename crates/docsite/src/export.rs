//! Plain-text rendering of the docs tree for language models
//!
//! [`render_index`] produces the `llms.txt` shape (one link per page) and
//! [`render_full`] the `llms-full.txt` shape (every page body in order).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Deserialize;
use snippet_fmt::CodeFormatter;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::breadcrumbs::{breadcrumb_labels, derive_breadcrumbs};
use crate::config::{ExportConfig, SiteConfig};
use crate::constants::TRAIL_SEPARATOR;
use crate::markdown::{format_markdown, strip_mdx_statements, FormatMode};
use crate::routes::{is_content_file, route_for_file};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("docs directory not found: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk the docs directory")]
    Walk(#[from] walkdir::Error),

    #[error("invalid frontmatter in {}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid glob pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    title: Option<String>,
    description: Option<String>,
}

/// A content page discovered under the docs directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPage {
    /// Path relative to the docs directory
    pub path: PathBuf,
    pub route: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Markdown body without frontmatter
    pub body: String,
}

impl DocPage {
    /// Parse a page from its source; frontmatter is read and removed
    pub fn parse(relative: &Path, source: &str) -> Result<Self, ExportError> {
        let (yaml, body) = split_frontmatter(source);

        let frontmatter = match yaml {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str::<Frontmatter>(yaml)
                .map_err(|source| ExportError::Frontmatter {
                    path: relative.to_path_buf(),
                    source,
                })?,
            _ => Frontmatter::default(),
        };

        Ok(DocPage {
            path: relative.to_path_buf(),
            route: route_for_file(relative),
            title: frontmatter.title,
            description: frontmatter.description,
            body: body.to_string(),
        })
    }

    /// Frontmatter title, else the last breadcrumb label, else the site title
    pub fn display_title(&self, site: &SiteConfig) -> String {
        self.title
            .clone()
            .or_else(|| breadcrumb_labels(&self.route).pop())
            .unwrap_or_else(|| site.title.clone())
    }

    /// Breadcrumb labels joined for plain text
    pub fn trail(&self) -> String {
        derive_breadcrumbs(&self.route)
            .into_iter()
            .map(|item| item.name)
            .collect::<Vec<_>>()
            .join(TRAIL_SEPARATOR)
    }
}

/// Split `---` delimited YAML frontmatter from the rest of the document
fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let Some(rest) = source.strip_prefix("---\n").or_else(|| source.strip_prefix("---\r\n")) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, source)
}

/// Prepare a page body for export: MDX statements removed and code blocks
/// formatted. Prose keeps its whitespace (two trailing spaces are a hard
/// break), only the blank lines around the body go.
fn export_body(body: &str, formatter: &CodeFormatter) -> String {
    let stripped = strip_mdx_statements(body);
    let formatted = format_markdown(&stripped, formatter, FormatMode::Full);
    trim_blank_lines(&formatted.text).to_string()
}

fn trim_blank_lines(text: &str) -> &str {
    let start: usize = text
        .split_inclusive('\n')
        .take_while(|line| line.trim().is_empty())
        .map(str::len)
        .sum();
    let body = &text[start..];

    let mut end = body.len();
    for line in body.split_inclusive('\n').rev() {
        if !line.trim().is_empty() {
            break;
        }
        end -= line.len();
    }

    let body = &body[..end];
    let body = body.strip_suffix('\n').unwrap_or(body);
    body.strip_suffix('\r').unwrap_or(body)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ExportError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern)
                .map_err(|source| ExportError::Pattern { pattern: pattern.clone(), source })
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Walk `root` for content pages matching the export globs, ordered by route
pub fn collect_pages(
    root: &Path,
    config: &ExportConfig,
    formatter: &CodeFormatter,
) -> Result<Vec<DocPage>, ExportError> {
    if !root.is_dir() {
        return Err(ExportError::MissingRoot(root.to_path_buf()));
    }

    let include = compile_patterns(&config.include)?;
    let exclude = compile_patterns(&config.exclude)?;
    let mut pages = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_content_file(entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let key = relative.to_string_lossy().replace('\\', "/");
        if !include.iter().any(|p| p.matches(&key)) || exclude.iter().any(|p| p.matches(&key)) {
            debug!(path = %key, "not selected for export");
            continue;
        }

        let source = match fs::read_to_string(entry.path()) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %key, "skipping page that is not valid UTF-8");
                continue;
            }
            Err(source) => {
                return Err(ExportError::Read { path: entry.path().to_path_buf(), source })
            }
        };

        let mut page = DocPage::parse(relative, &source)?;
        page.body = export_body(&page.body, formatter);
        pages.push(page);
    }

    pages.sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.path.cmp(&b.path)));
    debug!(count = pages.len(), "collected pages");
    Ok(pages)
}

fn render_header(site: &SiteConfig) -> String {
    let mut out = format!("# {}\n\n", site.title);
    if let Some(description) = &site.description {
        out.push_str(&format!("> {}\n\n", description));
    }
    out
}

/// `llms.txt`: the site header and one link per page
pub fn render_index(pages: &[DocPage], site: &SiteConfig) -> String {
    let mut out = render_header(site);
    out.push_str("## Pages\n\n");

    for page in pages {
        let title = page.display_title(site);
        let url = site.url_for(&page.route);
        match &page.description {
            Some(description) => out.push_str(&format!("- [{}]({}): {}\n", title, url, description)),
            None => out.push_str(&format!("- [{}]({})\n", title, url)),
        }
    }

    out
}

/// `llms-full.txt`: the site header and every page body, separated by rules
pub fn render_full(pages: &[DocPage], site: &SiteConfig) -> String {
    let mut out = render_header(site);

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            out.push_str("\n---\n\n");
        }

        out.push_str(&format!("## {}\n\n", page.display_title(site)));
        let trail = page.trail();
        if !trail.is_empty() {
            out.push_str(&format!("Path: {}\n", trail));
        }
        out.push_str(&format!("Source: {}\n", site.url_for(&page.route)));

        if !page.body.is_empty() {
            out.push('\n');
            out.push_str(&page.body);
            out.push('\n');
        }
    }

    out
}
