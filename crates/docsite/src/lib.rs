//! Documentation site content pipeline
//!
//! This library turns URL paths into breadcrumb trails, formats the fenced
//! code blocks of markdown pages through [`snippet_fmt`], and renders the
//! docs tree as plain text for language models.

pub mod breadcrumbs;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod markdown;
pub mod routes;
pub mod theme;

pub use breadcrumbs::{derive_breadcrumbs, format_breadcrumb_name, BreadcrumbItem};
pub use config::{Config, ExportConfig, SiteConfig};
pub use export::{collect_pages, render_full, render_index, DocPage, ExportError};
pub use markdown::{format_markdown, FormatMode, MarkdownOutcome};
pub use routes::route_for_file;

/// Re-export common error types
pub use anyhow::{Error, Result};
