//! Constants used throughout the docsite crate

/// Configuration file looked up in the docs directory
pub const CONFIG_FILENAME: &str = "docsite.toml";

/// Docs directory used when none is given on the command line
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Site title used when the configuration does not name one
pub const DEFAULT_SITE_TITLE: &str = "Documentation";

/// Conventional file name of the index export
pub const LLMS_INDEX_FILENAME: &str = "llms.txt";

/// Conventional file name of the full export
pub const LLMS_FULL_FILENAME: &str = "llms-full.txt";

/// Separator between breadcrumb labels in plain text
pub const TRAIL_SEPARATOR: &str = " > ";
