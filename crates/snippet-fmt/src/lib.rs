//! Formatting for code snippets embedded in documentation.
//!
//! Snippets tagged `javascript`/`js`, `typescript`/`ts` or `json` are
//! re-parsed and pretty-printed. Everything else, Python included, gets a
//! whitespace cleanup. Formatting never fails: when a structured engine
//! cannot handle a snippet, the snippet is returned exactly as written.

pub mod cleanup;
pub mod error;
pub mod formatter;
pub mod json;
pub mod language;
pub mod options;
pub mod script;

// Re-export commonly used items
pub use cleanup::cleanup;
pub use error::{FormatError, Position, Result};
pub use formatter::{format_code, format_code_lightweight, CodeFormatter, StructuredEngine};
pub use json::JsonEngine;
pub use language::{Language, Profile};
pub use options::{ArrowParens, FormatOptions, QuoteStyle, TrailingCommas};
pub use script::ScriptEngine;
