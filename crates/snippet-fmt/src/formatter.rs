//! Tag dispatch and the "never lose the author's text" fallback

use tracing::{debug, trace};

use crate::cleanup::cleanup;
use crate::error::Result;
use crate::json::JsonEngine;
use crate::language::{Language, Profile};
use crate::options::FormatOptions;
use crate::script::ScriptEngine;

/// A language-aware pretty-printer.
///
/// Engines may fail on input they do not understand; the caller decides what
/// a failure means.
pub trait StructuredEngine {
    fn name(&self) -> &'static str;

    fn format(&self, text: &str, options: &FormatOptions) -> Result<String>;
}

/// Formats documentation snippets by language tag
#[derive(Debug, Clone, Default)]
pub struct CodeFormatter {
    options: FormatOptions,
}

impl CodeFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format `text` according to its tag.
    ///
    /// Structured tags go through their engine; if the engine fails the
    /// original text comes back byte for byte. Every other tag gets
    /// [`cleanup`].
    pub fn format(&self, text: &str, tag: Option<&str>) -> String {
        match Profile::for_tag(tag) {
            Profile::Structured(Language::Json) => self.format_with(&JsonEngine, text),
            Profile::Structured(lang) => self.format_with(&ScriptEngine::new(lang), text),
            Profile::Cleanup => {
                trace!(tag = tag.unwrap_or(""), "no structured profile, cleaning up");
                cleanup(text)
            }
        }
    }

    /// Run a specific engine, falling back to the untouched input on failure
    pub fn format_with<E: StructuredEngine + ?Sized>(&self, engine: &E, text: &str) -> String {
        match engine.format(text, &self.options) {
            Ok(formatted) => formatted,
            Err(err) => {
                debug!(engine = engine.name(), error = %err, "structured formatting failed, keeping original");
                text.to_string()
            }
        }
    }

    /// Cleanup only, whatever the tag. Never runs a structured engine.
    pub fn format_lightweight(&self, text: &str, tag: Option<&str>) -> String {
        trace!(tag = tag.unwrap_or(""), "lightweight formatting");
        cleanup(text)
    }
}

/// Format a snippet with the default style
pub fn format_code(text: &str, tag: Option<&str>) -> String {
    CodeFormatter::default().format(text, tag)
}

/// Cleanup-only variant of [`format_code`]
pub fn format_code_lightweight(text: &str, tag: Option<&str>) -> String {
    CodeFormatter::default().format_lightweight(text, tag)
}
