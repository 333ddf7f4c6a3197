use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{FormatError, Result};
use crate::formatter::StructuredEngine;
use crate::options::FormatOptions;

/// Re-emits JSON with the configured indentation, keeping key order.
/// Numbers keep their written form (`1.10`, big integers) since
/// `serde_json` is built with `arbitrary_precision`.
pub struct JsonEngine;

impl StructuredEngine for JsonEngine {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, text: &str, options: &FormatOptions) -> Result<String> {
        let value: serde_json::Value = serde_json::from_str(text)?;

        let indent = vec![b' '; options.indent_width];
        let mut buf = Vec::with_capacity(text.len());
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut ser)?;

        String::from_utf8(buf).map_err(|_| FormatError::InvalidOutput)
    }
}
