use std::fmt;

/// Position in snippet text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize, // Byte offset
    pub line: usize,   // Line number (1-based)
    pub column: usize, // Column number (1-based)
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failures of a structured formatting engine.
///
/// None of these ever reach the caller of [`crate::format_code`]; they only
/// decide that the original snippet is shown as written.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: Position },

    #[error("Unterminated string at {pos}")]
    UnterminatedString { pos: Position },

    #[error("Unterminated template literal at {pos}")]
    UnterminatedTemplate { pos: Position },

    #[error("Unterminated block comment at {pos}")]
    UnterminatedComment { pos: Position },

    #[error("Unterminated regular expression at {pos}")]
    UnterminatedRegex { pos: Position },

    #[error("Unclosed '{open}' at {pos}")]
    UnclosedBracket { open: String, pos: Position },

    #[error("Expected '{expected}', found '{found}' at {pos}")]
    MismatchedBracket { expected: String, found: String, pos: Position },

    #[error("Unexpected closing '{found}' at {pos}")]
    UnexpectedClose { found: String, pos: Position },

    #[error("Nesting deeper than {limit} levels at {pos}")]
    TooDeep { limit: usize, pos: Position },

    #[error("Unsupported syntax at {pos}: {what}")]
    Unsupported { what: String, pos: Position },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatter produced invalid UTF-8")]
    InvalidOutput,
}

pub type Result<T> = std::result::Result<T, FormatError>;
