//! Language tags and the formatting profile they select

/// Languages with dedicated handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Json,
    Python,
}

impl Language {
    /// Resolve a fence/info-string tag, ignoring case and surrounding whitespace
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "typescript" | "ts" => Some(Language::TypeScript),
            "json" => Some(Language::Json),
            "python" | "py" => Some(Language::Python),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Json => "json",
            Language::Python => "python",
        }
    }

    /// Whether a structured engine exists for this language
    pub fn is_structured(&self) -> bool {
        matches!(self, Language::JavaScript | Language::TypeScript | Language::Json)
    }
}

/// How a snippet will be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Re-parse and pretty-print
    Structured(Language),
    /// Whitespace cleanup only
    Cleanup,
}

impl Profile {
    pub fn for_tag(tag: Option<&str>) -> Self {
        match tag.and_then(Language::from_tag) {
            Some(lang) if lang.is_structured() => Profile::Structured(lang),
            _ => Profile::Cleanup,
        }
    }
}
