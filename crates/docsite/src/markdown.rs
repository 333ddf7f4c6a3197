//! Formatting the fenced code blocks of markdown and MDX documents

use std::sync::OnceLock;

use regex::Regex;
use snippet_fmt::CodeFormatter;
use tracing::{debug, trace};

/// Which formatter variant runs on each block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    #[default]
    Full,
    /// Whitespace cleanup only, whatever the tag
    Lightweight,
}

/// The rewritten document and how many blocks changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOutcome {
    pub text: String,
    pub changed: usize,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"^(?P<indent> *)(?P<fence>`{3,}|~{3,})(?P<info>.*)$")
            .expect("fence pattern is valid")
    })
}

/// An opening code fence
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fence<'a> {
    indent: usize,
    marker: char,
    len: usize,
    info: &'a str,
}

impl<'a> Fence<'a> {
    fn open(line: &'a str) -> Option<Self> {
        let caps = fence_regex().captures(line)?;
        let fence = caps.name("fence")?.as_str();
        let info = caps.name("info").map_or("", |m| m.as_str());
        let marker = fence.chars().next()?;

        // A backtick fence's info string may not contain backticks
        if marker == '`' && info.contains('`') {
            return None;
        }

        Some(Fence {
            indent: caps.name("indent").map_or(0, |m| m.as_str().len()),
            marker,
            len: fence.len(),
            info: info.trim(),
        })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let line = line.trim();
        line.len() >= self.len && line.chars().all(|c| c == self.marker)
    }

    /// First word of the info string: ```` ```ts title="x" ```` → `ts`
    fn tag(&self) -> Option<&'a str> {
        self.info.split(|c: char| c.is_whitespace() || c == '{').find(|word| !word.is_empty())
    }
}

/// Remove at most `indent` leading spaces
fn strip_indent(line: &str, indent: usize) -> &str {
    let spaces = line.bytes().take(indent).take_while(|b| *b == b' ').count();
    &line[spaces..]
}

/// Format every fenced code block of `text`.
///
/// Only block bodies change. Each body is de-indented by its fence's
/// indentation, formatted, and indented again. An unterminated fence leaves
/// the rest of the document as it is.
pub fn format_markdown(text: &str, formatter: &CodeFormatter, mode: FormatMode) -> MarkdownOutcome {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut changed = 0;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let Some(fence) = Fence::open(line) else {
            out.push(line.to_string());
            i += 1;
            continue;
        };

        let Some(close) = (i + 1..lines.len()).find(|&j| fence.is_closed_by(lines[j])) else {
            debug!(line = i + 1, "unterminated code fence, leaving the rest as is");
            out.extend(lines[i..].iter().map(|l| l.to_string()));
            break;
        };

        let body_lines = &lines[i + 1..close];
        let body =
            body_lines.iter().map(|l| strip_indent(l, fence.indent)).collect::<Vec<_>>().join("\n");

        let tag = fence.tag();
        trace!(tag = tag.unwrap_or(""), line = i + 1, "formatting code block");
        let formatted = match mode {
            FormatMode::Full => formatter.format(&body, tag),
            FormatMode::Lightweight => formatter.format_lightweight(&body, tag),
        };

        out.push(line.to_string());
        if formatted == body {
            out.extend(body_lines.iter().map(|l| l.to_string()));
        } else {
            changed += 1;
            if !formatted.is_empty() {
                let pad = " ".repeat(fence.indent);
                out.extend(formatted.split('\n').map(|l| {
                    if l.is_empty() {
                        String::new()
                    } else {
                        format!("{}{}", pad, l)
                    }
                }));
            }
        }
        out.push(lines[close].to_string());
        i = close + 1;
    }

    MarkdownOutcome { text: out.join("\n"), changed }
}

/// Drop top-level MDX `import`/`export` statements outside code fences.
///
/// A statement that opens more braces than it closes continues until they
/// balance, so multi-line `export const meta = { ... }` goes too.
pub fn strip_mdx_statements(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut open_fence: Option<Fence<'_>> = None;
    let mut depth: isize = 0;
    let mut in_statement = false;

    for line in text.split('\n') {
        if let Some(fence) = &open_fence {
            if fence.is_closed_by(line) {
                open_fence = None;
            }
            out.push(line);
            continue;
        }

        if in_statement {
            depth += brace_balance(line);
            in_statement = depth > 0;
            continue;
        }

        if line.starts_with("import ") || line.starts_with("export ") {
            depth = brace_balance(line);
            in_statement = depth > 0;
            continue;
        }

        if let Some(fence) = Fence::open(line) {
            open_fence = Some(fence);
        }
        out.push(line);
    }

    out.join("\n")
}

fn brace_balance(line: &str) -> isize {
    line.chars().fold(0, |n, c| match c {
        '{' => n + 1,
        '}' => n - 1,
        _ => n,
    })
}
