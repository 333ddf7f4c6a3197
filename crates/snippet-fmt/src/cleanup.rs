//! Whitespace-only cleanup shared by every language

/// Longest run of blank lines kept inside a snippet
pub const MAX_BLANK_LINES: usize = 2;

/// Strip trailing whitespace from each line, collapse long runs of blank
/// lines to [`MAX_BLANK_LINES`], and drop leading and trailing blank lines.
pub fn cleanup(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > MAX_BLANK_LINES {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
