//! Mapping content files to the URL paths they are served at

use std::path::{Component, Path};

/// File extensions treated as content pages
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// File stems that stand for their directory
const INDEX_STEMS: &[&str] = &["index", "page"];

/// Is `path` a markdown or MDX page?
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Route for a content file given relative to the docs root.
///
/// `guides/setup.md` → `/guides/setup`, `apis/page.mdx` → `/apis`,
/// `index.md` → `/`. Route groups such as `(marketing)` do not appear in
/// the URL.
pub fn route_for_file(relative: impl AsRef<Path>) -> String {
    let mut parts: Vec<String> = relative
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(file) = parts.pop() {
        let stem = strip_content_extension(&file);
        if !INDEX_STEMS.contains(&stem) {
            parts.push(stem.to_string());
        }
    }

    parts.retain(|part| !is_route_group(part));
    format!("/{}", parts.join("/"))
}

fn strip_content_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {
            stem
        }
        _ => name,
    }
}

fn is_route_group(part: &str) -> bool {
    part.len() > 2 && part.starts_with('(') && part.ends_with(')')
}
