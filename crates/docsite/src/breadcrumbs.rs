//! Navigation trails derived from URL paths

use serde::Serialize;

/// First segment of generated API reference paths
const API_ROOT: &str = "apis";

/// Segment that, under [`API_ROOT`], hides itself and the segment after it
const REFERENCE_SEGMENT: &str = "reference";

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub name: String,
    /// Absent for the current page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    SkipOnePending,
}

/// Turn a path segment into a display label.
///
/// Hyphenated segments are labelled part by part and joined with spaces.
/// A segment containing "api" anywhere (any case) is upper-cased whole,
/// so `apis` becomes `APIS` and `mapiary` becomes `MAPIARY`. Anything else
/// gets its first character capitalized.
pub fn format_breadcrumb_name(segment: &str) -> String {
    if segment.contains('-') {
        return segment.split('-').map(format_breadcrumb_name).collect::<Vec<_>>().join(" ");
    }

    if segment.to_lowercase().contains("api") {
        return segment.to_uppercase();
    }

    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Non-empty `/`-separated segments of `path`, ignoring any query or fragment
pub fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Derive the breadcrumb trail for `path`.
///
/// Every item but the last links to the cumulative path of the original
/// segments up to and including its own.
pub fn derive_breadcrumbs(path: &str) -> Vec<BreadcrumbItem> {
    let segments = path_segments(path);
    let api_rooted = segments.first() == Some(&API_ROOT);

    let (_, retained) = segments.iter().enumerate().fold(
        (ScanState::Idle, Vec::new()),
        |(state, mut retained), (index, segment)| match state {
            ScanState::SkipOnePending => (ScanState::Idle, retained),
            ScanState::Idle if api_rooted && *segment == REFERENCE_SEGMENT => {
                (ScanState::SkipOnePending, retained)
            }
            ScanState::Idle => {
                retained.push(index);
                (ScanState::Idle, retained)
            }
        },
    );

    let last = retained.len().saturating_sub(1);
    retained
        .iter()
        .enumerate()
        .map(|(position, &index)| BreadcrumbItem {
            name: format_breadcrumb_name(segments[index]),
            url: (position != last).then(|| format!("/{}", segments[..=index].join("/"))),
        })
        .collect()
}

/// Labels only, in trail order
pub fn breadcrumb_labels(path: &str) -> Vec<String> {
    derive_breadcrumbs(path).into_iter().map(|item| item.name).collect()
}
