//! Command implementations

pub mod crumbs;
pub mod export;
pub mod fmt;
pub mod md;

pub use crumbs::show_breadcrumbs;
pub use export::export_docs;
pub use fmt::format_snippet;
pub use md::{format_document, MdAction};
