//! Collaborators for entry normalization.
//!
//! - `url`: canonical absolute URLs
//! - `lang`: BCP 47 tag normalization
//! - `date`: `<lastmod>` parsing and formatting

pub mod date;
pub mod lang;
pub mod url;
