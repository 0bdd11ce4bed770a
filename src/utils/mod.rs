//! Shared helpers

pub mod format;
pub mod hashing;
pub mod paths;

pub use format::{format_iso_date, format_with_commas};
pub use hashing::short_digest;
pub use paths::normalize_path;
