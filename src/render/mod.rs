//! Output rendering (export JSON, summaries, folder trees)

pub mod export;
pub mod summary;
pub mod tree;

pub use export::{build_export, read_export, write_export};
pub use summary::render_summary;
pub use tree::render_tree;
