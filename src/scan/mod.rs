//! Folder tree walking

use crate::domain::DirDict;
use anyhow::Result;
use std::path::Path;

pub mod metadata;
pub mod walker;

pub use walker::{FolderWalker, WalkStats};

/// Walk `root` with default settings and return its folder tree.
pub fn record_stat<P: AsRef<Path>>(root: P) -> Result<(DirDict, WalkStats)> {
    let mut walker = FolderWalker::new(root.as_ref().to_path_buf());
    let dict = walker.walk()?;
    Ok((dict, walker.stats().clone()))
}
