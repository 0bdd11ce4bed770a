//! Core domain types shared across the crate

pub mod config;
pub mod export;
pub mod folder;

pub use config::{Config, NameMode};
pub use export::{ExportDocument, RootExport, EXPORT_SCHEMA_VERSION};
pub use folder::{AggFileStat, DirDict, FolderKey, FolderRecord, StatRecord, ROOT_KEY};
