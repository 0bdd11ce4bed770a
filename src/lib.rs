//! Folder-collection census library.
//!
//! The pipeline is: [`scan`] a root into a keyed folder tree, aggregate it with
//! [`stats::compute_stat`], apply participant choices with [`anonymize`],
//! [`stats::measure`] the collection and [`render`] the export.

pub mod anonymize;
pub mod cli;
pub mod config;
pub mod domain;
pub mod render;
pub mod scan;
pub mod stats;
pub mod utils;
