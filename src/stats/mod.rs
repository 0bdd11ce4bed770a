//! Folder-tree aggregation and collection statistics

pub mod aggregate;
pub mod descriptive;
pub mod properties;
pub mod typical;

pub use aggregate::{
    assign_depths, compute_stat, find_all_children, latest_activity, recalculate_cumfiles,
};
pub use properties::{measure, CollectionProperties, Metric};
pub use typical::{check_typicality, MetricCheck, TypicalityReport};

use thiserror::Error;

/// How empty inputs to means and modes are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsMode {
    /// Fail on an empty input
    Strict,
    /// Report the metric as missing instead
    #[default]
    Lenient,
}

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("no folder trees to measure")]
    NoRoots,
    #[error("folder tree #{0} has no root folder")]
    MissingRoot(usize),
    #[error("cannot compute {metric}: no values")]
    EmptyInput { metric: &'static str },
}
