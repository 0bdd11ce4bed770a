//! Comparison of collection properties against typical personal-folder ranges.
//!
//! The ranges come from an earlier study of personal folder collections.

use serde::{Deserialize, Serialize};

use super::properties::{CollectionProperties, Metric};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypicalRange {
    pub low: f64,
    pub high: f64,
}

impl Metric {
    /// Typical range of this metric for a collection of `n_roots` roots.
    pub fn typical_range(self, n_roots: usize) -> TypicalRange {
        let (low, high) = match self {
            Metric::NFiles => (29123.0, 193001.0),
            Metric::NFolders => (3818.0, 26363.0),
            Metric::BreadthMax => (947.0, 4990.0),
            Metric::BreadthMean => (290.0, 888.0),
            Metric::RootNFolders => (15.0, 18.0),
            Metric::NLeafFolders => (2582.0, 18192.0),
            Metric::PctLeafFolders => (66.0, 80.0),
            Metric::DepthLeafFoldersMean => (5.2, 8.8),
            Metric::NSwitchFolders => (591.0, 4291.0),
            Metric::PctSwitchFolders => (9.0, 23.0),
            Metric::DepthSwitchFoldersMean => (4.75, 8.25),
            Metric::DepthMax => (12.0, 18.0),
            Metric::DepthFoldersMode => (5.0, 7.0),
            Metric::DepthFoldersMean => (6.0, 8.0),
            Metric::BranchingFactor => (3.0, 4.5),
            Metric::RootNFiles => (4.0 * n_roots as f64, 8.0 * n_roots as f64),
            Metric::NFilesMean => (6.0, 8.0),
            Metric::NEmptyFolders => (304.0, 3057.0),
            Metric::PctEmptyFolders => (5.0, 12.0),
            Metric::DepthFilesMean => (5.0, 8.0),
            Metric::DepthFilesMode => (4.0, 4.0),
            Metric::FileBreadthModeNFiles => (9892.0, 52230.0),
        };
        TypicalRange { low, high }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCheck {
    pub metric: Metric,
    pub value: Option<f64>,
    pub range: TypicalRange,
    /// Distance outside the range: negative below, positive above.
    pub diff: Option<f64>,
}

impl MetricCheck {
    pub fn is_typical(&self) -> bool {
        self.diff.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypicalityReport {
    pub is_typical: bool,
    pub checks: Vec<MetricCheck>,
}

impl TypicalityReport {
    pub fn atypical(&self) -> impl Iterator<Item = &MetricCheck> {
        self.checks.iter().filter(|c| !c.is_typical())
    }
}

/// Check every metric against its typical range.
///
/// Missing values count as typical.
pub fn check_typicality(props: &CollectionProperties) -> TypicalityReport {
    let checks: Vec<MetricCheck> = Metric::ALL
        .iter()
        .map(|&metric| {
            let range = metric.typical_range(props.n_roots);
            let value = props.value(metric);
            let diff = value.and_then(|v| {
                if v < range.low {
                    Some(v - range.low)
                } else if v > range.high {
                    Some(v - range.high)
                } else {
                    None
                }
            });
            MetricCheck { metric, value, range, diff }
        })
        .collect();

    TypicalityReport { is_typical: checks.iter().all(MetricCheck::is_typical), checks }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_props() -> CollectionProperties {
        CollectionProperties {
            n_roots: 1,
            n_files: 50_000,
            n_folders: 5_000,
            breadth_max: 1_000,
            breadth_mean: Some(300.0),
            root_n_folders: 16,
            n_leaf_folders: 3_500,
            pct_leaf_folders: 70.0,
            depth_leaf_folders_mean: Some(6.0),
            n_switch_folders: 700,
            pct_switch_folders: 14.0,
            depth_switch_folders_mean: Some(5.0),
            depth_max: 14,
            depth_folders_mode: Some(6),
            depth_folders_mean: Some(7.0),
            branching_factor: Some(3.5),
            root_n_files: 6,
            n_files_mean: Some(7.0),
            n_empty_folders: 400,
            pct_empty_folders: 8.0,
            depth_files_mean: Some(6.0),
            depth_files_mode: Some(4),
            file_breadth_mode_n_files: 10_000,
        }
    }

    #[test]
    fn typical_collection_passes() {
        let report = check_typicality(&typical_props());
        assert!(report.is_typical, "unexpected: {:?}", report.atypical().collect::<Vec<_>>());
        assert_eq!(report.checks.len(), Metric::ALL.len());
    }

    #[test]
    fn diffs_are_signed_distance_to_nearest_bound() {
        let mut props = typical_props();
        props.n_files = 100;
        props.depth_max = 20;
        let report = check_typicality(&props);
        assert!(!report.is_typical);

        let atypical: Vec<_> = report.atypical().collect();
        assert_eq!(atypical.len(), 2);
        assert_eq!(atypical[0].metric, Metric::NFiles);
        assert_eq!(atypical[0].diff, Some(100.0 - 29123.0));
        assert_eq!(atypical[1].metric, Metric::DepthMax);
        assert_eq!(atypical[1].diff, Some(2.0));
    }

    #[test]
    fn missing_values_count_as_typical() {
        let mut props = typical_props();
        props.branching_factor = None;
        let report = check_typicality(&props);
        assert!(report.is_typical);
    }

    #[test]
    fn root_file_range_scales_with_roots() {
        let mut props = typical_props();
        props.n_roots = 3;
        props.root_n_files = 20;
        let report = check_typicality(&props);
        let check = report.checks.iter().find(|c| c.metric == Metric::RootNFiles).unwrap();
        assert_eq!(check.range, TypicalRange { low: 12.0, high: 24.0 });
        assert!(check.is_typical());
    }
}
