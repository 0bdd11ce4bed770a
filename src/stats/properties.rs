//! Descriptive properties of one or more folder trees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::descriptive::{mean, mode, require};
use super::{StatsError, StatsMode};
use crate::domain::{DirDict, ROOT_KEY};

/// Properties of a folder collection, pooled over every root measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionProperties {
    pub n_roots: usize,
    pub n_files: usize,
    pub n_folders: usize,
    /// Largest number of folders found at a single depth.
    pub breadth_max: usize,
    /// Mean number of folders per occupied depth.
    pub breadth_mean: Option<f64>,
    pub root_n_folders: usize,
    pub n_leaf_folders: usize,
    pub pct_leaf_folders: f64,
    pub depth_leaf_folders_mean: Option<f64>,
    pub n_switch_folders: usize,
    pub pct_switch_folders: f64,
    pub depth_switch_folders_mean: Option<f64>,
    pub depth_max: usize,
    pub depth_folders_mode: Option<usize>,
    pub depth_folders_mean: Option<f64>,
    /// Mean number of sub-folders of the non-leaf folders.
    pub branching_factor: Option<f64>,
    pub root_n_files: usize,
    pub n_files_mean: Option<f64>,
    pub n_empty_folders: usize,
    pub pct_empty_folders: f64,
    pub depth_files_mean: Option<f64>,
    pub depth_files_mode: Option<usize>,
    /// Files held by folders at depth `depth_files_mode`.
    pub file_breadth_mode_n_files: usize,
}

/// The properties that are compared against typical ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    NFiles,
    NFolders,
    BreadthMax,
    BreadthMean,
    RootNFolders,
    NLeafFolders,
    PctLeafFolders,
    DepthLeafFoldersMean,
    NSwitchFolders,
    PctSwitchFolders,
    DepthSwitchFoldersMean,
    DepthMax,
    DepthFoldersMode,
    DepthFoldersMean,
    BranchingFactor,
    RootNFiles,
    NFilesMean,
    NEmptyFolders,
    PctEmptyFolders,
    DepthFilesMean,
    DepthFilesMode,
    FileBreadthModeNFiles,
}

impl Metric {
    pub const ALL: [Metric; 22] = [
        Metric::NFiles,
        Metric::NFolders,
        Metric::BreadthMax,
        Metric::BreadthMean,
        Metric::RootNFolders,
        Metric::NLeafFolders,
        Metric::PctLeafFolders,
        Metric::DepthLeafFoldersMean,
        Metric::NSwitchFolders,
        Metric::PctSwitchFolders,
        Metric::DepthSwitchFoldersMean,
        Metric::DepthMax,
        Metric::DepthFoldersMode,
        Metric::DepthFoldersMean,
        Metric::BranchingFactor,
        Metric::RootNFiles,
        Metric::NFilesMean,
        Metric::NEmptyFolders,
        Metric::PctEmptyFolders,
        Metric::DepthFilesMean,
        Metric::DepthFilesMode,
        Metric::FileBreadthModeNFiles,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::NFiles => "n_files",
            Metric::NFolders => "n_folders",
            Metric::BreadthMax => "breadth_max",
            Metric::BreadthMean => "breadth_mean",
            Metric::RootNFolders => "root_n_folders",
            Metric::NLeafFolders => "n_leaf_folders",
            Metric::PctLeafFolders => "pct_leaf_folders",
            Metric::DepthLeafFoldersMean => "depth_leaf_folders_mean",
            Metric::NSwitchFolders => "n_switch_folders",
            Metric::PctSwitchFolders => "pct_switch_folders",
            Metric::DepthSwitchFoldersMean => "depth_switch_folders_mean",
            Metric::DepthMax => "depth_max",
            Metric::DepthFoldersMode => "depth_folders_mode",
            Metric::DepthFoldersMean => "depth_folders_mean",
            Metric::BranchingFactor => "branching_factor",
            Metric::RootNFiles => "root_n_files",
            Metric::NFilesMean => "n_files_mean",
            Metric::NEmptyFolders => "n_empty_folders",
            Metric::PctEmptyFolders => "pct_empty_folders",
            Metric::DepthFilesMean => "depth_files_mean",
            Metric::DepthFilesMode => "depth_files_mode",
            Metric::FileBreadthModeNFiles => "file_breadth_mode_n_files",
        }
    }
}

impl CollectionProperties {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let count = |n: usize| Some(n as f64);
        match metric {
            Metric::NFiles => count(self.n_files),
            Metric::NFolders => count(self.n_folders),
            Metric::BreadthMax => count(self.breadth_max),
            Metric::BreadthMean => self.breadth_mean,
            Metric::RootNFolders => count(self.root_n_folders),
            Metric::NLeafFolders => count(self.n_leaf_folders),
            Metric::PctLeafFolders => Some(self.pct_leaf_folders),
            Metric::DepthLeafFoldersMean => self.depth_leaf_folders_mean,
            Metric::NSwitchFolders => count(self.n_switch_folders),
            Metric::PctSwitchFolders => Some(self.pct_switch_folders),
            Metric::DepthSwitchFoldersMean => self.depth_switch_folders_mean,
            Metric::DepthMax => count(self.depth_max),
            Metric::DepthFoldersMode => self.depth_folders_mode.map(|d| d as f64),
            Metric::DepthFoldersMean => self.depth_folders_mean,
            Metric::BranchingFactor => self.branching_factor,
            Metric::RootNFiles => count(self.root_n_files),
            Metric::NFilesMean => self.n_files_mean,
            Metric::NEmptyFolders => count(self.n_empty_folders),
            Metric::PctEmptyFolders => Some(self.pct_empty_folders),
            Metric::DepthFilesMean => self.depth_files_mean,
            Metric::DepthFilesMode => self.depth_files_mode.map(|d| d as f64),
            Metric::FileBreadthModeNFiles => count(self.file_breadth_mode_n_files),
        }
    }
}

/// Measure a collection made of one or more folder trees.
pub fn measure(dicts: &[DirDict], stats_mode: StatsMode) -> Result<CollectionProperties, StatsError> {
    if dicts.is_empty() {
        return Err(StatsError::NoRoots);
    }

    let mut root_n_folders = 0;
    let mut root_n_files = 0;
    for (idx, dict) in dicts.iter().enumerate() {
        let root = dict.get(&ROOT_KEY).ok_or(StatsError::MissingRoot(idx))?;
        root_n_folders += root.childkeys.len();
        root_n_files += root.nfiles;
    }

    let mut n_files = 0;
    let mut n_leaf_folders = 0;
    let mut n_switch_folders = 0;
    let mut n_empty_folders = 0;
    let mut folder_depths: Vec<usize> = Vec::new();
    let mut leaf_depths: Vec<f64> = Vec::new();
    let mut switch_depths: Vec<f64> = Vec::new();
    let mut file_depths: Vec<usize> = Vec::new();
    let mut branching_counts: Vec<f64> = Vec::new();
    let mut file_counts: Vec<f64> = Vec::new();

    for folder in dicts.iter().flat_map(|d| d.values()) {
        n_files += folder.nfiles;
        file_counts.push(folder.nfiles as f64);
        folder_depths.push(folder.depth);

        if folder.is_leaf() {
            n_leaf_folders += 1;
            leaf_depths.push(folder.depth as f64);
        } else {
            branching_counts.push(folder.childkeys.len() as f64);
            if folder.is_switch() {
                n_switch_folders += 1;
                switch_depths.push(folder.depth as f64);
            }
        }
        if folder.is_empty() {
            n_empty_folders += 1;
        }
        if folder.nfiles > 0 {
            file_depths.push(folder.depth);
        }
    }

    let n_folders = folder_depths.len();
    let pct = |n: usize| n as f64 / n_folders as f64 * 100.0;

    let mut breadth: BTreeMap<usize, usize> = BTreeMap::new();
    for depth in &folder_depths {
        *breadth.entry(*depth).or_insert(0) += 1;
    }
    let breadth_counts: Vec<f64> = breadth.values().map(|c| *c as f64).collect();

    let as_f64 = |v: &[usize]| v.iter().map(|d| *d as f64).collect::<Vec<_>>();

    let depth_files_mode = require(mode(&file_depths), "depth_files_mode", stats_mode)?;
    let file_breadth_mode_n_files = match depth_files_mode {
        Some(depth) => dicts
            .iter()
            .flat_map(|d| d.values())
            .filter(|f| f.depth == depth)
            .map(|f| f.nfiles)
            .sum(),
        None => 0,
    };

    Ok(CollectionProperties {
        n_roots: dicts.len(),
        n_files,
        n_folders,
        breadth_max: breadth.values().copied().max().unwrap_or(0),
        breadth_mean: require(mean(&breadth_counts), "breadth_mean", stats_mode)?,
        root_n_folders,
        n_leaf_folders,
        pct_leaf_folders: pct(n_leaf_folders),
        depth_leaf_folders_mean: require(mean(&leaf_depths), "depth_leaf_folders_mean", stats_mode)?,
        n_switch_folders,
        pct_switch_folders: pct(n_switch_folders),
        depth_switch_folders_mean: require(
            mean(&switch_depths),
            "depth_switch_folders_mean",
            stats_mode,
        )?,
        depth_max: folder_depths.iter().copied().max().unwrap_or(0),
        depth_folders_mode: require(mode(&folder_depths), "depth_folders_mode", stats_mode)?,
        depth_folders_mean: require(
            mean(&as_f64(&folder_depths)),
            "depth_folders_mean",
            stats_mode,
        )?,
        branching_factor: require(mean(&branching_counts), "branching_factor", stats_mode)?,
        root_n_files,
        n_files_mean: require(mean(&file_counts), "n_files_mean", stats_mode)?,
        n_empty_folders,
        pct_empty_folders: pct(n_empty_folders),
        depth_files_mean: require(mean(&as_f64(&file_depths)), "depth_files_mean", stats_mode)?,
        depth_files_mode,
        file_breadth_mode_n_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate::tests::tree;

    // root(1 file)
    // ├── a (switch)
    // │   ├── a1 (2 files)
    // │   └── a2 (empty)
    // └── b (3 files)
    //     └── b1 (1 file)
    fn sample() -> DirDict {
        tree(&[
            (1, None, 1),
            (2, Some(1), 0),
            (3, Some(2), 2),
            (4, Some(2), 0),
            (5, Some(1), 3),
            (6, Some(5), 1),
        ])
    }

    #[test]
    fn measure_single_tree() {
        let props = measure(&[sample()], StatsMode::Strict).unwrap();

        assert_eq!(props.n_roots, 1);
        assert_eq!(props.n_files, 7);
        assert_eq!(props.n_folders, 6);
        assert_eq!(props.breadth_max, 3);
        assert_eq!(props.breadth_mean, Some(2.0));
        assert_eq!(props.root_n_folders, 2);
        assert_eq!(props.n_leaf_folders, 3);
        assert_eq!(props.pct_leaf_folders, 50.0);
        assert_eq!(props.depth_leaf_folders_mean, Some(2.0));
        assert_eq!(props.n_switch_folders, 1);
        assert_eq!(props.depth_switch_folders_mean, Some(1.0));
        assert_eq!(props.depth_max, 2);
        assert_eq!(props.depth_folders_mode, Some(2));
        assert!((props.branching_factor.unwrap() - 5.0 / 3.0).abs() < 1e-9);
        assert_eq!(props.root_n_files, 1);
        assert_eq!(props.n_empty_folders, 1);
        assert_eq!(props.depth_files_mode, Some(2));
        assert_eq!(props.file_breadth_mode_n_files, 3);
    }

    #[test]
    fn measure_pools_several_roots() {
        let props = measure(&[sample(), sample()], StatsMode::Strict).unwrap();
        assert_eq!(props.n_roots, 2);
        assert_eq!(props.n_files, 14);
        assert_eq!(props.n_folders, 12);
        assert_eq!(props.root_n_folders, 4);
        assert_eq!(props.root_n_files, 2);
        assert_eq!(props.breadth_max, 6);
        assert_eq!(props.file_breadth_mode_n_files, 6);
    }

    #[test]
    fn strict_mode_fails_without_switch_folders() {
        let flat = tree(&[(1, None, 2)]);
        let err = measure(&[flat.clone()], StatsMode::Strict).unwrap_err();
        assert!(matches!(err, StatsError::EmptyInput { .. }));

        let props = measure(&[flat], StatsMode::Lenient).unwrap();
        assert_eq!(props.depth_switch_folders_mean, None);
        assert_eq!(props.branching_factor, None);
        assert_eq!(props.n_files, 2);
    }

    #[test]
    fn measure_requires_roots() {
        assert_eq!(measure(&[], StatsMode::Lenient), Err(StatsError::NoRoots));

        let mut headless = sample();
        headless.remove(&ROOT_KEY);
        assert_eq!(measure(&[headless], StatsMode::Lenient), Err(StatsError::MissingRoot(0)));
    }

    #[test]
    fn every_metric_has_a_distinct_label() {
        let labels: std::collections::HashSet<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), Metric::ALL.len());
        let props = measure(&[sample()], StatsMode::Strict).unwrap();
        assert_eq!(props.value(Metric::NFiles), Some(7.0));
        assert_eq!(props.value(Metric::DepthFilesMode), Some(2.0));
    }
}
