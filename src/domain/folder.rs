//! Folder records and the keyed folder tree (`DirDict`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer key of a folder inside a [`DirDict`].
///
/// Keys are handed out in pre-order walk order starting at [`ROOT_KEY`], so a
/// child's key is always greater than its parent's.
pub type FolderKey = u32;

/// Key of the walk root. Zero is never used.
pub const ROOT_KEY: FolderKey = 1;

/// Keyed folder tree produced by a walk.
pub type DirDict = BTreeMap<FolderKey, FolderRecord>;

/// File-system metadata of a single entry. Names are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub mode: u32,
    pub ino: u64,
    pub dev: u64,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub atime: f64,
    pub mtime: f64,
    pub ctime: f64,
}

/// Median timestamps of the files directly inside a folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggFileStat {
    pub aggatime: Option<f64>,
    pub aggmtime: Option<f64>,
    pub aggctime: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub dirname: String,
    /// `None` marks the root.
    pub dirparent: Option<FolderKey>,
    pub childkeys: Vec<FolderKey>,
    pub depth: usize,
    /// Visible files directly in this folder.
    pub nfiles: usize,
    /// Files in this folder and every descendant.
    pub cumfiles: usize,
    #[serde(default)]
    pub filestat: Vec<StatRecord>,
    #[serde(flatten)]
    pub stat: StatRecord,
    #[serde(default)]
    pub aggfilestat: Option<AggFileStat>,
    #[serde(default)]
    pub relevant: bool,
}

impl FolderRecord {
    pub fn new(dirname: String, dirparent: Option<FolderKey>, depth: usize, stat: StatRecord) -> Self {
        Self {
            dirname,
            dirparent,
            childkeys: Vec::new(),
            depth,
            nfiles: 0,
            cumfiles: 0,
            filestat: Vec::new(),
            stat,
            aggfilestat: None,
            relevant: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.childkeys.is_empty()
    }

    /// A non-leaf folder that holds no files of its own.
    pub fn is_switch(&self) -> bool {
        !self.is_leaf() && self.nfiles == 0
    }

    /// A leaf folder that holds no files.
    pub fn is_empty(&self) -> bool {
        self.is_leaf() && self.nfiles == 0
    }
}
