//! Folder walker that builds a keyed folder tree.

use crate::domain::{DirDict, FolderKey, FolderRecord, StatRecord, ROOT_KEY};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::metadata::stat_record;

/// Counters collected while walking a root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub folders_recorded: usize,
    pub files_seen: usize,
    pub files_without_metadata: usize,
    /// Hidden folders left out together with their subtree. Hidden files are not counted.
    pub hidden_skipped: usize,
    pub unreadable_skipped: usize,
    pub walk_errors: usize,
}

/// Walks a root folder and records per-folder and per-file metadata.
///
/// File names are never recorded. Hidden entries and folders that cannot be
/// listed are left out together with everything below them.
pub struct FolderWalker {
    root_path: PathBuf,
    follow_symlinks: bool,
    include_hidden: bool,
    progress: Option<ProgressBar>,
    stats: WalkStats,
}

impl FolderWalker {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            follow_symlinks: false,
            include_hidden: false,
            progress: None,
            stats: WalkStats::default(),
        }
    }

    /// Set whether to follow symbolic links
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set whether hidden files and folders are recorded
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Tick this progress bar once per visited entry
    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Walk the root and return its folder tree.
    ///
    /// Keys are assigned in pre-order with children sorted by name, so the
    /// output is deterministic for an unchanged tree.
    pub fn walk(&mut self) -> Result<DirDict> {
        self.stats = WalkStats::default();

        let root_meta = fs::metadata(&self.root_path)
            .with_context(|| format!("Cannot read root folder: {}", self.root_path.display()))?;
        if !root_meta.is_dir() {
            anyhow::bail!("Root is not a directory: {}", self.root_path.display());
        }
        fs::read_dir(&self.root_path)
            .with_context(|| format!("Cannot list root folder: {}", self.root_path.display()))?;

        let include_hidden = self.include_hidden;
        let mut hidden_skipped = 0usize;
        let mut unreadable_skipped = 0usize;

        let walker = WalkDir::new(&self.root_path)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                if !include_hidden && is_hidden(entry) {
                    if entry.file_type().is_dir() {
                        hidden_skipped += 1;
                    }
                    return false;
                }
                if entry.file_type().is_dir() && fs::read_dir(entry.path()).is_err() {
                    debug!("Skipping unreadable folder {}", entry.path().display());
                    unreadable_skipped += 1;
                    return false;
                }
                true
            });

        let mut dict = DirDict::new();
        let mut keys_by_path: HashMap<PathBuf, FolderKey> = HashMap::new();
        let mut next_key = ROOT_KEY;

        for entry_result in walker {
            if let Some(pb) = &self.progress {
                pb.tick();
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warn!("Walk error under {}: {}", self.root_path.display(), err);
                    self.stats.walk_errors += 1;
                    continue;
                }
            };

            let path = entry.path();
            let parent_key = parent_key(&keys_by_path, path);

            if entry.file_type().is_dir() {
                if entry.depth() > 0 && parent_key.is_none() {
                    continue;
                }

                let stat = match entry.metadata() {
                    Ok(meta) => stat_record(&meta),
                    Err(err) => {
                        warn!("No metadata for folder {}: {}", path.display(), err);
                        StatRecord::default()
                    }
                };

                let key = next_key;
                next_key += 1;

                let dirname = if entry.depth() == 0 {
                    root_name(&self.root_path)
                } else {
                    entry.file_name().to_string_lossy().to_string()
                };
                let dirparent = if entry.depth() == 0 { None } else { parent_key };

                dict.insert(key, FolderRecord::new(dirname, dirparent, entry.depth(), stat));
                if let Some(parent) = dirparent.and_then(|p| dict.get_mut(&p)) {
                    parent.childkeys.push(key);
                }
                keys_by_path.insert(path.to_path_buf(), key);
                self.stats.folders_recorded += 1;
            } else {
                let Some(folder) = parent_key.and_then(|k| dict.get_mut(&k)) else {
                    continue;
                };

                folder.nfiles += 1;
                self.stats.files_seen += 1;

                match fs::metadata(path) {
                    Ok(meta) => folder.filestat.push(stat_record(&meta)),
                    Err(err) => {
                        debug!("No metadata for file under {}: {}", folder.dirname, err);
                        self.stats.files_without_metadata += 1;
                    }
                }
            }
        }

        self.stats.hidden_skipped = hidden_skipped;
        self.stats.unreadable_skipped = unreadable_skipped;

        for folder in dict.values_mut() {
            folder.cumfiles = folder.nfiles;
        }

        debug!(
            "Walked {}: {} folders, {} files",
            self.root_path.display(),
            self.stats.folders_recorded,
            self.stats.files_seen
        );

        Ok(dict)
    }

    /// Get walk statistics
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }
}

fn parent_key(keys_by_path: &HashMap<PathBuf, FolderKey>, path: &Path) -> Option<FolderKey> {
    path.parent().and_then(|p| keys_by_path.get(p)).copied()
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string())
}

#[cfg(windows)]
fn is_hidden(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    entry.metadata().map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0).unwrap_or(false)
}

#[cfg(not(windows))]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("docs/reports")).unwrap();
        fs::create_dir_all(root.join("music")).unwrap();
        fs::write(root.join("top.txt"), "x").unwrap();
        fs::write(root.join("docs/a.txt"), "a").unwrap();
        fs::write(root.join("docs/reports/q1.txt"), "q1").unwrap();
        fs::write(root.join("docs/reports/q2.txt"), "q2").unwrap();
    }

    fn key_of(dict: &DirDict, name: &str) -> FolderKey {
        *dict.iter().find(|(_, f)| f.dirname == name).map(|(k, _)| k).unwrap()
    }

    #[test]
    fn test_walk_assigns_preorder_keys() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());

        let mut walker = FolderWalker::new(tmp.path().to_path_buf());
        let dict = walker.walk().unwrap();

        assert_eq!(dict.len(), 4);
        let root = &dict[&ROOT_KEY];
        assert!(root.dirparent.is_none());
        assert_eq!(root.depth, 0);
        assert_eq!(root.nfiles, 1);

        let docs = key_of(&dict, "docs");
        let reports = key_of(&dict, "reports");
        let music = key_of(&dict, "music");
        assert_eq!((docs, reports, music), (2, 3, 4));
        assert_eq!(root.childkeys, vec![docs, music]);
        assert_eq!(dict[&reports].dirparent, Some(docs));
        assert_eq!(dict[&reports].depth, 2);
        assert_eq!(dict[&reports].nfiles, 2);
        assert_eq!(dict[&reports].filestat.len(), 2);

        for (key, folder) in &dict {
            if let Some(parent) = folder.dirparent {
                assert!(parent < *key, "parent key must precede child key");
            }
        }
    }

    #[test]
    fn test_walk_stats_count_files_and_folders() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());

        let mut walker = FolderWalker::new(tmp.path().to_path_buf());
        walker.walk().unwrap();
        let stats = walker.stats();
        assert_eq!(stats.folders_recorded, 4);
        assert_eq!(stats.files_seen, 4);
        assert_eq!(stats.files_without_metadata, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_hidden_entries_skipped_by_default() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join(".cache/deep")).unwrap();
        fs::write(root.join(".cache/deep/x.bin"), "x").unwrap();
        fs::write(root.join(".profile"), "x").unwrap();
        fs::write(root.join("visible.txt"), "x").unwrap();

        let mut walker = FolderWalker::new(root.to_path_buf());
        let dict = walker.walk().unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict[&ROOT_KEY].nfiles, 1);
        assert_eq!(walker.stats().hidden_skipped, 1);

        let mut walker = FolderWalker::new(root.to_path_buf()).include_hidden(true);
        let dict = walker.walk().unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict[&ROOT_KEY].nfiles, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folder_counts_as_file_when_not_followed() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/a.txt"), "a").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let mut walker = FolderWalker::new(root.to_path_buf());
        let dict = walker.walk().unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict[&ROOT_KEY].nfiles, 1);

        let mut walker = FolderWalker::new(root.to_path_buf()).follow_symlinks(true);
        let dict = walker.walk().unwrap();
        assert_eq!(dict.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_folder_skipped_with_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("locked/inner")).unwrap();
        fs::write(root.join("locked/inner/x.txt"), "x").unwrap();
        fs::create_dir_all(root.join("open")).unwrap();
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the folder.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut walker = FolderWalker::new(root.to_path_buf());
        let result = walker.walk();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let dict = result.unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.values().all(|f| f.dirname != "locked" && f.dirname != "inner"));
        assert_eq!(dict[&ROOT_KEY].cumfiles, 0);
        assert_eq!(walker.stats().unreadable_skipped, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_reported_when_following() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/f.txt"), "f").unwrap();
        std::os::unix::fs::symlink("..", root.join("a/loop")).unwrap();

        let mut walker = FolderWalker::new(root.to_path_buf()).follow_symlinks(true);
        let dict = walker.walk().unwrap();
        assert!(walker.stats().walk_errors >= 1);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict[&2].nfiles, 1);
    }

    #[test]
    fn test_walk_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let mut walker = FolderWalker::new(tmp.path().join("nope"));
        assert!(walker.walk().is_err());
    }

    #[test]
    fn test_walk_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let mut walker = FolderWalker::new(file);
        assert!(walker.walk().is_err());
    }

    #[test]
    fn test_cumfiles_starts_at_nfiles() {
        let tmp = TempDir::new().unwrap();
        build_tree(tmp.path());
        let (dict, _) = crate::scan::record_stat(tmp.path()).unwrap();
        for folder in dict.values() {
            assert_eq!(folder.cumfiles, folder.nfiles);
        }
    }
}
