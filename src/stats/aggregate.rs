//! Bottom-up aggregation over a [`DirDict`].

use crate::domain::{AggFileStat, DirDict, FolderKey};

use super::descriptive::median;

/// Fill in `cumfiles` and the per-folder median file timestamps.
///
/// Relies on children having larger keys than their parents, so a single
/// pass in descending key order sees every child before its parent.
pub fn compute_stat(dict: &mut DirDict) {
    let keys: Vec<FolderKey> = dict.keys().rev().copied().collect();
    for key in keys {
        let children_total = child_cumfiles(dict, key);
        let Some(folder) = dict.get_mut(&key) else {
            continue;
        };
        folder.cumfiles = folder.nfiles + children_total;

        let atimes: Vec<f64> = folder.filestat.iter().map(|s| s.atime).collect();
        let mtimes: Vec<f64> = folder.filestat.iter().map(|s| s.mtime).collect();
        let ctimes: Vec<f64> = folder.filestat.iter().map(|s| s.ctime).collect();
        folder.aggfilestat = Some(AggFileStat {
            aggatime: median(&atimes),
            aggmtime: median(&mtimes),
            aggctime: median(&ctimes),
        });
    }
}

/// Reset `cumfiles` and re-aggregate over the current child lists.
///
/// Used after folders have been removed from the tree.
pub fn recalculate_cumfiles(dict: &mut DirDict) {
    let keys: Vec<FolderKey> = dict.keys().rev().copied().collect();
    for key in keys {
        let children_total = child_cumfiles(dict, key);
        if let Some(folder) = dict.get_mut(&key) {
            folder.cumfiles = folder.nfiles + children_total;
        }
    }
}

fn child_cumfiles(dict: &DirDict, key: FolderKey) -> usize {
    dict.get(&key)
        .map(|f| f.childkeys.iter().filter_map(|c| dict.get(c)).map(|c| c.cumfiles).sum())
        .unwrap_or(0)
}

/// Recompute depths top-down from `root` (depth 0).
pub fn assign_depths(dict: &mut DirDict, root: FolderKey) {
    let mut stack = vec![(root, 0usize)];
    while let Some((key, depth)) = stack.pop() {
        let Some(folder) = dict.get_mut(&key) else {
            continue;
        };
        folder.depth = depth;
        stack.extend(folder.childkeys.iter().map(|c| (*c, depth + 1)));
    }
}

/// Every descendant of `key`, in no particular order.
pub fn find_all_children(dict: &DirDict, key: FolderKey) -> Vec<FolderKey> {
    let mut out = Vec::new();
    let mut stack: Vec<FolderKey> = dict.get(&key).map(|f| f.childkeys.clone()).unwrap_or_default();
    while let Some(child) = stack.pop() {
        out.push(child);
        if let Some(folder) = dict.get(&child) {
            stack.extend(folder.childkeys.iter().copied());
        }
    }
    out
}

/// Latest activity time of a folder, in seconds since the epoch.
///
/// The newest positive file mtime anywhere in the subtree wins; without one,
/// the folder's own mtime, atime and ctime are tried in that order.
pub fn latest_activity(dict: &DirDict, key: FolderKey) -> Option<f64> {
    let folder = dict.get(&key)?;

    let subtree = std::iter::once(key).chain(find_all_children(dict, key));
    let latest_file = subtree
        .filter_map(|k| dict.get(&k))
        .flat_map(|f| f.filestat.iter().map(|s| s.mtime))
        .filter(|t| *t > 0.0)
        .max_by(f64::total_cmp);

    latest_file.or_else(|| {
        [folder.stat.mtime, folder.stat.atime, folder.stat.ctime].into_iter().find(|t| *t > 0.0)
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{FolderRecord, StatRecord, ROOT_KEY};

    fn file(mtime: f64) -> StatRecord {
        StatRecord { atime: mtime + 10.0, mtime, ctime: mtime - 10.0, ..StatRecord::default() }
    }

    /// Build a tree from `(key, parent, nfiles)` triples, listed in key order.
    pub(crate) fn tree(spec: &[(FolderKey, Option<FolderKey>, usize)]) -> DirDict {
        let mut dict = DirDict::new();
        for &(key, parent, nfiles) in spec {
            let depth = parent.and_then(|p| dict.get(&p)).map(|p: &FolderRecord| p.depth + 1);
            let mut folder =
                FolderRecord::new(format!("f{key}"), parent, depth.unwrap_or(0), StatRecord::default());
            folder.nfiles = nfiles;
            folder.cumfiles = nfiles;
            folder.filestat = (0..nfiles).map(|i| file(100.0 * (i as f64 + 1.0))).collect();
            dict.insert(key, folder);
            if let Some(p) = parent.and_then(|p| dict.get_mut(&p)) {
                p.childkeys.push(key);
            }
        }
        dict
    }

    #[test]
    fn compute_stat_accumulates_bottom_up() {
        let mut dict = tree(&[(1, None, 1), (2, Some(1), 2), (3, Some(2), 3), (4, Some(1), 0)]);
        compute_stat(&mut dict);

        assert_eq!(dict[&3].cumfiles, 3);
        assert_eq!(dict[&2].cumfiles, 5);
        assert_eq!(dict[&4].cumfiles, 0);
        assert_eq!(dict[&ROOT_KEY].cumfiles, 6);

        let agg = dict[&2].aggfilestat.clone().unwrap();
        assert_eq!(agg.aggmtime, Some(150.0));
        assert_eq!(agg.aggatime, Some(160.0));
        assert_eq!(agg.aggctime, Some(140.0));
        assert_eq!(dict[&4].aggfilestat.clone().unwrap().aggmtime, None);
    }

    #[test]
    fn recalculate_after_child_removed() {
        let mut dict = tree(&[(1, None, 1), (2, Some(1), 2), (3, Some(1), 4)]);
        compute_stat(&mut dict);
        assert_eq!(dict[&ROOT_KEY].cumfiles, 7);

        dict.remove(&3);
        dict.get_mut(&ROOT_KEY).unwrap().childkeys.retain(|k| *k != 3);
        recalculate_cumfiles(&mut dict);
        assert_eq!(dict[&ROOT_KEY].cumfiles, 3);
    }

    #[test]
    fn find_all_children_walks_whole_subtree() {
        let dict = tree(&[(1, None, 0), (2, Some(1), 0), (3, Some(2), 0), (4, Some(3), 0), (5, Some(1), 0)]);
        let mut children = find_all_children(&dict, 2);
        children.sort();
        assert_eq!(children, vec![3, 4]);
        assert_eq!(find_all_children(&dict, 5), Vec::<FolderKey>::new());
        assert_eq!(find_all_children(&dict, ROOT_KEY).len(), 4);
    }

    #[test]
    fn assign_depths_from_parent_links() {
        let mut dict = tree(&[(1, None, 0), (2, Some(1), 0), (3, Some(2), 0)]);
        for folder in dict.values_mut() {
            folder.depth = 99;
        }
        assign_depths(&mut dict, ROOT_KEY);
        assert_eq!(dict[&1].depth, 0);
        assert_eq!(dict[&2].depth, 1);
        assert_eq!(dict[&3].depth, 2);
    }

    #[test]
    fn latest_activity_prefers_newest_file_in_subtree() {
        let dict = tree(&[(1, None, 1), (2, Some(1), 3)]);
        assert_eq!(latest_activity(&dict, ROOT_KEY), Some(300.0));
        assert_eq!(latest_activity(&dict, 2), Some(300.0));
    }

    #[test]
    fn latest_activity_falls_back_to_folder_times() {
        let mut dict = tree(&[(1, None, 0)]);
        assert_eq!(latest_activity(&dict, ROOT_KEY), None);

        dict.get_mut(&ROOT_KEY).unwrap().stat.ctime = 5.0;
        assert_eq!(latest_activity(&dict, ROOT_KEY), Some(5.0));

        dict.get_mut(&ROOT_KEY).unwrap().stat.atime = 7.0;
        assert_eq!(latest_activity(&dict, ROOT_KEY), Some(7.0));

        dict.get_mut(&ROOT_KEY).unwrap().stat.mtime = 9.0;
        assert_eq!(latest_activity(&dict, ROOT_KEY), Some(9.0));
    }
}
