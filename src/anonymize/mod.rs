//! Participant-driven anonymization of a folder tree
//!
//! Folders can be excluded (dropped with their whole subtree), marked as
//! relevant to the collection, or renamed. Remaining names can be hashed or
//! replaced by folder keys.

use globset::{Glob, GlobSetBuilder};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Config, DirDict, FolderKey, NameMode, ROOT_KEY};
use crate::stats::{find_all_children, recalculate_cumfiles};
use crate::utils::{normalize_path, short_digest};

#[derive(Debug, Error)]
pub enum AnonymizeError {
    #[error("the root folder cannot be excluded")]
    RootExcluded,
    #[error("invalid exclude glob '{glob}': {source}")]
    InvalidGlob {
        glob: String,
        #[source]
        source: globset::Error,
    },
}

/// Folder references are paths relative to the root, using `/`.
///
/// Folders picked from the tree itself are carried by key in `excluded_keys`
/// and `relevant_keys` and need no path resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Marking {
    pub excluded: Vec<String>,
    pub excluded_keys: Vec<FolderKey>,
    pub exclude_globs: Vec<String>,
    pub relevant: Vec<String>,
    pub relevant_keys: Vec<FolderKey>,
    pub renamed: BTreeMap<String, String>,
    pub names: NameMode,
}

impl Marking {
    pub fn from_config(config: &Config) -> Self {
        Self {
            excluded: config.exclude.clone(),
            excluded_keys: Vec::new(),
            exclude_globs: config.exclude_globs.clone(),
            relevant: config.relevant.clone(),
            relevant_keys: Vec::new(),
            renamed: config.rename.clone(),
            names: config.names,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
            && self.excluded_keys.is_empty()
            && self.exclude_globs.is_empty()
            && self.relevant.is_empty()
            && self.relevant_keys.is_empty()
            && self.renamed.is_empty()
            && self.names == NameMode::Keep
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymizeReport {
    pub removed_folders: usize,
    pub relevant_folders: usize,
    pub renamed_folders: usize,
    /// Marked paths that matched no folder.
    pub unknown_paths: Vec<String>,
}

/// Relative path of every folder, keyed by path. The root maps to `""`.
pub fn relative_paths(dict: &DirDict) -> HashMap<String, FolderKey> {
    let mut by_key: HashMap<FolderKey, String> = HashMap::new();
    for (key, folder) in dict {
        let path = match folder.dirparent.and_then(|p| by_key.get(&p)) {
            Some(parent) if parent.is_empty() => folder.dirname.clone(),
            Some(parent) => format!("{parent}/{}", folder.dirname),
            None => String::new(),
        };
        by_key.insert(*key, path);
    }
    by_key.into_iter().map(|(k, p)| (p, k)).collect()
}

fn clean_reference(reference: &str) -> String {
    let normalized = normalize_path(reference.trim());
    let mut s = normalized.as_str();
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    match s.trim_matches('/') {
        "." => String::new(),
        rest => rest.to_string(),
    }
}

/// Remove `key` and all its descendants, detaching it from its parent.
///
/// Returns the number of folders removed.
pub fn remove_subtree(dict: &mut DirDict, key: FolderKey) -> usize {
    let Some(parent) = dict.get(&key).map(|f| f.dirparent) else {
        return 0;
    };
    if let Some(parent) = parent.and_then(|p| dict.get_mut(&p)) {
        parent.childkeys.retain(|c| *c != key);
    }

    let mut removed = 0;
    for child in find_all_children(dict, key).into_iter().chain(std::iter::once(key)) {
        if dict.remove(&child).is_some() {
            removed += 1;
        }
    }
    removed
}

/// Apply a [`Marking`] to a walked and aggregated tree.
pub fn anonymize(dict: &mut DirDict, marking: &Marking) -> Result<AnonymizeReport, AnonymizeError> {
    let mut report = AnonymizeReport::default();
    let paths = relative_paths(dict);

    let resolve = |reference: &str, report: &mut AnonymizeReport| -> Option<FolderKey> {
        let found = paths.get(reference).or_else(|| paths.get(&clean_reference(reference)));
        match found {
            Some(key) => Some(*key),
            None => {
                debug!("No folder matches '{}'", reference);
                report.unknown_paths.push(reference.to_string());
                None
            }
        }
    };

    let mut excluded: Vec<FolderKey> = marking.excluded_keys.clone();
    excluded.extend(marking.excluded.iter().filter_map(|r| resolve(r, &mut report)));
    let mut relevant: Vec<FolderKey> = marking.relevant_keys.clone();
    relevant.extend(marking.relevant.iter().filter_map(|r| resolve(r, &mut report)));
    let renamed: Vec<(FolderKey, &String)> = marking
        .renamed
        .iter()
        .filter_map(|(r, name)| resolve(r, &mut report).map(|k| (k, name)))
        .collect();

    if !marking.exclude_globs.is_empty() {
        let mut builder = GlobSetBuilder::new();
        for pattern in &marking.exclude_globs {
            let glob = Glob::new(pattern).map_err(|source| AnonymizeError::InvalidGlob {
                glob: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|source| AnonymizeError::InvalidGlob { glob: marking.exclude_globs.join(","), source })?;
        excluded.extend(
            paths.iter().filter(|(p, _)| !p.is_empty() && globs.is_match(p.as_str())).map(|(_, k)| *k),
        );
    }

    if excluded.contains(&ROOT_KEY) {
        return Err(AnonymizeError::RootExcluded);
    }

    excluded.sort_unstable();
    for key in excluded {
        let removed = remove_subtree(dict, key);
        if removed > 0 {
            debug!("Excluded folder {} ({} folders)", key, removed);
        }
        report.removed_folders += removed;
    }

    for key in relevant {
        if !dict.contains_key(&key) {
            continue;
        }
        for k in std::iter::once(key).chain(find_all_children(dict, key)) {
            if let Some(folder) = dict.get_mut(&k) {
                if !folder.relevant {
                    folder.relevant = true;
                    report.relevant_folders += 1;
                }
            }
        }
    }

    let mut explicit: Vec<FolderKey> = Vec::new();
    for (key, name) in renamed {
        if let Some(folder) = dict.get_mut(&key) {
            folder.dirname = name.clone();
            explicit.push(key);
            report.renamed_folders += 1;
        }
    }

    for (key, folder) in dict.iter_mut() {
        if explicit.contains(key) {
            continue;
        }
        match marking.names {
            NameMode::Keep => {}
            NameMode::Hash => folder.dirname = short_digest(&folder.dirname),
            NameMode::Key => folder.dirname = key.to_string(),
        }
    }

    recalculate_cumfiles(dict);
    Ok(report)
}
