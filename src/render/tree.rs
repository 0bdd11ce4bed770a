//! Folder tree rendering.

use crate::domain::{DirDict, FolderKey, ROOT_KEY};
use crate::stats::latest_activity;
use crate::utils::{format_iso_date, format_with_commas};

/// Render the folder tree down to `max_depth` levels below the root.
///
/// Each line shows the folder name, its cumulative file count and the date of
/// its latest activity. Folders marked relevant carry a `*`.
pub fn render_tree(dict: &DirDict, max_depth: usize) -> String {
    let Some(root) = dict.get(&ROOT_KEY) else {
        return String::new();
    };
    let mut lines = vec![format!("{}/{}", root.dirname, describe(dict, ROOT_KEY))];
    walk_tree(dict, ROOT_KEY, "", 1, max_depth, &mut lines);
    lines.join("\n")
}

fn walk_tree(
    dict: &DirDict,
    key: FolderKey,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    lines: &mut Vec<String>,
) {
    if depth > max_depth {
        return;
    }
    let Some(folder) = dict.get(&key) else {
        return;
    };

    let children: Vec<FolderKey> =
        folder.childkeys.iter().copied().filter(|c| dict.contains_key(c)).collect();
    let total = children.len();
    for (idx, child) in children.into_iter().enumerate() {
        let is_last = idx == total - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let name = &dict[&child].dirname;
        lines.push(format!("{}{}{}/{}", prefix, connector, name, describe(dict, child)));

        let extension = if is_last { "    " } else { "│   " };
        walk_tree(dict, child, &format!("{}{}", prefix, extension), depth + 1, max_depth, lines);
    }
}

fn describe(dict: &DirDict, key: FolderKey) -> String {
    let folder = &dict[&key];
    let marker = if folder.relevant { " *" } else { "" };
    let date = latest_activity(dict, key).and_then(format_iso_date).unwrap_or_else(|| "-".to_string());
    format!("{marker}  [{} files, {}]", format_with_commas(folder.cumfiles), date)
}
