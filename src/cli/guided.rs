//! Interactive guided folder marking.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use std::path::Path;

use crate::anonymize::relative_paths;
use crate::domain::{DirDict, FolderKey, ROOT_KEY};
use crate::utils::format_with_commas;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidedMarking {
    pub excluded: Vec<FolderKey>,
    pub relevant: Vec<FolderKey>,
}

pub fn choose_marking(root_path: &Path, dict: &DirDict, max_depth: usize) -> Result<GuidedMarking> {
    print_preview(root_path, dict);

    let choices = folder_choices(dict, max_depth);
    if choices.is_empty() {
        println!("  No sub-folders to mark.");
        return Ok(GuidedMarking::default());
    }

    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
    let excluded_idx = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select folders to EXCLUDE (e.g. sensitive work); space toggles, enter confirms")
        .items(&labels)
        .interact()?;

    let excluded: Vec<&FolderChoice> =
        excluded_idx.into_iter().filter_map(|idx| choices.get(idx)).collect();

    let remaining: Vec<&FolderChoice> = choices
        .iter()
        .filter(|c| !excluded.iter().any(|e| c.path == e.path || c.path.starts_with(&format!("{}/", e.path))))
        .collect();

    let relevant: Vec<FolderKey> = if remaining.is_empty() {
        Vec::new()
    } else {
        let labels: Vec<&str> = remaining.iter().map(|c| c.label.as_str()).collect();
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select folders RELEVANT to the collection")
            .items(&labels)
            .interact()?
            .into_iter()
            .filter_map(|idx| remaining.get(idx))
            .map(|c| c.key)
            .collect()
    };

    Ok(GuidedMarking { excluded: excluded.into_iter().map(|c| c.key).collect(), relevant })
}

pub fn ask_software_choice() -> Result<String> {
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Which software do you mostly use to manage your files? (optional)")
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim().to_string())
}

fn print_preview(root_path: &Path, dict: &DirDict) {
    let root = dict.get(&ROOT_KEY);
    println!();
    println!("Guided marking for '{}'", root_path.display());
    println!("  Folders: {}", format_with_commas(dict.len()));
    println!("  Files:   {}", format_with_commas(root.map(|r| r.cumfiles).unwrap_or(0)));
    println!();
}

#[derive(Debug, Clone, PartialEq)]
struct FolderChoice {
    key: FolderKey,
    path: String,
    label: String,
}

/// Folders down to `max_depth`, in tree order, labelled with their file counts.
fn folder_choices(dict: &DirDict, max_depth: usize) -> Vec<FolderChoice> {
    let mut choices: Vec<FolderChoice> = relative_paths(dict)
        .into_iter()
        .filter(|(path, _)| !path.is_empty())
        .filter_map(|(path, key)| {
            let folder = dict.get(&key)?;
            if folder.depth > max_depth {
                return None;
            }
            let indent = "  ".repeat(folder.depth.saturating_sub(1));
            let label = format!("{indent}{}/  ({} files)", folder.dirname, format_with_commas(folder.cumfiles));
            Some(FolderChoice { key, path, label })
        })
        .collect();
    choices.sort_by_key(|c| c.key);
    choices
}
