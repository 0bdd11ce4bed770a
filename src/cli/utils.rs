//! Shared CLI utilities.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parse `PATH=NAME` pairs given with `--rename`.
pub fn parse_renames(values: &[String]) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for value in values {
        let Some((path, name)) = value.split_once('=') else {
            anyhow::bail!("Invalid --rename value '{}': expected PATH=NAME", value);
        };
        let (path, name) = (path.trim(), name.trim());
        if path.is_empty() || name.is_empty() {
            anyhow::bail!("Invalid --rename value '{}': expected PATH=NAME", value);
        }
        out.insert(path.to_string(), name.to_string());
    }
    Ok(out)
}

/// Canonicalize a root folder, failing when it is not a directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Cannot access {}: {}", path.display(), e))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }
    Ok(root)
}
