//! Export document generation and loading.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::domain::{DirDict, ExportDocument, RootExport, EXPORT_SCHEMA_VERSION, ROOT_KEY};
use crate::stats::{CollectionProperties, TypicalityReport};

pub fn build_export(
    dir_dicts: Vec<DirDict>,
    software_choice: Option<String>,
    properties: Option<CollectionProperties>,
    typicality: Option<TypicalityReport>,
    include_timestamp: bool,
) -> ExportDocument {
    let roots = dir_dicts
        .into_iter()
        .map(|dir_dict| RootExport {
            label: dir_dict.get(&ROOT_KEY).map(|r| r.dirname.clone()).unwrap_or_default(),
            dir_dict,
        })
        .collect();

    ExportDocument {
        schema_version: EXPORT_SCHEMA_VERSION.to_string(),
        generated_at: include_timestamp
            .then(|| Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        software_choice: software_choice.unwrap_or_default(),
        roots,
        properties,
        typicality,
    }
}

pub fn write_export(path: &Path, doc: &ExportDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating output folder: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(doc)?;
    fs::write(path, content).with_context(|| format!("Failed writing export: {}", path.display()))?;
    Ok(())
}

pub fn read_export(path: &Path) -> Result<ExportDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading export: {}", path.display()))?;
    let doc: ExportDocument = serde_json::from_str(&content)
        .with_context(|| format!("Invalid export file: {}", path.display()))?;
    if doc.schema_version != EXPORT_SCHEMA_VERSION {
        tracing::warn!(
            "Export {} has schema version {} (expected {})",
            path.display(),
            doc.schema_version,
            EXPORT_SCHEMA_VERSION
        );
    }
    Ok(doc)
}
