//! Shape of the exported collection document.

use serde::{Deserialize, Serialize};

use super::folder::DirDict;
use crate::stats::{CollectionProperties, TypicalityReport};

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Free-text answer about the software the participant uses to manage files.
    #[serde(default)]
    pub software_choice: String,
    pub roots: Vec<RootExport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<CollectionProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typicality: Option<TypicalityReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootExport {
    /// Display name of the root after anonymization.
    pub label: String,
    pub dir_dict: DirDict,
}

impl ExportDocument {
    pub fn dir_dicts(&self) -> Vec<DirDict> {
        self.roots.iter().map(|r| r.dir_dict.clone()).collect()
    }
}
