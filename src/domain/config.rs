//! Run configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "folder_data.json";

/// How folder names are written to the export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NameMode {
    /// Keep the real folder names
    #[default]
    Keep,
    /// Replace names with a short SHA-256 digest
    Hash,
    /// Replace names with the folder key
    Key,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub follow_symlinks: bool,
    pub include_hidden: bool,
    pub strict_stats: bool,
    #[serde(deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub exclude_globs: Vec<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub relevant: Vec<String>,
    pub rename: BTreeMap<String, String>,
    pub names: NameMode,
    pub tree_depth: usize,
    pub guided_depth: usize,
    pub output: PathBuf,
    #[serde(deserialize_with = "lenient_text")]
    pub software_choice: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            strict_stats: false,
            exclude: Vec::new(),
            exclude_globs: Vec::new(),
            relevant: Vec::new(),
            rename: BTreeMap::new(),
            names: NameMode::Keep,
            tree_depth: 3,
            guided_depth: 2,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            software_choice: None,
        }
    }
}

/// A config value that is meant as text.
///
/// Environment values such as `2020` or `true` arrive as numbers or booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// Accept either a list of strings or one comma-separated string.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(Scalar),
        Many(Vec<Scalar>),
    }

    let items: Vec<String> = match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s.into_text().split(',').map(str::to_string).collect(),
        StringOrList::Many(v) => v.into_iter().map(Scalar::into_text).collect(),
    };
    Ok(items.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}
