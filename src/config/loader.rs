//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "FOLDER_CENSUS_";
const SECTION_NAMES: [&str; 2] = ["folder-census", "census"];

/// Load the configuration: defaults, then the config file, then `FOLDER_CENSUS_*`
/// environment variables.
///
/// An explicitly given file must parse; an auto-discovered one that does not
/// is skipped with a warning.
pub fn load_config(base_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let file_config = load_file_config(base_dir, config_path)?;
    apply_env(file_config)
}

fn load_file_config(base_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(base_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested [folder-census] or [census] table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = SECTION_NAMES.iter().find_map(|name| raw.get(*name).cloned()).unwrap_or(raw);

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested folder-census or census mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = SECTION_NAMES.iter().find_map(|name| raw.get(*name).cloned()).unwrap_or(raw);

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn apply_env(config: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Invalid FOLDER_CENSUS_* environment override")
}

fn discover_config(base_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        "folder-census.toml",
        ".folder-census.toml",
        "folder-census.yml",
        ".folder-census.yml",
        "folder-census.yaml",
        ".folder-census.yaml",
    ];

    candidates.iter().map(|c| base_dir.join(c)).find(|p| p.exists())
}
