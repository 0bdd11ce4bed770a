//! Merging of command-line overrides into a loaded [`Config`].

use crate::domain::{Config, NameMode};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Settings given on the command line. `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub follow_symlinks: bool,
    pub include_hidden: bool,
    pub strict_stats: bool,
    pub exclude: Vec<String>,
    pub exclude_globs: Vec<String>,
    pub relevant: Vec<String>,
    pub rename: BTreeMap<String, String>,
    pub names: Option<NameMode>,
    pub tree_depth: Option<usize>,
    pub guided_depth: Option<usize>,
    pub output: Option<PathBuf>,
    pub software_choice: Option<String>,
}

/// Flags switch settings on, scalar values replace, and folder lists are
/// extended so standing exclusions from the config file stay in force.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    config.follow_symlinks |= cli.follow_symlinks;
    config.include_hidden |= cli.include_hidden;
    config.strict_stats |= cli.strict_stats;

    extend_unique(&mut config.exclude, cli.exclude);
    extend_unique(&mut config.exclude_globs, cli.exclude_globs);
    extend_unique(&mut config.relevant, cli.relevant);
    config.rename.extend(cli.rename);

    if let Some(names) = cli.names {
        config.names = names;
    }
    if let Some(depth) = cli.tree_depth {
        config.tree_depth = depth;
    }
    if let Some(depth) = cli.guided_depth {
        config.guided_depth = depth;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.software_choice.is_some() {
        config.software_choice = cli.software_choice;
    }
    config
}

fn extend_unique(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_take_precedence() {
        let config = Config { tree_depth: 2, names: NameMode::Hash, ..Config::default() };
        let cli = CliOverrides {
            tree_depth: Some(6),
            names: Some(NameMode::Key),
            output: Some(PathBuf::from("out.json")),
            strict_stats: true,
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(config, cli);
        assert_eq!(merged.tree_depth, 6);
        assert_eq!(merged.names, NameMode::Key);
        assert_eq!(merged.output, PathBuf::from("out.json"));
        assert!(merged.strict_stats);
    }

    #[test]
    fn folder_lists_are_extended_without_duplicates() {
        let config = Config { exclude: vec!["Private".into()], ..Config::default() };
        let cli = CliOverrides {
            exclude: vec!["Private".into(), "Taxes".into()],
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(config, cli);
        assert_eq!(merged.exclude, vec!["Private".to_string(), "Taxes".to_string()]);
    }

    #[test]
    fn unset_overrides_keep_config_values() {
        let config = Config {
            software_choice: Some("Finder".into()),
            tree_depth: 4,
            include_hidden: true,
            ..Config::default()
        };
        let merged = merge_cli_with_config(config.clone(), CliOverrides::default());
        assert_eq!(merged, config);
    }
}
