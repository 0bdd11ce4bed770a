//! Scan command implementation

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde_json::json;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use super::guided::{ask_software_choice, choose_marking};
use super::utils::{parse_renames, resolve_root};
use crate::anonymize::{anonymize, Marking};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Config, DirDict, NameMode};
use crate::render::{build_export, render_summary, render_tree, write_export};
use crate::scan::{FolderWalker, WalkStats};
use crate::stats::{check_typicality, compute_stat, measure, StatsMode};

#[derive(Args)]
pub struct ScanArgs {
    /// Root folders to walk
    #[arg(value_name = "ROOT", required = true, num_args = 1..)]
    pub roots: Vec<PathBuf>,

    /// Path to config file (folder-census.toml or .folder-census.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Export file to write
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exclude these folders (relative to the root; repeatable or comma-separated)
    #[arg(short = 'x', long, value_name = "PATHS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Exclude folders whose relative path matches these globs
    #[arg(long, value_name = "GLOBS", value_delimiter = ',')]
    pub exclude_glob: Vec<String>,

    /// Mark these folders (and everything below) as relevant to the collection
    #[arg(short = 'r', long, value_name = "PATHS", value_delimiter = ',')]
    pub relevant: Vec<String>,

    /// Rename a folder in the export (PATH=NAME, repeatable)
    #[arg(long, value_name = "PATH=NAME")]
    pub rename: Vec<String>,

    /// How folder names are written to the export
    #[arg(long, value_enum, value_name = "MODE")]
    pub names: Option<NameMode>,

    /// Answer to "which software do you use to manage your files?"
    #[arg(long, value_name = "TEXT")]
    pub software_choice: Option<String>,

    /// Record hidden files and folders
    #[arg(long)]
    pub include_hidden: bool,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Fail when a statistic has no input values instead of reporting it as missing
    #[arg(long)]
    pub strict: bool,

    /// Omit the generation timestamp for reproducible exports
    #[arg(long)]
    pub no_timestamp: bool,

    /// Skip interactive guided marking
    #[arg(long)]
    pub quick: bool,

    /// Deepest folder level offered in guided marking
    #[arg(long, value_name = "DEPTH")]
    pub guided_depth: Option<usize>,

    /// Print the folder tree of every root after anonymization
    #[arg(long)]
    pub show_tree: bool,

    /// Max depth of the printed tree
    #[arg(long, value_name = "DEPTH")]
    pub tree_depth: Option<usize>,

    /// Print properties and typicality as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    fn overrides(&self) -> Result<CliOverrides> {
        Ok(CliOverrides {
            follow_symlinks: self.follow_symlinks,
            include_hidden: self.include_hidden,
            strict_stats: self.strict,
            exclude: self.exclude.clone(),
            exclude_globs: self.exclude_glob.clone(),
            relevant: self.relevant.clone(),
            rename: parse_renames(&self.rename)?,
            names: self.names,
            tree_depth: self.tree_depth,
            guided_depth: self.guided_depth,
            output: self.output.clone(),
            software_choice: self.software_choice.clone(),
        })
    }
}

pub fn run(args: ScanArgs) -> Result<()> {
    let start_time = Instant::now();

    let interactive_terminal = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    let guided_enabled = !args.quick && interactive_terminal;
    if !args.quick && !interactive_terminal {
        eprintln!("info: non-interactive session detected; skipping guided marking (same as --quick)");
    }

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(config, args.overrides()?);

    let roots = args.roots.iter().map(|r| resolve_root(r)).collect::<Result<Vec<_>>>()?;

    let spinner = if interactive_terminal { scan_spinner() } else { ProgressBar::hidden() };
    let walked = walk_roots(&roots, &config, &spinner);
    spinner.finish_and_clear();

    let mut dicts = Vec::with_capacity(roots.len());
    for (root, result) in roots.iter().zip(walked) {
        let (dict, stats) = result?;
        info!(
            "{}: {} folders, {} files, {} hidden folders skipped, {} unreadable skipped",
            root.display(),
            stats.folders_recorded,
            stats.files_seen,
            stats.hidden_skipped,
            stats.unreadable_skipped
        );
        dicts.push(dict);
    }

    let base_marking = Marking::from_config(&config);
    let mut unknown_everywhere: Option<Vec<String>> = None;
    for (root, dict) in roots.iter().zip(dicts.iter_mut()) {
        let mut marking = base_marking.clone();
        if guided_enabled {
            let guided = choose_marking(root, dict, config.guided_depth)?;
            marking.excluded_keys.extend(guided.excluded);
            marking.relevant_keys.extend(guided.relevant);
        }

        let report = anonymize(dict, &marking)
            .with_context(|| format!("Failed to anonymize {}", root.display()))?;
        if report.removed_folders > 0 || report.renamed_folders > 0 {
            eprintln!(
                "{}: excluded {} folders, renamed {}, {} marked relevant",
                root.display(),
                report.removed_folders,
                report.renamed_folders,
                report.relevant_folders
            );
        }
        unknown_everywhere = Some(match unknown_everywhere {
            None => report.unknown_paths,
            Some(prev) => prev.into_iter().filter(|p| report.unknown_paths.contains(p)).collect(),
        });
    }
    for path in unknown_everywhere.unwrap_or_default() {
        eprintln!("warning: no folder matches '{}'", path);
    }

    let software_choice = match config.software_choice.clone() {
        Some(answer) => Some(answer),
        None if guided_enabled => Some(ask_software_choice()?),
        None => None,
    };

    let stats_mode = if config.strict_stats { StatsMode::Strict } else { StatsMode::Lenient };
    let properties = measure(&dicts, stats_mode)?;
    let typicality = check_typicality(&properties);

    if args.json {
        let value = json!({ "properties": properties, "typicality": typicality });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_summary(&properties, &typicality));
    }

    if args.show_tree {
        for dict in &dicts {
            println!("\n{}", render_tree(dict, config.tree_depth));
        }
    }

    let n_roots = dicts.len();
    let doc = build_export(
        dicts,
        software_choice,
        Some(properties),
        Some(typicality),
        !args.no_timestamp,
    );
    write_export(&config.output, &doc)?;

    eprintln!(
        "Wrote {} ({} root(s)) in {:.1}s",
        config.output.display(),
        n_roots,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn walk_roots(
    roots: &[PathBuf],
    config: &Config,
    spinner: &ProgressBar,
) -> Vec<Result<(DirDict, WalkStats)>> {
    roots
        .par_iter()
        .map(|root| -> Result<(DirDict, WalkStats)> {
            let mut walker = FolderWalker::new(root.clone())
                .follow_symlinks(config.follow_symlinks)
                .include_hidden(config.include_hidden)
                .progress(spinner.clone());
            let mut dict = walker.walk()?;
            compute_stat(&mut dict);
            Ok((dict, walker.stats().clone()))
        })
        .collect()
}

fn scan_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} Walking folders... [{elapsed}]")
    {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
