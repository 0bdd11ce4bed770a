//! Measure command implementation

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::render::{read_export, render_summary};
use crate::stats::{check_typicality, measure, StatsMode};

#[derive(Args)]
pub struct MeasureArgs {
    /// Export files to pool into one collection
    #[arg(value_name = "EXPORT", required = true, num_args = 1..)]
    pub exports: Vec<PathBuf>,

    /// Fail when a statistic has no input values instead of reporting it as missing
    #[arg(long)]
    pub strict: bool,

    /// Print properties and typicality as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MeasureArgs) -> Result<()> {
    let mut dicts = Vec::new();
    for path in &args.exports {
        let doc = read_export(path)?;
        tracing::debug!("{}: {} root(s)", path.display(), doc.roots.len());
        dicts.extend(doc.dir_dicts());
    }
    if dicts.is_empty() {
        anyhow::bail!("The given exports contain no folder trees");
    }

    let stats_mode = if args.strict { StatsMode::Strict } else { StatsMode::Lenient };
    let properties = measure(&dicts, stats_mode)?;
    let typicality = check_typicality(&properties);

    if args.json {
        let value = json!({ "properties": properties, "typicality": typicality });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", render_summary(&properties, &typicality));
    }
    Ok(())
}
