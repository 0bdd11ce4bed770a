//! Tree command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::resolve_root;
use crate::config::load_config;
use crate::render::{read_export, render_tree};
use crate::scan::FolderWalker;
use crate::stats::compute_stat;

#[derive(Args)]
pub struct TreeArgs {
    /// Directory to walk, or an export file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Path to config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Max depth of the printed tree
    #[arg(short = 'd', long, value_name = "DEPTH")]
    pub depth: Option<usize>,

    /// Record hidden files and folders
    #[arg(long)]
    pub include_hidden: bool,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,
}

pub fn run(args: TreeArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;
    let depth = args.depth.unwrap_or(config.tree_depth);

    if args.path.is_file() {
        let doc = read_export(&args.path)?;
        let trees: Vec<String> = doc.roots.iter().map(|r| render_tree(&r.dir_dict, depth)).collect();
        println!("{}", trees.join("\n\n"));
        return Ok(());
    }

    let root = resolve_root(&args.path)?;
    let mut walker = FolderWalker::new(root)
        .follow_symlinks(args.follow_symlinks || config.follow_symlinks)
        .include_hidden(args.include_hidden || config.include_hidden);
    let mut dict = walker.walk()?;
    compute_stat(&mut dict);
    println!("{}", render_tree(&dict, depth));
    Ok(())
}
