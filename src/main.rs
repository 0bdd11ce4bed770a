//! folder-census: measure the shape of personal folder collections
//!
//! Walks personal folder trees, records anonymous per-folder metadata,
//! compares the collection against typical personal-folder statistics and
//! exports an anonymized summary.

use anyhow::Result;

fn main() -> Result<()> {
    folder_census::cli::run()
}
