//! Sources command implementation
//!
//! Lists the book sources the pipeline would run over.

use crate::cli::Output;
use crate::config::BooktallyConfig;
use anyhow::Result;

/// Execute the sources command
pub async fn execute(config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = BooktallyConfig::resolve(config_path)?;

    output.header("📖 Configured Book Sources");

    for source in &config.sources {
        output.table_row(&source.name, &source.url);
    }

    if config.sources.is_empty() {
        output.warning("No book sources configured");
        output.info("Add sources to booktally.yml or run 'booktally config init'");
    }

    Ok(())
}
