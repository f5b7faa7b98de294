//! Configuration command implementations
//!
//! Commands for managing Booktally configuration.

use crate::cli::ConfigCommands;
use crate::cli::Output;
use crate::config::BooktallyConfig;
use anyhow::{Context, Result};

/// Execute config commands
pub async fn execute(cmd: ConfigCommands, config_path: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Init => init(output).await,
        ConfigCommands::Validate => validate(config_path, output).await,
        ConfigCommands::Show => show(config_path, output).await,
    }
}

async fn init(output: &Output) -> Result<()> {
    output.header("🔧 Initializing Configuration");

    let current_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let config_path = current_dir.join("booktally.yml");

    if config_path.exists() {
        output.warning("Configuration file already exists");
        output.info("Edit booktally.yml or delete it before re-initializing");
        return Ok(());
    }

    let config = BooktallyConfig::default();
    config.save_to_file(&config_path)?;

    output.success("Configuration file created successfully");
    output.table_row("Config file", &config_path.display().to_string());
    output.info("Edit booktally.yml to customize your book list");

    Ok(())
}

async fn validate(config_path: Option<&str>, output: &Output) -> Result<()> {
    output.header("✅ Validating Configuration");

    let config = BooktallyConfig::resolve(config_path)?;
    config.validate()?;

    output.success(&format!(
        "Configuration is valid ({} sources)",
        config.sources.len()
    ));

    Ok(())
}

async fn show(config_path: Option<&str>, output: &Output) -> Result<()> {
    output.header("📄 Current Configuration");

    let config = BooktallyConfig::resolve(config_path)?;
    let rendered = serde_yml::to_string(&config).context("Failed to render configuration")?;
    println!("{}", rendered);

    Ok(())
}
