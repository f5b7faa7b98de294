//! Configuration management for Booktally
//!
//! This module handles loading, parsing, and validating Booktally
//! configuration from YAML files. A configuration file is discovered by
//! walking up from the current directory; without one, sensible defaults
//! apply.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Booktally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooktallyConfig {
    /// Books to download and analyze
    #[serde(default = "default_sources")]
    pub sources: Vec<BookSource>,

    /// Boilerplate marker configuration
    #[serde(default)]
    pub cleaner: CleanerConfig,

    /// Download configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Worker pool configuration
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// One book to analyze: a display name plus where to retrieve it. URLs may
/// also be local file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSource {
    pub name: String,
    pub url: String,
}

/// Boilerplate marker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Content begins on the line after the one containing this marker
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    /// Content ends immediately before this marker
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

/// Download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (0 = derive from CPU cores)
    #[serde(default)]
    pub max_threads: usize,

    /// Percentage of CPU cores to use (1-100)
    #[serde(default = "default_thread_percentage")]
    pub thread_percentage: u8,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of entries in the ranked report
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_sources() -> Vec<BookSource> {
    vec![
        BookSource {
            name: "Pride and Prejudice".to_string(),
            url: "https://www.gutenberg.org/cache/epub/1342/pg1342.txt".to_string(),
        },
        BookSource {
            name: "Frankenstein".to_string(),
            url: "https://www.gutenberg.org/cache/epub/84/pg84.txt".to_string(),
        },
    ]
}

fn default_start_marker() -> String {
    "*** START OF".to_string()
}

fn default_end_marker() -> String {
    "*** END OF".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("booktally/{}", env!("CARGO_PKG_VERSION"))
}

fn default_thread_percentage() -> u8 {
    75
}

fn default_top_n() -> usize {
    10
}

impl Default for BooktallyConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            cleaner: CleanerConfig::default(),
            fetch: FetchConfig::default(),
            parallel: ParallelConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            thread_percentage: default_thread_percentage(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl BooktallyConfig {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: BooktallyConfig = serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yml::to_string(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Find configuration file in current directory or parent directories
    pub fn find_config_file() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join("booktally.yml");
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join(".booktally.yml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve configuration: an explicit path must load, a discovered file is
    /// used when present, defaults apply otherwise.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(Path::new(path)),
            None => match Self::find_config_file() {
                Some(config_path) => Self::load_from_file(&config_path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            anyhow::bail!("At least one book source must be configured");
        }

        for source in &self.sources {
            if source.name.trim().is_empty() {
                anyhow::bail!("Book source with empty name");
            }
            if source.url.trim().is_empty() {
                anyhow::bail!("Book source '{}' has an empty url", source.name);
            }
        }

        if self.report.top_n == 0 {
            anyhow::bail!("report.top_n cannot be 0");
        }

        if self.parallel.thread_percentage == 0 || self.parallel.thread_percentage > 100 {
            anyhow::bail!("parallel.thread_percentage must be within 1..=100");
        }

        Ok(())
    }
}
