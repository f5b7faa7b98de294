//! # Booktally - Concurrent Word Frequency Statistics
//!
//! Booktally downloads a configurable set of public-domain books, strips the
//! boilerplate front and back matter, and counts word frequencies across the
//! whole corpus in parallel.
//!
//! ## Features
//!
//! - **Two-phase pipeline**: all downloads complete before any processing starts
//! - **Concurrent aggregation**: per-book counts merge into one sharded map
//! - **Deterministic reports**: stable ordering regardless of worker scheduling
//! - **Offline corpora**: sources may be local files instead of URLs
//!
//! ## Quick Start
//!
//! ```bash
//! # Install booktally
//! cargo install booktally
//!
//! # Write a starter configuration
//! booktally config init
//!
//! # Count words across the configured books
//! booktally run
//! ```

pub mod cli;
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod text;

pub use cli::{Cli, Output};
pub use config::BooktallyConfig;

/// Result type alias for Booktally operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
