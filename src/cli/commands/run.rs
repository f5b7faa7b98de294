//! Run command implementation
//!
//! Drives the full pipeline: download every configured book, count word
//! frequencies in parallel, and render the ranked report.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::cli::Output;
use crate::config::BooktallyConfig;
use crate::fetch::DocumentFetcher;
use crate::pipeline::{PipelineError, PipelineReport, WordPipeline};

/// Execute the run command
pub async fn execute(
    config_path: Option<&str>,
    top: Option<usize>,
    format: &str,
    output: &Output,
) -> Result<()> {
    let config = BooktallyConfig::resolve(config_path)?;
    config.validate()?;

    let top_n = top.unwrap_or(config.report.top_n);
    output.verbose(&format!(
        "Loaded {} sources, reporting top {}",
        config.sources.len(),
        top_n
    ));

    if format != "json" {
        output.header("📚 Word Frequency Report");
        output.step(&format!("Downloading {} books", config.sources.len()));
    }

    let fetcher = DocumentFetcher::new(
        Duration::from_secs(config.fetch.timeout_secs),
        &config.fetch.user_agent,
    )?;
    let pipeline = WordPipeline::new(Arc::new(fetcher), &config);

    match pipeline.run(&config.sources, top_n).await {
        Ok(report) => {
            display_report(&report, format, output)?;
            Ok(())
        }
        Err(PipelineError::Fetch { failures, total }) => {
            output.error(&format!("{} of {} downloads failed", failures.len(), total));
            for failure in &failures {
                output.error(&format!("  {}", failure));
            }
            output.separator();
            anyhow::bail!("pipeline aborted before processing");
        }
        Err(err) => Err(err.into()),
    }
}

/// Display the finished report in the requested format
fn display_report(report: &PipelineReport, format: &str, output: &Output) -> Result<()> {
    match format {
        "json" => {
            let json_output = serde_json::to_string_pretty(report)?;
            println!("{}", json_output);
        }
        _ => {
            output.category("Most frequent words");
            if report.top.is_empty() {
                output.info("No words counted");
            }
            for (rank, entry) in report.top.iter().enumerate() {
                output.list_item(&format!("{}. {}: {}", rank + 1, entry.word, entry.count));
            }

            output.category("Books");
            for book in &report.books {
                output.list_item(&format!(
                    "{}: {} words ({} distinct)",
                    book.name, book.total_words, book.distinct_words
                ));
            }

            output.blank_line();
            output.key_value("Total words:", &report.total_words.to_string(), false);
            output.key_value("Distinct words:", &report.distinct_words.to_string(), false);
            output.key_value(
                "Download time:",
                &format!("{:.2}s", report.fetch_seconds),
                false,
            );
            output.key_value(
                "Processing time:",
                &format!("{:.2}s", report.process_seconds),
                false,
            );
            output.blank_line();
            output.success("Word frequency report complete");
        }
    }

    Ok(())
}
