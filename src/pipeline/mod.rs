//! Two-phase word-frequency pipeline
//!
//! Phase one downloads every configured book concurrently; phase two cleans,
//! tokenizes, and counts each book on a worker pool while merging into one
//! shared frequency table. Each phase is a hard join barrier: processing
//! never starts before every download finished, and ranking never reads the
//! table before every merge completed. A failed download aborts the run
//! before any processing is scheduled, so callers can never observe a
//! partially merged table.

pub mod aggregate;

use std::sync::Arc;
use std::time::Instant;

use crossbeam::channel::bounded;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::{BookSource, BooktallyConfig};
use crate::fetch::{FetchError, FetchFailure, Fetcher};
use crate::text::{cleaner, counter};
use aggregate::{GlobalFrequency, RankedEntry};

/// Pipeline-level failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more downloads failed. Every failure is reported; processing
    /// was never entered.
    #[error("{} of {total} downloads failed", .failures.len())]
    Fetch {
        failures: Vec<FetchFailure>,
        total: usize,
    },
    /// A processing worker panicked.
    #[error("worker thread panicked during processing")]
    Processing,
}

/// Per-book statistics gathered during processing.
#[derive(Debug, Clone, Serialize)]
pub struct BookStats {
    pub name: String,
    pub total_words: u64,
    pub distinct_words: usize,
}

/// The finished report: ranked words, per-book stats, and phase timings.
/// Timings are informational only.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub top: Vec<RankedEntry>,
    pub books: Vec<BookStats>,
    pub distinct_words: usize,
    pub total_words: u64,
    pub fetch_seconds: f64,
    pub process_seconds: f64,
}

/// A downloaded book waiting for processing. Owned exclusively by the worker
/// that picks it up.
struct Document {
    index: usize,
    name: String,
    text: String,
}

/// Drives the fetch, process, and ranking phases over an injected [`Fetcher`].
pub struct WordPipeline {
    fetcher: Arc<dyn Fetcher>,
    start_marker: String,
    end_marker: String,
    max_threads: usize,
    thread_percentage: u8,
}

impl WordPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &BooktallyConfig) -> Self {
        Self {
            fetcher,
            start_marker: config.cleaner.start_marker.clone(),
            end_marker: config.cleaner.end_marker.clone(),
            max_threads: config.parallel.max_threads,
            thread_percentage: config.parallel.thread_percentage,
        }
    }

    /// Run the full pipeline over `sources` and report the `top_n` words.
    pub async fn run(
        &self,
        sources: &[BookSource],
        top_n: usize,
    ) -> Result<PipelineReport, PipelineError> {
        let (documents, fetch_seconds) = self.fetch_all(sources).await?;

        let process_started = Instant::now();
        let global = GlobalFrequency::new();
        let books = self.process_all(documents, &global)?;
        let process_seconds = process_started.elapsed().as_secs_f64();

        let distinct_words = global.distinct_words();
        let total_words = global.total_words();
        let top = global.into_ranked(top_n);
        info!(distinct_words, total_words, "ranking complete");

        Ok(PipelineReport {
            top,
            books,
            distinct_words,
            total_words,
            fetch_seconds,
            process_seconds,
        })
    }

    /// Download every source concurrently.
    ///
    /// Join barrier with join-then-fail semantics: every download runs to
    /// completion before any failure surfaces, and all failures are reported
    /// together.
    async fn fetch_all(
        &self,
        sources: &[BookSource],
    ) -> Result<(Vec<Document>, f64), PipelineError> {
        let started = Instant::now();
        info!(books = sources.len(), "downloading");

        let mut tasks: JoinSet<(usize, Result<String, FetchError>)> = JoinSet::new();
        for (index, source) in sources.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let url = source.url.clone();
            tasks.spawn(async move { (index, fetcher.fetch(&url).await) });
        }

        let mut fetched: Vec<(usize, String)> = Vec::with_capacity(sources.len());
        let mut failures: Vec<FetchFailure> = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(text))) => {
                    debug!(book = %sources[index].name, bytes = text.len(), "downloaded");
                    fetched.push((index, text));
                }
                Ok((index, Err(err))) => {
                    failures.push(FetchFailure {
                        name: sources[index].name.clone(),
                        url: sources[index].url.clone(),
                        message: err.to_string(),
                    });
                }
                Err(join_err) => {
                    failures.push(FetchFailure {
                        name: "download task".to_string(),
                        url: String::new(),
                        message: join_err.to_string(),
                    });
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_unstable_by(|a, b| a.name.cmp(&b.name));
            return Err(PipelineError::Fetch {
                failures,
                total: sources.len(),
            });
        }

        fetched.sort_unstable_by_key(|(index, _)| *index);
        let documents = fetched
            .into_iter()
            .map(|(index, text)| Document {
                index,
                name: sources[index].name.clone(),
                text,
            })
            .collect();

        Ok((documents, started.elapsed().as_secs_f64()))
    }

    /// Clean, count, and merge every document on a scoped worker pool.
    ///
    /// The scope exit is the join barrier: no merge can still be in flight
    /// once this returns.
    fn process_all(
        &self,
        documents: Vec<Document>,
        global: &GlobalFrequency,
    ) -> Result<Vec<BookStats>, PipelineError> {
        let document_count = documents.len();
        let workers = self.optimal_workers(document_count);
        info!(documents = document_count, workers, "processing");

        let mut book_stats = crossbeam::thread::scope(|s| {
            let (work_tx, work_rx) = bounded::<Document>(workers * 2);
            let (stats_tx, stats_rx) = bounded::<(usize, BookStats)>(document_count.max(1));
            let start_marker = self.start_marker.as_str();
            let end_marker = self.end_marker.as_str();

            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let stats_tx = stats_tx.clone();

                s.spawn(move |_| {
                    while let Ok(document) = work_rx.recv() {
                        let cleaned = cleaner::strip(&document.text, start_marker, end_marker);
                        let local = counter::count(cleaned);
                        let stats = BookStats {
                            name: document.name,
                            total_words: local.values().sum(),
                            distinct_words: local.len(),
                        };
                        debug!(
                            book = %stats.name,
                            total_words = stats.total_words,
                            "counted"
                        );

                        global.merge(local);

                        if stats_tx.send((document.index, stats)).is_err() {
                            break; // Receiver dropped
                        }
                    }
                });
            }

            // Drop the main-thread handles so the channels close once the
            // producer and all workers are done.
            drop(work_rx);
            drop(stats_tx);

            for document in documents {
                if work_tx.send(document).is_err() {
                    break; // Workers dropped
                }
            }
            drop(work_tx);

            stats_rx.iter().collect::<Vec<(usize, BookStats)>>()
        })
        .map_err(|_| PipelineError::Processing)?;

        book_stats.sort_unstable_by_key(|(index, _)| *index);
        Ok(book_stats.into_iter().map(|(_, stats)| stats).collect())
    }

    /// Worker count bounded by configuration, CPU cores, and workload size.
    fn optimal_workers(&self, document_count: usize) -> usize {
        let cpu_cores = num_cpus::get();

        let max_by_percentage =
            std::cmp::max(1, (cpu_cores * self.thread_percentage as usize) / 100);

        let max_workers = if self.max_threads > 0 {
            std::cmp::min(self.max_threads, max_by_percentage)
        } else {
            max_by_percentage
        };

        std::cmp::min(max_workers, document_count.max(1))
    }
}
