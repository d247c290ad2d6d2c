//! Batch migration
//!
//! Resolves every spreadsheet entry in order and writes matched reviews to the
//! sink. Entries are processed one at a time; a failed write is logged and
//! recorded but never stops the run.

use crate::sheet::ReviewEntry;
use crate::sink::{RecordSink, ReviewPayload};
use indicatif::{ProgressBar, ProgressStyle};
use movie_match_common::{CatalogSource, MatchResolver, MatchResult};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    /// Nothing is written; the caller passes a sink that only logs, and
    /// accepted payloads are recorded as [`WriteStatus::DryRun`]
    pub dry_run: bool,
    pub show_progress: bool,
}

/// Outcome of the write for one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteStatus {
    Saved,
    Failed { error: String },
    /// Unmatched entries are not written
    Skipped,
    /// Matched, but the run did not write
    DryRun,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationEntry {
    pub row_number: usize,
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub outcome: MatchResult,
    pub write: WriteStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub generated_at: String,
    pub dry_run: bool,
    pub entries: Vec<MigrationEntry>,
}

impl MigrationReport {
    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_matched()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.entries.len() - self.matched_count()
    }

    pub fn saved_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.write == WriteStatus::Saved)
            .count()
    }

    pub fn write_failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.write, WriteStatus::Failed { .. }))
            .count()
    }
}

pub async fn migrate<C, S>(
    entries: &[ReviewEntry],
    resolver: &MatchResolver<C>,
    sink: &S,
    options: &MigrationOptions,
) -> MigrationReport
where
    C: CatalogSource,
    S: RecordSink,
{
    let pb = if options.show_progress {
        let pb = ProgressBar::new(entries.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    info!(count = entries.len(), dry_run = options.dry_run, "migration started");

    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let record = &entry.record;
        pb.set_message(record.title_primary.clone());

        let outcome = resolver.resolve_record(record).await;
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "?".into());

        let write = match &outcome {
            MatchResult::Matched { candidate_id, candidate_title, basis } => {
                pb.suspend(|| {
                    println!(
                        "> {} ({}) -> [OK] {} (ID: {}, {})",
                        record.title_primary, year, candidate_title, candidate_id, basis
                    )
                });
                let payload = ReviewPayload {
                    tmdb_id: *candidate_id,
                    rating: entry.rating,
                    review: entry.review.clone(),
                    recommended: entry.recommendation.clone(),
                };
                match sink.save(&payload).await {
                    Ok(()) if options.dry_run => WriteStatus::DryRun,
                    Ok(()) => WriteStatus::Saved,
                    Err(e) => {
                        warn!(row = entry.row_number, tmdb_id = *candidate_id, error = %e, "write failed");
                        WriteStatus::Failed { error: e.to_string() }
                    }
                }
            }
            MatchResult::Unmatched => {
                pb.suspend(|| {
                    println!(
                        "> {} ({}) -> [X] not found (director/year did not match)",
                        record.title_primary, year
                    )
                });
                WriteStatus::Skipped
            }
        };

        results.push(MigrationEntry {
            row_number: entry.row_number,
            title: record.title_primary.clone(),
            original_title: record.title_original.clone(),
            year: record.year,
            director: record.director.clone(),
            outcome,
            write,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = MigrationReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        dry_run: options.dry_run,
        entries: results,
    };
    info!(
        matched = report.matched_count(),
        unmatched = report.unmatched_count(),
        write_failures = report.write_failures(),
        "migration finished"
    );
    report
}
