use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use dotenv::dotenv;
use movie_match::cli::{Cli, Commands};
use movie_match::config::Config;
use movie_match::export::{self, ReportFormat};
use movie_match::migrate::{self, MigrationOptions, MigrationReport};
use movie_match::sheet::{self, ReviewEntry};
use movie_match::sink::{DryRunSink, RecordSink, SupabaseSink};
use movie_match::tmdb::TmdbClient;
use movie_match_common::{MatchResolver, MatchResult, MovieRecord};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter override, e.g. `MOVIE_MATCH_LOG=movie_match_common=debug`
const LOG_FILTER_ENV: &str = "MOVIE_MATCH_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_FILTER_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Migrate { file, sheet, dry_run, strict, yes, report: report_path, report_format } => {
            println!("--- movie-match migrate{} ---\n", if dry_run { " (dry run)" } else { "" });

            let data = sheet::read_reviews(&file, sheet.as_deref(), &config.sheet_hints)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!(
                "Sheet '{}': header on row {}, {} entries",
                data.sheet_name,
                data.header_row,
                data.entries.len()
            );
            if data.entries.is_empty() {
                println!("Nothing to migrate.");
                return Ok(());
            }

            let tmdb = TmdbClient::from_config(&config)?;
            let resolver = MatchResolver::new(tmdb, config.match_policy(strict));
            let options = MigrationOptions { dry_run, show_progress: true };

            let report = if dry_run {
                run_migration(&data.entries, &resolver, &DryRunSink, &options).await
            } else {
                let sink = SupabaseSink::from_config(&config)?;
                if !yes && !confirm_write(data.entries.len(), sink.endpoint())? {
                    bail!("Migration cancelled");
                }
                run_migration(&data.entries, &resolver, &sink, &options).await
            };

            println!(
                "\n--- done: {} matched, {} not found, {} saved, {} write failures ---",
                report.matched_count(),
                report.unmatched_count(),
                report.saved_count(),
                report.write_failures()
            );

            if let Some(path) = report_path {
                write_report(&report, report_format, &path)?;
            }
        }

        Commands::Resolve { title, original_title, year, director, strict } => {
            let mut record = MovieRecord::new(title);
            record.title_original = original_title;
            record.year = year;
            record.director = director;

            let tmdb = TmdbClient::from_config(&config)?;
            let resolver = MatchResolver::new(tmdb, config.match_policy(strict));

            match resolver.resolve_record(&record).await {
                MatchResult::Matched { candidate_id, candidate_title, basis } => {
                    println!("[OK] {} (ID: {}, matched by {})", candidate_title, candidate_id, basis);
                }
                MatchResult::Unmatched => println!("[X] not found"),
            }
        }

        Commands::Inspect { file, sheet } => {
            let data = sheet::read_reviews(&file, sheet.as_deref(), &config.sheet_hints)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            println!("Sheet:      {}", data.sheet_name);
            println!("Header row: {}", data.header_row);
            println!("Columns:    {:?}", data.columns);
            println!("Entries:    {}\n", data.entries.len());
            for entry in &data.entries {
                print_entry(entry);
            }
        }

        Commands::Config { set_tmdb_key, show } => {
            let mut config = config;

            if let Some(key) = set_tmdb_key {
                config.set_tmdb_api_key(key)?;
                println!("TMDB API key saved to {}", Config::config_path()?.display());
            }

            if show {
                println!("Config:");
                println!("  TMDB API key:   {}", if config.tmdb_api_key.is_some() { "set" } else { "not set" });
                println!("  TMDB base URL:  {}", config.tmdb_base_url);
                println!("  Language:       {}", config.language);
                println!("  Supabase URL:   {}", config.supabase_url.as_deref().unwrap_or("not set"));
                println!("  Supabase key:   {}", if config.supabase_key.is_some() { "set" } else { "not set" });
                println!("  Supabase table: {}", config.supabase_table);
                println!("  Sheet hints:    {}", config.sheet_hints.join(", "));
                println!("  Policy:         {:?}", config.policy);
            }
        }
    }

    Ok(())
}

async fn run_migration<S: RecordSink>(
    entries: &[ReviewEntry],
    resolver: &MatchResolver<TmdbClient>,
    sink: &S,
    options: &MigrationOptions,
) -> MigrationReport {
    info!(entries = entries.len(), "resolving entries");
    migrate::migrate(entries, resolver, sink, options).await
}

fn confirm_write(count: usize, endpoint: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!("Resolve {} entries and write matches to {}?", count, endpoint))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn write_report(report: &MigrationReport, format: ReportFormat, path: &Path) -> Result<()> {
    let written: Vec<PathBuf> = export::export_report(report, format, path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    for file in written {
        println!("Report: {}", file.display());
    }
    Ok(())
}

fn print_entry(entry: &ReviewEntry) {
    let record = &entry.record;
    println!(
        "  row {:>4}: {} | original: {} | year: {} | director: {} | rating: {} | {}",
        entry.row_number,
        record.title_primary,
        record.title_original.as_deref().unwrap_or("-"),
        record.year.map(|y| y.to_string()).unwrap_or_else(|| "?".into()),
        record.director.as_deref().unwrap_or("-"),
        entry.rating,
        entry.recommendation
    );
}
