use crate::export::ReportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movie-match")]
#[command(about = "Match a curated movie review spreadsheet against TMDB and migrate it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log progress details (info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every spreadsheet row and write matched reviews
    Migrate {
        /// Review spreadsheet (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Sheet name (default: first sheet matching the configured hints)
        #[arg(long)]
        sheet: Option<String>,

        /// Resolve only, write nothing
        #[arg(long)]
        dry_run: bool,

        /// Reject unparseable dates and never fall back to the top candidate
        #[arg(long)]
        strict: bool,

        /// Do not ask for confirmation before writing
        #[arg(short, long)]
        yes: bool,

        /// Run report path (extension is set from the format)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Run report format (json/excel/both)
        #[arg(long, default_value = "json")]
        report_format: ReportFormat,
    },

    /// Resolve a single title
    Resolve {
        /// Localized title
        #[arg(short, long)]
        title: String,

        /// Original-language title (tried first)
        #[arg(short, long)]
        original_title: Option<String>,

        /// Release year
        #[arg(short, long)]
        year: Option<i32>,

        /// Director name (full or partial)
        #[arg(short, long)]
        director: Option<String>,

        /// Reject unparseable dates and never fall back to the top candidate
        #[arg(long)]
        strict: bool,
    },

    /// Show how a spreadsheet is read, without network calls
    Inspect {
        /// Review spreadsheet (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Sheet name
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Show or edit the configuration
    Config {
        /// Store the TMDB API key
        #[arg(long)]
        set_tmdb_key: Option<String>,

        /// Print the configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_migrate() {
        let cli = Cli::try_parse_from([
            "movie-match", "migrate", "filmes.xlsx", "--dry-run", "--report", "out", "--report-format", "both",
        ])
        .unwrap();
        match cli.command {
            Commands::Migrate { file, dry_run, strict, report, report_format, .. } => {
                assert_eq!(file, PathBuf::from("filmes.xlsx"));
                assert!(dry_run);
                assert!(!strict);
                assert_eq!(report, Some(PathBuf::from("out")));
                assert_eq!(report_format, ReportFormat::Both);
            }
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "movie-match", "-v", "resolve", "--title", "Nosferatu", "--year", "2024", "--director", "Eggers",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Resolve { title, year, director, original_title, .. } => {
                assert_eq!(title, "Nosferatu");
                assert_eq!(year, Some(2024));
                assert_eq!(director.as_deref(), Some("Eggers"));
                assert_eq!(original_title, None);
            }
            _ => panic!("expected resolve"),
        }
    }
}
