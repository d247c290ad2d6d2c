use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieMatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("TMDB API key is not set. Export TMDB_API_KEY or run `movie-match config --set-tmdb-key YOUR_KEY`")]
    MissingTmdbKey,

    #[error("Supabase credentials are not set. Export SUPABASE_URL and SUPABASE_KEY, or use --dry-run")]
    MissingSupabaseCredentials,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Header row not found in the first {rows} rows of sheet '{sheet}'")]
    HeaderNotFound { sheet: String, rows: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Report export error: {0}")]
    ReportExport(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] movie_match_common::Error),
}

pub type Result<T> = std::result::Result<T, MovieMatchError>;

impl From<rust_xlsxwriter::XlsxError> for MovieMatchError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        MovieMatchError::ReportExport(e.to_string())
    }
}
