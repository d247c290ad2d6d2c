//! Header row detection and column mapping

use super::cell::cell_text;
use calamine::Data;

/// Rows scanned for the header
pub const HEADER_SCAN_ROWS: usize = 10;

/// Localized title column when no header name matches
pub const DEFAULT_TITLE_COLUMN: usize = 1;

const TITLE_PRIMARY: &[&str] = &["Nome pt-BR", "Nome"];
const TITLE_ORIGINAL: &[&str] = &["Nome original", "Original"];
const DIRECTOR: &[&str] = &["Diretor", "Director"];
const YEAR: &[&str] = &["Ano de lançamento", "Ano"];
const RATING: &[&str] = &["Avaliação 0 -10", "Nota"];
const REVIEW: &[&str] = &["Principais comentários", "Comentários"];
const RECOMMENDATION: &[&str] = &["Recomendamos?", "Recomendação"];

/// Column index of every known field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub title_primary: usize,
    pub title_original: Option<usize>,
    pub director: Option<usize>,
    pub year: Option<usize>,
    pub rating: Option<usize>,
    pub review: Option<usize>,
    pub recommendation: Option<usize>,
}

impl ColumnMap {
    pub fn from_header(header: &[Data]) -> Self {
        let labels: Vec<Option<String>> = header
            .iter()
            .map(|cell| cell_text(cell).map(|s| s.to_lowercase()))
            .collect();

        let find = |options: &[&str]| -> Option<usize> {
            labels.iter().position(|label| {
                label
                    .as_deref()
                    .is_some_and(|l| options.iter().any(|o| o.to_lowercase() == l))
            })
        };

        Self {
            title_primary: find(TITLE_PRIMARY).unwrap_or(DEFAULT_TITLE_COLUMN),
            title_original: find(TITLE_ORIGINAL),
            director: find(DIRECTOR),
            year: find(YEAR),
            rating: find(RATING),
            review: find(REVIEW),
            recommendation: find(RECOMMENDATION),
        }
    }
}

/// Index of the first row that mentions a title ("nome") and a rating
/// ("nota" / "avaliação"), within the first [`HEADER_SCAN_ROWS`] rows.
pub fn find_header_row(rows: &[&[Data]]) -> Option<usize> {
    rows.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let labels: Vec<String> = row
            .iter()
            .filter_map(cell_text)
            .map(|s| s.to_lowercase())
            .collect();
        let has_title = labels.iter().any(|l| l.contains("nome"));
        let has_rating = labels
            .iter()
            .any(|l| l.contains("nota") || l.contains("avaliação"));
        has_title && has_rating
    })
}
