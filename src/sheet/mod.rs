//! Review spreadsheet ingestion
//!
//! ## Flow
//! 1. Pick the sheet (explicit name, then name hints, then the first sheet)
//! 2. Find the header row within the first rows
//! 3. Map columns by header name and turn every titled row into a [`ReviewEntry`]

pub mod cell;
pub mod header;

pub use header::{ColumnMap, HEADER_SCAN_ROWS};

use crate::error::{MovieMatchError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use cell::{cell_rating, cell_text, cell_year};
use movie_match_common::MovieRecord;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Recommendation text for rows that leave it blank
pub const DEFAULT_RECOMMENDATION: &str = "Não avaliado";

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewEntry {
    /// 1-based row number as shown by spreadsheet apps
    pub row_number: usize,
    pub record: MovieRecord,
    pub rating: f64,
    pub review: String,
    pub recommendation: String,
}

/// Parsed sheet with what was detected along the way
#[derive(Debug, Clone)]
pub struct SheetData {
    pub sheet_name: String,
    /// 1-based row number of the header
    pub header_row: usize,
    pub columns: ColumnMap,
    pub entries: Vec<ReviewEntry>,
}

/// Reads every review row of a workbook (.xlsx / .xls / .ods).
pub fn read_reviews(path: &Path, sheet: Option<&str>, hints: &[String]) -> Result<SheetData> {
    if !path.exists() {
        return Err(MovieMatchError::FileNotFound(path.display().to_string()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| MovieMatchError::Spreadsheet(e.to_string()))?;
    let sheet_name = select_sheet(&workbook.sheet_names(), sheet, hints)?;
    info!(sheet = %sheet_name, "reading sheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| MovieMatchError::Spreadsheet(e.to_string()))?;

    parse_range(&sheet_name, &range)
}

/// Chooses the sheet to read.
///
/// An explicit name must exist (case-insensitive). Otherwise the first sheet whose
/// lower-cased name contains a hint wins, and failing that the first sheet.
pub fn select_sheet(names: &[String], requested: Option<&str>, hints: &[String]) -> Result<String> {
    if let Some(requested) = requested {
        return names
            .iter()
            .find(|n| n.as_str() == requested)
            .or_else(|| names.iter().find(|n| n.to_lowercase() == requested.to_lowercase()))
            .cloned()
            .ok_or_else(|| MovieMatchError::SheetNotFound(requested.to_string()));
    }

    let hints: Vec<String> = hints.iter().map(|h| h.to_lowercase()).collect();
    names
        .iter()
        .find(|name| {
            let lower = name.to_lowercase();
            hints.iter().any(|h| !h.is_empty() && lower.contains(h.as_str()))
        })
        .or_else(|| names.first())
        .cloned()
        .ok_or_else(|| MovieMatchError::SheetNotFound("workbook has no sheets".into()))
}

fn parse_range(sheet_name: &str, range: &Range<Data>) -> Result<SheetData> {
    let grid = absolute_rows(range);
    let rows: Vec<&[Data]> = grid.iter().map(Vec::as_slice).collect();

    let header_idx = header::find_header_row(&rows).ok_or_else(|| MovieMatchError::HeaderNotFound {
        sheet: sheet_name.to_string(),
        rows: HEADER_SCAN_ROWS,
    })?;
    let columns = ColumnMap::from_header(rows[header_idx]);
    debug!(?columns, header_row = header_idx + 1, "header detected");

    let entries = parse_rows(&rows[header_idx + 1..], &columns, header_idx + 2);

    Ok(SheetData {
        sheet_name: sheet_name.to_string(),
        header_row: header_idx + 1,
        columns,
        entries,
    })
}

/// Rows of the used range padded back to A1, so indices are sheet positions.
fn absolute_rows(range: &Range<Data>) -> Vec<Vec<Data>> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows = vec![Vec::new(); first_row as usize];
    rows.extend(range.rows().map(|row| {
        let mut cells = vec![Data::Empty; first_col as usize];
        cells.extend_from_slice(row);
        cells
    }));
    rows
}

/// Converts data rows; `first_row_number` is the 1-based number of `rows[0]`.
/// Rows without a localized title are skipped.
pub fn parse_rows(rows: &[&[Data]], columns: &ColumnMap, first_row_number: usize) -> Vec<ReviewEntry> {
    rows.iter()
        .enumerate()
        .filter_map(|(offset, row)| parse_row(row, columns, first_row_number + offset))
        .collect()
}

fn parse_row(row: &[Data], columns: &ColumnMap, row_number: usize) -> Option<ReviewEntry> {
    let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i));

    let title_primary = cell(Some(columns.title_primary)).and_then(cell_text)?;

    let record = MovieRecord {
        title_primary,
        title_original: cell(columns.title_original).and_then(cell_text),
        year: cell(columns.year).and_then(cell_year),
        director: cell(columns.director).and_then(cell_text),
    };

    Some(ReviewEntry {
        row_number,
        record,
        rating: cell(columns.rating).map(cell_rating).unwrap_or(0.0),
        review: cell(columns.review).and_then(cell_text).unwrap_or_default(),
        recommendation: cell(columns.recommendation)
            .and_then(cell_text)
            .unwrap_or_else(|| DEFAULT_RECOMMENDATION.to_string()),
    })
}
