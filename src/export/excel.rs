//! Excel run report

use crate::error::Result;
use crate::migrate::{MigrationReport, WriteStatus};
use movie_match_common::MatchResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

const HEADERS: &[(&str, f64)] = &[
    ("Row", 6.0),
    ("Title", 36.0),
    ("Original title", 36.0),
    ("Year", 8.0),
    ("Director", 24.0),
    ("Status", 10.0),
    ("TMDB ID", 10.0),
    ("TMDB title", 36.0),
    ("Basis", 10.0),
    ("Write", 30.0),
];

pub fn generate_excel(report: &MigrationReport, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Matches")?;

    let header_format = Format::new().set_bold();
    for (col, (label, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *label, &header_format)?;
        sheet.set_column_width(col, *width)?;
    }

    for (i, entry) in report.entries.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, entry.row_number as f64)?;
        sheet.write_string(row, 1, entry.title.as_str())?;
        if let Some(original) = &entry.original_title {
            sheet.write_string(row, 2, original.as_str())?;
        }
        if let Some(year) = entry.year {
            sheet.write_number(row, 3, year as f64)?;
        }
        if let Some(director) = &entry.director {
            sheet.write_string(row, 4, director.as_str())?;
        }

        match &entry.outcome {
            MatchResult::Matched { candidate_id, candidate_title, basis } => {
                sheet.write_string(row, 5, "matched")?;
                sheet.write_number(row, 6, *candidate_id as f64)?;
                sheet.write_string(row, 7, candidate_title.as_str())?;
                sheet.write_string(row, 8, basis.to_string())?;
            }
            MatchResult::Unmatched => {
                sheet.write_string(row, 5, "unmatched")?;
            }
        }

        let write = match &entry.write {
            WriteStatus::Saved => "saved".to_string(),
            WriteStatus::Skipped => String::new(),
            WriteStatus::DryRun => "dry run".to_string(),
            WriteStatus::Failed { error } => format!("failed: {}", error),
        };
        sheet.write_string(row, 9, write)?;
    }

    workbook.save(output_path)?;
    Ok(())
}
