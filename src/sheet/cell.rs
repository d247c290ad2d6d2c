//! Cell value conversion

use calamine::Data;
use regex::Regex;

/// Trimmed text of a cell, `None` when blank
pub fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Release year; only non-negative whole numbers count
pub fn cell_year(cell: &Data) -> Option<i32> {
    lazy_static::lazy_static! {
        static ref DIGITS: Regex = Regex::new(r"^\d+$").unwrap();
    }

    match cell {
        Data::Int(i) if *i >= 0 => i32::try_from(*i).ok(),
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 => i32::try_from(*f as i64).ok(),
        Data::String(s) => {
            let s = s.trim();
            if DIGITS.is_match(s) {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Rating as a number; accepts "8,5" as well as "8.5", anything else is 0
pub fn cell_rating(cell: &Data) -> f64 {
    lazy_static::lazy_static! {
        static ref DECIMAL: Regex = Regex::new(r"^\d+([.,]\d+)?$").unwrap();
    }

    match cell {
        Data::Int(i) => *i as f64,
        Data::Float(f) => *f,
        Data::String(s) => {
            let s = s.trim();
            if DECIMAL.is_match(s) {
                s.replace(',', ".").parse().unwrap_or(0.0)
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}
