//! Loose JSON row → typed `Paper` coercion
//!
//! Spreadsheet exports are loosely typed: PMIDs arrive as numbers, flags
//! as `1`/`0`, `"TRUE"` or real booleans, country lists as strings or
//! arrays. Every cell is coerced; nothing here fails.

use chrono::{Datelike, Days, NaiveDate};
use serde_json::{Map, Value};

use paperlens_core::country::normalize_countries;
use paperlens_core::{Algorithm, Feature, Paper, Specialty, SubSpecialty, Tag};

/// Date formats tried when recovering a year from a date column
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d/%m/%Y"];

/// Largest serial number a spreadsheet date cell can hold (9999-12-31)
const MAX_SHEET_SERIAL: u64 = 2_958_465;

/// Build a `Paper` from one JSON object row.
pub fn paper_from_row(row: &Map<String, Value>) -> Paper {
    let mut paper = Paper {
        pmid: text(row.get("pmid")),
        doi: text(row.get("doi")),
        title: text(row.get("title")),
        abstract_text: text(row.get("abstract")),
        keywords: text(row.get("keywords")),
        article_date: text(row.get("article_date")),
        date: text(row.get("date")),
        year: year(row.get("year")),
        article_type: text(row.get("article_type")),
        lang: text(row.get("lang")),
        journal: text(row.get("journal")),
        journal_short: text(row.get("journal_short")),
        journal_country: text(row.get("journal_country")),
        authors: text(row.get("authors")),
        author_affils: text(row.get("author_affils")),
        affil_first_country: text(row.get("affil_first_country")),
        affil_last_country: text(row.get("affil_last_country")),
        countries_lc: normalize_countries(&country_text(row.get("countries_lc"))),
        ..Default::default()
    };

    if paper.year == 0 {
        paper.year = year_from_date(row.get("article_date"))
            .or_else(|| year_from_date(row.get("date")))
            .unwrap_or(0);
    }

    fill_flags::<Algorithm>(row, &mut paper);
    fill_flags::<Feature>(row, &mut paper);
    fill_flags::<Specialty>(row, &mut paper);
    fill_flags::<SubSpecialty>(row, &mut paper);

    let mut countries = country_text(row.get("affil_countries"));
    if countries.trim().is_empty() {
        countries = country_text(row.get("affil_countries_unique"));
    }
    paper.set_countries(countries);

    paper
}

fn fill_flags<T: Tag>(row: &Map<String, Value>, paper: &mut Paper) {
    for &tag in T::ALL {
        *tag.flag_mut(paper) = flag(row.get(tag.field()));
    }
}

/// Render any scalar as text; null and missing become empty.
pub fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| text(Some(v)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Object(_)) => {
            log::debug!("object value in text column, using empty string");
            String::new()
        }
    }
}

/// Integral floats render without a fractional part (`12345678.0` → `12345678`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

/// Publication year; 0 when absent or unparseable.
pub fn year(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|y| i32::try_from(y).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

/// Parse the integer prefix of `s` (after trimming), like `2020` from `"2020.0"`.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|n| sign * n)
}

/// Recover a year from a date cell: a date string, or a spreadsheet
/// serial day number.
pub fn year_from_date(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::String(s) => year_from_date_str(s),
        Value::Number(n) => {
            let serial = n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f.trunc() as u64))?;
            year_from_serial(serial)
        }
        _ => None,
    }
}

fn year_from_date_str(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.year());
        }
    }
    // Bare year or year followed by free text ("2019 Mar")
    let bytes = s.as_bytes();
    let four_digits = bytes.len() >= 4 && bytes[..4].iter().all(u8::is_ascii_digit);
    let fifth_is_digit = bytes.get(4).is_some_and(u8::is_ascii_digit);
    if four_digits && !fifth_is_digit {
        return s[..4].parse().ok();
    }
    None
}

/// Spreadsheet serial dates count days from 1899-12-30.
fn year_from_serial(serial: u64) -> Option<i32> {
    if serial == 0 || serial > MAX_SHEET_SERIAL {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_days(Days::new(serial))
        .map(|d| d.year())
}

/// Truthiness of a flag cell.
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "n" | "0" => false,
            "true" | "yes" | "y" | "1" => true,
            other => {
                log::debug!("unrecognized flag value '{other}', treating as set");
                true
            }
        },
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

/// Country column as one comma-joined string (arrays are joined).
fn country_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| text(Some(v)))
            .collect::<Vec<_>>()
            .join(","),
        other => text(other),
    }
}
