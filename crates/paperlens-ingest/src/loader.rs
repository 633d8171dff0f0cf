//! Read the dataset file (plain or gzipped JSON) into papers

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde_json::Value;

use paperlens_core::Paper;

use crate::coerce::paper_from_row;
use crate::error::LoadError;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of a load: the coerced papers plus how many rows were dropped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub papers: Vec<Paper>,
    /// Array elements that were not JSON objects
    pub skipped: usize,
}

impl LoadReport {
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// Load the dataset at `path`.
///
/// Gzip input is detected by magic bytes, so `papers.json.gz` and a
/// gzipped file without the suffix both work.
pub fn load_papers(path: &Path) -> Result<LoadReport, LoadError> {
    let raw = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
    log::debug!("read {} bytes from {}", raw.len(), path.display());

    let bytes = if is_gzip(&raw) {
        let mut out = Vec::with_capacity(raw.len() * 4);
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut out)
            .map_err(|e| LoadError::io(path, e))?;
        log::debug!("gunzipped to {} bytes", out.len());
        out
    } else {
        raw
    };

    let report = parse_papers(&bytes)?;
    log::info!("Loaded {} papers from {}", report.len(), path.display());
    Ok(report)
}

/// Parse an in-memory JSON array of row objects.
pub fn parse_papers(bytes: &[u8]) -> Result<LoadReport, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let rows = match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(rows) => rows,
        other => {
            return Err(LoadError::NotAnArray {
                found: kind_name(&other),
            });
        }
    };

    let mut report = LoadReport {
        papers: Vec::with_capacity(rows.len()),
        skipped: 0,
    };
    for (i, row) in rows.iter().enumerate() {
        match row {
            Value::Object(map) => report.papers.push(paper_from_row(map)),
            other => {
                log::warn!("row {i}: expected an object, found {}", kind_name(other));
                report.skipped += 1;
            }
        }
    }
    if report.skipped > 0 {
        log::warn!("Skipped {} malformed rows", report.skipped);
    }
    Ok(report)
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
