//! Paperlens Ingest - load the paper dataset from a JSON export.
//!
//! The dataset is a JSON array of loosely typed row objects (one per
//! paper), optionally gzipped. Rows are coerced into `Paper` values;
//! cells never fail to coerce, non-object rows are skipped and counted.

pub mod coerce;
pub mod error;
pub mod loader;

pub use coerce::paper_from_row;
pub use error::LoadError;
pub use loader::{LoadReport, load_papers, parse_papers};
