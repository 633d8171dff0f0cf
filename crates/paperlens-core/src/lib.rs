//! Paperlens Core - filtering, aggregation and table projection for a
//! dashboard over a fixed set of tagged paper records.
//!
//! Everything here is pure and synchronous: the record collection is
//! loaded once, the query state is replaced as a whole value, and the
//! filtered subset, statistics and table page are re-derived from them.

pub mod country;
pub mod dashboard;
pub mod filter;
pub mod logging;
pub mod model;
pub mod query;
pub mod stats;
pub mod tags;
pub mod view;

// Re-exports for convenience
pub use country::normalize_countries;
pub use dashboard::{Dashboard, Derived};
pub use filter::{CompiledQuery, filter_all, filter_papers, includes};
pub use logging::init_logging;
pub use model::Paper;
pub use query::{BulkFilter, QueryState, Selection, YearRange};
pub use stats::{FacetOption, Facets, Statistics, TagCounts, aggregate, rank_countries, rank_tags};
pub use tags::{Algorithm, Family, Feature, Specialty, SubSpecialty, Tag};
pub use view::{Page, SortOrder, ViewOptions, ViewRow, project};
