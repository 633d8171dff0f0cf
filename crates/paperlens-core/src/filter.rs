//! Filter predicate engine
//!
//! A paper passes when every active category check passes (AND across
//! categories) and, inside a category, at least one selected key matches
//! (OR within the set). Empty sets and unset options do not constrain.
//! Missing data never errors: blank text does not match a search, an unset
//! flag is `false`, year 0 matches no concrete year.

use std::borrow::Borrow;

use crate::model::Paper;
use crate::query::{BulkFilter, QueryState, Selection, YearRange};
use crate::tags::{Algorithm, Feature, Specialty, SubSpecialty, Tag};

/// A `QueryState` prepared for repeated matching (search text folded once).
#[derive(Debug)]
pub struct CompiledQuery<'q> {
    needle: Option<String>,
    selected_year: Option<i32>,
    year_range: Option<YearRange>,
    selection: &'q Selection,
}

impl<'q> CompiledQuery<'q> {
    pub fn new(query: &'q QueryState) -> Self {
        let trimmed = query.search_query.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
            selected_year: query.selected_year,
            year_range: query.year_range,
            selection: &query.selection,
        }
    }

    pub fn includes(&self, paper: &Paper) -> bool {
        if let Some(needle) = &self.needle {
            if !matches_search(paper, needle) {
                return false;
            }
        }
        if let Some(year) = self.selected_year {
            if paper.year != year {
                return false;
            }
        }
        // Unknown year (0) never satisfies a range, however open its ends
        if let Some(range) = &self.year_range {
            if !paper.has_year() || !range.contains(paper.year) {
                return false;
            }
        }
        matches_selection(paper, self.selection)
    }
}

/// Whether `paper` passes `query`.
pub fn includes(paper: &Paper, query: &QueryState) -> bool {
    CompiledQuery::new(query).includes(paper)
}

/// Keep the papers that pass `query`, preserving input order.
pub fn filter_all<P>(papers: &[P], query: &QueryState) -> Vec<P>
where
    P: Borrow<Paper> + Clone,
{
    let compiled = CompiledQuery::new(query);
    papers
        .iter()
        .filter(|p| compiled.includes(Borrow::<Paper>::borrow(*p)))
        .cloned()
        .collect()
}

/// Bulk-filter entry point: inclusive year range plus category sets.
pub fn filter_papers<P>(papers: &[P], filter: &BulkFilter) -> Vec<P>
where
    P: Borrow<Paper> + Clone,
{
    papers
        .iter()
        .filter(|p| bulk_includes(Borrow::<Paper>::borrow(*p), filter))
        .cloned()
        .collect()
}

pub fn bulk_includes(paper: &Paper, filter: &BulkFilter) -> bool {
    paper.has_year()
        && filter.year_range.contains(paper.year)
        && matches_selection(paper, &filter.selection)
}

/// `needle` must already be trimmed and lowercased.
fn matches_search(paper: &Paper, needle: &str) -> bool {
    paper
        .search_fields()
        .iter()
        .any(|field| !field.is_empty() && field.to_lowercase().contains(needle))
}

fn matches_selection(paper: &Paper, selection: &Selection) -> bool {
    matches_countries(paper, selection)
        && matches_family::<Algorithm>(paper, selection)
        && matches_family::<Feature>(paper, selection)
        && matches_family::<Specialty>(paper, selection)
        && matches_family::<SubSpecialty>(paper, selection)
}

fn matches_countries(paper: &Paper, selection: &Selection) -> bool {
    selection.countries.is_empty()
        || paper
            .affil_countries_unique
            .iter()
            .any(|c| selection.countries.contains(c))
}

fn matches_family<T: Tag>(paper: &Paper, selection: &Selection) -> bool {
    let selected = T::selected(selection);
    selected.is_empty() || selected.iter().any(|tag| tag.is_set(paper))
}
