//! Query state: the user-controlled filter and search parameters
//!
//! `QueryState` is a plain value. Every change produces a whole new value
//! (the helpers below take `&self` and return `Self`), and the dashboard
//! swaps it in with a single replace.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::tags::{Algorithm, Feature, Specialty, SubSpecialty, Tag};

/// Inclusive year range used by the bulk filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Bounds may be given in either order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Selected keys per category. OR within a set, AND across sets; an empty
/// set does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    pub algorithms: BTreeSet<Algorithm>,
    pub features: BTreeSet<Feature>,
    pub specialties: BTreeSet<Specialty>,
    pub subspecialties: BTreeSet<SubSpecialty>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.algorithms.is_empty()
            && self.features.is_empty()
            && self.specialties.is_empty()
            && self.subspecialties.is_empty()
    }
}

/// Full search/filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    /// Free-text search; trimmed and case-folded before matching
    pub search_query: String,
    /// Exact-year filter (click-to-filter)
    pub selected_year: Option<i32>,
    /// Inclusive year range, applied together with `selected_year`
    pub year_range: Option<YearRange>,
    pub selection: Selection,
}

impl QueryState {
    /// No search text and no filters.
    pub fn is_neutral(&self) -> bool {
        self.search_query.trim().is_empty()
            && self.selected_year.is_none()
            && self.year_range.is_none()
            && self.selection.is_empty()
    }

    pub fn with_search(&self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            selected_year: year,
            ..self.clone()
        }
    }

    /// Select `year`, or clear the year filter if it is already selected.
    pub fn toggle_year(&self, year: i32) -> Self {
        let next = if self.selected_year == Some(year) {
            None
        } else {
            Some(year)
        };
        self.with_year(next)
    }

    pub fn with_year_range(&self, range: Option<YearRange>) -> Self {
        Self {
            year_range: range,
            ..self.clone()
        }
    }

    pub fn toggle_country(&self, country: &str) -> Self {
        let mut next = self.clone();
        if !next.selection.countries.remove(country) {
            next.selection.countries.insert(country.to_string());
        }
        next
    }

    pub fn toggle_tag<T: Tag>(&self, tag: T) -> Self {
        let mut next = self.clone();
        let set = T::selected_mut(&mut next.selection);
        if !set.remove(&tag) {
            set.insert(tag);
        }
        next
    }

    /// Drop every filter but keep the search text.
    pub fn clear_filters(&self) -> Self {
        Self {
            search_query: self.search_query.clone(),
            ..Self::default()
        }
    }
}

/// Bulk filter entry point: a year range plus category sets.
///
/// Distinct from [`QueryState`]: no free-text search and no exact-year
/// click filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFilter {
    pub year_range: YearRange,
    #[serde(default)]
    pub selection: Selection,
}

impl BulkFilter {
    pub fn new(year_range: YearRange) -> Self {
        Self {
            year_range,
            selection: Selection::default(),
        }
    }
}
