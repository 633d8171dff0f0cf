//! Aggregation over a paper subset.
//!
//! Every map in [`Statistics`] is a `BTreeMap`, so two runs over the same
//! input produce identical output regardless of hash seeds. Tag maps only
//! hold non-zero counts.
//!
//! Ranked views sort by count descending and break ties by key ascending
//! (tag key or country name).

use std::borrow::Borrow;
use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::model::Paper;
use crate::tags::{Algorithm, Feature, Specialty, SubSpecialty, Tag};

/// Summary statistics over a paper subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_papers: usize,
    /// Distinct normalized countries across all papers
    pub total_countries: usize,
    pub top_algorithms: BTreeMap<Algorithm, usize>,
    pub top_features: BTreeMap<Feature, usize>,
    pub top_specialties: BTreeMap<Specialty, usize>,
    pub top_subspecialties: BTreeMap<SubSpecialty, usize>,
    /// Papers per year, ascending
    pub yearly_trend: BTreeMap<i32, usize>,
    /// Papers per country; a paper counts once per distinct country
    pub country_distribution: BTreeMap<String, usize>,
}

/// Compute statistics over `papers`.
pub fn aggregate<P: Borrow<Paper>>(papers: &[P]) -> Statistics {
    let mut stats = Statistics {
        total_papers: papers.len(),
        ..Default::default()
    };

    for paper in papers {
        let paper = Borrow::<Paper>::borrow(paper);
        count_tags(paper, &mut stats.top_algorithms);
        count_tags(paper, &mut stats.top_features);
        count_tags(paper, &mut stats.top_specialties);
        count_tags(paper, &mut stats.top_subspecialties);
        *stats.yearly_trend.entry(paper.year).or_default() += 1;

        // Per-paper dedup, in case a list was built without normalization
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for country in &paper.affil_countries_unique {
            if seen.insert(country.as_str()) {
                *stats
                    .country_distribution
                    .entry(country.clone())
                    .or_default() += 1;
            }
        }
    }

    // Every distinct country has exactly one distribution entry
    stats.total_countries = stats.country_distribution.len();
    stats
}

fn count_tags<T: Tag>(paper: &Paper, counts: &mut BTreeMap<T, usize>) {
    for &tag in T::ALL {
        if tag.is_set(paper) {
            *counts.entry(tag).or_default() += 1;
        }
    }
}

/// Tag counts ranked by count descending, ties by key ascending.
pub fn rank_tags<T: Tag>(counts: &BTreeMap<T, usize>) -> Vec<(T, usize)> {
    let mut ranked: Vec<(T, usize)> = counts.iter().map(|(&t, &n)| (t, n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.key().cmp(b.0.key())));
    ranked
}

/// Country counts ranked by count descending, ties by name ascending.
pub fn rank_countries(counts: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.iter().map(|(c, &n)| (c.clone(), n)).collect();
    // BTreeMap iteration is already name-ascending; stable sort keeps it for ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// First `n` entries of a ranked list.
pub fn top_n<K>(mut ranked: Vec<(K, usize)>, n: usize) -> Vec<(K, usize)> {
    ranked.truncate(n);
    ranked
}

impl Statistics {
    /// Counts for tag family `T`.
    pub fn tag_counts<T: TagCounts>(&self) -> &BTreeMap<T, usize> {
        T::counts(self)
    }

    pub fn ranked<T: TagCounts>(&self) -> Vec<(T, usize)> {
        rank_tags(T::counts(self))
    }

    pub fn ranked_countries(&self) -> Vec<(String, usize)> {
        rank_countries(&self.country_distribution)
    }

    /// KPI line for family `T`: `Deep learning (12), Neural network (8)`,
    /// or `-` when nothing is tagged.
    pub fn headline<T: TagCounts>(&self, n: usize) -> String {
        let top = top_n(self.ranked::<T>(), n);
        if top.is_empty() {
            return "-".to_string();
        }
        top.iter()
            .map(|(tag, count)| format!("{} ({count})", tag.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Maps a tag family to its count table inside [`Statistics`].
pub trait TagCounts: Tag {
    fn counts(stats: &Statistics) -> &BTreeMap<Self, usize>;
}

impl TagCounts for Algorithm {
    fn counts(stats: &Statistics) -> &BTreeMap<Self, usize> {
        &stats.top_algorithms
    }
}

impl TagCounts for Feature {
    fn counts(stats: &Statistics) -> &BTreeMap<Self, usize> {
        &stats.top_features
    }
}

impl TagCounts for Specialty {
    fn counts(stats: &Statistics) -> &BTreeMap<Self, usize> {
        &stats.top_specialties
    }
}

impl TagCounts for SubSpecialty {
    fn counts(stats: &Statistics) -> &BTreeMap<Self, usize> {
        &stats.top_subspecialties
    }
}

/// One selectable filter option with the number of papers carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption<K> {
    pub key: K,
    pub count: usize,
}

/// Filter option lists, each ranked by count.
///
/// Built over the whole dataset, not the filtered subset, so options do
/// not disappear while the user is selecting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub countries: Vec<FacetOption<String>>,
    pub algorithms: Vec<FacetOption<Algorithm>>,
    pub features: Vec<FacetOption<Feature>>,
    pub specialties: Vec<FacetOption<Specialty>>,
    pub subspecialties: Vec<FacetOption<SubSpecialty>>,
}

impl Facets {
    pub fn from_stats(stats: &Statistics) -> Self {
        Self {
            countries: options(stats.ranked_countries()),
            algorithms: options(stats.ranked::<Algorithm>()),
            features: options(stats.ranked::<Feature>()),
            specialties: options(stats.ranked::<Specialty>()),
            subspecialties: options(stats.ranked::<SubSpecialty>()),
        }
    }

    pub fn build<P: Borrow<Paper>>(papers: &[P]) -> Self {
        Self::from_stats(&aggregate(papers))
    }
}

fn options<K>(ranked: Vec<(K, usize)>) -> Vec<FacetOption<K>> {
    ranked
        .into_iter()
        .map(|(key, count)| FacetOption { key, count })
        .collect()
}
