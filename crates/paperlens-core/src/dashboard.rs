//! Derivation container for the dashboard.
//!
//! Dependency chain:
//! ```text
//! papers ─┐
//!         ├─> filtered ─┬─> statistics
//! query ──┘             └─> table (+ page, view options)
//! papers ───> facets
//! ```
//!
//! Every input change rebuilds the affected values into a fresh
//! [`Derived`] bundle and swaps it in whole, so statistics and table rows
//! always come from the same filter generation.

use std::sync::Arc;

use crate::filter::filter_all;
use crate::model::Paper;
use crate::query::QueryState;
use crate::stats::{Facets, Statistics, aggregate};
use crate::view::{Page, ViewOptions, project};

/// Values derived from (papers, query, page, options).
#[derive(Debug, Clone, Default)]
pub struct Derived {
    /// Incremented on every rebuild
    pub generation: u64,
    pub filtered: Vec<Arc<Paper>>,
    pub statistics: Statistics,
    pub table: Page<Arc<Paper>>,
}

/// Application state: the loaded records, the current query, UI state,
/// and everything derived from them.
#[derive(Debug, Default)]
pub struct Dashboard {
    papers: Vec<Arc<Paper>>,
    query: QueryState,
    page: usize,
    options: ViewOptions,
    facets: Facets,
    derived: Derived,
}

impl Dashboard {
    pub fn new(options: ViewOptions) -> Self {
        let mut dashboard = Self {
            options,
            page: 1,
            ..Default::default()
        };
        dashboard.rebuild();
        dashboard
    }

    /// Build a dashboard over `papers` with neutral query state.
    pub fn with_papers(papers: Vec<Paper>, options: ViewOptions) -> Self {
        let mut dashboard = Self::new(options);
        dashboard.load(papers);
        dashboard
    }

    /// Replace the record collection.
    pub fn load(&mut self, papers: Vec<Paper>) {
        self.papers = papers.into_iter().map(Arc::new).collect();
        self.facets = Facets::build(&self.papers);
        self.page = 1;
        log::debug!(
            "Loaded {} papers ({} countries)",
            self.papers.len(),
            self.facets.countries.len()
        );
        self.rebuild();
    }

    /// Replace the whole query state. Resets the table to page 1.
    ///
    /// Replacing with an equal value keeps the current derived values.
    pub fn replace_query(&mut self, query: QueryState) {
        if query == self.query {
            return;
        }
        self.query = query;
        self.page = 1;
        self.rebuild();
    }

    /// Patch-style wrapper: apply `f` to a copy of the current query and
    /// replace with the result.
    pub fn update_query(&mut self, f: impl FnOnce(&mut QueryState)) {
        let mut next = self.query.clone();
        f(&mut next);
        self.replace_query(next);
    }

    /// Move the table to `page` (clamped). The filtered subset and
    /// statistics are unchanged.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.reproject();
    }

    pub fn set_options(&mut self, options: ViewOptions) {
        if options == self.options {
            return;
        }
        self.options = options;
        self.reproject();
    }

    pub fn papers(&self) -> &[Arc<Paper>] {
        &self.papers
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Filter option lists over the full dataset
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn generation(&self) -> u64 {
        self.derived.generation
    }

    pub fn filtered(&self) -> &[Arc<Paper>] {
        &self.derived.filtered
    }

    pub fn statistics(&self) -> &Statistics {
        &self.derived.statistics
    }

    pub fn table(&self) -> &Page<Arc<Paper>> {
        &self.derived.table
    }

    /// Find a loaded paper by PMID.
    pub fn find(&self, pmid: &str) -> Option<&Arc<Paper>> {
        self.papers.iter().find(|p| p.pmid == pmid)
    }

    /// Full rebuild: filter, aggregate, project.
    fn rebuild(&mut self) {
        let filtered = filter_all(&self.papers, &self.query);
        let statistics = aggregate(&filtered);
        let table = project(&filtered, self.page, &self.options);
        self.page = table.page;
        self.swap(Derived {
            generation: self.derived.generation + 1,
            filtered,
            statistics,
            table,
        });
    }

    /// Table-only rebuild after a page or view option change.
    fn reproject(&mut self) {
        let table = project(&self.derived.filtered, self.page, &self.options);
        self.page = table.page;
        let next = Derived {
            generation: self.derived.generation + 1,
            filtered: std::mem::take(&mut self.derived.filtered),
            statistics: std::mem::take(&mut self.derived.statistics),
            table,
        };
        self.swap(next);
    }

    fn swap(&mut self, next: Derived) {
        log::debug!(
            "Derived generation {}: {} of {} papers, page {}/{}",
            next.generation,
            next.filtered.len(),
            self.papers.len(),
            next.table.page,
            next.table.total_pages
        );
        self.derived = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Algorithm;

    fn papers(n: usize) -> Vec<Paper> {
        (0..n)
            .map(|i| Paper {
                pmid: format!("{i}"),
                year: 2000 + (i % 5) as i32,
                algo_knn: i % 3 == 0,
                ..Default::default()
            })
            .collect()
    }

    fn assert_consistent(d: &Dashboard) {
        let derived = d.derived();
        assert_eq!(derived.statistics, aggregate(&derived.filtered));
        assert_eq!(derived.table.total, derived.filtered.len());
        assert_eq!(derived.filtered, filter_all(d.papers(), d.query()));
    }

    #[test]
    fn empty_dashboard_is_well_defined() {
        let d = Dashboard::new(ViewOptions::default());
        assert!(d.filtered().is_empty());
        assert_eq!(d.statistics(), &Statistics::default());
        assert!(d.table().is_empty());
        assert_eq!(d.table().page, 1);
        assert_eq!(d.generation(), 1);
        assert_consistent(&d);
    }

    #[test]
    fn load_derives_everything() {
        let d = Dashboard::with_papers(papers(45), ViewOptions::default());
        assert_eq!(d.filtered().len(), 45);
        assert_eq!(d.statistics().total_papers, 45);
        assert_eq!(d.table().total_pages, 3);
        assert_eq!(d.table().rows.len(), 20);
        assert_eq!(d.facets().algorithms[0].key, Algorithm::Knn);
        assert_consistent(&d);
    }

    #[test]
    fn replace_query_recomputes_all_views() {
        let mut d = Dashboard::with_papers(papers(45), ViewOptions::default());
        let before = d.generation();
        d.replace_query(QueryState::default().toggle_tag(Algorithm::Knn));
        assert!(d.generation() > before);
        assert_eq!(d.filtered().len(), 15);
        assert_eq!(d.statistics().total_papers, 15);
        assert_eq!(d.table().total, 15);
        assert_consistent(&d);
    }

    #[test]
    fn equal_query_is_noop() {
        let mut d = Dashboard::with_papers(papers(10), ViewOptions::default());
        let generation = d.generation();
        d.replace_query(QueryState::default());
        assert_eq!(d.generation(), generation);
    }

    #[test]
    fn query_change_resets_page() {
        let mut d = Dashboard::with_papers(papers(45), ViewOptions::default());
        d.set_page(3);
        assert_eq!(d.table().page, 3);
        d.update_query(|q| q.selected_year = Some(2001));
        assert_eq!(d.table().page, 1);
        assert_consistent(&d);
    }

    #[test]
    fn set_page_clamps_and_keeps_statistics() {
        let mut d = Dashboard::with_papers(papers(45), ViewOptions::default());
        let stats = d.statistics().clone();
        d.set_page(9);
        assert_eq!(d.table().page, 3);
        assert_eq!(d.table().rows.len(), 5);
        assert_eq!(d.statistics(), &stats);
        assert_consistent(&d);
    }

    #[test]
    fn set_options_reprojects() {
        let mut d = Dashboard::with_papers(papers(45), ViewOptions::default());
        d.set_options(ViewOptions {
            page_size: 10,
            ..Default::default()
        });
        assert_eq!(d.table().total_pages, 5);
        assert_eq!(d.table().rows.len(), 10);
        assert_consistent(&d);
    }

    #[test]
    fn reload_replaces_records() {
        let mut d = Dashboard::with_papers(papers(45), ViewOptions::default());
        d.update_query(|q| q.selected_year = Some(2000));
        d.load(papers(5));
        assert_eq!(d.papers().len(), 5);
        assert_eq!(d.filtered().len(), 1);
        assert_consistent(&d);
    }

    #[test]
    fn find_by_pmid() {
        let d = Dashboard::with_papers(papers(3), ViewOptions::default());
        assert_eq!(d.find("2").map(|p| p.year), Some(2002));
        assert!(d.find("99").is_none());
    }
}
