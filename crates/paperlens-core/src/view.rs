//! View-row projection: sorting, pagination and display tags for the
//! paper table.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::model::Paper;
use crate::tags::{Algorithm, Specialty, Tag};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_TAG_LIMIT: usize = 2;

/// Table sort order. Both orders are stable: equal years keep their
/// relative order from the filtered subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    YearDesc,
    YearAsc,
}

impl SortOrder {
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "year-desc" | "newest" => Some(Self::YearDesc),
            "year-asc" | "oldest" => Some(Self::YearAsc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub page_size: usize,
    /// Maximum tags shown per family on a row
    pub tag_limit: usize,
    pub sort: SortOrder,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            tag_limit: DEFAULT_TAG_LIMIT,
            sort: SortOrder::default(),
        }
    }
}

/// One table row: the paper plus the tags shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<P> {
    pub paper: P,
    pub algorithm_tags: Vec<Algorithm>,
    pub specialty_tags: Vec<Specialty>,
}

/// One page of table rows with pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<P> {
    pub rows: Vec<ViewRow<P>>,
    /// 1-based page actually served (after clamping)
    pub page: usize,
    pub total_pages: usize,
    /// Papers in the filtered subset
    pub total: usize,
    /// 1-based position of the first row, 0 when empty
    pub first: usize,
    /// 1-based position of the last row, 0 when empty
    pub last: usize,
}

impl<P> Page<P> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<P> Default for Page<P> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page: 1,
            total_pages: 0,
            total: 0,
            first: 0,
            last: 0,
        }
    }
}

/// Number of pages for `count` items; 0 for an empty subset.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Tags set on `paper`, in `priority` order, at most `limit` of them.
///
/// Display only: a paper with more tags is still listed, only the shown
/// tags are truncated.
pub fn display_tags<T: Tag>(paper: &Paper, priority: &[T], limit: usize) -> Vec<T> {
    priority
        .iter()
        .copied()
        .filter(|tag| tag.is_set(paper))
        .take(limit)
        .collect()
}

/// Sort `subset`, slice out `page`, and derive display tags per row.
pub fn project<P>(subset: &[P], page: usize, options: &ViewOptions) -> Page<P>
where
    P: Borrow<Paper> + Clone,
{
    let page_size = options.page_size.max(1);
    let total = subset.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);

    let mut order: Vec<&P> = subset.iter().collect();
    // slice::sort_by is stable
    match options.sort {
        SortOrder::YearDesc => order.sort_by(|a, b| year_of(b).cmp(&year_of(a))),
        SortOrder::YearAsc => order.sort_by(|a, b| year_of(a).cmp(&year_of(b))),
    }

    let start = (page - 1) * page_size;
    let rows: Vec<ViewRow<P>> = order
        .into_iter()
        .skip(start)
        .take(page_size)
        .map(|p| {
            let paper = Borrow::<Paper>::borrow(p);
            ViewRow {
                algorithm_tags: display_tags(
                    paper,
                    &Algorithm::DISPLAY_PRIORITY,
                    options.tag_limit,
                ),
                specialty_tags: display_tags(
                    paper,
                    &Specialty::DISPLAY_PRIORITY,
                    options.tag_limit,
                ),
                paper: p.clone(),
            }
        })
        .collect();

    let (first, last) = if rows.is_empty() {
        (0, 0)
    } else {
        (start + 1, start + rows.len())
    };

    Page {
        rows,
        page,
        total_pages,
        total,
        first,
        last,
    }
}

fn year_of<P: Borrow<Paper>>(p: &&P) -> i32 {
    Borrow::<Paper>::borrow(*p).year
}
