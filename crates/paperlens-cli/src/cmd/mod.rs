//! Subcommands and the helpers they share

pub mod facets;
pub mod list;
pub mod show;
pub mod summary;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use paperlens_core::{
    Algorithm, Dashboard, Feature, QueryState, Specialty, SubSpecialty, Tag, ViewOptions,
    YearRange,
};

/// Filter flags shared by `summary` and `list`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text search over title, abstract, keywords and authors
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact publication year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// First year of an inclusive year range
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year of an inclusive year range
    #[arg(long)]
    pub to: Option<i32>,

    /// Affiliation country (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub country: Vec<String>,

    /// Algorithm key, e.g. deep_learning (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub algorithm: Vec<String>,

    /// Feature key, e.g. ct
    #[arg(long, value_delimiter = ',')]
    pub feature: Vec<String>,

    /// Specialty key, e.g. onc
    #[arg(long, value_delimiter = ',')]
    pub specialty: Vec<String>,

    /// Subspecialty key, e.g. icu
    #[arg(long, value_delimiter = ',')]
    pub subspecialty: Vec<String>,
}

impl FilterArgs {
    /// Build the query these flags describe.
    pub fn to_query(&self) -> Result<QueryState> {
        let mut query = QueryState {
            search_query: self.search.clone().unwrap_or_default(),
            selected_year: self.year,
            year_range: match (self.from, self.to) {
                (None, None) => None,
                (from, to) => Some(YearRange::new(
                    from.unwrap_or(i32::MIN),
                    to.unwrap_or(i32::MAX),
                )),
            },
            ..Default::default()
        };

        for country in &self.country {
            let country = country.trim();
            if !country.is_empty() {
                query.selection.countries.insert(country.to_string());
            }
        }
        select_tags::<Algorithm>(&mut query, &self.algorithm)?;
        select_tags::<Feature>(&mut query, &self.feature)?;
        select_tags::<Specialty>(&mut query, &self.specialty)?;
        select_tags::<SubSpecialty>(&mut query, &self.subspecialty)?;

        Ok(query)
    }
}

fn select_tags<T: Tag>(query: &mut QueryState, keys: &[String]) -> Result<()> {
    for key in keys {
        let tag = parse_tag::<T>(key)?;
        T::selected_mut(&mut query.selection).insert(tag);
    }
    Ok(())
}

/// Parse a tag key of family `T`, listing the valid keys on failure.
pub fn parse_tag<T: Tag>(key: &str) -> Result<T> {
    let key = key.trim().to_ascii_lowercase();
    T::from_key(&key).with_context(|| {
        let valid: Vec<&str> = T::ALL.iter().map(|t| t.key()).collect();
        format!(
            "Unknown {} '{key}' (valid: {})",
            T::FAMILY.prefix(),
            valid.join(", ")
        )
    })
}

/// Load the dataset and build a dashboard over it.
pub fn load_dashboard(data: &Path, options: ViewOptions) -> Result<Dashboard> {
    let report = paperlens_ingest::load_papers(data)
        .with_context(|| format!("Failed to load dataset: {}", data.display()))?;
    if report.is_empty() {
        log::warn!("Dataset {} contains no papers", data.display());
    }
    Ok(Dashboard::with_papers(report.papers, options))
}

/// Table with the standard preset and cyan headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    table
}

/// Format number with thousands separators.
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Calculate percentage safely.
pub fn pct(part: usize, total: usize) -> f64 {
    if total > 0 {
        part as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Cut `s` to at most `max` chars, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn join_labels<T: Tag>(tags: &[T]) -> String {
    tags.iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}
