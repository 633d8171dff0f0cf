//! `paperlens list` - filtered, paginated paper table

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Table;
use serde::Serialize;

use paperlens_core::{Algorithm, Page, Paper, SortOrder, Specialty};

use super::{FilterArgs, fmt_num, join_labels, load_dashboard, new_table, truncate};
use crate::config::Config;

/// Title column width in characters
const TITLE_WIDTH: usize = 60;
/// Countries shown per row before eliding
const COUNTRY_LIMIT: usize = 3;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page number (1-based; out-of-range pages are clamped)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: view.page_size from config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Sort order: year-desc or year-asc
    #[arg(long)]
    pub sort: Option<String>,

    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListJson<'a> {
    page: usize,
    total_pages: usize,
    total: usize,
    rows: Vec<RowJson<'a>>,
}

#[derive(Serialize)]
struct RowJson<'a> {
    pmid: &'a str,
    year: i32,
    title: &'a str,
    journal: &'a str,
    algorithms: Vec<Algorithm>,
    specialties: Vec<Specialty>,
    countries: &'a [String],
}

pub fn run(args: ListArgs, data: &Path, config: &Config) -> Result<()> {
    let mut options = config.view.options()?;
    if let Some(size) = args.page_size {
        options.page_size = size;
    }
    if let Some(sort) = &args.sort {
        options.sort =
            SortOrder::from_name(sort).with_context(|| format!("Unknown sort order: {sort}"))?;
    }

    let mut dashboard = load_dashboard(data, options)?;
    dashboard.replace_query(args.filter.to_query()?);
    dashboard.set_page(args.page);
    let page = dashboard.table();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page_json(page))?);
        return Ok(());
    }

    if page.is_empty() {
        println!("No papers match the current filters.");
        return Ok(());
    }

    println!("\n{}", page_table(page));
    println!(
        "Showing {}-{} of {} (page {}/{})",
        fmt_num(page.first),
        fmt_num(page.last),
        fmt_num(page.total),
        page.page,
        page.total_pages
    );
    Ok(())
}

fn page_json(page: &Page<Arc<Paper>>) -> ListJson<'_> {
    ListJson {
        page: page.page,
        total_pages: page.total_pages,
        total: page.total,
        rows: page
            .rows
            .iter()
            .map(|row| RowJson {
                pmid: &row.paper.pmid,
                year: row.paper.year,
                title: &row.paper.title,
                journal: &row.paper.journal,
                algorithms: row.algorithm_tags.clone(),
                specialties: row.specialty_tags.clone(),
                countries: &row.paper.affil_countries_unique,
            })
            .collect(),
    }
}

fn page_table(page: &Page<Arc<Paper>>) -> Table {
    let mut table = new_table(&["PMID", "Year", "Title", "Algorithms", "Specialties", "Countries"]);
    for row in &page.rows {
        let paper = &row.paper;
        let year = if paper.has_year() {
            paper.year.to_string()
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            paper.pmid.clone(),
            year,
            truncate(&paper.title, TITLE_WIDTH),
            join_labels(&row.algorithm_tags),
            join_labels(&row.specialty_tags),
            countries_cell(&paper.affil_countries_unique),
        ]);
    }
    table
}

fn countries_cell(countries: &[String]) -> String {
    let mut cell = countries
        .iter()
        .take(COUNTRY_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if countries.len() > COUNTRY_LIMIT {
        cell.push_str(&format!(" +{}", countries.len() - COUNTRY_LIMIT));
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperlens_core::{ViewOptions, project};

    fn papers() -> Vec<Arc<Paper>> {
        (0..5)
            .map(|i| {
                Arc::new(
                    Paper {
                        pmid: format!("{i}"),
                        year: 2016 + i,
                        title: "t".repeat(80),
                        algo_deep_learning: i % 2 == 0,
                        spec_onc: true,
                        ..Default::default()
                    }
                    .with_countries("A, B, C, D, E"),
                )
            })
            .collect()
    }

    #[test]
    fn countries_elided() {
        let countries: Vec<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
        assert_eq!(countries_cell(&countries), "A, B");
        let countries: Vec<String> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(countries_cell(&countries), "A, B, C +2");
    }

    #[test]
    fn table_rows_match_page() {
        let page = project(&papers(), 1, &ViewOptions::default());
        let table = page_table(&page);
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn json_rows_carry_display_tags() {
        let page = project(&papers(), 1, &ViewOptions::default());
        let json = serde_json::to_value(page_json(&page)).unwrap();
        assert_eq!(json["total"], 5);
        assert_eq!(json["rows"][0]["pmid"], "4");
        assert_eq!(json["rows"][0]["algorithms"], serde_json::json!(["deep_learning"]));
        assert_eq!(json["rows"][0]["specialties"], serde_json::json!(["onc"]));
        assert_eq!(json["rows"][1]["algorithms"], serde_json::json!([]));
    }
}
