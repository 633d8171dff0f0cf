//! `paperlens summary` - KPI cards, yearly trend and distributions

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use comfy_table::Table;
use serde::Serialize;

use paperlens_core::{
    Algorithm, Feature, QueryState, Specialty, Statistics, SubSpecialty, TagCounts,
};

use super::{FilterArgs, fmt_num, load_dashboard, new_table, pct};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Entries per KPI headline (default: view.top_n from config)
    #[arg(long)]
    pub top: Option<usize>,

    /// Rows per distribution table
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Print statistics as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    query: &'a QueryState,
    headlines: BTreeMap<&'static str, String>,
    statistics: &'a Statistics,
}

pub fn run(args: SummaryArgs, data: &Path, config: &Config) -> Result<()> {
    let mut dashboard = load_dashboard(data, config.view.options()?)?;
    dashboard.replace_query(args.filter.to_query()?);

    let stats = dashboard.statistics();
    let top = args.top.unwrap_or(config.view.top_n);

    if args.json {
        let headlines = BTreeMap::from([
            ("algorithms", stats.headline::<Algorithm>(top)),
            ("features", stats.headline::<Feature>(top)),
            ("specialties", stats.headline::<Specialty>(top)),
            ("subspecialties", stats.headline::<SubSpecialty>(top)),
        ]);
        let out = SummaryJson {
            query: dashboard.query(),
            headlines,
            statistics: stats,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut kpi = new_table(&["Metric", "Value"]);
    kpi.add_row(vec![
        "Papers".to_string(),
        format!(
            "{} of {}",
            fmt_num(stats.total_papers),
            fmt_num(dashboard.papers().len())
        ),
    ]);
    kpi.add_row(vec!["Countries".to_string(), fmt_num(stats.total_countries)]);
    kpi.add_row(vec!["Top algorithms".to_string(), stats.headline::<Algorithm>(top)]);
    kpi.add_row(vec!["Top features".to_string(), stats.headline::<Feature>(top)]);
    kpi.add_row(vec!["Top specialties".to_string(), stats.headline::<Specialty>(top)]);
    kpi.add_row(vec![
        "Top subspecialties".to_string(),
        stats.headline::<SubSpecialty>(top),
    ]);
    println!("\n{kpi}");

    if stats.total_papers == 0 {
        println!("No papers match the current filters.");
        return Ok(());
    }

    println!("\n{}", trend_table(stats));
    println!("\n{}", family_table::<Algorithm>(stats, args.limit));
    println!("\n{}", family_table::<Feature>(stats, args.limit));
    println!("\n{}", family_table::<Specialty>(stats, args.limit));
    println!("\n{}", family_table::<SubSpecialty>(stats, args.limit));
    println!("\n{}", country_table(stats, args.limit));
    Ok(())
}

fn trend_table(stats: &Statistics) -> Table {
    let mut table = new_table(&["Year", "Papers", "Share"]);
    for (&year, &count) in &stats.yearly_trend {
        let year = if year == 0 {
            "unknown".to_string()
        } else {
            year.to_string()
        };
        table.add_row(vec![
            year,
            fmt_num(count),
            format!("{:.1}%", pct(count, stats.total_papers)),
        ]);
    }
    table
}

fn family_table<T: TagCounts>(stats: &Statistics, limit: usize) -> Table {
    let mut table = new_table(&[T::FAMILY.title(), "Papers", "Share"]);
    for (tag, count) in stats.ranked::<T>().into_iter().take(limit) {
        table.add_row(vec![
            tag.label().to_string(),
            fmt_num(count),
            format!("{:.1}%", pct(count, stats.total_papers)),
        ]);
    }
    table
}

fn country_table(stats: &Statistics, limit: usize) -> Table {
    let mut table = new_table(&["Country", "Papers", "Share"]);
    let ranked = stats.ranked_countries();
    let rest = ranked.len().saturating_sub(limit);
    for (country, count) in ranked.into_iter().take(limit) {
        table.add_row(vec![
            country,
            fmt_num(count),
            format!("{:.1}%", pct(count, stats.total_papers)),
        ]);
    }
    if rest > 0 {
        table.add_row(vec![format!("… {rest} more"), String::new(), String::new()]);
    }
    table
}
