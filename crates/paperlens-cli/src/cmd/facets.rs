//! `paperlens facets` - filter option lists with counts over the whole dataset

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Table;

use paperlens_core::{FacetOption, Facets, Family, Tag};

use super::{fmt_num, load_dashboard, new_table};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Only this list: country, algorithm, feature, specialty or subspecialty
    #[arg(long)]
    pub only: Option<String>,

    /// Print the option lists as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which option list to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Which {
    Countries,
    Family(Family),
}

impl Which {
    fn from_name(s: &str) -> Option<Self> {
        match s {
            "country" | "countries" => Some(Self::Countries),
            other => Family::from_name(other).map(Self::Family),
        }
    }
}

pub fn run(args: FacetsArgs, data: &Path, config: &Config) -> Result<()> {
    let which = args
        .only
        .as_deref()
        .map(|s| Which::from_name(s).with_context(|| format!("Unknown option list: {s}")))
        .transpose()?;

    let dashboard = load_dashboard(data, config.view.options()?)?;
    let facets = dashboard.facets();

    if args.json {
        println!("{}", serde_json::to_string_pretty(facets)?);
        return Ok(());
    }

    let wanted = |w: Which| which.map_or(true, |only| only == w);
    if wanted(Which::Countries) {
        println!("\n{}", country_table(facets));
    }
    for family in Family::ALL {
        if wanted(Which::Family(family)) {
            println!("\n{}", family_table(facets, family));
        }
    }
    Ok(())
}

fn country_table(facets: &Facets) -> Table {
    let mut table = new_table(&["Country", "Papers"]);
    for option in &facets.countries {
        table.add_row(vec![option.key.clone(), fmt_num(option.count)]);
    }
    table
}

fn family_table(facets: &Facets, family: Family) -> Table {
    match family {
        Family::Algorithm => tag_table(family, &facets.algorithms),
        Family::Feature => tag_table(family, &facets.features),
        Family::Specialty => tag_table(family, &facets.specialties),
        Family::SubSpecialty => tag_table(family, &facets.subspecialties),
    }
}

fn tag_table<T: Tag>(family: Family, options: &[FacetOption<T>]) -> Table {
    let mut table = new_table(&[family.title(), "Key", "Papers"]);
    for option in options {
        table.add_row(vec![
            option.key.label().to_string(),
            option.key.key().to_string(),
            fmt_num(option.count),
        ]);
    }
    table
}
