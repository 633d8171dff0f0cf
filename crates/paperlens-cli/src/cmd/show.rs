//! `paperlens show <pmid>` - one record in detail

use std::path::Path;

use anyhow::Result;
use clap::Args;
use comfy_table::Table;

use paperlens_core::{Algorithm, Feature, Paper, Specialty, SubSpecialty, Tag};

use super::{join_labels, load_dashboard, new_table};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// PubMed ID of the paper
    pub pmid: String,

    /// Print the full record as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, data: &Path, config: &Config) -> Result<()> {
    let dashboard = load_dashboard(data, config.view.options()?)?;
    let pmid = args.pmid.trim();
    let Some(paper) = dashboard.find(pmid) else {
        anyhow::bail!("No paper with PMID {pmid}");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&**paper)?);
        return Ok(());
    }

    println!("\n{}", detail_table(paper));
    if !paper.abstract_text.is_empty() {
        println!("\n{}", paper.abstract_text);
    }
    Ok(())
}

fn detail_table(paper: &Paper) -> Table {
    let mut table = new_table(&["Field", "Value"]);
    let year = if paper.has_year() {
        paper.year.to_string()
    } else {
        String::new()
    };
    let rows: [(&str, String); 15] = [
        ("PMID", paper.pmid.clone()),
        ("DOI", paper.doi.clone()),
        ("Title", paper.title.clone()),
        ("Year", year),
        ("Journal", paper.journal.clone()),
        ("Article type", paper.article_type.clone()),
        ("Language", paper.lang.clone()),
        ("Authors", paper.authors.clone()),
        ("Keywords", paper.keywords.clone()),
        ("Countries", paper.affil_countries_unique.join(", ")),
        (
            "First / last country",
            first_last(&paper.affil_first_country, &paper.affil_last_country),
        ),
        (Algorithm::FAMILY.title(), tags::<Algorithm>(paper)),
        (Feature::FAMILY.title(), tags::<Feature>(paper)),
        (Specialty::FAMILY.title(), tags::<Specialty>(paper)),
        (SubSpecialty::FAMILY.title(), tags::<SubSpecialty>(paper)),
    ];
    for (field, value) in rows {
        if !value.is_empty() {
            table.add_row(vec![field.to_string(), value]);
        }
    }
    table
}

fn tags<T: Tag>(paper: &Paper) -> String {
    join_labels(&T::present_in(paper))
}

fn first_last(first: &str, last: &str) -> String {
    match (first.is_empty(), last.is_empty()) {
        (true, true) => String::new(),
        _ => format!("{} / {}", or_dash(first), or_dash(last)),
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_omitted() {
        let paper = Paper {
            pmid: "1".into(),
            title: "T".into(),
            ..Default::default()
        };
        assert_eq!(detail_table(&paper).row_count(), 2);
    }

    #[test]
    fn all_tags_listed() {
        let paper = Paper {
            pmid: "1".into(),
            year: 2020,
            algo_knn: true,
            algo_naive_bayes: true,
            algo_clustering: true,
            ..Default::default()
        };
        assert_eq!(tags::<Algorithm>(&paper), "Naive Bayes, K-nearest neighbours, Clustering");
        assert_eq!(detail_table(&paper).row_count(), 3);
    }

    #[test]
    fn first_last_formatting() {
        assert_eq!(first_last("", ""), "");
        assert_eq!(first_last("UK", ""), "UK / -");
        assert_eq!(first_last("UK", "USA"), "UK / USA");
    }
}
