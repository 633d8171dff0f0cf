//! End-to-end properties of the filter → statistics → table chain.

use std::collections::BTreeMap;

use paperlens_core::{
    Algorithm, Dashboard, Feature, Paper, QueryState, Specialty, SubSpecialty, Tag, ViewOptions,
    aggregate, filter_all, includes, project,
};

/// Deterministic synthetic corpus with varied tags, years and countries.
fn corpus() -> Vec<Paper> {
    const COUNTRIES: [&str; 5] = ["China", "USA", "UK", "Japan", "Germany"];
    const TITLES: [&str; 4] = [
        "Cancer detection with deep networks",
        "Cancer survival prediction",
        "Stroke triage in the emergency department",
        "Sepsis onset in intensive care",
    ];
    (0..120)
        .map(|i: usize| {
            let mut paper = Paper {
                pmid: format!("{}", 30_000_000 + i),
                title: TITLES[i % TITLES.len()].to_string(),
                year: 2015 + (i % 8) as i32,
                ..Default::default()
            };
            for (n, &tag) in Algorithm::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i + n) % 4 == 0;
            }
            for (n, &tag) in Feature::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i * 3 + n) % 5 == 0;
            }
            for (n, &tag) in Specialty::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i + 2 * n) % 3 == 0;
            }
            for (n, &tag) in SubSpecialty::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i + n) % 6 == 0;
            }
            let a = COUNTRIES[i % COUNTRIES.len()];
            let b = COUNTRIES[(i / 3) % COUNTRIES.len()];
            paper.set_countries(format!("{a}, {b}, {a}"));
            paper
        })
        .collect()
}

#[test]
fn exact_scenario_year_and_algorithm() {
    let paper = Paper {
        year: 2020,
        algo_deep_learning: true,
        ..Default::default()
    }
    .with_countries("China");

    let query = QueryState::default()
        .with_year(Some(2020))
        .toggle_tag(Algorithm::DeepLearning);
    assert!(includes(&paper, &query));

    let other_year = QueryState::default().with_year(Some(2019));
    assert!(!includes(&paper, &other_year));
}

#[test]
fn any_category_without_overlap_excludes() {
    let papers = corpus();
    for paper in &papers {
        for &tag in Feature::ALL {
            let query = QueryState::default().toggle_tag(tag);
            assert_eq!(includes(paper, &query), tag.is_set(paper));
        }
        let query = QueryState::default().toggle_country("Atlantis");
        assert!(!includes(paper, &query));
    }
}

/// Add every tag of family `T` to `base` one at a time; the subset must
/// never shrink.
fn assert_widening_monotone<T: Tag + std::fmt::Display>(papers: &[Paper], base: &QueryState) {
    let mut query = base.clone();
    let mut previous = 0;
    for &tag in T::ALL {
        T::selected_mut(&mut query.selection).insert(tag);
        let len = filter_all(papers, &query).len();
        assert!(len >= previous, "{tag} shrank subset {previous} -> {len}");
        previous = len;
    }
}

#[test]
fn widening_a_selection_never_shrinks_the_subset() {
    let papers = corpus();
    let searched = QueryState::default().with_search("cancer");
    let narrowed = QueryState::default()
        .toggle_tag(Specialty::Onc)
        .toggle_country("UK");
    for base in [QueryState::default(), searched, narrowed] {
        assert_widening_monotone::<Algorithm>(&papers, &base);
        assert_widening_monotone::<Feature>(&papers, &base);
        assert_widening_monotone::<Specialty>(&papers, &base);
        assert_widening_monotone::<SubSpecialty>(&papers, &base);
    }

    let mut query = QueryState::default();
    let mut previous = 0;
    for country in ["Japan", "UK", "China"] {
        query = query.toggle_country(country);
        let len = filter_all(&papers, &query).len();
        assert!(len >= previous);
        previous = len;
    }
}

#[test]
fn longer_search_is_subset_of_shorter() {
    let papers = corpus();
    let broad = filter_all(&papers, &QueryState::default().with_search("cancer"));
    let narrow = filter_all(
        &papers,
        &QueryState::default().with_search("cancer detection"),
    );
    assert!(!narrow.is_empty());
    assert!(narrow.len() < broad.len());
    for paper in &narrow {
        assert!(broad.contains(paper));
    }
}

#[test]
fn country_counting_scenario() {
    let papers = vec![
        Paper::default().with_countries("US, CN"),
        Paper::default().with_countries("US"),
    ];
    let stats = aggregate(&papers);
    assert_eq!(stats.total_countries, 2);
    assert_eq!(
        stats.country_distribution,
        BTreeMap::from([("CN".to_string(), 1), ("US".to_string(), 2)])
    );
}

#[test]
fn aggregate_twice_is_identical() {
    let papers = corpus();
    assert_eq!(aggregate(&papers), aggregate(&papers));
}

#[test]
fn distribution_counts_each_paper_once_per_country() {
    let papers = corpus();
    let stats = aggregate(&papers);
    for (country, &count) in &stats.country_distribution {
        let expected = papers
            .iter()
            .filter(|p| p.affil_countries_unique.contains(country))
            .count();
        assert_eq!(count, expected, "{country}");
    }
    assert_eq!(stats.total_countries, 5);
    let trend_total: usize = stats.yearly_trend.values().sum();
    assert_eq!(trend_total, papers.len());
}

#[test]
fn pagination_scenario() {
    let papers: Vec<Paper> = (1..=45)
        .map(|i| Paper {
            pmid: i.to_string(),
            ..Default::default()
        })
        .collect();
    let page = project(&papers, 5, &ViewOptions::default());
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 3);
    let ids: Vec<&str> = page.rows.iter().map(|r| r.paper.pmid.as_str()).collect();
    assert_eq!(ids, vec!["41", "42", "43", "44", "45"]);
}

#[test]
fn dashboard_views_share_one_generation() {
    let mut dashboard = Dashboard::with_papers(corpus(), ViewOptions::default());
    let queries = [
        QueryState::default().with_search("sepsis"),
        QueryState::default().toggle_tag(Specialty::Onc).toggle_country("UK"),
        QueryState::default().with_year(Some(2018)),
        QueryState::default(),
    ];
    for query in queries {
        dashboard.replace_query(query);
        let derived = dashboard.derived();
        let expected = filter_all(dashboard.papers(), dashboard.query());
        assert_eq!(derived.filtered, expected);
        assert_eq!(derived.statistics, aggregate(&expected));
        assert_eq!(derived.table, project(&expected, 1, dashboard.options()));
    }
}
