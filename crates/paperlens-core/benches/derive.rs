use paperlens_core::{
    Algorithm, Paper, QueryState, Specialty, Tag, ViewOptions, aggregate, filter_all, project,
};

fn synthetic_papers(n: usize) -> Vec<Paper> {
    const COUNTRIES: [&str; 6] = ["China", "USA", "UK", "Japan", "Germany", "Brazil"];
    (0..n)
        .map(|i| {
            let mut paper = Paper {
                pmid: i.to_string(),
                title: format!("Deep learning study {i} of lung cancer imaging"),
                abstract_text: "Retrospective cohort with convolutional networks".repeat(4),
                year: 2010 + (i % 14) as i32,
                ..Default::default()
            };
            for (n, &tag) in Algorithm::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i + n) % 5 == 0;
            }
            for (n, &tag) in Specialty::ALL.iter().enumerate() {
                *tag.flag_mut(&mut paper) = (i + n) % 4 == 0;
            }
            paper.set_countries(format!(
                "{}, {}",
                COUNTRIES[i % COUNTRIES.len()],
                COUNTRIES[(i / 7) % COUNTRIES.len()]
            ));
            paper
        })
        .collect()
}

#[divan::bench(args = [1_000, 5_000])]
fn filter_search_and_tags(bencher: divan::Bencher, n: usize) {
    let papers = synthetic_papers(n);
    let query = QueryState::default()
        .with_search("lung cancer")
        .toggle_tag(Algorithm::DeepLearning)
        .toggle_country("Japan");
    bencher.bench(|| filter_all(&papers, &query));
}

#[divan::bench(args = [1_000, 5_000])]
fn aggregate_all(bencher: divan::Bencher, n: usize) {
    let papers = synthetic_papers(n);
    bencher.bench(|| aggregate(&papers));
}

#[divan::bench(args = [1_000, 5_000])]
fn project_last_page(bencher: divan::Bencher, n: usize) {
    let papers = synthetic_papers(n);
    let options = ViewOptions::default();
    bencher.bench(|| project(&papers, usize::MAX, &options));
}

fn main() {
    divan::main();
}
