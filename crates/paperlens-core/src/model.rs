//! Paper record model
//!
//! One `Paper` is one row of the converted spreadsheet. Text columns are
//! plain `String`s (empty when the source cell was blank), tag columns are
//! `bool`s, and the affiliation country columns are kept both raw and
//! normalized.

use serde::{Deserialize, Serialize};

use crate::country::normalize_countries;

/// A single paper record.
///
/// Field names match the source columns so the record serializes to the
/// same flat shape the dataset uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paper {
    pub pmid: String,
    pub doi: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    pub article_date: String,
    pub date: String,
    /// Publication year, 0 when unknown
    pub year: i32,
    pub article_type: String,
    pub lang: String,
    pub journal: String,
    pub journal_short: String,
    pub journal_country: String,
    pub authors: String,
    pub author_affils: String,

    // Algorithm family
    pub algo_neural_net: bool,
    pub algo_support_vector: bool,
    pub algo_decision_tree: bool,
    pub algo_random_forest: bool,
    pub algo_naive_bayes: bool,
    pub algo_knn: bool,
    pub algo_clustering: bool,
    pub algo_deep_learning: bool,
    pub algo_transfer_learning: bool,
    pub algo_reinforcement_learning: bool,
    pub algo_other: bool,

    // Imaging / data feature family
    pub feat_xr: bool,
    pub feat_ct: bool,
    pub feat_mri: bool,
    pub feat_ultrasound: bool,
    pub feat_pet: bool,
    pub feat_other: bool,

    // Clinical specialty family
    pub spec_onc: bool,
    pub spec_cvs: bool,
    pub spec_neuro: bool,
    pub spec_paeds: bool,
    pub spec_id: bool,
    pub spec_other: bool,

    // Clinical subspecialty family
    pub subspec_lungca: bool,
    pub subspec_icu: bool,
    pub subspec_ed: bool,
    pub subspec_other: bool,

    /// Raw comma-joined affiliation countries
    pub affil_countries: String,
    /// Distinct normalized names from `affil_countries`, first-occurrence order
    pub affil_countries_unique: Vec<String>,
    pub affil_first_country: String,
    pub affil_last_country: String,
    pub countries_lc: Vec<String>,
}

impl Paper {
    /// Set the raw country string and re-derive `affil_countries_unique`.
    ///
    /// This is the only writer of both fields, so the normalized list is
    /// always the tokenization of the raw one.
    pub fn set_countries(&mut self, raw: impl Into<String>) {
        self.affil_countries = raw.into();
        self.affil_countries_unique = normalize_countries(&self.affil_countries);
    }

    /// Builder form of [`Paper::set_countries`].
    pub fn with_countries(mut self, raw: impl Into<String>) -> Self {
        self.set_countries(raw);
        self
    }

    /// Year known (non-zero).
    pub fn has_year(&self) -> bool {
        self.year != 0
    }

    /// Text fields searched by the free-text query, in match order.
    pub fn search_fields(&self) -> [&str; 4] {
        [&self.title, &self.abstract_text, &self.keywords, &self.authors]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_countries_derives_unique() {
        let mut paper = Paper::default();
        paper.set_countries("'China', 'USA', 'China'");
        assert_eq!(paper.affil_countries, "'China', 'USA', 'China'");
        assert_eq!(paper.affil_countries_unique, vec!["China", "USA"]);
    }

    #[test]
    fn set_countries_replaces_previous() {
        let mut paper = Paper::default().with_countries("Japan");
        paper.set_countries("");
        assert!(paper.affil_countries_unique.is_empty());
    }

    #[test]
    fn deserialize_missing_fields_default() {
        let paper: Paper =
            serde_json::from_str(r#"{"title": "X", "abstract": "Y", "algo_knn": true}"#).unwrap();
        assert_eq!(paper.title, "X");
        assert_eq!(paper.abstract_text, "Y");
        assert!(paper.algo_knn);
        assert!(!paper.algo_other);
        assert_eq!(paper.year, 0);
        assert!(!paper.has_year());
    }

    #[test]
    fn serialize_uses_source_column_names() {
        let paper = Paper {
            abstract_text: "text".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["abstract"], "text");
        assert!(json.get("abstract_text").is_none());
        assert_eq!(json["spec_onc"], false);
    }
}
