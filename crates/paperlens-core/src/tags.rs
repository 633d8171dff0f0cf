//! Tag vocabulary: the four closed families of boolean paper flags
//!
//! Each family is an enum whose variants map one-to-one onto `Paper` bool
//! fields. The [`Tag`] trait is the lookup table that replaces building
//! field names from strings at runtime.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::model::Paper;
use crate::query::Selection;

/// The four tag families
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    Algorithm,
    Feature,
    Specialty,
    SubSpecialty,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Self::Algorithm,
        Self::Feature,
        Self::Specialty,
        Self::SubSpecialty,
    ];

    /// Parse CLI/config string into enum
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "algorithm" | "algo" => Some(Self::Algorithm),
            "feature" | "feat" => Some(Self::Feature),
            "specialty" | "spec" => Some(Self::Specialty),
            "subspecialty" | "subspec" => Some(Self::SubSpecialty),
            _ => None,
        }
    }

    /// Column prefix in the source dataset
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Algorithm => "algo",
            Self::Feature => "feat",
            Self::Specialty => "spec",
            Self::SubSpecialty => "subspec",
        }
    }

    /// Heading used in rendered tables
    pub fn title(self) -> &'static str {
        match self {
            Self::Algorithm => "AI algorithm",
            Self::Feature => "Imaging / data feature",
            Self::Specialty => "Specialty",
            Self::SubSpecialty => "Subspecialty",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Typed accessor for one tag family.
pub trait Tag:
    Copy + Eq + Ord + Hash + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    const FAMILY: Family;
    /// Every member, in declared order
    const ALL: &'static [Self];

    /// Short key used in queries and statistics (`deep_learning`)
    fn key(self) -> &'static str;
    /// Human readable name
    fn label(self) -> &'static str;
    /// Source column name (`algo_deep_learning`)
    fn field(self) -> &'static str;
    fn is_set(self, paper: &Paper) -> bool;
    fn flag_mut(self, paper: &mut Paper) -> &mut bool;
    /// The selected-key set for this family
    fn selected(selection: &Selection) -> &BTreeSet<Self>;
    fn selected_mut(selection: &mut Selection) -> &mut BTreeSet<Self>;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.key() == key)
    }

    /// Flags set on `paper`, in declared order.
    fn present_in(paper: &Paper) -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|t| t.is_set(paper))
            .collect()
    }
}

/// Declare a tag family enum and its `Tag` lookup table.
macro_rules! tag_family {
    (
        $(#[$meta:meta])*
        $name:ident: $family:ident, selection.$sel:ident {
            $($variant:ident => $key:literal, $label:literal, $field:ident;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl Tag for $name {
            const FAMILY: Family = Family::$family;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn field(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($field),)+
                }
            }

            fn is_set(self, paper: &Paper) -> bool {
                match self {
                    $(Self::$variant => paper.$field,)+
                }
            }

            fn flag_mut(self, paper: &mut Paper) -> &mut bool {
                match self {
                    $(Self::$variant => &mut paper.$field,)+
                }
            }

            fn selected(selection: &Selection) -> &BTreeSet<Self> {
                &selection.$sel
            }

            fn selected_mut(selection: &mut Selection) -> &mut BTreeSet<Self> {
                &mut selection.$sel
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

tag_family! {
    /// AI algorithm family
    Algorithm: Algorithm, selection.algorithms {
        NeuralNet => "neural_net", "Neural network", algo_neural_net;
        SupportVector => "support_vector", "Support vector machine", algo_support_vector;
        DecisionTree => "decision_tree", "Decision tree", algo_decision_tree;
        RandomForest => "random_forest", "Random forest", algo_random_forest;
        NaiveBayes => "naive_bayes", "Naive Bayes", algo_naive_bayes;
        Knn => "knn", "K-nearest neighbours", algo_knn;
        Clustering => "clustering", "Clustering", algo_clustering;
        DeepLearning => "deep_learning", "Deep learning", algo_deep_learning;
        TransferLearning => "transfer_learning", "Transfer learning", algo_transfer_learning;
        ReinforcementLearning => "reinforcement_learning", "Reinforcement learning", algo_reinforcement_learning;
        Other => "other", "Other", algo_other;
    }
}

tag_family! {
    /// Imaging modality / data feature family
    Feature: Feature, selection.features {
        Xr => "xr", "X-ray", feat_xr;
        Ct => "ct", "CT", feat_ct;
        Mri => "mri", "MRI", feat_mri;
        Ultrasound => "ultrasound", "Ultrasound", feat_ultrasound;
        Pet => "pet", "PET", feat_pet;
        Other => "other", "Other", feat_other;
    }
}

tag_family! {
    /// Clinical specialty family
    Specialty: Specialty, selection.specialties {
        Onc => "onc", "Oncology", spec_onc;
        Cvs => "cvs", "Cardiovascular", spec_cvs;
        Neuro => "neuro", "Neurology", spec_neuro;
        Paeds => "paeds", "Paediatrics", spec_paeds;
        Id => "id", "Infectious disease", spec_id;
        Other => "other", "Other", spec_other;
    }
}

tag_family! {
    /// Clinical subspecialty family
    SubSpecialty: SubSpecialty, selection.subspecialties {
        Lungca => "lungca", "Lung cancer", subspec_lungca;
        Icu => "icu", "Intensive care", subspec_icu;
        Ed => "ed", "Emergency department", subspec_ed;
        Other => "other", "Other", subspec_other;
    }
}

impl Algorithm {
    /// Order in which algorithm tags are shown on a table row.
    ///
    /// The first five are the dashboard's headline algorithms. The rest
    /// follow in declared order so a row tagged only with, say, `knn`
    /// still shows its tag instead of an empty cell.
    pub const DISPLAY_PRIORITY: [Algorithm; 11] = [
        Self::NeuralNet,
        Self::DeepLearning,
        Self::SupportVector,
        Self::RandomForest,
        Self::DecisionTree,
        Self::NaiveBayes,
        Self::Knn,
        Self::Clustering,
        Self::TransferLearning,
        Self::ReinforcementLearning,
        Self::Other,
    ];
}

impl Specialty {
    /// Order in which specialty tags are shown on a table row. `Other`
    /// sorts after every named specialty.
    pub const DISPLAY_PRIORITY: [Specialty; 6] = [
        Self::Onc,
        Self::Cvs,
        Self::Neuro,
        Self::Paeds,
        Self::Id,
        Self::Other,
    ];
}
