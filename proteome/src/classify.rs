//! Pathogenic-variant classification
//!
//! Three independent signals are computed for every candidate record: an
//! accession carrying a variant pattern, a description carrying an explicit
//! pathogenic marker, and a description mentioning a disease keyword. The
//! [`Policy`] decides how the signals combine.
use super::*;
use serde::{Deserialize, Serialize};
use uniprot::annotation::{contains_keyword, contains_marker};

/// The individual evidence behind a classification
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    /// Accession contains a marker token or a `-A123B` substitution suffix
    pub accession_pattern: bool,
    /// Description contains an explicit pathogenic marker token
    pub description_marker: bool,
    /// Description mentions one of the secondary disease keywords
    pub keyword: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Accession pattern and description marker are both required
    #[default]
    Strict,
    /// Accession pattern, plus either a description marker or a keyword
    Lenient,
    /// Accession pattern or description marker
    Any,
}

impl Policy {
    pub fn accepts(self, signals: Signals) -> bool {
        match self {
            Policy::Strict => signals.accession_pattern && signals.description_marker,
            Policy::Lenient => {
                signals.accession_pattern && (signals.description_marker || signals.keyword)
            }
            Policy::Any => signals.accession_pattern || signals.description_marker,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classifier {
    pub policy: Policy,
    /// Tokens that mark an accession as a variant
    pub accession_markers: Vec<String>,
    /// Case-sensitive tokens that mark a description as pathogenic
    pub description_markers: Vec<String>,
    /// Case-insensitive disease keywords, only consulted by [`Policy::Lenient`]
    pub keywords: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Classifier {
        Classifier {
            policy: Policy::Strict,
            accession_markers: vec!["VAR_".into()],
            description_markers: vec!["PATHOGENIC_VARIANT".into()],
            keywords: vec!["cancer".into()],
        }
    }
}

impl Classifier {
    pub fn signals(&self, accession: &str, description: &str) -> Signals {
        Signals {
            accession_pattern: uniprot::variant::is_variant(accession, &self.accession_markers),
            description_marker: contains_marker(description, &self.description_markers),
            keyword: contains_keyword(description, &self.keywords),
        }
    }

    pub fn is_candidate(&self, accession: &str, description: &str) -> bool {
        self.policy.accepts(self.signals(accession, description))
    }
}
