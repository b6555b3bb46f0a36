//! Per-token analysis output.

use std::fmt;

use serde::Serialize;

use crate::features::FeatureRecord;

/// One analyzed token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordLabel {
    /// The token as it appeared after contraction splitting
    pub text: String,

    /// POS tag supplied by the caller, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Dictionary root, or the lower-cased token if it is unknown
    pub lemma: String,

    /// The chosen reading
    pub features: FeatureRecord,
}

impl WordLabel {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, features: FeatureRecord) -> Self {
        WordLabel {
            text: text.into(),
            tag: None,
            lemma: lemma.into(),
            features,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Whether the reading came from the tables rather than from heuristics
    pub fn is_known(&self) -> bool {
        self.features.pos.is_some()
    }
}

impl fmt::Display for WordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.text, self.lemma, self.features)
    }
}
