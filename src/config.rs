//! Analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Flags with special meaning to the expansion engine.
///
/// A rule pack may override these in its `config.json`; missing keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Forms generated under these flags are nominalizations of their root
    pub nominalizing_flags: Vec<char>,
    /// Roots with these flags are expanded when the analyzer is built
    pub eager_flags: Vec<char>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            nominalizing_flags: vec!['H', 'I'],
            eager_flags: vec!['G'],
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_nominalizing(&self, flag: char) -> bool {
        self.nominalizing_flags.contains(&flag)
    }
}
