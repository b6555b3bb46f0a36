//! Error types.
//!
//! Errors only arise while an analyzer is being built. Linguistic queries never
//! fail; they fall back to heuristic defaults instead.

use std::path::PathBuf;

/// Result type with [`ConfigurationError`] as the default error.
pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;

/// Raised when rule tables or the lexicon can't be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A table file could not be read.
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required table is absent from the rule pack.
    #[error("required table '{0}' is missing")]
    MissingTable(String),

    /// A row of a table can't be interpreted.
    #[error("{table}, line {line}: {message}")]
    Malformed {
        table: &'static str,
        line: usize,
        message: String,
    },

    /// A flag cell is not a single printable character.
    #[error("invalid flag {0:?}: expected a single non-whitespace character")]
    InvalidFlag(String),

    /// A pattern from a table failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A feature cell carries a value outside the known vocabulary.
    #[error("unknown value '{value}' for feature '{feature}'")]
    UnknownFeature { feature: String, value: String },

    /// A contraction template doesn't fit its pattern.
    #[error("contraction '{pattern}' -> '{template}': {message}")]
    InvalidTemplate {
        pattern: String,
        template: String,
        message: String,
    },

    /// A taxonomy row is nested deeper than its predecessors allow.
    #[error("taxonomy row {row} at depth {depth} has no parent")]
    TaxonomyDepth { row: usize, depth: usize },

    /// The rule pack's `config.json` is not valid.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
