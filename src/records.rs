//! Parsed table rows, as handed to [`AnalyzerBuilder`](crate::AnalyzerBuilder).
//!
//! Text is expected with escapes already decoded (see
//! [`decode_escapes`](crate::diacritics::decode_escapes)); nothing here has
//! been validated yet.

/// One lexicon line: a root and the flags of the rule classes that apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootRecord {
    pub text: String,
    pub flags: String,
}

impl RootRecord {
    pub fn new(text: impl Into<String>, flags: impl Into<String>) -> Self {
        RootRecord {
            text: text.into(),
            flags: flags.into(),
        }
    }

    /// Parse a `root/FLAGS` line. The flag part is optional.
    pub fn from_line(line: &str) -> Self {
        match line.split_once('/') {
            Some((text, flags)) => RootRecord::new(text.trim(), flags.trim()),
            None => RootRecord::new(line.trim(), ""),
        }
    }
}

/// A row of the affix table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffixRecord {
    pub flag: String,
    /// POS class as `|`-joined alternatives (`n|a`)
    pub pos: String,
    /// Pattern for the end of the root that gets replaced
    pub stem_ending: String,
    /// Replacement ending
    pub morph_ending: String,
    /// Remaining `(column, cell)` pairs
    pub features: Vec<(String, String)>,
}

/// A row of the closed-class (pronoun, determiner, ...) table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosedClassRecord {
    pub form: String,
    pub pos: String,
    pub features: Vec<(String, String)>,
}

/// A row of the contraction table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractionRecord {
    /// Regex matched against the whole lower-cased token
    pub pattern: String,
    /// Literal expansion, or `$1 $2` style group references
    pub template: String,
}

impl ContractionRecord {
    pub fn new(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        ContractionRecord {
            pattern: pattern.into(),
            template: template.into(),
        }
    }
}

/// A row of the entity taxonomy: its depth under the root and its label.
///
/// Labels are either plain (`location`) or `category:pattern`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyRow {
    pub depth: usize,
    pub label: String,
}

impl TaxonomyRow {
    pub fn new(depth: usize, label: impl Into<String>) -> Self {
        TaxonomyRow {
            depth,
            label: label.into(),
        }
    }
}
