//! Splitting of orthographic contractions (`del` -> `de el`, `decirlo` -> `decir lo`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::diacritics::{normalize, strip_accents};
use crate::error::{ConfigurationError, Result};
use crate::records::ContractionRecord;

/// `$1`, `$2`, ... in a template
static GROUP_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Fixed replacement text, re-cased to match the token
    Literal(String),
    /// Capture groups to emit, in template order
    Groups(Vec<usize>),
}

#[derive(Debug, Clone)]
pub struct Contraction {
    pattern: Regex,
    expansion: Expansion,
}

impl Contraction {
    pub fn from_record(record: &ContractionRecord) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{})$", record.pattern)).map_err(|e| {
            ConfigurationError::InvalidPattern {
                pattern: record.pattern.clone(),
                source: e,
            }
        })?;

        let invalid = |message: &str| ConfigurationError::InvalidTemplate {
            pattern: record.pattern.clone(),
            template: record.template.clone(),
            message: message.to_string(),
        };

        let refs: Vec<usize> = GROUP_REF
            .captures_iter(&record.template)
            .filter_map(|caps| caps[1].parse().ok())
            .collect();

        let expansion = if refs.is_empty() {
            Expansion::Literal(record.template.clone())
        } else {
            let groups = pattern.captures_len() - 1;
            if groups == 0 {
                return Err(invalid("template refers to groups but the pattern has none"));
            }
            if let Some(bad) = refs.iter().find(|&&i| i == 0 || i > groups) {
                return Err(invalid(&format!("no capture group {}", bad)));
            }
            if !refs.contains(&1) {
                return Err(invalid("template must refer to group 1"));
            }
            Expansion::Groups(refs)
        };

        Ok(Contraction {
            pattern,
            expansion,
        })
    }

    /// Rewrite `token` if this contraction applies.
    ///
    /// For group templates, `is_known` receives the text of group 1 and the
    /// split only happens if it accepts it.
    fn rewrite<F>(&self, token: &str, lowered: &str, is_known: &mut F) -> Option<String>
    where
        F: FnMut(&str) -> bool,
    {
        let caps = self.pattern.captures(lowered)?;
        match &self.expansion {
            Expansion::Literal(text) => Some(match_case(token, text)),
            Expansion::Groups(refs) => {
                let groups = group_texts(&caps, refs);
                let stem_at = refs.iter().position(|&i| i == 1)?;
                if !is_known(&groups[stem_at]) {
                    return None;
                }
                let parts: Vec<&str> = groups
                    .iter()
                    .map(String::as_str)
                    .filter(|g| !g.is_empty())
                    .collect();
                Some(parts.join(" "))
            }
        }
    }
}

fn group_texts(caps: &Captures<'_>, refs: &[usize]) -> Vec<String> {
    refs.iter()
        .map(|&i| strip_accents(caps.get(i).map_or("", |m| m.as_str())))
        .collect()
}

/// Give `expansion` the case shape of `token`: all caps, capitalized words,
/// or unchanged.
fn match_case(token: &str, expansion: &str) -> String {
    if !token.is_empty() && token.chars().all(char::is_uppercase) {
        return expansion.to_uppercase();
    }
    if token.chars().next().map_or(false, char::is_uppercase) {
        let words: Vec<String> = expansion.split(' ').map(capitalize).collect();
        return words.join(" ");
    }
    expansion.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Contractions in table order.
#[derive(Debug, Clone, Default)]
pub struct ContractionTable {
    entries: Vec<Contraction>,
}

impl ContractionTable {
    pub fn new() -> Self {
        ContractionTable::default()
    }

    pub fn from_records(records: &[ContractionRecord]) -> Result<Self> {
        let entries = records
            .iter()
            .map(Contraction::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(ContractionTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split every whitespace-separated token that matches a contraction.
    ///
    /// The first contraction that rewrites a token wins. Tokens are re-joined
    /// with single spaces.
    pub fn split<F>(&self, text: &str, mut is_known: F) -> String
    where
        F: FnMut(&str) -> bool,
    {
        let mut out: Vec<String> = Vec::new();
        for token in text.split_whitespace() {
            let token = normalize(token);
            let lowered = token.to_lowercase();
            let rewritten = self
                .entries
                .iter()
                .find_map(|c| c.rewrite(&token, &lowered, &mut is_known));
            out.push(rewritten.unwrap_or(token));
        }
        out.join(" ")
    }
}
