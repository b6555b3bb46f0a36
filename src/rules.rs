//! Affix rules and the flag-indexed rule table.

use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ConfigurationError, Result};
use crate::features::{FeatureRecord, Features, PosClass, RecordSource};
use crate::records::AffixRecord;

/// Parse a flag cell: exactly one non-whitespace character.
pub fn parse_flag(cell: &str) -> Result<char> {
    let trimmed = cell.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() && !c.is_control() => Ok(c),
        _ => Err(ConfigurationError::InvalidFlag(cell.to_string())),
    }
}

/// A rule rewriting the end of a root into an inflected ending.
#[derive(Debug, Clone)]
pub struct AffixRule {
    pub flag: char,
    /// `^(.*)(?:stem_ending)$`, compiled once
    stem: Regex,
    pub morph_ending: String,
    /// Reading of every form this rule produces
    pub record: Arc<FeatureRecord>,
}

impl AffixRule {
    pub fn from_record(record: &AffixRecord) -> Result<Self> {
        let flag = parse_flag(&record.flag)?;
        let stem = Regex::new(&format!("^(.*)(?:{})$", record.stem_ending)).map_err(|e| {
            ConfigurationError::InvalidPattern {
                pattern: record.stem_ending.clone(),
                source: e,
            }
        })?;
        let pos = PosClass::new(&record.pos)?;
        let features = Features::from_columns(pos.is_verbal(), &record.features)?;

        Ok(AffixRule {
            flag,
            stem,
            morph_ending: record.morph_ending.clone(),
            record: Arc::new(FeatureRecord::new(pos, features, RecordSource::Rule { flag })),
        })
    }

    /// Inflect `root`, or `None` when its ending doesn't fit the rule.
    pub fn apply(&self, root: &str) -> Option<String> {
        let caps = self.stem.captures(root)?;
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        Some(format!("{}{}", prefix, self.morph_ending))
    }
}

/// Flag -> rules, in table order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<char, Vec<AffixRule>>,
    count: usize,
}

impl RuleTable {
    pub fn new() -> Self {
        RuleTable::default()
    }

    pub fn from_records(records: &[AffixRecord]) -> Result<Self> {
        let mut table = RuleTable::new();
        for record in records {
            table.add(AffixRule::from_record(record)?);
        }
        Ok(table)
    }

    pub fn add(&mut self, rule: AffixRule) {
        self.rules.entry(rule.flag).or_default().push(rule);
        self.count += 1;
    }

    /// Rules for a flag; empty when the table has none.
    pub fn rules_for(&self, flag: char) -> &[AffixRule] {
        self.rules.get(&flag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
