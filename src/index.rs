//! Ordered multi-maps keyed by surface form.
//!
//! Position in a list is priority: index 0 is the preferred entry. Entries
//! under the accented (exact) spelling of a form are pushed to the front, so
//! the most recently derived reading wins. Entries under the accent-stripped
//! spelling are pushed to the back, so readings registered earlier keep
//! their priority over later homographs that merely lost their accents.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::features::FeatureRecord;

/// A reading of a form together with the lemma it reduces to.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub record: Arc<FeatureRecord>,
    pub lemma: String,
}

impl Reading {
    pub fn new(record: Arc<FeatureRecord>, lemma: impl Into<String>) -> Self {
        Reading {
            record,
            lemma: lemma.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriorityIndex<T> {
    entries: HashMap<String, VecDeque<T>>,
}

impl<T> Default for PriorityIndex<T> {
    fn default() -> Self {
        PriorityIndex {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> PriorityIndex<T> {
    pub fn new() -> Self {
        PriorityIndex::default()
    }

    /// Insert with highest priority.
    pub fn push_front(&mut self, key: &str, value: T) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push_front(value);
    }

    /// Insert with lowest priority.
    pub fn push_back(&mut self, key: &str, value: T) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push_back(value);
    }

    /// Register `value` at the front of `exact` and, when the spellings
    /// differ, at the back of `stripped`.
    pub fn register(&mut self, exact: &str, stripped: &str, value: T) {
        if stripped != exact {
            self.push_back(stripped, value.clone());
        }
        self.push_front(exact, value);
    }

    pub fn get(&self, key: &str) -> Option<&VecDeque<T>> {
        self.entries.get(key)
    }

    /// Highest-priority entry
    pub fn first(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|list| list.front())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Surface form -> readings
pub type FormIndex = PriorityIndex<Reading>;

/// Root -> nominal forms derived from it
pub type NominalIndex = PriorityIndex<String>;

#[cfg(test)]
mod tests {
    use super::*;

    fn items(index: &PriorityIndex<&'static str>, key: &str) -> Vec<&'static str> {
        index.get(key).map(|l| l.iter().copied().collect()).unwrap_or_default()
    }

    #[test]
    fn test_front_and_back() {
        let mut index = PriorityIndex::new();
        index.push_front("canto", "a");
        index.push_front("canto", "b");
        index.push_back("canto", "c");
        assert_eq!(items(&index, "canto"), vec!["b", "a", "c"]);
        assert_eq!(index.first("canto"), Some(&"b"));
    }

    #[test]
    fn test_register_distinct_spellings() {
        let mut index = PriorityIndex::new();
        index.register("canto", "canto", "first");
        index.register("cantó", "canto", "second");
        assert_eq!(items(&index, "cantó"), vec!["second"]);
        assert_eq!(items(&index, "canto"), vec!["first", "second"]);
    }

    #[test]
    fn test_register_same_spelling_once() {
        let mut index = PriorityIndex::new();
        index.register("casa", "casa", "x");
        assert_eq!(items(&index, "casa"), vec!["x"]);
        assert_eq!(index.len(), 1);
    }
}
