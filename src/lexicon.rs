//! Root lexicon with a one-shot search list.
//!
//! Every root is stored once in an arena and can always be looked up by text.
//! Separately, the store keeps the sorted set of roots whose forms have not
//! been expanded yet. Claiming a root for expansion removes it from that set,
//! so no root is ever expanded twice.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use crate::diacritics::strip_accents;
use crate::error::{ConfigurationError, Result};
use crate::records::RootRecord;

/// Index of a root in the store's arena
pub type RootId = usize;

/// A dictionary root and its flags, in lexicon order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    pub text: String,
    pub flags: Vec<char>,
}

impl RootEntry {
    pub fn has_any_flag(&self, flags: &[char]) -> bool {
        self.flags.iter().any(|f| flags.contains(f))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    roots: Vec<RootEntry>,
    by_text: HashMap<String, RootId>,
    /// Roots not yet expanded, sorted by text
    pending: BTreeMap<String, RootId>,
}

impl LexiconStore {
    pub fn new() -> Self {
        LexiconStore::default()
    }

    pub fn from_records(records: &[RootRecord]) -> Result<Self> {
        let mut store = LexiconStore::new();
        for record in records {
            if record.text.is_empty() {
                continue;
            }
            let flags = parse_flags(&record.flags)?;
            store.add(&record.text, &flags);
        }
        Ok(store)
    }

    /// Add a root. Its accent-stripped spelling is added too, with the same
    /// flags, unless that spelling is already a root of its own.
    pub fn add(&mut self, text: &str, flags: &[char]) {
        self.insert(text, flags, true);

        let stripped = strip_accents(text);
        if stripped != text && !self.by_text.contains_key(&stripped) {
            self.insert(&stripped, flags, false);
        }
    }

    fn insert(&mut self, text: &str, flags: &[char], merge: bool) {
        if let Some(&id) = self.by_text.get(text) {
            if merge {
                let entry = &mut self.roots[id];
                for flag in flags {
                    if !entry.flags.contains(flag) {
                        entry.flags.push(*flag);
                    }
                }
            }
            return;
        }

        let id = self.roots.len();
        self.roots.push(RootEntry {
            text: text.to_string(),
            flags: flags.to_vec(),
        });
        self.by_text.insert(text.to_string(), id);
        self.pending.insert(text.to_string(), id);
    }

    pub fn get(&self, text: &str) -> Option<&RootEntry> {
        self.by_text.get(text).map(|&id| &self.roots[id])
    }

    pub fn is_root(&self, text: &str) -> bool {
        self.by_text.contains_key(text)
    }

    pub fn entry(&self, id: RootId) -> &RootEntry {
        &self.roots[id]
    }

    /// Roots carrying any of `flags`, in lexicon order.
    pub fn ids_with_any_flag<'a>(&'a self, flags: &'a [char]) -> impl Iterator<Item = RootId> + 'a {
        self.roots
            .iter()
            .enumerate()
            .filter(move |(_, root)| root.has_any_flag(flags))
            .map(|(id, _)| id)
    }

    /// Claim a root for expansion. Returns `None` if it is unknown or was
    /// already claimed.
    pub fn take(&mut self, text: &str) -> Option<RootId> {
        self.pending.remove(text)
    }

    /// Claim a root by id; `None` if it was already claimed.
    pub fn take_id(&mut self, id: RootId) -> Option<RootId> {
        let text = &self.roots.get(id)?.text;
        self.pending.remove(text.as_str())
    }

    /// Claim the nearest unexpanded root sorting before `word`, provided it
    /// starts with `initial`.
    pub fn take_before(&mut self, word: &str, initial: char) -> Option<RootId> {
        let key = self
            .pending
            .range::<str, _>((Bound::Unbounded, Bound::Excluded(word)))
            .next_back()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(initial))?
            .clone();
        self.pending.remove(&key)
    }

    /// Claim the nearest unexpanded root sorting at or after `word`, provided
    /// it starts with `initial`.
    pub fn take_from(&mut self, word: &str, initial: char) -> Option<RootId> {
        let key = self
            .pending
            .range::<str, _>((Bound::Included(word), Bound::Unbounded))
            .next()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(initial))?
            .clone();
        self.pending.remove(&key)
    }

    /// Number of roots not expanded yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, text: &str) -> bool {
        self.pending.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn parse_flags(flags: &str) -> Result<Vec<char>> {
    let mut parsed = Vec::with_capacity(flags.len());
    for c in flags.chars() {
        if c.is_whitespace() || c.is_control() {
            return Err(ConfigurationError::InvalidFlag(flags.to_string()));
        }
        if !parsed.contains(&c) {
            parsed.push(c);
        }
    }
    Ok(parsed)
}
