//! The analyzer: owns the lexicon, the rule tables and the lazily filled
//! form indices, and answers lookups against them.
//!
//! Forms are generated on demand. A lookup for an unknown form expands the
//! roots that sort next to it until the form shows up, so most of the
//! lexicon is never expanded in a typical session. Lookups therefore take
//! `&mut self`; wrap the analyzer in a `Mutex` to share it between threads.

use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::contractions::ContractionTable;
use crate::diacritics::{normalize, strip_accents};
use crate::error::Result;
use crate::expansion::expand_forms;
use crate::features::{FeatureRecord, Features, PosClass, RecordSource};
use crate::heuristics::{disambiguate, name_like_noun, Defaults};
use crate::index::{FormIndex, NominalIndex, Reading};
use crate::label::WordLabel;
use crate::lexicon::{LexiconStore, RootId};
use crate::loader;
use crate::records::{AffixRecord, ClosedClassRecord, ContractionRecord, RootRecord, TaxonomyRow};
use crate::rules::RuleTable;
use crate::taxonomy::EntityTaxonomy;

/// Collects table records and builds an [`Analyzer`] from them.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
    roots: Vec<RootRecord>,
    affixes: Vec<AffixRecord>,
    closed_class: Vec<ClosedClassRecord>,
    contractions: Vec<ContractionRecord>,
    taxonomy: Vec<TaxonomyRow>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        AnalyzerBuilder::default()
    }

    pub fn set_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    pub fn add_roots(&mut self, records: impl IntoIterator<Item = RootRecord>) {
        self.roots.extend(records);
    }

    pub fn add_affixes(&mut self, records: impl IntoIterator<Item = AffixRecord>) {
        self.affixes.extend(records);
    }

    pub fn add_closed_class(&mut self, records: impl IntoIterator<Item = ClosedClassRecord>) {
        self.closed_class.extend(records);
    }

    pub fn add_contractions(&mut self, records: impl IntoIterator<Item = ContractionRecord>) {
        self.contractions.extend(records);
    }

    pub fn add_taxonomy_rows(&mut self, rows: impl IntoIterator<Item = TaxonomyRow>) {
        self.taxonomy.extend(rows);
    }

    /// Load a `words.txt` lexicon
    pub fn load_words(&mut self, text: &str) {
        self.add_roots(loader::parse_words(text));
    }

    /// Load an `affixes.tsv` table
    pub fn load_affixes(&mut self, text: &str) -> Result<()> {
        self.add_affixes(loader::parse_affixes(text)?);
        Ok(())
    }

    /// Load a `pronouns.tsv` table
    pub fn load_closed_class(&mut self, text: &str) -> Result<()> {
        self.add_closed_class(loader::parse_closed_class(text)?);
        Ok(())
    }

    /// Load a `contractions.tsv` table
    pub fn load_contractions(&mut self, text: &str) -> Result<()> {
        self.add_contractions(loader::parse_contractions(text)?);
        Ok(())
    }

    /// Load an `entities.tsv` taxonomy
    pub fn load_taxonomy(&mut self, text: &str) {
        self.add_taxonomy_rows(loader::parse_taxonomy(text));
    }

    /// Compile the tables and build the analyzer.
    ///
    /// Roots carrying an eager flag are expanded here, before the
    /// closed-class readings are merged in.
    pub fn build(self) -> Result<Analyzer> {
        let lexicon = LexiconStore::from_records(&self.roots)?;
        let rules = RuleTable::from_records(&self.affixes)?;
        let contractions = ContractionTable::from_records(&self.contractions)?;
        let taxonomy = EntityTaxonomy::from_rows(&self.taxonomy)?;

        let mut analyzer = Analyzer {
            config: self.config,
            lexicon,
            rules,
            forms: FormIndex::new(),
            nominals: NominalIndex::new(),
            contractions: Arc::new(contractions),
            taxonomy,
        };

        let eager = analyzer.expand_eager();
        for record in &self.closed_class {
            analyzer.add_closed_class_record(record)?;
        }

        log::info!(
            "analyzer built: {} roots ({} expanded eagerly), {} rules, {} closed-class forms, {} contractions",
            analyzer.lexicon.len(),
            eager,
            analyzer.rules.len(),
            self.closed_class.len(),
            analyzer.contractions.len()
        );
        Ok(analyzer)
    }
}

/// Rule-based morphological analyzer.
pub struct Analyzer {
    config: AnalyzerConfig,
    lexicon: LexiconStore,
    rules: RuleTable,
    forms: FormIndex,
    nominals: NominalIndex,
    /// Shared so the splitter can run while lookups borrow `self` mutably
    contractions: Arc<ContractionTable>,
    taxonomy: EntityTaxonomy,
}

impl Analyzer {
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn contractions(&self) -> &ContractionTable {
        &self.contractions
    }

    pub fn taxonomy(&self) -> &EntityTaxonomy {
        &self.taxonomy
    }

    /// Roots not expanded yet
    pub fn pending_roots(&self) -> usize {
        self.lexicon.pending()
    }

    /// Distinct form keys indexed so far
    pub fn known_forms(&self) -> usize {
        self.forms.len()
    }

    /// Readings already indexed for `form`, best first. Never expands.
    pub fn readings(&self, form: &str) -> Vec<&Reading> {
        let key = normalize(form).to_lowercase();
        self.forms
            .get(&key)
            .map(|readings| readings.iter().collect())
            .unwrap_or_default()
    }

    /// The reading of `word` that best fits its shape and the POS hint.
    ///
    /// Unknown words get a reading built from shape defaults, with no POS.
    pub fn extract_word_features(&mut self, word: &str, pos_hint: Option<&str>) -> FeatureRecord {
        let word = normalize(word);
        if let Some(record) = name_like_noun(&word, pos_hint) {
            return record;
        }

        let lowered = word.to_lowercase();
        let mut candidates = self.candidates(&lowered, pos_hint);
        if candidates.is_empty() {
            if self.lexicon.is_root(&lowered) {
                self.expand_root(&lowered);
            } else if !self.forms.contains(&lowered) {
                self.search_neighbours(&lowered);
            }
            candidates = self.candidates(&lowered, pos_hint);
        }

        let defaults = Defaults::for_token(&word, pos_hint);
        let refs: Vec<&FeatureRecord> = candidates.iter().map(|r| r.as_ref()).collect();
        match disambiguate(&refs, &defaults) {
            Some(record) => record.clone(),
            None => defaults.to_record(),
        }
    }

    /// Dictionary root of `word`, or the lower-cased word if none is found.
    ///
    /// With a POS hint the first lemma whose reading accepts the hint is
    /// returned; if no reading does, the word itself.
    pub fn lemmatize(&mut self, word: &str, pos_hint: Option<&str>) -> String {
        let lowered = normalize(word).to_lowercase();
        if lowered.is_empty() {
            return lowered;
        }
        if !self.forms.contains(&lowered) {
            self.search_neighbours(&lowered);
        }

        let Some(readings) = self.forms.get(&lowered) else {
            return lowered;
        };
        let lemma = match pos_hint {
            Some(hint) => readings.iter().find(|r| r.record.accepts(hint)),
            None => readings.front(),
        };
        lemma.map(|r| r.lemma.clone()).unwrap_or(lowered)
    }

    /// Preferred nominalization of `word` (`familiarizar` -> `familiarización`),
    /// or the lower-cased word if it has none.
    pub fn nominalize(&mut self, word: &str) -> String {
        let lowered = normalize(word).to_lowercase();
        if let Some(nominal) = self.nominals.first(&lowered) {
            return nominal.clone();
        }

        let nominalizing = self
            .lexicon
            .get(&lowered)
            .map_or(false, |root| root.has_any_flag(&self.config.nominalizing_flags));
        if nominalizing && self.expand_root(&lowered) {
            if let Some(nominal) = self.nominals.first(&lowered) {
                return nominal.clone();
            }
        }

        let lemma = self.lemmatize(&lowered, None);
        match self.nominals.first(&lemma) {
            Some(nominal) => nominal.clone(),
            None => lowered,
        }
    }

    /// Split contractions in whitespace-separated `text`.
    ///
    /// A group-template contraction only applies when its stem is a known
    /// root or form, after lemmatizing it if needed.
    pub fn split_contractions(&mut self, text: &str) -> String {
        let contractions = Arc::clone(&self.contractions);
        contractions.split(text, |stem| self.is_known(stem))
    }

    /// Taxonomy path of `form`, falling back to the whole phrase.
    pub fn resolve_path<S: AsRef<str>>(&self, form: &str, premods: &[S], postmods: &[S]) -> Vec<String> {
        self.taxonomy.resolve_path(form, premods, postmods)
    }

    /// Split contractions in `text`, then lemmatize and analyze every token.
    pub fn label(&mut self, text: &str) -> Vec<WordLabel> {
        let split = self.split_contractions(text);
        split
            .split_whitespace()
            .map(|token| self.label_token(token, None))
            .collect()
    }

    /// Analyze already tokenized `(token, tag)` pairs, using each tag as POS hint.
    pub fn label_tagged<T, P>(&mut self, tokens: &[(T, P)]) -> Vec<WordLabel>
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        tokens
            .iter()
            .map(|(token, tag)| {
                self.label_token(token.as_ref(), Some(tag.as_ref()))
                    .with_tag(tag.as_ref())
            })
            .collect()
    }

    fn label_token(&mut self, token: &str, pos_hint: Option<&str>) -> WordLabel {
        let features = self.extract_word_features(token, pos_hint);
        let lemma = self.lemmatize(token, pos_hint);
        WordLabel::new(token, lemma, features)
    }

    fn candidates(&self, form: &str, pos_hint: Option<&str>) -> Vec<Arc<FeatureRecord>> {
        self.forms
            .get(form)
            .map(|readings| {
                readings
                    .iter()
                    .filter(|r| pos_hint.map_or(true, |hint| r.record.accepts(hint)))
                    .map(|r| Arc::clone(&r.record))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_known(&mut self, stem: &str) -> bool {
        if self.lexicon.is_root(stem) || self.forms.contains(stem) {
            return true;
        }
        self.lemmatize(stem, None);
        self.lexicon.is_root(stem) || self.forms.contains(stem)
    }

    /// Expand a root by text. `false` if it is unknown or already expanded.
    fn expand_root(&mut self, text: &str) -> bool {
        match self.lexicon.take(text) {
            Some(id) => {
                self.expand(id);
                true
            }
            None => false,
        }
    }

    /// Only call with an id just claimed from the lexicon.
    fn expand(&mut self, id: RootId) {
        let root = self.lexicon.entry(id);
        let generated = expand_forms(root, &self.rules, &self.config, &mut self.forms, &mut self.nominals);
        log::debug!("expanded '{}' into {} forms", root.text, generated);
    }

    /// Expand unexpanded roots nearest to `word` in sort order, alternating
    /// left and right, until `word` is indexed or no root with the same
    /// initial is left on either side.
    fn search_neighbours(&mut self, word: &str) {
        let Some(initial) = word.chars().next() else {
            return;
        };

        let (mut left, mut right) = (true, true);
        let mut consumed = 0;
        while left || right {
            if left {
                match self.lexicon.take_before(word, initial) {
                    Some(id) => {
                        self.expand(id);
                        consumed += 1;
                        if self.forms.contains(word) {
                            break;
                        }
                    }
                    None => left = false,
                }
            }
            if right {
                match self.lexicon.take_from(word, initial) {
                    Some(id) => {
                        self.expand(id);
                        consumed += 1;
                        if self.forms.contains(word) {
                            break;
                        }
                    }
                    None => right = false,
                }
            }
        }

        log::debug!(
            "search for '{}' expanded {} roots, {}",
            word,
            consumed,
            if self.forms.contains(word) { "found" } else { "not found" }
        );
    }

    fn expand_eager(&mut self) -> usize {
        let ids: Vec<RootId> = self
            .lexicon
            .ids_with_any_flag(&self.config.eager_flags)
            .collect();
        let mut expanded = 0;
        for id in ids {
            if self.lexicon.take_id(id).is_some() {
                self.expand(id);
                expanded += 1;
            }
        }
        expanded
    }

    /// Index a closed-class row: in front under its spelling, at the back
    /// under its accent-stripped spelling. Each key is its own lemma.
    fn add_closed_class_record(&mut self, record: &ClosedClassRecord) -> Result<()> {
        let pos = PosClass::new(&record.pos)?;
        let features = Features::from_columns(pos.is_verbal(), &record.features)?;
        let reading = Arc::new(FeatureRecord::new(pos, features, RecordSource::ClosedClass));

        let form = normalize(&record.form).to_lowercase();
        let stripped = strip_accents(&form);
        self.forms
            .push_front(&form, Reading::new(Arc::clone(&reading), form.as_str()));
        if stripped != form {
            self.forms
                .push_back(&stripped, Reading::new(reading, stripped.as_str()));
        }
        Ok(())
    }
}
