//! Python bindings for espmorfo-rs using PyO3
//!
//! This module provides Python-compatible wrappers around the analyzer.

use std::path::Path;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::analyzer::{Analyzer as RustAnalyzer, AnalyzerBuilder};
use crate::error::ConfigurationError;
use crate::features::FeatureRecord;
use crate::label::WordLabel as RustWordLabel;
use crate::rule_pack::{self, RulePack};

fn to_py_err(e: ConfigurationError) -> PyErr {
    match e {
        ConfigurationError::Io { .. } => PyIOError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn features_dict<'py>(py: Python<'py>, record: &FeatureRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (key, value) in record.pairs() {
        dict.set_item(key, value)?;
    }
    Ok(dict)
}

/// A Python-compatible WordLabel class
#[pyclass(name = "WordLabel")]
#[derive(Clone)]
pub struct PyWordLabel {
    #[pyo3(get)]
    pub text: String,
    #[pyo3(get)]
    pub tag: Option<String>,
    #[pyo3(get)]
    pub lemma: String,
    #[pyo3(get)]
    pub pos: Option<String>,
    record: FeatureRecord,
}

impl From<RustWordLabel> for PyWordLabel {
    fn from(l: RustWordLabel) -> Self {
        PyWordLabel {
            text: l.text,
            tag: l.tag,
            lemma: l.lemma,
            pos: l.features.pos_str().map(String::from),
            record: l.features,
        }
    }
}

#[pymethods]
impl PyWordLabel {
    fn __repr__(&self) -> String {
        format!("WordLabel('{}', lemma='{}', {})", self.text, self.lemma, self.record)
    }

    fn __str__(&self) -> String {
        self.text.clone()
    }

    /// Feature slots of the chosen reading, including `pos`
    #[getter]
    fn features<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        features_dict(py, &self.record)
    }

    /// Convert to dictionary
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("text", &self.text)?;
        dict.set_item("tag", &self.tag)?;
        dict.set_item("lemma", &self.lemma)?;
        dict.set_item("features", features_dict(py, &self.record)?)?;
        Ok(dict)
    }
}

/// Analyzer - the main analyzer class
///
/// Example:
///     >>> from espmorfo_rs import Analyzer
///     >>> a = Analyzer()  # loads the "general" rule pack
///     >>> a.lemmatize("cantamos")
///     'cantar'
#[pyclass(name = "Analyzer")]
pub struct PyAnalyzer {
    analyzer: RustAnalyzer,
}

#[pymethods]
impl PyAnalyzer {
    /// Create an Analyzer from an installed rule pack.
    ///
    /// Args:
    ///     pack: Name of the rule pack (default: "general")
    ///     base_path: Base path for rule packs (default: <data dir>/espmorfo-rs/rule_packs/)
    #[new]
    #[pyo3(signature = (pack=None, base_path=None))]
    fn new(pack: Option<&str>, base_path: Option<&str>) -> PyResult<Self> {
        let name = pack.unwrap_or(rule_pack::DEFAULT_RULE_PACK);
        let analyzer = rule_pack::load_analyzer(name, base_path.map(Path::new)).map_err(to_py_err)?;
        Ok(PyAnalyzer { analyzer })
    }

    /// Create an Analyzer from a rule pack directory
    #[staticmethod]
    fn from_dir(path: &str) -> PyResult<Self> {
        let analyzer = RulePack::load(Path::new(path))
            .and_then(RulePack::into_analyzer)
            .map_err(to_py_err)?;
        Ok(PyAnalyzer { analyzer })
    }

    /// Create an Analyzer from table contents
    ///
    /// Args:
    ///     words: words.txt content
    ///     affixes: affixes.tsv content
    ///     pronouns, contractions, entities: optional table contents
    #[staticmethod]
    #[pyo3(signature = (words, affixes, pronouns=None, contractions=None, entities=None))]
    fn from_tables(
        words: &str,
        affixes: &str,
        pronouns: Option<&str>,
        contractions: Option<&str>,
        entities: Option<&str>,
    ) -> PyResult<Self> {
        let mut builder = AnalyzerBuilder::new();
        builder.load_words(words);
        builder.load_affixes(affixes).map_err(to_py_err)?;
        if let Some(text) = pronouns {
            builder.load_closed_class(text).map_err(to_py_err)?;
        }
        if let Some(text) = contractions {
            builder.load_contractions(text).map_err(to_py_err)?;
        }
        if let Some(text) = entities {
            builder.load_taxonomy(text);
        }
        let analyzer = builder.build().map_err(to_py_err)?;
        Ok(PyAnalyzer { analyzer })
    }

    /// Dictionary root of a word
    #[pyo3(signature = (word, pos=None))]
    fn lemmatize(&mut self, word: &str, pos: Option<&str>) -> String {
        self.analyzer.lemmatize(word, pos)
    }

    /// Features of the best reading of a word, as a dict
    #[pyo3(signature = (word, pos=None))]
    fn extract_word_features<'py>(
        &mut self,
        py: Python<'py>,
        word: &str,
        pos: Option<&str>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let record = self.analyzer.extract_word_features(word, pos);
        features_dict(py, &record)
    }

    /// Preferred nominalization of a word
    fn nominalize(&mut self, word: &str) -> String {
        self.analyzer.nominalize(word)
    }

    /// Split contractions in a text
    fn split_contractions(&mut self, text: &str) -> String {
        self.analyzer.split_contractions(text)
    }

    /// Entity category path of a form, with optional modifier tokens
    #[pyo3(signature = (form, premods=Vec::new(), postmods=Vec::new()))]
    fn resolve_path(&self, form: &str, premods: Vec<String>, postmods: Vec<String>) -> Vec<String> {
        self.analyzer.resolve_path(form, &premods, &postmods)
    }

    /// Split contractions, then label every token
    fn label(&mut self, text: &str) -> Vec<PyWordLabel> {
        self.analyzer
            .label(text)
            .into_iter()
            .map(PyWordLabel::from)
            .collect()
    }

    /// Label (token, tag) pairs from a POS tagger
    fn label_tagged(&mut self, tokens: Vec<(String, String)>) -> Vec<PyWordLabel> {
        self.analyzer
            .label_tagged(&tokens)
            .into_iter()
            .map(PyWordLabel::from)
            .collect()
    }

    /// Number of roots not expanded yet
    fn pending_roots(&self) -> usize {
        self.analyzer.pending_roots()
    }

    fn __len__(&self) -> usize {
        self.analyzer.lexicon().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Analyzer(roots={}, pending={}, forms={})",
            self.analyzer.lexicon().len(),
            self.analyzer.pending_roots(),
            self.analyzer.known_forms()
        )
    }
}

/// Get the path to a rule pack
#[pyfunction]
#[pyo3(signature = (pack=None, base_path=None))]
fn get_rule_pack_path(pack: Option<&str>, base_path: Option<&str>) -> String {
    let name = pack.unwrap_or(rule_pack::DEFAULT_RULE_PACK);
    rule_pack::rule_pack_path(name, base_path.map(Path::new))
        .to_string_lossy()
        .to_string()
}

/// Check if a rule pack exists
#[pyfunction]
#[pyo3(signature = (pack=None, base_path=None))]
fn rule_pack_exists(pack: Option<&str>, base_path: Option<&str>) -> bool {
    let name = pack.unwrap_or(rule_pack::DEFAULT_RULE_PACK);
    rule_pack::rule_pack_exists(name, base_path.map(Path::new))
}

/// Get the default base path for rule packs
#[pyfunction]
fn get_default_base_path() -> String {
    rule_pack::default_base_path().to_string_lossy().to_string()
}

/// Strip accents from a text
#[pyfunction]
fn strip_accents(text: &str) -> String {
    crate::diacritics::strip_accents(text)
}

/// Create the Python module
#[pymodule]
fn espmorfo_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyWordLabel>()?;
    m.add_class::<PyAnalyzer>()?;
    m.add_function(wrap_pyfunction!(get_rule_pack_path, m)?)?;
    m.add_function(wrap_pyfunction!(rule_pack_exists, m)?)?;
    m.add_function(wrap_pyfunction!(get_default_base_path, m)?)?;
    m.add_function(wrap_pyfunction!(strip_accents, m)?)?;

    // Add version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
