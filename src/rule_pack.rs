//! Rule pack discovery and loading.
//!
//! A rule pack is a directory holding the lexicon and rule tables:
//!
//! ```text
//! general/
//!     words.txt          root lexicon (required)
//!     affixes.tsv        affix rules (required)
//!     pronouns.tsv       closed-class readings
//!     contractions.tsv   contraction patterns
//!     entities.tsv       entity taxonomy
//!     config.json        AnalyzerConfig overrides
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::analyzer::{Analyzer, AnalyzerBuilder};
use crate::config::AnalyzerConfig;
use crate::error::{ConfigurationError, Result};
use crate::loader;
use crate::records::{AffixRecord, ClosedClassRecord, ContractionRecord, RootRecord, TaxonomyRow};

/// Default rule pack name
pub const DEFAULT_RULE_PACK: &str = "general";

pub const WORDS_FILE: &str = "words.txt";
pub const AFFIXES_FILE: &str = "affixes.tsv";
pub const PRONOUNS_FILE: &str = "pronouns.tsv";
pub const CONTRACTIONS_FILE: &str = "contractions.tsv";
pub const ENTITIES_FILE: &str = "entities.tsv";
pub const CONFIG_FILE: &str = "config.json";

/// Get the default base path for rule packs
/// Returns <data dir>/espmorfo-rs/rule_packs/
pub fn default_base_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("espmorfo-rs")
        .join("rule_packs")
}

/// Get the path to a specific rule pack
pub fn rule_pack_path(name: &str, base_path: Option<&Path>) -> PathBuf {
    let base = base_path
        .map(PathBuf::from)
        .unwrap_or_else(default_base_path);
    base.join(name)
}

/// Check if a rule pack with both required tables exists
pub fn rule_pack_exists(name: &str, base_path: Option<&Path>) -> bool {
    let path = rule_pack_path(name, base_path);
    path.join(WORDS_FILE).is_file() && path.join(AFFIXES_FILE).is_file()
}

/// Load a rule pack by name and build an analyzer from it
pub fn load_analyzer(name: &str, base_path: Option<&Path>) -> Result<Analyzer> {
    RulePack::load(&rule_pack_path(name, base_path))?.into_analyzer()
}

/// The parsed contents of a rule pack directory.
#[derive(Debug, Clone)]
pub struct RulePack {
    pub path: PathBuf,
    pub config: AnalyzerConfig,
    pub roots: Vec<RootRecord>,
    pub affixes: Vec<AffixRecord>,
    pub closed_class: Vec<ClosedClassRecord>,
    pub contractions: Vec<ContractionRecord>,
    pub taxonomy: Vec<TaxonomyRow>,
}

impl RulePack {
    pub fn load(path: &Path) -> Result<Self> {
        let words = read_table(path, WORDS_FILE)?
            .ok_or_else(|| ConfigurationError::MissingTable(WORDS_FILE.to_string()))?;
        let affixes = read_table(path, AFFIXES_FILE)?
            .ok_or_else(|| ConfigurationError::MissingTable(AFFIXES_FILE.to_string()))?;

        let config = match read_table(path, CONFIG_FILE)? {
            Some(json) => AnalyzerConfig::from_json(&json)?,
            None => AnalyzerConfig::default(),
        };

        let pack = RulePack {
            path: path.to_path_buf(),
            config,
            roots: loader::parse_words(&words),
            affixes: loader::parse_affixes(&affixes)?,
            closed_class: match read_table(path, PRONOUNS_FILE)? {
                Some(text) => loader::parse_closed_class(&text)?,
                None => Vec::new(),
            },
            contractions: match read_table(path, CONTRACTIONS_FILE)? {
                Some(text) => loader::parse_contractions(&text)?,
                None => Vec::new(),
            },
            taxonomy: read_table(path, ENTITIES_FILE)?
                .map(|text| loader::parse_taxonomy(&text))
                .unwrap_or_default(),
        };

        log::info!(
            "loaded rule pack {}: {} roots, {} affix rules, {} closed-class rows, {} contractions, {} taxonomy rows",
            path.display(),
            pack.roots.len(),
            pack.affixes.len(),
            pack.closed_class.len(),
            pack.contractions.len(),
            pack.taxonomy.len()
        );
        Ok(pack)
    }

    pub fn into_builder(self) -> AnalyzerBuilder {
        let mut builder = AnalyzerBuilder::new();
        builder.set_config(self.config);
        builder.add_roots(self.roots);
        builder.add_affixes(self.affixes);
        builder.add_closed_class(self.closed_class);
        builder.add_contractions(self.contractions);
        builder.add_taxonomy_rows(self.taxonomy);
        builder
    }

    pub fn into_analyzer(self) -> Result<Analyzer> {
        self.into_builder().build()
    }
}

/// Read `dir/name`; `None` if the file does not exist.
fn read_table(dir: &Path, name: &str) -> Result<Option<String>> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigurationError::Io { path, source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("espmorfo-rs-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_base_path() {
        let path = default_base_path();
        assert!(path.to_string_lossy().contains("espmorfo-rs"));
    }

    #[test]
    fn test_rule_pack_path() {
        let path = rule_pack_path("general", Some(Path::new("/tmp/packs")));
        assert_eq!(path, PathBuf::from("/tmp/packs/general"));
    }

    #[test]
    fn test_missing_required_table() {
        let dir = scratch_dir("missing");
        fs::write(dir.join(WORDS_FILE), "casa/S\n").unwrap();

        let err = RulePack::load(&dir).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingTable(ref t) if t == AFFIXES_FILE));
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(!rule_pack_exists(&name, dir.parent()));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_with_config() {
        let dir = scratch_dir("config");
        fs::write(dir.join(WORDS_FILE), "casa/S\nnacer/N\n").unwrap();
        fs::write(
            dir.join(AFFIXES_FILE),
            "flag\tpos\tstem_ending\tmorph_ending\tgender\tnumber\n\
             S\tnoun\t\ts\tfemale\tplural\n\
             N\tnoun\ter\timiento\tmale\tsingular\n",
        )
        .unwrap();
        fs::write(dir.join(CONFIG_FILE), r#"{"nominalizing_flags": ["N"]}"#).unwrap();

        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(rule_pack_exists(&name, dir.parent()));

        let pack = RulePack::load(&dir).unwrap();
        assert_eq!(pack.roots.len(), 2);
        assert_eq!(pack.config.nominalizing_flags, vec!['N']);
        assert_eq!(pack.config.eager_flags, vec!['G']);
        assert!(pack.contractions.is_empty());

        let mut analyzer = pack.into_analyzer().unwrap();
        assert_eq!(analyzer.lemmatize("casas", None), "casa");
        assert_eq!(analyzer.nominalize("nacer"), "nacimiento");
        fs::remove_dir_all(&dir).unwrap();
    }
}
