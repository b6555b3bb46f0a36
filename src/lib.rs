//! # espmorfo-rs
//!
//! Rule-based morphological analysis of Spanish word forms.
//!
//! Inflected forms are generated from a root lexicon and a table of affix
//! rules, lazily: a lookup only expands the roots near the word it is asked
//! about. On top of the generated forms the analyzer offers lemmatization,
//! feature extraction with heuristic disambiguation, nominalization,
//! contraction splitting and entity category lookup.
//!
//! ## Quick Start
//!
//! ```rust
//! use espmorfo_rs::AnalyzerBuilder;
//!
//! let mut builder = AnalyzerBuilder::new();
//! builder.load_words("cantar/R\ncasa/S");
//! builder
//!     .load_affixes(
//!         "flag\tpos\tstem_ending\tmorph_ending\tperson\tnumber\tgender\n\
//!          R\tverb\tar\tamos\tfirst\tplural\t\n\
//!          S\tnoun\t\ts\t\tplural\tfemale\n",
//!     )
//!     .unwrap();
//! let mut analyzer = builder.build().unwrap();
//!
//! assert_eq!(analyzer.lemmatize("cantamos", None), "cantar");
//! assert_eq!(analyzer.lemmatize("casas", None), "casa");
//! assert_eq!(analyzer.lemmatize("zzqx", None), "zzqx");
//!
//! let features = analyzer.extract_word_features("casas", Some("NNS"));
//! println!("{}", features);
//! ```
//!
//! ## Rule Packs
//!
//! Tables can also be loaded from a rule pack directory, see [`rule_pack`].
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod analyzer;
pub mod config;
pub mod contractions;
pub mod diacritics;
pub mod error;
pub mod expansion;
pub mod features;
pub mod heuristics;
pub mod index;
pub mod label;
pub mod lexicon;
pub mod loader;
pub mod records;
pub mod rule_pack;
pub mod rules;
pub mod taxonomy;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::AnalyzerConfig;
pub use error::{ConfigurationError, Result};
pub use features::{
    FeatureRecord, Features, Gender, Mood, NominalFeatures, Number, Person, PosClass, RecordSource,
    Tense, VerbFeatures,
};
pub use index::Reading;
pub use label::WordLabel;
pub use rule_pack::{load_analyzer, RulePack};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let mut builder = AnalyzerBuilder::new();
        builder.load_words("perro/SA\nllevar/R");
        builder
            .load_affixes(
                "flag\tpos\tstem_ending\tmorph_ending\tgender\tnumber\tmood\ttense\tperson\n\
                 S\tnoun\t\ts\tmale\tplural\t\t\t\n\
                 A\tnoun\to\ta\tfemale\tsingular\t\t\t\n\
                 R\tverb\tar\tó\t\tsingular\tindicative\tpreterite\tthird\n",
            )
            .unwrap();
        builder
            .load_closed_class("form\tpos\tgender\tnumber\nla\tdeterminer\tfemale\tsingular\n")
            .unwrap();
        builder.load_contractions("pattern\ttemplate\nal\ta el\n").unwrap();
        builder.load_taxonomy("living\n\tanimal:perr|gat\n");
        let mut analyzer = builder.build().unwrap();

        let labels = analyzer.label("Llevó la perra al parque");
        let lemmas: Vec<&str> = labels.iter().map(|l| l.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["llevar", "la", "perro", "a", "el", "parque"]);

        assert_eq!(labels[2].features.features.gender(), Some(Gender::Feminine));
        assert_eq!(labels[0].features.features.tense(), Some(Tense::Preterite));
        assert!(labels[5].features.pos.is_none());

        let empty: [&str; 0] = [];
        assert_eq!(analyzer.resolve_path("perra", &empty, &empty), vec!["living", "animal"]);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
