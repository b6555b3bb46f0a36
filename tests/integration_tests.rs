//! Integration tests for the analyzer, built from in-memory rule tables
//! through the public loader.

use espmorfo_rs::diacritics::strip_accents;
use espmorfo_rs::{
    Analyzer, AnalyzerBuilder, ConfigurationError, Gender, Mood, Number, Person, RecordSource,
    Tense,
};

const WORDS: &str = "\
# test lexicon
bueno/G
cantar/RH
canto/S
casa/S
decir/R
familiarizar/RH
hermano/SA
men'u/S
perro/SA
";

const AFFIXES: &str = "\
flag\tpos\tstem_ending\tmorph_ending\tmood\ttense\tperson\tnumber\tgender
R\tverb\tar\to\tindicative\tpresent\tfirst\tsingular\t
R\tverb\tar\ta\tindicative\tpresent\tthird\tsingular\t
R\tverb\tar\tamos\tindicative\tpresent\tfirst\tplural\t
R\tverb\tar\t'o\tindicative\tpreterite\tthird\tsingular\t
R\tverb\tar\te\tsubjunctive\tpresent\tthird\tsingular\t
R\tverb\tar\ta\timperative\tpresent\tsecond\tsingular\t
S\tnoun\t\t\t\t\t\tsingular\t
S\tnoun\t\ts\t\t\t\tplural\t
A\tnoun\to\ta\t\t\t\tsingular\tfemale
A\tnoun\to\tas\t\t\t\tplural\tfemale
H\tnoun\tar\taci'on\t\t\t\tsingular\tfemale
G\tadjective\to\ta\t\t\t\tsingular\tfemale
G\tadjective\to\tos\t\t\t\tplural\tmale
";

const PRONOUNS: &str = "\
form\tpos\tperson\tnumber\tgender
'el\tpronoun\tthird\tsingular\tmale
ella\tpronoun\tthird\tsingular\tfemale
mar\tnoun\t\tsingular\t
mar\tnoun\t\tsingular\tfemale
mar\tnoun\t\tsingular\tmale
tal\tadjective\t\tsingular\tmale
tal\tadjective\t\tsingular\tfemale
tal\tadjective\t\tsingular\t
";

const CONTRACTIONS: &str = "\
pattern\ttemplate
del\tde el
al\ta el
(.+r)(lo|la|le)\t$1 $2
";

const ENTITIES: &str = "\
living
\tanimal:animal|perr|gat
\t\tdog:perr
\t\tcat:gat
\tperson:hermano|hermana|mujer
place:ciudad|pueblo
";

fn builder() -> AnalyzerBuilder {
    let mut builder = AnalyzerBuilder::new();
    builder.load_words(WORDS);
    builder.load_affixes(AFFIXES).unwrap();
    builder.load_closed_class(PRONOUNS).unwrap();
    builder.load_contractions(CONTRACTIONS).unwrap();
    builder.load_taxonomy(ENTITIES);
    builder
}

fn analyzer() -> Analyzer {
    builder().build().unwrap()
}

// =============================================================================
// Expansion
// =============================================================================

#[test]
fn test_expansion_guard() {
    let mut a = analyzer();
    assert!(a.lexicon().is_pending("cantar"));

    assert_eq!(a.lemmatize("cantamos", None), "cantar");
    assert!(!a.lexicon().is_pending("cantar"));
    let pending = a.pending_roots();
    let readings = a.readings("canta").len();

    // more forms of the same root must not expand it again
    assert_eq!(a.lemmatize("canta", None), "cantar");
    assert_eq!(a.lemmatize("cante", None), "cantar");
    a.extract_word_features("cantamos", Some("VB"));
    assert_eq!(a.readings("canta").len(), readings);
    assert_eq!(a.readings("cantamos").len(), 1);
    assert_eq!(a.pending_roots(), pending);
}

#[test]
fn test_priority_ordering() {
    let mut a = analyzer();
    assert_eq!(a.lemmatize("cantó", None), "cantar");

    // "canto" gets the present tense verb at the front and the preterite
    // "cantó" appended at the back under its stripped spelling
    let canto = a.readings("canto");
    assert!(canto.len() >= 2);
    assert_eq!(canto[0].record.features.tense(), Some(Tense::Present));
    assert_eq!(canto[0].lemma, "cantar");
    let last = canto[canto.len() - 1];
    assert_eq!(last.record.features.tense(), Some(Tense::Preterite));
    assert_eq!(last.lemma, "cantar");

    assert_eq!(a.readings("cantó").len(), 1);
}

#[test]
fn test_eager_roots_are_indexed_at_build() {
    let a = analyzer();
    assert!(!a.lexicon().is_pending("bueno"));
    assert_eq!(a.readings("buena").len(), 1);
    assert_eq!(a.readings("buenos")[0].lemma, "bueno");
}

#[test]
fn test_escaped_table_cells() {
    let a = analyzer();
    assert!(a.lexicon().is_root("menú"));
    assert!(a.lexicon().is_root("menu"));
    assert_eq!(a.rules().rules_for('H')[0].morph_ending, "ación");
}

// =============================================================================
// Lemmatization
// =============================================================================

#[test]
fn test_round_trip_lemmatize() {
    let mut a = analyzer();
    let cases = [
        ("cantamos", "cantar"),
        ("canta", "cantar"),
        ("hermanas", "hermano"),
        ("hermanos", "hermano"),
        ("perra", "perro"),
        ("casas", "casa"),
        ("menús", "menú"),
        ("buenos", "bueno"),
    ];
    for (form, root) in cases {
        assert_eq!(a.lemmatize(form, None), root, "{}", form);
    }
}

#[test]
fn test_unaccented_spelling_lemmatizes_consistently() {
    let mut a = analyzer();
    let lemma = a.lemmatize("menus", None);
    assert_eq!(strip_accents(&lemma), "menu");
}

#[test]
fn test_lemmatize_is_case_insensitive() {
    let mut a = analyzer();
    assert_eq!(a.lemmatize("Perras", None), "perro");
    assert_eq!(a.lemmatize("CANTAMOS", None), "cantar");
}

#[test]
fn test_unknown_word_fallback() {
    let mut a = analyzer();
    assert_eq!(a.lemmatize("zzqx", None), "zzqx");

    let record = a.extract_word_features("zzqx", None);
    assert!(record.pos.is_none());
    assert_eq!(record.source, RecordSource::Heuristic);
}

#[test]
fn test_lemmatize_respects_hint() {
    let mut a = analyzer();
    a.lemmatize("cantos", None);
    a.lemmatize("cantamos", None);
    assert_eq!(a.lemmatize("canto", Some("VBP")), "cantar");
    assert_eq!(a.lemmatize("canto", Some("NN")), "canto");
}

// =============================================================================
// Features and disambiguation
// =============================================================================

#[test]
fn test_gender_decides_among_three_candidates() {
    let mut a = analyzer();
    assert_eq!(a.readings("mar").len(), 3);

    // "mar" ends in neither a feminine nor an unmarked ending: masculine
    let record = a.extract_word_features("mar", None);
    assert_eq!(record.features.gender(), Some(Gender::Masculine));

    // "tal" ends in "-l": unmarked gender
    let record = a.extract_word_features("tal", None);
    assert_eq!(record.features.gender(), None);
    assert_eq!(record.pos_str(), Some("a"));
}

#[test]
fn test_verb_defaults_break_ties() {
    let mut a = analyzer();
    a.lemmatize("canta", None);
    a.lemmatize("cante", None);

    let record = a.extract_word_features("canta", Some("VBZ"));
    assert_eq!(record.features.mood(), Some(Mood::Indicative));
    assert_eq!(record.features.person(), Some(Person::Third));
    assert_eq!(record.features.tense(), Some(Tense::Present));
}

#[test]
fn test_single_candidate_is_returned() {
    let mut a = analyzer();
    let record = a.extract_word_features("hermanas", None);
    assert_eq!(record.pos_str(), Some("n"));
    assert_eq!(record.features.gender(), Some(Gender::Feminine));
    assert_eq!(record.features.number(), Some(Number::Plural));
}

#[test]
fn test_pronoun_readings() {
    let mut a = analyzer();
    let record = a.extract_word_features("Él", Some("PRP"));
    assert_eq!(record.source, RecordSource::ClosedClass);
    assert_eq!(record.features.person(), Some(Person::Third));
    assert_eq!(a.lemmatize("ella", None), "ella");
}

#[test]
fn test_name_like_nouns_skip_the_lexicon() {
    let mut a = analyzer();
    for token in ["ONU", "2024", "S.A."] {
        let record = a.extract_word_features(token, Some("NNP"));
        assert_eq!(record.pos_str(), Some("n"), "{}", token);
        assert_eq!(record.features.gender(), None);
        assert_eq!(record.features.number(), None);
    }
}

// =============================================================================
// Contractions
// =============================================================================

#[test]
fn test_split_literal_contractions() {
    let mut a = analyzer();
    assert_eq!(a.split_contractions("del"), "de el");
    assert_eq!(a.split_contractions("Vamos al pueblo"), "Vamos a el pueblo");
    assert_eq!(a.split_contractions("DEL"), "DE EL");
}

#[test]
fn test_split_group_contractions() {
    let mut a = analyzer();
    assert_eq!(a.split_contractions("decirlo"), "decir lo");
    assert_eq!(a.split_contractions("cantarla"), "cantar la");
    // "per" is no known word
    assert_eq!(a.split_contractions("perla"), "perla");
}

// =============================================================================
// Nominalization
// =============================================================================

#[test]
fn test_nominalize() {
    let mut a = analyzer();
    assert_eq!(a.nominalize("familiarizar"), "familiarización");
    assert_eq!(a.nominalize("Cantar"), "cantación");
    assert_eq!(a.nominalize("perro"), "perro");
}

#[test]
fn test_nominalize_through_lemma() {
    let mut a = analyzer();
    assert_eq!(a.nominalize("familiarizamos"), "familiarización");
    assert_eq!(a.nominalize("zzqx"), "zzqx");
}

// =============================================================================
// Entity taxonomy
// =============================================================================

#[test]
fn test_taxonomy_tries_later_siblings() {
    let a = analyzer();
    let empty: [&str; 0] = [];
    assert_eq!(a.resolve_path("gata", &empty, &empty), vec!["living", "animal", "cat"]);
    assert_eq!(a.resolve_path("perros", &empty, &empty), vec!["living", "animal", "dog"]);
    assert_eq!(a.resolve_path("hermana", &empty, &empty), vec!["living", "person"]);
}

#[test]
fn test_taxonomy_phrase_fallback() {
    let a = analyzer();
    assert_eq!(a.resolve_path("grande", &["la"], &["ciudad"]), vec!["place"]);
    assert!(a.resolve_path("mesa", &["la"], &["roja"]).is_empty());
}

// =============================================================================
// Labeling
// =============================================================================

#[test]
fn test_label_sentence() {
    let mut a = analyzer();
    let labels = a.label("Canta del perro");
    let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
    let lemmas: Vec<&str> = labels.iter().map(|l| l.lemma.as_str()).collect();
    assert_eq!(texts, vec!["Canta", "de", "el", "perro"]);
    assert_eq!(lemmas, vec!["cantar", "de", "el", "perro"]);
}

#[test]
fn test_label_serializes() {
    let mut a = analyzer();
    let labels = a.label_tagged(&[("perras", "NNS")]);
    let json = serde_json::to_value(&labels).unwrap();
    assert_eq!(json[0]["lemma"], "perro");
    assert_eq!(json[0]["tag"], "NNS");
    assert_eq!(json[0]["features"]["pos"], "n");
    assert_eq!(json[0]["features"]["gender"], "feminine");
}

// =============================================================================
// Load errors
// =============================================================================

#[test]
fn test_bad_flag_fails_the_build() {
    let mut b = AnalyzerBuilder::new();
    b.load_words("casa/S");
    b.load_affixes("flag\tpos\tstem_ending\tmorph_ending\nSS\tnoun\t\ts\n")
        .unwrap();
    assert!(matches!(b.build(), Err(ConfigurationError::InvalidFlag(_))));
}

#[test]
fn test_bad_stem_pattern_fails_the_build() {
    let mut b = AnalyzerBuilder::new();
    b.load_affixes("flag\tpos\tstem_ending\tmorph_ending\nS\tnoun\t(\ts\n")
        .unwrap();
    assert!(matches!(b.build(), Err(ConfigurationError::InvalidPattern { .. })));
}

#[test]
fn test_unknown_feature_value_fails_the_build() {
    let mut b = AnalyzerBuilder::new();
    b.load_affixes("flag\tpos\tstem_ending\tmorph_ending\tgender\nS\tnoun\t\ts\tplenty\n")
        .unwrap();
    assert!(matches!(b.build(), Err(ConfigurationError::UnknownFeature { .. })));
}

#[test]
fn test_bad_template_fails_the_build() {
    let mut b = builder();
    b.load_contractions("pattern\ttemplate\n(d)(el)\t$2\n").unwrap();
    assert!(matches!(b.build(), Err(ConfigurationError::InvalidTemplate { .. })));
}

#[test]
fn test_orphan_taxonomy_row_fails_the_build() {
    let mut b = builder();
    b.load_taxonomy("\t\torphan:x\n");
    assert!(matches!(b.build(), Err(ConfigurationError::TaxonomyDepth { .. })));
}
