//! Grammatical feature model.
//!
//! A [`FeatureRecord`] is one candidate reading of a surface form: a POS class
//! plus either verbal or nominal features. Values are parsed from the rule
//! tables once, at load time.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{ConfigurationError, Result};

/// Grammatical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" | "masculine" | "m" => Some(Gender::Masculine),
            "female" | "feminine" | "f" => Some(Gender::Feminine),
            "neuter" | "n" => Some(Gender::Neuter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
            Gender::Neuter => "neuter",
        }
    }
}

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singular" | "sg" | "s" => Some(Number::Singular),
            "plural" | "pl" | "p" => Some(Number::Plural),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Plural => "plural",
        }
    }
}

/// Grammatical person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first" | "1" => Some(Person::First),
            "second" | "2" => Some(Person::Second),
            "third" | "3" => Some(Person::Third),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Person::First => "first",
            Person::Second => "second",
            Person::Third => "third",
        }
    }
}

/// Verbal mood, including the non-finite forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Imperative,
    Infinitive,
    Gerund,
    Participle,
}

impl Mood {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "indicative" => Some(Mood::Indicative),
            "subjunctive" => Some(Mood::Subjunctive),
            "imperative" => Some(Mood::Imperative),
            "infinitive" => Some(Mood::Infinitive),
            "gerund" => Some(Mood::Gerund),
            "participle" => Some(Mood::Participle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Indicative => "indicative",
            Mood::Subjunctive => "subjunctive",
            Mood::Imperative => "imperative",
            Mood::Infinitive => "infinitive",
            Mood::Gerund => "gerund",
            Mood::Participle => "participle",
        }
    }
}

/// Verbal tense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Future,
    Conditional,
}

impl Tense {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Tense::Present),
            "preterite" | "past" => Some(Tense::Preterite),
            "imperfect" => Some(Tense::Imperfect),
            "future" => Some(Tense::Future),
            "conditional" => Some(Tense::Conditional),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Preterite => "preterite",
            Tense::Imperfect => "imperfect",
            Tense::Future => "future",
            Tense::Conditional => "conditional",
        }
    }
}

/// Names of the feature columns a table may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Gender,
    Number,
    Person,
    Mood,
    Tense,
}

impl FeatureKind {
    /// Map a table header to a feature, if it names one.
    pub fn from_column(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gender" => Some(FeatureKind::Gender),
            "number" => Some(FeatureKind::Number),
            "person" => Some(FeatureKind::Person),
            "mood" => Some(FeatureKind::Mood),
            "tense" => Some(FeatureKind::Tense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Gender => "gender",
            FeatureKind::Number => "number",
            FeatureKind::Person => "person",
            FeatureKind::Mood => "mood",
            FeatureKind::Tense => "tense",
        }
    }

    /// Parse a cell for this feature. An empty cell is the unmarked value.
    pub fn parse_value(&self, raw: &str) -> Result<FeatureValue> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return Ok(self.unmarked());
        }
        let parsed = match self {
            FeatureKind::Gender => Gender::parse(&value).map(|g| FeatureValue::Gender(Some(g))),
            FeatureKind::Number => Number::parse(&value).map(|n| FeatureValue::Number(Some(n))),
            FeatureKind::Person => Person::parse(&value).map(|p| FeatureValue::Person(Some(p))),
            FeatureKind::Mood => Mood::parse(&value).map(|m| FeatureValue::Mood(Some(m))),
            FeatureKind::Tense => Tense::parse(&value).map(|t| FeatureValue::Tense(Some(t))),
        };
        parsed.ok_or_else(|| ConfigurationError::UnknownFeature {
            feature: self.as_str().to_string(),
            value: raw.to_string(),
        })
    }

    fn unmarked(&self) -> FeatureValue {
        match self {
            FeatureKind::Gender => FeatureValue::Gender(None),
            FeatureKind::Number => FeatureValue::Number(None),
            FeatureKind::Person => FeatureValue::Person(None),
            FeatureKind::Mood => FeatureValue::Mood(None),
            FeatureKind::Tense => FeatureValue::Tense(None),
        }
    }
}

/// A single feature slot with its (possibly unmarked) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureValue {
    Gender(Option<Gender>),
    Number(Option<Number>),
    Person(Option<Person>),
    Mood(Option<Mood>),
    Tense(Option<Tense>),
}

/// Features of a finite or non-finite verb form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerbFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tense: Option<Tense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    /// Only participles are marked for gender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// Features of nouns, adjectives, determiners and pronouns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NominalFeatures {
    pub gender: Option<Gender>,
    pub number: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

/// Feature set of one reading, keyed by the kind of word it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Features {
    Verb(VerbFeatures),
    Nominal(NominalFeatures),
}

impl Default for Features {
    fn default() -> Self {
        Features::Nominal(NominalFeatures::default())
    }
}

impl Features {
    /// Build a feature set from parsed `(column, cell)` pairs.
    ///
    /// Columns that don't name a feature are skipped.
    pub fn from_columns<K, V>(verbal: bool, columns: &[(K, V)]) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut features = if verbal {
            Features::Verb(VerbFeatures::default())
        } else {
            Features::Nominal(NominalFeatures::default())
        };
        for (key, value) in columns {
            match FeatureKind::from_column(key.as_ref()) {
                Some(kind) => features.set(kind.parse_value(value.as_ref())?),
                None => log::debug!("ignoring column '{}'", key.as_ref()),
            }
        }
        Ok(features)
    }

    /// Store a value; slots the variant doesn't have are ignored.
    pub fn set(&mut self, value: FeatureValue) {
        match (self, value) {
            (Features::Verb(v), FeatureValue::Mood(m)) => v.mood = m,
            (Features::Verb(v), FeatureValue::Tense(t)) => v.tense = t,
            (Features::Verb(v), FeatureValue::Person(p)) => v.person = p,
            (Features::Verb(v), FeatureValue::Number(n)) => v.number = n,
            (Features::Verb(v), FeatureValue::Gender(g)) => v.gender = g,
            (Features::Nominal(n), FeatureValue::Gender(g)) => n.gender = g,
            (Features::Nominal(n), FeatureValue::Number(x)) => n.number = x,
            (Features::Nominal(n), FeatureValue::Person(p)) => n.person = p,
            (Features::Nominal(_), FeatureValue::Mood(_) | FeatureValue::Tense(_)) => {}
        }
    }

    /// Whether this set has the slot and it carries exactly `value`.
    pub fn holds(&self, value: &FeatureValue) -> bool {
        match (self, value) {
            (Features::Verb(v), FeatureValue::Mood(m)) => v.mood == *m,
            (Features::Verb(v), FeatureValue::Tense(t)) => v.tense == *t,
            (Features::Verb(v), FeatureValue::Person(p)) => v.person == *p,
            (Features::Verb(v), FeatureValue::Number(n)) => v.number == *n,
            (Features::Verb(v), FeatureValue::Gender(g)) => v.gender == *g,
            (Features::Nominal(n), FeatureValue::Gender(g)) => n.gender == *g,
            (Features::Nominal(n), FeatureValue::Number(x)) => n.number == *x,
            (Features::Nominal(n), FeatureValue::Person(p)) => n.person == *p,
            (Features::Nominal(_), _) => false,
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        match self {
            Features::Verb(v) => v.gender,
            Features::Nominal(n) => n.gender,
        }
    }

    pub fn number(&self) -> Option<Number> {
        match self {
            Features::Verb(v) => v.number,
            Features::Nominal(n) => n.number,
        }
    }

    pub fn person(&self) -> Option<Person> {
        match self {
            Features::Verb(v) => v.person,
            Features::Nominal(n) => n.person,
        }
    }

    pub fn mood(&self) -> Option<Mood> {
        match self {
            Features::Verb(v) => v.mood,
            Features::Nominal(_) => None,
        }
    }

    pub fn tense(&self) -> Option<Tense> {
        match self {
            Features::Verb(v) => v.tense,
            Features::Nominal(_) => None,
        }
    }

    /// Slots in display order, unmarked slots rendered as an empty string.
    pub fn pairs(&self) -> Vec<(&'static str, &'static str)> {
        let show = |s: Option<&'static str>| s.unwrap_or("");
        match self {
            Features::Verb(v) => {
                let mut pairs = vec![
                    ("mood", show(v.mood.map(|m| m.as_str()))),
                    ("tense", show(v.tense.map(|t| t.as_str()))),
                    ("person", show(v.person.map(|p| p.as_str()))),
                    ("number", show(v.number.map(|n| n.as_str()))),
                ];
                if let Some(g) = v.gender {
                    pairs.push(("gender", g.as_str()));
                }
                pairs
            }
            Features::Nominal(n) => {
                let mut pairs = vec![
                    ("gender", show(n.gender.map(|g| g.as_str()))),
                    ("number", show(n.number.map(|x| x.as_str()))),
                ];
                if let Some(p) = n.person {
                    pairs.push(("person", p.as_str()));
                }
                pairs
            }
        }
    }
}

/// A part-of-speech class: alternatives of POS prefixes such as `n|a`.
///
/// The class matches a tagger's POS hint when one alternative matches at the
/// start of the lower-cased hint, so `n` accepts `NN`, `NNS` and `NNP`.
#[derive(Debug, Clone)]
pub struct PosClass {
    source: String,
    pattern: Regex,
}

impl PosClass {
    pub fn new(source: &str) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{})", source)).map_err(|e| {
            ConfigurationError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            }
        })?;
        Ok(PosClass {
            source: source.to_string(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, hint: &str) -> bool {
        self.pattern.is_match(&hint.to_lowercase())
    }

    /// Whether every alternative denotes a verb.
    pub fn is_verbal(&self) -> bool {
        !self.source.is_empty() && self.source.split('|').all(|alt| alt.starts_with('v'))
    }
}

impl PartialEq for PosClass {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PosClass {}

impl Serialize for PosClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Generated by an affix rule carrying this flag
    Rule { flag: char },
    /// An explicit row of the closed-class (pronoun) table
    ClosedClass,
    /// Computed from the surface shape of the token
    Heuristic,
}

/// One reading of a surface form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Unset for heuristic defaults of unknown words
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<PosClass>,
    #[serde(flatten)]
    pub features: Features,
    pub source: RecordSource,
}

impl FeatureRecord {
    pub fn new(pos: PosClass, features: Features, source: RecordSource) -> Self {
        FeatureRecord {
            pos: Some(pos),
            features,
            source,
        }
    }

    /// A record with no POS, holding only heuristic values.
    pub fn heuristic(features: Features) -> Self {
        FeatureRecord {
            pos: None,
            features,
            source: RecordSource::Heuristic,
        }
    }

    pub fn pos_str(&self) -> Option<&str> {
        self.pos.as_ref().map(|p| p.as_str())
    }

    /// Whether the record's POS class accepts the hint.
    pub fn accepts(&self, hint: &str) -> bool {
        self.pos.as_ref().map_or(false, |p| p.matches(hint))
    }

    /// All slots including `pos`, as plain strings.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(pos) = self.pos_str() {
            pairs.push(("pos", pos.to_string()));
        }
        pairs.extend(
            self.features
                .pairs()
                .into_iter()
                .map(|(k, v)| (k, v.to_string())),
        );
        pairs
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .pairs()
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}
