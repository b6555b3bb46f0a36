//! Shape-based defaults and tie-breaking between candidate readings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::features::{
    FeatureRecord, FeatureValue, Features, Gender, Mood, NominalFeatures, Number, Person, PosClass,
    RecordSource, Tense, VerbFeatures,
};

/// Separators, all-caps or all-digit tokens: names, numbers and abbreviations
static NAME_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_.]|^\p{Lu}+$|^[0-9]+$").unwrap());

/// Endings of nouns that are usually feminine (-d, -des, -a, -as, -ión, -iones)
static FEMININE_ENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"d(es?)$|as?$|i[oó]n(es)?$").unwrap());

/// Endings shared by both genders (-l, -les, -s, -tes, -ues, ...)
static UNMARKED_ENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"l$|[stlu]es?$").unwrap());

fn hint_starts_with(pos_hint: Option<&str>, class: char) -> bool {
    pos_hint
        .and_then(|hint| hint.chars().next())
        .map_or(false, |c| c.to_ascii_lowercase() == class)
}

/// A noun-tagged token that looks like a name, number or abbreviation gets a
/// bare noun reading without consulting the lexicon.
pub fn name_like_noun(token: &str, pos_hint: Option<&str>) -> Option<FeatureRecord> {
    if !hint_starts_with(pos_hint, 'n') || !NAME_LIKE.is_match(token) {
        return None;
    }
    let pos = PosClass::new("n").ok()?;
    Some(FeatureRecord {
        pos: Some(pos),
        features: Features::Nominal(NominalFeatures::default()),
        source: RecordSource::Heuristic,
    })
}

/// Feature values expected from the surface shape of a token, in the order
/// they are tried when narrowing candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    verbal: bool,
    values: Vec<FeatureValue>,
}

impl Defaults {
    /// `token` is the token as written; case matters for the capitalization test.
    pub fn for_token(token: &str, pos_hint: Option<&str>) -> Self {
        if hint_starts_with(pos_hint, 'v') {
            return Defaults {
                verbal: true,
                values: vec![
                    FeatureValue::Mood(Some(Mood::Indicative)),
                    FeatureValue::Person(Some(Person::Third)),
                    FeatureValue::Tense(Some(Tense::Present)),
                ],
            };
        }

        if token.chars().next().map_or(false, char::is_uppercase) {
            return Defaults {
                verbal: false,
                values: vec![FeatureValue::Number(None), FeatureValue::Gender(None)],
            };
        }

        let lowered = token.to_lowercase();
        let number = if lowered.ends_with('s') {
            Number::Plural
        } else {
            Number::Singular
        };
        let gender = if FEMININE_ENDING.is_match(&lowered) {
            Some(Gender::Feminine)
        } else if UNMARKED_ENDING.is_match(&lowered) {
            None
        } else {
            Some(Gender::Masculine)
        };

        Defaults {
            verbal: false,
            values: vec![FeatureValue::Number(Some(number)), FeatureValue::Gender(gender)],
        }
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// The defaults as a reading with no POS, for words nothing is known about.
    pub fn to_record(&self) -> FeatureRecord {
        let mut features = if self.verbal {
            Features::Verb(VerbFeatures::default())
        } else {
            Features::Nominal(NominalFeatures::default())
        };
        for value in &self.values {
            features.set(*value);
        }
        FeatureRecord::heuristic(features)
    }
}

/// The POS shared by most candidates; on a tie, the one seen first.
fn most_common_pos<'a>(candidates: &[&'a FeatureRecord]) -> Option<&'a str> {
    let mut counts: Vec<(Option<&'a str>, usize)> = Vec::new();
    for candidate in candidates {
        let pos = candidate.pos_str();
        match counts.iter_mut().find(|(p, _)| *p == pos) {
            Some(entry) => entry.1 += 1,
            None => counts.push((pos, 1)),
        }
    }

    let mut best: Option<(Option<&'a str>, usize)> = None;
    for (pos, count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((pos, count));
        }
    }
    best.and_then(|(pos, _)| pos)
}

/// Pick one reading among `candidates`, which are in priority order.
///
/// Keeps the candidates of the most frequent POS, then narrows by each default
/// value in turn. A value that would leave no candidate is skipped; a value
/// that leaves exactly one decides. Otherwise the first survivor wins.
pub fn disambiguate<'a>(
    candidates: &[&'a FeatureRecord],
    defaults: &Defaults,
) -> Option<&'a FeatureRecord> {
    let first = *candidates.first()?;
    if candidates.len() == 1 {
        return Some(first);
    }

    let pos = most_common_pos(candidates);
    let mut narrowed: Vec<&'a FeatureRecord> = candidates
        .iter()
        .copied()
        .filter(|c| c.pos_str() == pos)
        .collect();
    if narrowed.len() == 1 {
        return Some(narrowed[0]);
    }

    for value in defaults.values() {
        let matching: Vec<&'a FeatureRecord> = narrowed
            .iter()
            .copied()
            .filter(|c| c.features.holds(value))
            .collect();
        match matching.len() {
            0 => {}
            1 => return Some(matching[0]),
            _ => narrowed = matching,
        }
    }

    Some(narrowed.first().copied().unwrap_or(first))
}
