//! Generation of inflected forms from a root.
//!
//! Forms are only generated for roots a lookup actually needs; callers make
//! sure each root goes through [`expand_forms`] at most once (see
//! [`LexiconStore::take`](crate::lexicon::LexiconStore::take)).

use crate::config::AnalyzerConfig;
use crate::diacritics::strip_accents;
use crate::index::{FormIndex, NominalIndex, Reading};
use crate::lexicon::RootEntry;
use crate::rules::RuleTable;

/// Apply every rule of every flag of `root`, recording the generated forms.
///
/// Each form is registered under its exact spelling (front) and under its
/// accent-stripped spelling (back), with `root` as the lemma. Forms produced by
/// a nominalizing flag are also registered as nominalizations of `root`.
/// Returns the number of forms generated.
pub fn expand_forms(
    root: &RootEntry,
    rules: &RuleTable,
    config: &AnalyzerConfig,
    forms: &mut FormIndex,
    nominals: &mut NominalIndex,
) -> usize {
    let stripped_root = strip_accents(&root.text);
    let mut generated = 0;

    for &flag in &root.flags {
        let nominalizing = config.is_nominalizing(flag);
        for rule in rules.rules_for(flag) {
            let Some(form) = rule.apply(&root.text) else {
                continue;
            };

            let stripped = strip_accents(&form);
            forms.register(&form, &stripped, Reading::new(rule.record.clone(), root.text.as_str()));

            if nominalizing {
                nominals.register(&root.text, &stripped_root, form);
            }
            generated += 1;
        }
    }

    generated
}
