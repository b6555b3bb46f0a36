//! Readers for the tab-separated rule tables.
//!
//! Every cell is escape-decoded (`canci'on` -> `canción`) before it reaches
//! the records. Blank lines and lines starting with `#` are skipped.

use crate::diacritics::decode_escapes;
use crate::error::{ConfigurationError, Result};
use crate::records::{AffixRecord, ClosedClassRecord, ContractionRecord, RootRecord, TaxonomyRow};

/// Normalize a POS cell to `|`-joined class letters: each run of lower-case
/// letters contributes its first letter (`"noun, adjective"` -> `n|a`).
pub fn normalize_pos(raw: &str) -> String {
    let mut classes: Vec<char> = Vec::new();
    let mut in_word = false;
    for c in raw.chars() {
        if c.is_ascii_lowercase() {
            if !in_word {
                classes.push(c);
            }
            in_word = true;
        } else {
            in_word = false;
        }
    }
    let classes: Vec<String> = classes.into_iter().map(String::from).collect();
    classes.join("|")
}

/// Lines that carry data, with their 1-based line numbers
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

fn cells(line: &str) -> Vec<String> {
    line.split('\t').map(|c| decode_escapes(c.trim())).collect()
}

/// Header names, lower-cased.
fn header(table: &'static str, text: &str) -> Result<Option<(usize, Vec<String>)>> {
    let Some((line_no, line)) = data_lines(text).next() else {
        return Ok(None);
    };
    let names: Vec<String> = line.split('\t').map(|c| c.trim().to_lowercase()).collect();
    if names.len() < 2 {
        return Err(ConfigurationError::Malformed {
            table,
            line: line_no,
            message: "header needs at least two columns".to_string(),
        });
    }
    Ok(Some((line_no, names)))
}

fn require_column(table: &'static str, line: usize, names: &[String], column: &str) -> Result<()> {
    if names.iter().any(|n| n == column) {
        Ok(())
    } else {
        Err(ConfigurationError::Malformed {
            table,
            line,
            message: format!("missing column '{}'", column),
        })
    }
}

/// Parse the root lexicon: one `root/FLAGS` entry per line.
pub fn parse_words(text: &str) -> Vec<RootRecord> {
    data_lines(text)
        .map(|(_, line)| RootRecord::from_line(&decode_escapes(line.trim())))
        .filter(|record| !record.text.is_empty())
        .collect()
}

/// Parse the affix table. Column 0 holds the flag; the header names the rest.
pub fn parse_affixes(text: &str) -> Result<Vec<AffixRecord>> {
    const TABLE: &str = "affixes";
    let Some((header_line, names)) = header(TABLE, text)? else {
        return Ok(Vec::new());
    };
    for column in ["pos", "stem_ending", "morph_ending"] {
        require_column(TABLE, header_line, &names, column)?;
    }

    let mut records = Vec::new();
    for (_, line) in data_lines(text).skip(1) {
        let row = cells(line);
        let mut record = AffixRecord {
            flag: row[0].clone(),
            ..Default::default()
        };
        for (i, name) in names.iter().enumerate().skip(1) {
            let value = row.get(i).cloned().unwrap_or_default();
            match name.as_str() {
                "" => {}
                "pos" => record.pos = normalize_pos(&value),
                "stem_ending" => record.stem_ending = value,
                "morph_ending" => record.morph_ending = value,
                _ => record.features.push((name.clone(), value)),
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Parse the closed-class table. Column 0 holds the surface form.
pub fn parse_closed_class(text: &str) -> Result<Vec<ClosedClassRecord>> {
    const TABLE: &str = "pronouns";
    let Some((header_line, names)) = header(TABLE, text)? else {
        return Ok(Vec::new());
    };
    require_column(TABLE, header_line, &names, "pos")?;

    let mut records = Vec::new();
    for (line_no, line) in data_lines(text).skip(1) {
        let row = cells(line);
        if row[0].is_empty() {
            return Err(ConfigurationError::Malformed {
                table: TABLE,
                line: line_no,
                message: "empty surface form".to_string(),
            });
        }
        let mut record = ClosedClassRecord {
            form: row[0].clone(),
            ..Default::default()
        };
        for (i, name) in names.iter().enumerate().skip(1) {
            let value = row.get(i).cloned().unwrap_or_default();
            match name.as_str() {
                "" | "stem_ending" | "morph_ending" => {}
                "pos" => record.pos = normalize_pos(&value),
                _ => record.features.push((name.clone(), value)),
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Parse the contraction table: a header line, then `pattern<TAB>template`.
pub fn parse_contractions(text: &str) -> Result<Vec<ContractionRecord>> {
    let mut records = Vec::new();
    for (line_no, line) in data_lines(text).skip(1) {
        let row: Vec<String> = cells(line).into_iter().filter(|c| !c.is_empty()).collect();
        if row.len() < 2 {
            return Err(ConfigurationError::Malformed {
                table: "contractions",
                line: line_no,
                message: "expected a pattern and a template".to_string(),
            });
        }
        records.push(ContractionRecord::new(row[0].clone(), row[1].clone()));
    }
    Ok(records)
}

/// Parse the entity taxonomy. Depth is the number of leading empty cells.
pub fn parse_taxonomy(text: &str) -> Vec<TaxonomyRow> {
    data_lines(text)
        .filter_map(|(_, line)| {
            let row = cells(line);
            let depth = row.iter().position(|c| !c.is_empty())?;
            Some(TaxonomyRow::new(depth, row[depth].clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pos() {
        assert_eq!(normalize_pos("noun, adjective"), "n|a");
        assert_eq!(normalize_pos("verb"), "v");
        assert_eq!(normalize_pos(""), "");
    }

    #[test]
    fn test_parse_words_decodes_escapes() {
        let words = parse_words("# lexicon\ncanci'on/S\n\na'no/S\nde\n");
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], RootRecord::new("canción", "S"));
        assert_eq!(words[1].text, "año");
        assert_eq!(words[2].flags, "");
    }

    #[test]
    fn test_parse_affixes() {
        let text = "flag\tpos\tstem_ending\tmorph_ending\tgender\tnumber\n\
                    S\tnoun\t\ts\t\tplural\n\
                    A\tnoun, adjective\to\tas\tfemale\tplural\n";
        let records = parse_affixes(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].flag, "S");
        assert_eq!(records[0].stem_ending, "");
        assert_eq!(records[0].morph_ending, "s");
        assert_eq!(records[1].pos, "n|a");
        assert_eq!(
            records[1].features,
            vec![
                ("gender".to_string(), "female".to_string()),
                ("number".to_string(), "plural".to_string())
            ]
        );
    }

    #[test]
    fn test_affixes_require_columns() {
        let err = parse_affixes("flag\tpos\tmorph_ending\nS\tnoun\ts\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_parse_closed_class() {
        let text = "form\tpos\tperson\tnumber\n\
                    'el\tpronoun\tthird\tsingular\n";
        let records = parse_closed_class(text).unwrap();
        assert_eq!(records[0].form, "él");
        assert_eq!(records[0].pos, "p");
        assert_eq!(records[0].features.len(), 2);
    }

    #[test]
    fn test_parse_contractions() {
        let text = "pattern\texpansion\ndel\tde el\n(.+r)(lo)\t$1 $2\n";
        let records = parse_contractions(text).unwrap();
        assert_eq!(records, vec![
            ContractionRecord::new("del", "de el"),
            ContractionRecord::new("(.+r)(lo)", "$1 $2"),
        ]);
        assert!(parse_contractions("pattern\texpansion\ndel\n").is_err());
    }

    #[test]
    fn test_parse_taxonomy_depth() {
        let text = "living\n\tanimal:perro|gato\n\t\tdog:perro\nplace:ciudad\n";
        let rows = parse_taxonomy(text);
        assert_eq!(rows, vec![
            TaxonomyRow::new(0, "living"),
            TaxonomyRow::new(1, "animal:perro|gato"),
            TaxonomyRow::new(2, "dog:perro"),
            TaxonomyRow::new(0, "place:ciudad"),
        ]);
    }
}
