//! Diacritic handling for Spanish text.
//!
//! Rule tables are written in an ASCII escape notation where an apostrophe or
//! double quote precedes the letter it accents (`'a` for `á`, `"u` for `ü`,
//! `'n` for `ñ`). This module decodes that notation and provides the lossy
//! accent-stripping transform used to build alternate lookup keys.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Escape sequences and the characters they stand for.
static ESCAPES: &[(&str, char)] = &[
    ("'a", 'á'),
    ("'e", 'é'),
    ("'i", 'í'),
    ("'o", 'ó'),
    ("'u", 'ú'),
    ("\"u", 'ü'),
    ("'A", 'Á'),
    ("'E", 'É'),
    ("'I", 'Í'),
    ("'O", 'Ó'),
    ("'U", 'Ú'),
    ("\"U", 'Ü'),
    ("'n", 'ñ'),
    ("'N", 'Ñ'),
];

/// Replace every escape sequence with its accented character.
///
/// Quotes that don't form a known sequence are left alone.
pub fn decode_escapes(text: &str) -> String {
    if !text.contains(|c: char| c == '\'' || c == '"') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while let Some(c) = rest.chars().next() {
        if c == '\'' || c == '"' {
            for (seq, accented) in ESCAPES {
                if rest.starts_with(seq) {
                    out.push(*accented);
                    rest = &rest[seq.len()..];
                    continue 'outer;
                }
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Remove accents, diaeresis and tilde (`canción` -> `cancion`, `niño` -> `nino`).
pub fn strip_accents(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Canonical (NFC) form of a token, so decomposed input matches table keys.
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}
