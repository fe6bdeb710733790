//! Parser for pronouncing dictionaries in the CMUdict layout.
//!
//! ```text
//! ;;; comment
//! ABANDON  AH0 B AE1 N D AH0 N
//! ABANDON(2)  ...
//! ```
//!
//! The syllable count is the number of stress-marked vowels. Alternate
//! pronunciations (`WORD(2)`) are skipped.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LexiconError, LexiconResult};

/// The `(N)` suffix that marks an alternate pronunciation.
static VARIANT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)$").expect("valid regex"));

/// A `#` comment starts at the first `#` preceded by whitespace.
static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s#.*$").expect("valid regex"));

/// One parsed dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pronunciation {
    /// The lowercased headword.
    pub word: String,
    /// Number of stress-marked vowels.
    pub syllables: usize,
}

/// Parse a whole dictionary. `origin` names the source in error messages.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn parse(origin: &str, text: &str) -> LexiconResult<Vec<Pronunciation>> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let parsed = parse_line(line).map_err(|reason| LexiconError::Malformed {
            origin: origin.to_string(),
            line: idx + 1,
            reason,
        })?;
        entries.extend(parsed);
    }
    tracing::debug!(entries = entries.len(), "parsed pronouncing dictionary");
    Ok(entries)
}

/// Parse a single line.
///
/// Blank lines, `;;;` comments and alternate pronunciations yield `Ok(None)`.
/// Trailing ` #` comments are ignored; a `#` inside a headword is kept.
pub fn parse_line(line: &str) -> Result<Option<Pronunciation>, String> {
    let line = TRAILING_COMMENT
        .find(line)
        .map_or(line, |comment| &line[..comment.start()])
        .trim();
    if line.is_empty() || line.starts_with(";;;") {
        return Ok(None);
    }

    let (headword, phonemes) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("missing phonemes after {line:?}"))?;

    if VARIANT_SUFFIX.is_match(headword) {
        return Ok(None);
    }

    Ok(Some(Pronunciation {
        word: headword.to_lowercase(),
        syllables: phonemes.chars().filter(char::is_ascii_digit).count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_stressed_vowels() {
        let parsed = parse_line("ABANDON  AH0 B AE1 N D AH0 N").unwrap().unwrap();
        assert_eq!(parsed.word, "abandon");
        assert_eq!(parsed.syllables, 3);
    }

    #[test]
    fn variants_are_skipped() {
        assert_eq!(parse_line("TOMATO(2)  T AH0 M AA1 T OW2").unwrap(), None);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(parse_line(";;; # CMUdict").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
        let parsed = parse_line("AACHEN AA1 K AH0 N # place, german")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.syllables, 2);
    }

    #[test]
    fn digits_in_headword_do_not_count() {
        let parsed = parse_line("'94  N AY1 N T IY0 F AO1 R").unwrap().unwrap();
        assert_eq!(parsed.word, "'94");
        assert_eq!(parsed.syllables, 3);
    }

    #[test]
    fn punctuation_headwords_are_accepted() {
        let parsed = parse("cmudict", "(PAREN  P ER0 EH1 N\nCAT  K AE1 T\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].word, "(paren");
        assert_eq!(parsed[0].syllables, 2);

        let close = parse_line(")CLOSE-PAREN  K L OW1 Z P ER0 EH1 N").unwrap().unwrap();
        assert_eq!(close.word, ")close-paren");
    }

    #[test]
    fn hash_inside_headword_is_not_a_comment() {
        let parsed = parse_line("#HASH-MARK  HH AE1 M AA2 R K").unwrap().unwrap();
        assert_eq!(parsed.word, "#hash-mark");
        assert_eq!(parsed.syllables, 2);

        let parsed = parse_line("C#  S IY1 SH AA1 R P\t# language").unwrap().unwrap();
        assert_eq!(parsed.word, "c#");
        assert_eq!(parsed.syllables, 2);
    }

    #[test]
    fn headword_without_phonemes_is_an_error() {
        assert!(parse_line("LONELY").is_err());
    }

    #[test]
    fn parse_reports_origin() {
        let err = parse("cmudict", "CAT  K AE1 T\nDOG\n").unwrap_err();
        assert!(err.to_string().starts_with("cmudict:2:"));
    }
}
