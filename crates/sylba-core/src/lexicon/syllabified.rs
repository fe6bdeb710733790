//! Parser for syllabified lexicons in the NETtalk layout.
//!
//! Each line holds a word, its phoneme string, and a stress pattern with one
//! symbol per letter, followed by optional extra columns:
//!
//! ```text
//! abandon   xb@ndxn   0>1<>0<   0
//! ```
//!
//! In the pattern, `<` attaches a letter to the syllable on its left and `>`
//! attaches it to the syllable on its right. A syllable boundary follows
//! letter `i` unless letter `i` leans right or letter `i + 1` leans left.

use crate::error::{LexiconError, LexiconResult};
use crate::lexicon::ReferenceEntry;

/// One parsed lexicon line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabifiedWord {
    /// The word as spelled in the lexicon.
    pub word: String,
    /// The boundary-marked reference entry.
    pub entry: ReferenceEntry,
    /// Exact syllable count implied by the pattern.
    pub syllables: usize,
}

/// Parse a whole lexicon. `origin` names the source in error messages.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn parse(origin: &str, text: &str) -> LexiconResult<Vec<SyllabifiedWord>> {
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let parsed = parse_line(line).map_err(|reason| LexiconError::Malformed {
            origin: origin.to_string(),
            line: idx + 1,
            reason,
        })?;
        words.extend(parsed);
    }
    tracing::debug!(words = words.len(), "parsed syllabified lexicon");
    Ok(words)
}

/// Parse a single line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<SyllabifiedWord>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [word, _phonemes, pattern, ..] = fields.as_slice() else {
        return Err(format!(
            "expected at least 3 fields (word, phonemes, pattern), found {}",
            fields.len()
        ));
    };

    let letters = word.chars().count();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.len() != letters {
        return Err(format!(
            "pattern has {} symbols but {word:?} has {letters} letters",
            pattern.len()
        ));
    }

    let breaks: Vec<bool> = pattern
        .windows(2)
        .map(|pair| pair[0] != '>' && pair[1] != '<')
        .collect();
    let syllables = breaks.iter().filter(|&&b| b).count() + 1;

    Ok(Some(SyllabifiedWord {
        word: (*word).to_string(),
        entry: ReferenceEntry::from_breaks(word, &breaks),
        syllables,
    }))
}
