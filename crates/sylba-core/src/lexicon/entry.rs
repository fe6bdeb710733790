//! Boundary-marked reference strings.

use std::fmt;
use std::str::FromStr;

use crate::error::LexiconError;

/// Wraps both ends of a reference entry or a target word.
pub const WORD_BOUNDARY: char = '#';

/// Marks a syllable boundary after the preceding letter.
pub const SYLLABLE_BREAK: char = '-';

/// Marks the absence of a syllable boundary after the preceding letter.
///
/// In a target word the same symbol fills every gap between letters and
/// matches either marker during alignment.
pub const NO_BREAK: char = '*';

/// A reference word with a boundary marker between every pair of letters.
///
/// The symbols are stored pre-decoded because every query walks every entry
/// at every alignment offset.
///
/// ```
/// use sylba_core::lexicon::ReferenceEntry;
///
/// let entry: ReferenceEntry = "#r*a*b-b*i*t#".parse().unwrap();
/// assert_eq!(entry.word(), "rabbit");
/// assert_eq!(entry.syllables(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    symbols: Box<[char]>,
}

impl ReferenceEntry {
    /// Build an entry from a word and one flag per letter gap.
    ///
    /// `breaks[i]` says whether a syllable boundary follows letter `i`. Flags
    /// past the last gap are ignored; missing flags mean "no boundary".
    pub fn from_breaks(word: &str, breaks: &[bool]) -> Self {
        let letters: Vec<char> = word.chars().collect();
        let mut symbols = Vec::with_capacity(letters.len() * 2 + 1);
        symbols.push(WORD_BOUNDARY);
        for (i, &letter) in letters.iter().enumerate() {
            symbols.push(letter);
            if i + 1 < letters.len() {
                let marker = if breaks.get(i).copied().unwrap_or(false) {
                    SYLLABLE_BREAK
                } else {
                    NO_BREAK
                };
                symbols.push(marker);
            }
        }
        symbols.push(WORD_BOUNDARY);
        Self {
            symbols: symbols.into_boxed_slice(),
        }
    }

    /// The full symbol sequence, boundaries included.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The bare word, without boundaries or markers.
    pub fn word(&self) -> String {
        self.letters().collect()
    }

    /// Number of syllables encoded by the markers.
    pub fn syllables(&self) -> usize {
        self.symbols.iter().filter(|&&c| c == SYLLABLE_BREAK).count() + 1
    }

    fn letters(&self) -> impl Iterator<Item = char> + '_ {
        let inner = &self.symbols[1..self.symbols.len() - 1];
        inner.iter().step_by(2).copied()
    }
}

impl FromStr for ReferenceEntry {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| LexiconError::InvalidEntry {
            entry: s.to_string(),
            reason,
        };

        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() < 3
            || symbols.first() != Some(&WORD_BOUNDARY)
            || symbols.last() != Some(&WORD_BOUNDARY)
        {
            return Err(invalid("must be a non-empty word wrapped in '#'"));
        }

        let inner = &symbols[1..symbols.len() - 1];
        if inner.len() % 2 == 0 {
            return Err(invalid("letters and markers must alternate"));
        }
        for (i, &c) in inner.iter().enumerate() {
            let is_marker = matches!(c, SYLLABLE_BREAK | NO_BREAK);
            if i % 2 == 1 && !is_marker {
                return Err(invalid("expected '-' or '*' between letters"));
            }
            if i % 2 == 0 && (is_marker || c == WORD_BOUNDARY) {
                return Err(invalid("expected a letter"));
            }
        }

        Ok(Self {
            symbols: symbols.into_boxed_slice(),
        })
    }
}

impl fmt::Display for ReferenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_breaks_interleaves_markers() {
        let entry = ReferenceEntry::from_breaks("abandon", &[true, false, false, true]);
        assert_eq!(entry.to_string(), "#a-b*a*n-d*o*n#");
        assert_eq!(entry.symbols().len(), 2 * 7 + 1);
        assert_eq!(entry.syllables(), 3);
    }

    #[test]
    fn single_letter_word() {
        let entry = ReferenceEntry::from_breaks("a", &[]);
        assert_eq!(entry.to_string(), "#a#");
        assert_eq!(entry.word(), "a");
        assert_eq!(entry.syllables(), 1);
    }

    #[test]
    fn parse_round_trips_display() {
        let entry: ReferenceEntry = "#c-a-t#".parse().unwrap();
        assert_eq!(entry.word(), "cat");
        assert_eq!(entry.syllables(), 3);
        assert_eq!(entry.to_string(), "#c-a-t#");
    }

    #[test]
    fn parse_rejects_malformed_entries() {
        for bad in ["", "##", "cat", "#ca*t#", "#c--a#", "#c*a*#", "#-*a#"] {
            assert!(
                bad.parse::<ReferenceEntry>().is_err(),
                "{bad:?} should be rejected"
            );
        }
    }
}
