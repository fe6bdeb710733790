//! Syllable counting: exact lookup first, analogy second.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analogy::{self, Syllabification};
use crate::error::{SyllabifyError, SyllabifyResult};
use crate::lexicon::ReferenceStore;

/// Where a syllable count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CountSource {
    /// Exact value from the lexicon or pronouncing dictionary.
    Dictionary,
    /// Derived by analogy against the reference lexicon.
    Analogy,
}

impl CountSource {
    /// Returns the source as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Analogy => "analogy",
        }
    }
}

/// A syllable count and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SyllableCount {
    /// The word as queried.
    pub word: String,
    /// Number of syllables.
    pub syllables: usize,
    /// Where the count came from.
    pub source: CountSource,
    /// Winning hyphenation when the count came from analogy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyphenation: Option<String>,
}

/// Counts syllables against a loaded [`ReferenceStore`].
///
/// The store is never mutated after construction, so a counter can be shared
/// across threads; every query builds and drops its own lattice.
#[derive(Debug, Clone)]
pub struct SyllableCounter {
    store: ReferenceStore,
    max_word_chars: Option<usize>,
}

impl SyllableCounter {
    /// Create a counter over `store` with no length limit.
    pub const fn new(store: ReferenceStore) -> Self {
        Self {
            store,
            max_word_chars: None,
        }
    }

    /// Reject analogy queries longer than `max` characters.
    pub const fn with_max_word_chars(mut self, max: Option<usize>) -> Self {
        self.max_word_chars = max;
        self
    }

    /// The underlying reference data.
    pub const fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Syllable count for `word`: the exact value if known, else by analogy.
    pub fn count_syllables(&self, word: &str) -> SyllabifyResult<usize> {
        self.count(word).map(|c| c.syllables)
    }

    /// Like [`count_syllables`](Self::count_syllables) but reports the source
    /// and, for analogy results, the hyphenation.
    #[tracing::instrument(skip(self))]
    pub fn count(&self, word: &str) -> SyllabifyResult<SyllableCount> {
        if let Some(syllables) = self.store.lookup(word) {
            tracing::trace!(syllables, "exact match");
            return Ok(SyllableCount {
                word: word.to_string(),
                syllables,
                source: CountSource::Dictionary,
                hyphenation: None,
            });
        }

        let result = self.syllabify(word)?;
        Ok(SyllableCount {
            word: word.to_string(),
            syllables: result.syllables,
            source: CountSource::Analogy,
            hyphenation: Some(result.hyphenation),
        })
    }

    /// Syllabify `word` by analogy, bypassing the exact-match table.
    pub fn syllabify(&self, word: &str) -> SyllabifyResult<Syllabification> {
        let len = word.chars().count();
        if let Some(max) = self.max_word_chars
            && len > max
        {
            return Err(SyllabifyError::WordTooLong {
                word: word.to_string(),
                len,
                max,
            });
        }

        let normalized = word.to_lowercase();
        let mut result = analogy::syllabify(&normalized, self.store.entries()).map_err(|_| {
            SyllabifyError::NoPathFound {
                word: word.to_string(),
            }
        })?;
        result.word = word.to_string();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::ReferenceEntry;

    fn store() -> ReferenceStore {
        let entries: Vec<ReferenceEntry> = ["#c-a-t#", "#b*a*t*s#"]
            .iter()
            .map(|e| e.parse().unwrap())
            .collect();
        ReferenceStore::from_parts(entries, [("zzz".to_string(), 7), ("cat".to_string(), 1)])
    }

    #[test]
    fn exact_match_takes_precedence() {
        let counter = SyllableCounter::new(store());
        // the lattice could never span "zzz", so this must come from the table
        assert_eq!(counter.count_syllables("zzz"), Ok(7));
        // the table says 1 even though the reference entry is marked c-a-t
        let count = counter.count("cat").unwrap();
        assert_eq!(count.syllables, 1);
        assert_eq!(count.source, CountSource::Dictionary);
        assert!(count.hyphenation.is_none());
    }

    #[test]
    fn unknown_words_fall_back_to_analogy() {
        let counter = SyllableCounter::new(store());
        let count = counter.count("cats").unwrap();
        assert_eq!(count.source, CountSource::Analogy);
        assert_eq!(count.syllables, 2);
        assert_eq!(count.hyphenation.as_deref(), Some("c-a*t*s"));
    }

    #[test]
    fn analogy_is_case_insensitive() {
        let counter = SyllableCounter::new(store());
        let result = counter.syllabify("CATS").unwrap();
        assert_eq!(result.word, "CATS");
        assert_eq!(result.hyphenation, "c-a*t*s");
    }

    #[test]
    fn no_path_is_reported() {
        let counter = SyllableCounter::new(store());
        assert_eq!(
            counter.count_syllables("dog"),
            Err(SyllabifyError::NoPathFound {
                word: "dog".to_string()
            })
        );
    }

    #[test]
    fn length_limit_applies_to_analogy_only() {
        let counter = SyllableCounter::new(store()).with_max_word_chars(Some(2));
        assert!(matches!(
            counter.count_syllables("cats"),
            Err(SyllabifyError::WordTooLong { len: 4, max: 2, .. })
        ));
        assert_eq!(counter.count_syllables("zzz"), Ok(7));
    }

    #[test]
    fn counter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyllableCounter>();
    }
}
