//! Reference data for syllabification.
//!
//! A [`ReferenceStore`] holds two things, both loaded once and read-only
//! afterwards:
//!
//! - an ordered list of [`ReferenceEntry`] strings from a syllabified
//!   lexicon, which the analogy engine aligns against unknown words;
//! - an exact word → syllable-count table built from the same lexicon plus an
//!   optional pronouncing dictionary.
//!
//! When both sources know a word, the larger count wins.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{LexiconError, LexiconResult};

mod entry;
pub mod pronouncing;
pub mod syllabified;

pub use entry::{NO_BREAK, ReferenceEntry, SYLLABLE_BREAK, WORD_BOUNDARY};

/// Locations of the reference files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconPaths {
    /// Syllabified lexicon (NETtalk layout). Required.
    pub lexicon: Utf8PathBuf,
    /// Pronouncing dictionary (CMUdict layout). Optional.
    pub dictionary: Option<Utf8PathBuf>,
}

/// Immutable reference data shared by every query.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    entries: Vec<ReferenceEntry>,
    counts: HashMap<String, usize>,
}

impl ReferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a store from already-built parts.
    pub fn from_parts(
        entries: Vec<ReferenceEntry>,
        counts: impl IntoIterator<Item = (String, usize)>,
    ) -> Self {
        let counts = counts
            .into_iter()
            .map(|(word, count)| (word.to_lowercase(), count))
            .collect();
        Self { entries, counts }
    }

    /// Build a store from in-memory lexicon and dictionary text.
    pub fn from_sources(lexicon: &str, dictionary: Option<&str>) -> LexiconResult<Self> {
        let mut store = Self::new();
        store.extend_syllabified(syllabified::parse("<lexicon>", lexicon)?);
        if let Some(text) = dictionary {
            store.extend_pronunciations(pronouncing::parse("<dictionary>", text)?);
        }
        Ok(store)
    }

    /// Load a store from the files named in `paths`.
    #[tracing::instrument(skip_all, fields(lexicon = %paths.lexicon, dictionary = ?paths.dictionary))]
    pub fn load(paths: &LexiconPaths) -> LexiconResult<Self> {
        let mut store = Self::new();

        let text = read_source(&paths.lexicon)?;
        store.extend_syllabified(syllabified::parse(paths.lexicon.as_str(), &text)?);

        if let Some(ref dictionary) = paths.dictionary {
            let text = read_source(dictionary)?;
            store.extend_pronunciations(pronouncing::parse(dictionary.as_str(), &text)?);
        }

        tracing::info!(
            entries = store.entries.len(),
            words = store.counts.len(),
            "reference data loaded"
        );
        Ok(store)
    }

    /// Add lexicon words. A repeated word replaces the earlier count.
    pub fn extend_syllabified(
        &mut self,
        words: impl IntoIterator<Item = syllabified::SyllabifiedWord>,
    ) {
        for word in words {
            self.counts.insert(word.word.to_lowercase(), word.syllables);
            self.entries.push(word.entry);
        }
    }

    /// Add dictionary counts, keeping the larger count for known words.
    pub fn extend_pronunciations(
        &mut self,
        pronunciations: impl IntoIterator<Item = pronouncing::Pronunciation>,
    ) {
        for p in pronunciations {
            let count = self.counts.entry(p.word).or_insert(p.syllables);
            *count = (*count).max(p.syllables);
        }
    }

    /// Reference entries in load order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Exact syllable count for a word, if known. Case-insensitive.
    pub fn lookup(&self, word: &str) -> Option<usize> {
        self.counts.get(word.to_lowercase().as_str()).copied()
    }

    /// Number of words with an exact count.
    pub fn word_count(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the store has neither entries nor counts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.counts.is_empty()
    }
}

fn read_source(path: &Utf8Path) -> LexiconResult<String> {
    std::fs::read_to_string(path.as_std_path()).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}
