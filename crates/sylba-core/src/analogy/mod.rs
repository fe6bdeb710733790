//! Syllabification by analogy.
//!
//! An unknown word is aligned against every reference entry to build a
//! weighted [`Lattice`] of analogous substrings. Breadth-first search finds
//! the paths through the lattice with the fewest arcs, every such path is
//! enumerated, and the candidates are ranked by three scoring strategies
//! whose points are summed. The winning path's boundary markers give the
//! hyphenation and the syllable count.
//!
//! ```text
//! word ─► lattice ─► shortest paths ─► candidates ─► scores ─► winner
//! ```
//!
//! # References
//!
//! - J. Dedina and H. C. Nusbaum, "PRONOUNCE: a program for pronunciation by
//!   analogy", *Computer Speech and Language* 5(1), 1991.
//! - Y. Marchand and R. I. Damper, "A multistrategy approach to improving
//!   pronunciation by analogy", *Computational Linguistics* 26(2), 2000.
//! - Y. Marchand and R. I. Damper, "Can syllabification improve pronunciation
//!   by analogy of English?", *Natural Language Engineering* 13(1), 2006.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{SyllabifyError, SyllabifyResult};
use crate::lexicon::{NO_BREAK, ReferenceEntry, SYLLABLE_BREAK};

pub mod lattice;
pub mod paths;
pub mod scoring;
pub mod search;

pub use lattice::{Lattice, NodeKey};
pub use paths::CandidatePath;
pub use scoring::{PathStatistics, ScoredPath};
pub use search::ShortestPaths;

/// The outcome of syllabifying one word by analogy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Syllabification {
    /// The word as queried.
    pub word: String,
    /// Number of syllables in the winning hyphenation.
    pub syllables: usize,
    /// Winning hyphenation: letters interleaved with `-` (break) and `*`
    /// (no break).
    pub hyphenation: String,
    /// Hop length shared by every candidate path.
    pub path_length: usize,
    /// Number of candidate paths before merging identical hyphenations.
    pub candidates: usize,
    /// Every distinct hyphenation, best first.
    pub ranking: Vec<ScoredPath>,
}

impl Syllabification {
    /// The word split at its syllable boundaries, e.g. `rab-bit`.
    pub fn display_form(&self) -> String {
        self.hyphenation
            .chars()
            .filter(|&c| c != NO_BREAK)
            .collect()
    }
}

/// Count the syllables in a hyphenation string.
pub fn count_breaks(hyphenation: &str) -> usize {
    hyphenation.chars().filter(|&c| c == SYLLABLE_BREAK).count() + 1
}

/// Syllabify `word` against `entries`.
///
/// Returns [`SyllabifyError::NoPathFound`] when no chain of analogous
/// substrings spans the word.
#[tracing::instrument(skip(entries))]
pub fn syllabify<'a>(
    word: &str,
    entries: impl IntoIterator<Item = &'a ReferenceEntry>,
) -> SyllabifyResult<Syllabification> {
    let lattice = Lattice::build(word, entries);
    let search = ShortestPaths::search(&lattice);

    let Some(path_length) = search.distance(&lattice.end()) else {
        tracing::debug!("end boundary unreachable");
        return Err(no_path(word));
    };

    let candidates = paths::enumerate(&lattice, &search);
    let scored = scoring::score(&candidates);
    let Some(winner) = scoring::best(&scored).cloned() else {
        return Err(no_path(word));
    };

    let mut ranking = scored;
    // stable: equal scores keep first-seen order, so the winner stays first
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

    let syllables = count_breaks(&winner.hyphenation);
    tracing::debug!(
        hyphenation = %winner.hyphenation,
        syllables,
        candidates = candidates.len(),
        "syllabified by analogy"
    );

    Ok(Syllabification {
        word: word.to_string(),
        syllables,
        hyphenation: winner.hyphenation,
        path_length,
        candidates: candidates.len(),
        ranking,
    })
}

fn no_path(word: &str) -> SyllabifyError {
    SyllabifyError::NoPathFound {
        word: word.to_string(),
    }
}
