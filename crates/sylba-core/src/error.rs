//! Error types for sylba-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading reference data.
///
/// Reference data is validated eagerly, so every one of these surfaces at
/// load time and never during a query.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A lexicon or dictionary file could not be read.
    #[error("failed to read {path}")]
    Io {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line in a lexicon or dictionary could not be parsed.
    #[error("{origin}:{line}: {reason}")]
    Malformed {
        /// Name of the source being parsed (usually a file path).
        origin: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A boundary-marked reference string is not well formed.
    #[error("invalid reference entry {entry:?}: {reason}")]
    InvalidEntry {
        /// The rejected entry text.
        entry: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that can occur while syllabifying a word.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyllabifyError {
    /// The word shares too little with the reference lexicon for any chain of
    /// analogous substrings to span it.
    #[error("no syllabification found for {word:?}")]
    NoPathFound {
        /// The word that could not be syllabified.
        word: String,
    },

    /// The word is longer than the configured `max_word_chars`.
    #[error("word {word:?} is {len} characters long (limit: {max})")]
    WordTooLong {
        /// The rejected word.
        word: String,
        /// Its length in characters.
        len: usize,
        /// The configured limit.
        max: usize,
    },
}

/// Result type alias using [`SyllabifyError`].
pub type SyllabifyResult<T> = Result<T, SyllabifyError>;
