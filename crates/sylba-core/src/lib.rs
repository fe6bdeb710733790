//! Core library for sylba.
//!
//! Counts syllables in English words. Known words come straight from a
//! lookup table; unknown words are syllabified by analogy with a lexicon
//! whose syllable boundaries are known.
//!
//! # Modules
//!
//! - [`lexicon`] - Reference data loading and the exact-count table
//! - [`analogy`] - Lattice construction, shortest paths and scoring
//! - [`counter`] - The query interface combining both
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use sylba_core::{ReferenceStore, SyllableCounter};
//!
//! let lexicon = "\
//! cat k@t >1< 0
//! bats b@ts >1<< 0
//! rabbit r@bIt >1<>0< 0
//! ";
//! let store = ReferenceStore::from_sources(lexicon, None).unwrap();
//! let counter = SyllableCounter::new(store);
//!
//! assert_eq!(counter.count_syllables("rabbit").unwrap(), 2);
//! let result = counter.syllabify("cats").unwrap();
//! assert_eq!(result.syllables, 1);
//! ```
#![deny(unsafe_code)]

pub mod analogy;
pub mod config;
pub mod counter;
pub mod error;
pub mod lexicon;

pub use analogy::Syllabification;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use counter::{CountSource, SyllableCount, SyllableCounter};
pub use error::{
    ConfigError, ConfigResult, LexiconError, LexiconResult, SyllabifyError, SyllabifyResult,
};
pub use lexicon::{LexiconPaths, ReferenceEntry, ReferenceStore};
