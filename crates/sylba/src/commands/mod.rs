//! Command implementations.

use std::time::Duration;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use sylba_core::config::{Config, ConfigSources};
use sylba_core::{LexiconPaths, ReferenceStore, SyllableCounter};

pub mod count;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod syllabify;

/// Reference data overrides shared by every command that counts syllables.
#[derive(Args, Debug, Default, Clone)]
pub struct LexiconArgs {
    /// Syllabified reference lexicon (overrides `lexicon_path` from config).
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<Utf8PathBuf>,

    /// Pronouncing dictionary (overrides `dictionary_path` from config).
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<Utf8PathBuf>,
}

impl LexiconArgs {
    /// Combine command-line overrides with configured paths.
    ///
    /// A `--lexicon` flag replaces the configured lexicon but keeps the
    /// configured dictionary unless `--dictionary` is also given.
    pub fn resolve(
        &self,
        config: &Config,
        sources: &ConfigSources,
    ) -> anyhow::Result<LexiconPaths> {
        let configured = config.lexicon_paths(sources.base_dir());
        let lexicon = match (&self.lexicon, &configured) {
            (Some(path), _) => path.clone(),
            (None, Some(paths)) => paths.lexicon.clone(),
            (None, None) => bail!(
                "no reference lexicon configured; pass --lexicon or set lexicon_path in sylba.toml"
            ),
        };
        let dictionary = self
            .dictionary
            .clone()
            .or_else(|| configured.and_then(|paths| paths.dictionary));
        Ok(LexiconPaths {
            lexicon,
            dictionary,
        })
    }
}

/// Load reference data and build a counter, with a spinner on interactive
/// terminals.
pub fn open_counter(
    args: &LexiconArgs,
    config: &Config,
    sources: &ConfigSources,
    show_progress: bool,
) -> anyhow::Result<SyllableCounter> {
    let paths = args.resolve(config, sources)?;
    debug!(lexicon = %paths.lexicon, dictionary = ?paths.dictionary, "loading reference data");

    let spinner = if show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("loading {}", paths.lexicon));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let store = ReferenceStore::load(&paths);
    spinner.finish_and_clear();
    let store = store.context("failed to load reference data")?;

    Ok(SyllableCounter::new(store).with_max_word_chars(config.max_word_chars))
}

/// Collect words from positional arguments and an optional file.
///
/// File contents are split on whitespace and stripped of surrounding
/// punctuation.
pub fn collect_words(words: &[String], file: Option<&Utf8Path>) -> anyhow::Result<Vec<String>> {
    let mut collected = words.to_vec();
    if let Some(path) = file {
        let content = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("failed to read {path}"))?;
        collected.extend(
            content
                .split_whitespace()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        );
    }
    Ok(collected)
}
