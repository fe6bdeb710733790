//! Syllabify command: show the analogy result and its ranking.

use anyhow::bail;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use sylba_core::config::{Config, ConfigSources};
use sylba_core::{Syllabification, SyllableCounter};

use super::{LexiconArgs, open_counter};

/// Arguments for the `syllabify` subcommand.
#[derive(Args, Debug)]
pub struct SyllabifyArgs {
    /// Words to syllabify.
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Show the N best-scoring hyphenations for each word.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub top: usize,

    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

#[derive(Serialize)]
#[serde(untagged)]
enum SyllabifyRow {
    Done(Syllabification),
    Failed { word: String, error: String },
}

/// Syllabify each word by analogy, ignoring the exact-count table.
#[instrument(name = "cmd_syllabify", skip_all, fields(words = args.words.len(), top = args.top))]
pub fn cmd_syllabify(
    args: SyllabifyArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
    show_progress: bool,
) -> anyhow::Result<()> {
    debug!("executing syllabify command");

    let counter = open_counter(&args.lexicon, config, sources, show_progress)?;
    let rows = syllabify_words(&counter, &args.words, args.top);
    let failed = rows
        .iter()
        .filter(|row| matches!(row, SyllabifyRow::Failed { .. }))
        .count();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            match row {
                SyllabifyRow::Done(result) => print_result(result),
                SyllabifyRow::Failed { word, error } => {
                    eprintln!("{} {word}: {error}", "FAIL:".red());
                }
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} words could not be syllabified", rows.len());
    }
    Ok(())
}

fn syllabify_words(counter: &SyllableCounter, words: &[String], top: usize) -> Vec<SyllabifyRow> {
    words
        .iter()
        .map(|word| match counter.syllabify(word) {
            Ok(mut result) => {
                result.ranking.truncate(top.max(1));
                SyllabifyRow::Done(result)
            }
            Err(err) => {
                warn!(word = %word, error = %err, "syllabification failed");
                SyllabifyRow::Failed {
                    word: word.clone(),
                    error: err.to_string(),
                }
            }
        })
        .collect()
}

fn print_result(result: &Syllabification) {
    println!(
        "{}: {} ({} syllables)",
        result.word,
        result.display_form().bold(),
        result.syllables
    );
    if result.ranking.len() > 1 {
        for (rank, scored) in result.ranking.iter().enumerate() {
            println!(
                "  {}. {} {}",
                rank + 1,
                scored.hyphenation,
                format!("score {:.1}", scored.score).dimmed()
            );
        }
    }
}
