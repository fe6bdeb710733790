//! Count command: exact lookup with analogy fallback.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use sylba_core::config::{Config, ConfigSources};
use sylba_core::{CountSource, SyllableCount, SyllableCounter};

use super::{LexiconArgs, collect_words, open_counter};

/// Arguments for the `count` subcommand.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Words to count.
    #[arg(required_unless_present = "file")]
    pub words: Vec<String>,

    /// Also count every word in FILE.
    #[arg(long, value_name = "FILE")]
    pub file: Option<Utf8PathBuf>,

    /// Print only the total across all words.
    #[arg(long)]
    pub total: bool,

    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

#[derive(Serialize)]
#[serde(untagged)]
enum CountRow {
    Counted(SyllableCount),
    Failed { word: String, error: String },
}

#[derive(Serialize)]
struct CountReport {
    words: Vec<CountRow>,
    total: usize,
    failed: usize,
}

/// Count syllables for each word.
///
/// Words that cannot be syllabified are reported individually; the command
/// fails after printing everything else.
#[instrument(name = "cmd_count", skip_all, fields(words = args.words.len()))]
pub fn cmd_count(
    args: CountArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
    show_progress: bool,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, total = args.total, "executing count command");

    let words = collect_words(&args.words, args.file.as_deref())?;
    let counter = open_counter(&args.lexicon, config, sources, show_progress)?;
    let report = count_words(&counter, &words);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if args.total {
        println!("{}", report.total);
    } else {
        for row in &report.words {
            match row {
                CountRow::Counted(count) => print_count(count),
                CountRow::Failed { word, error } => {
                    eprintln!("{} {word}: {error}", "FAIL:".red());
                }
            }
        }
    }

    if report.failed > 0 {
        bail!(
            "{} of {} words could not be syllabified",
            report.failed,
            report.words.len()
        );
    }
    Ok(())
}

fn count_words(counter: &SyllableCounter, words: &[String]) -> CountReport {
    let mut rows = Vec::with_capacity(words.len());
    let mut total = 0;
    let mut failed = 0;

    for word in words {
        match counter.count(word) {
            Ok(count) => {
                total += count.syllables;
                rows.push(CountRow::Counted(count));
            }
            Err(err) => {
                warn!(word = %word, error = %err, "no syllable count");
                failed += 1;
                rows.push(CountRow::Failed {
                    word: word.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    CountReport {
        words: rows,
        total,
        failed,
    }
}

fn print_count(count: &SyllableCount) {
    match (count.source, &count.hyphenation) {
        (CountSource::Analogy, Some(hyphenation)) => println!(
            "{}: {} {}",
            count.word,
            count.syllables,
            format!("(analogy: {hyphenation})").dimmed()
        ),
        _ => println!("{}: {}", count.word, count.syllables),
    }
}
