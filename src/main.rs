//! A small demo CLI for the spellchecker core.
//!
//! Not part of the core's specified surface (spec §1: CLI front ends are
//! out of scope) — this binary only exercises [`spellcore::Dictionary`] end
//! to end: build a dictionary from a word list, check membership, query
//! hints, and round-trip it through the on-disk format.

use std::fs::{self, File};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spellcore::{Dictionary, InsertResult, WordList};

#[derive(Parser)]
#[command(name = "spellcore", about = "Trie-and-rule-engine spellchecker demo")]
struct Cli {
    /// Path to a dictionary file in the core's persisted format.
    #[arg(short, long)]
    dictionary: PathBuf,

    /// Emit machine-readable JSON instead of plain lines.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a fresh dictionary from a newline-delimited word list and save it.
    Build {
        /// Path to a UTF-8 text file, one word per line.
        words: PathBuf,
        #[arg(long, default_value_t = 2)]
        max_cost: i32,
    },
    /// Check whether a word is present.
    Check { word: String },
    /// Query plausible corrections for a word.
    Hints { word: String },
    /// List every word in the dictionary.
    List,
}

/// Courtesy ceiling on single-word queries, matching the reference CLI's own
/// behavior. The core itself has no such limit.
const MAX_QUERY_WORD_LEN: usize = 100;

fn check_word_len(word: &str) -> anyhow::Result<()> {
    let len = word.chars().count();
    if len > MAX_QUERY_WORD_LEN {
        anyhow::bail!("word is {len} code points long, exceeds the {MAX_QUERY_WORD_LEN}-code-point limit");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build { words, max_cost } => {
            let text = fs::read_to_string(&words)?;
            let mut dict = Dictionary::new();
            for word in text.lines().map(str::trim).filter(|w| !w.is_empty()) {
                if dict.insert(word) == InsertResult::AlreadyPresent {
                    log::debug!("{word:?} already present, skipping");
                }
            }
            dict.set_max_cost(max_cost);
            dict.save_to(File::create(&cli.dictionary)?)?;
            println!("built {} ({} words)", cli.dictionary.display(), word_count(&dict));
        }
        Command::Check { word } => {
            check_word_len(&word)?;
            let dict = load(&cli.dictionary)?;
            if dict.has(&word) {
                println!("{word}: known");
            } else {
                println!("{word}: unknown");
            }
        }
        Command::Hints { word } => {
            check_word_len(&word)?;
            let dict = load(&cli.dictionary)?;
            let mut hints = WordList::new();
            dict.hints(&word, &mut hints);
            let collected: Vec<&str> = hints.iter().collect();
            if cli.json {
                println!("{}", serde_json::to_string(&collected)?);
            } else if collected.is_empty() {
                println!("no hints for {word:?}");
            } else {
                for hint in collected {
                    println!("{hint}");
                }
            }
        }
        Command::List => {
            let dict = load(&cli.dictionary)?;
            let mut words = WordList::new();
            dict.enumerate(&mut words);
            words.sort();
            let collected: Vec<&str> = words.iter().collect();
            if cli.json {
                println!("{}", serde_json::to_string(&collected)?);
            } else {
                for word in collected {
                    println!("{word}");
                }
            }
        }
    }

    Ok(())
}

fn load(path: &PathBuf) -> anyhow::Result<Dictionary> {
    Ok(Dictionary::load_from(File::open(path)?)?)
}

fn word_count(dict: &Dictionary) -> usize {
    let mut words = WordList::new();
    dict.enumerate(&mut words);
    words.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_words_over_the_limit() {
        let long_word: String = "a".repeat(MAX_QUERY_WORD_LEN + 1);
        assert!(check_word_len(&long_word).is_err());
    }

    #[test]
    fn accepts_words_at_or_under_the_limit() {
        let word: String = "a".repeat(MAX_QUERY_WORD_LEN);
        assert!(check_word_len(&word).is_ok());
        assert!(check_word_len("jakoś").is_ok());
    }
}
