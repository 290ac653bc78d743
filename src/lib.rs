//! # spellcore
//!
//! A trie-and-rule-engine spellchecker core for rich Unicode orthographies
//! (the reference target is Polish). It answers two questions about a
//! Unicode word: is it in the dictionary, and what plausible corrections
//! exist within a bounded edit cost under a configurable rule set?
//!
//! The crate is organized around a small set of collaborators:
//!
//! - [`trie::Trie`] — the dictionary itself, an insertion-ordered prefix
//!   tree keyed on Unicode code points.
//! - [`rule::Rule`] — a transformation with pattern variables, a cost, and a
//!   flag controlling where it may fire.
//! - [`hint_generator::HintGenerator`] — a bounded-cost breadth-first search
//!   over the trie, driven by the held rule set.
//! - [`dictionary::Dictionary`] — the façade combining the two above, plus
//!   persistence.
//!
//! ## Quick start
//!
//! ```rust
//! use spellcore::{Dictionary, InsertResult};
//!
//! let mut dict = Dictionary::new();
//! assert_eq!(dict.insert("łódka"), InsertResult::Inserted);
//! assert!(dict.has("łódka"));
//! ```
//!
//! I/O is abstracted behind [`io::CharSource`]/[`io::CharSink`] so the core
//! never depends on a concrete stream type; see [`dictionary::Dictionary::save`]
//! and [`dictionary::Dictionary::load`].

pub mod collation;
pub mod dictionary;
pub mod error;
pub mod hint_generator;
pub mod io;
pub mod node;
pub mod ordered_child_map;
pub mod rule;
pub mod state;
pub mod trie;
pub mod word_list;

pub use dictionary::Dictionary;
pub use error::{DictionaryError, Result, RuleRejected};
pub use hint_generator::{HintGenerator, DICTIONARY_MAX_HINTS};
pub use rule::{Rule, RuleFlag};
pub use state::State;
pub use trie::{DeleteResult, InsertResult, Trie};
pub use word_list::{WordList, WordSink};

/// Version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_insert_delete_hint() {
        let mut dict = Dictionary::new();
        for w in ["felin", "fen", "fin", "féin", "mein", "tein"] {
            dict.insert(w);
        }
        dict.set_max_cost(1);
        let alphabet = ['a', 'e', 'i', 'o', 'u', 'ó', 'ł', 'f', 'n', 'm', 't'];
        for &from in &alphabet {
            for &to in &alphabet {
                if from != to {
                    dict.add_rule(&from.to_string(), &to.to_string(), false, 1, RuleFlag::Normal)
                        .unwrap();
                }
            }
        }

        let mut hints = WordList::new();
        dict.hints("fein", &mut hints);
        let collected: Vec<&str> = hints.iter().collect();
        assert_eq!(collected, vec!["féin", "felin", "fen", "fin", "mein", "tein"]);

        assert_eq!(dict.delete("fen"), crate::trie::DeleteResult::Deleted);
        assert!(!dict.has("fen"));
    }
}
