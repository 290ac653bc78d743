//! The public façade: a trie plus its rule-driven hint generator (spec §4.7).
//!
//! Grounded on `original_source/src/dictionary/dictionary.c` for the overall
//! shape (owns both collaborators, wires the generator to the trie's root on
//! construction and after load) and on the teacher's `Tokenizer::new`/
//! `Tokenizer::with_arc` pattern for how a façade type bundles and exposes
//! its owned collaborators.

use log::{debug, warn};

use crate::error::{DictionaryError, Result, RuleRejected};
use crate::hint_generator::HintGenerator;
use crate::io::{CharSink, CharSource};
use crate::rule::{Rule, RuleFlag};
use crate::trie::{DeleteResult, InsertResult, Trie};
use crate::word_list::WordSink;

/// Bundles an owned [`Trie`] and [`HintGenerator`] behind the operations a
/// caller needs: membership, hinting, rule administration, persistence.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    trie: Trie,
    generator: HintGenerator,
}

impl Dictionary {
    /// An empty dictionary with no rules and `max_cost = 0`.
    pub fn new() -> Self {
        Dictionary {
            trie: Trie::new(),
            generator: HintGenerator::new(),
        }
    }

    pub fn insert(&mut self, word: &str) -> InsertResult {
        let result = self.trie.insert(word);
        debug!("insert {word:?} -> {result:?}");
        result
    }

    pub fn delete(&mut self, word: &str) -> DeleteResult {
        let result = self.trie.delete(word);
        debug!("delete {word:?} -> {result:?}");
        result
    }

    pub fn has(&self, word: &str) -> bool {
        self.trie.has(word)
    }

    /// Emits every stored word exactly once into `sink`.
    pub fn enumerate(&self, sink: &mut impl WordSink) {
        self.trie.enumerate(sink);
    }

    /// Runs the bounded-cost hint search for `word`, writing results to `sink`.
    pub fn hints(&self, word: &str, sink: &mut impl WordSink) {
        self.generator.hints(word, &self.trie, sink);
    }

    pub fn set_max_cost(&mut self, cost: i32) -> i32 {
        self.generator.set_max_cost(cost)
    }

    pub fn max_cost(&self) -> i32 {
        self.generator.max_cost()
    }

    pub fn clear_rules(&mut self) {
        self.generator.clear_rules();
    }

    pub fn rules(&self) -> &[Rule] {
        self.generator.rules()
    }

    /// Adds a rule `left -> right` at `cost` with `flag`. When `bidirectional`
    /// is set, also attempts `right -> left`. At least one legal direction
    /// must be added; the number of directions actually added (1 or 2) is
    /// returned, or [`RuleRejected`] if neither direction is legal.
    pub fn add_rule(
        &mut self,
        left: &str,
        right: &str,
        bidirectional: bool,
        cost: i32,
        flag: RuleFlag,
    ) -> std::result::Result<u8, RuleRejected> {
        let forward = Rule::new(left, right, cost, flag);
        let mut added = 0u8;

        if forward.is_legal() {
            self.generator.add_rule(forward);
            added += 1;
        }

        if bidirectional {
            let backward = Rule::new(right, left, cost, flag);
            if backward.is_legal() {
                self.generator.add_rule(backward);
                added += 1;
            }
        }

        if added == 0 {
            warn!("rejected rule {left:?} -> {right:?} (bidirectional={bidirectional}): not legal in either direction");
            return Err(RuleRejected);
        }

        Ok(added)
    }

    /// Saves the trie segment followed by the generator header and rule list.
    pub fn save(&self, sink: &mut impl CharSink) -> Result<()> {
        self.trie.save(sink)?;
        self.generator.save(sink)?;
        Ok(())
    }

    /// Loads a dictionary from the bit-exact format (spec §6.2). On failure,
    /// no partial state is returned.
    pub fn load(source: &mut impl CharSource) -> Result<Dictionary> {
        let trie = Trie::load(source)?;
        let generator = HintGenerator::load(source)?;
        Ok(Dictionary { trie, generator })
    }

    /// Convenience: loads straight from an in-memory string.
    pub fn load_from_str(text: &str) -> Result<Dictionary> {
        let mut source = crate::io::StrCharSource::new(text);
        Dictionary::load(&mut source)
    }

    /// Convenience: saves to an owned `String`.
    pub fn save_to_string(&self) -> Result<String> {
        let mut sink = crate::io::StringCharSink::default();
        self.save(&mut sink)?;
        Ok(sink.buffer)
    }

    /// Convenience: loads from any byte-oriented reader (e.g. an open `File`).
    pub fn load_from(reader: impl std::io::Read) -> Result<Dictionary> {
        let mut source = crate::io::ReadCharSource::new(reader);
        Dictionary::load(&mut source)
    }

    /// Convenience: saves to any byte-oriented writer (e.g. an open `File`).
    pub fn save_to(&self, writer: impl std::io::Write) -> Result<()> {
        let mut sink = crate::io::WriteCharSink::new(writer);
        self.save(&mut sink)
    }

    /// The maximum length, in code points, of any word ever inserted.
    pub fn longest_ever(&self) -> usize {
        self.trie.longest_ever()
    }
}
