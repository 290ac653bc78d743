//! Bounded-cost breadth-first hint search (spec §4.6) — the central algorithm.
//!
//! Grounded on `original_source/src/dictionary/hints_generator.h` for the
//! administrative surface (`clear_rules`/`add_rule`/`set_max_cost`); the
//! retrieved `hints_generator.c` revision predates the query algorithm
//! itself, so the level-synchronous search below follows the specification's
//! step-by-step description directly.

use std::collections::HashSet;

use log::trace;

use crate::collation;
use crate::error::{DictionaryError, Result};
use crate::io::{CharSink, CharSource};
use crate::node::NodeId;
use crate::rule::Rule;
use crate::state::State;
use crate::trie::Trie;
use crate::word_list::WordSink;

/// Ceiling on the number of hints emitted per query.
pub const DICTIONARY_MAX_HINTS: usize = 30;

/// Owns the held rule set and drives [`HintGenerator::hints`] against a
/// borrowed trie. Per the design notes, the generator never owns the trie —
/// the façade ([`crate::dictionary::Dictionary`]) is the sole owner and lends
/// its root into every call.
#[derive(Debug, Clone, Default)]
pub struct HintGenerator {
    rules: Vec<Rule>,
    max_cost: i32,
    max_rule_cost: i32,
}

impl HintGenerator {
    pub fn new() -> Self {
        HintGenerator {
            rules: Vec::new(),
            max_cost: 0,
            max_rule_cost: 0,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn max_cost(&self) -> i32 {
        self.max_cost
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
        self.max_rule_cost = 0;
    }

    /// Adds `rule` to the held set, updating `max_rule_cost` if needed.
    pub fn add_rule(&mut self, rule: Rule) {
        if rule.cost() > self.max_rule_cost {
            self.max_rule_cost = rule.cost();
        }
        self.rules.push(rule);
    }

    /// Sets a new cost ceiling, returning the previous one.
    pub fn set_max_cost(&mut self, cost: i32) -> i32 {
        std::mem::replace(&mut self.max_cost, cost)
    }

    /// Runs a bounded-cost breadth-first search for plausible corrections of
    /// `word`, emitting at most [`DICTIONARY_MAX_HINTS`] strings to `sink`.
    pub fn hints(&self, word: &str, trie: &Trie, sink: &mut impl WordSink) {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let root = trie.root_id();

        let word_rules = self.prematch(&chars);

        let mut states: Vec<State> = Vec::new();
        seed(&mut states, State::initial(root, n), trie, &chars);

        let mut hint_keys = terminal_hint_keys(&states, trie);

        // Start at k=0 so cost-0 rules get a chance to fire: every state
        // present before iteration k was reached at cost <= k, so k=1..
        // alone would make `rem = k - s.cost` provably >= 1 and word_rules[0]
        // (cost-0 rules) structurally unreachable.
        let mut k: i32 = 0;
        while k <= self.max_cost && hint_keys.len() < DICTIONARY_MAX_HINTS {
            let mut produced = Vec::new();
            for s in &states {
                let rem = k - s.cost;
                if rem < 0 || rem as usize >= word_rules.len() {
                    continue;
                }
                let suffix_start = n - s.suffix_len;
                let suffix = &chars[suffix_start..];
                for &rule_idx in &word_rules[rem as usize][s.suffix_len] {
                    for next in self.rules[rule_idx].apply(s, suffix, trie) {
                        seed(&mut produced, next, trie, &chars);
                    }
                }
            }
            states.extend(produced);
            dedup_full(&mut states);
            hint_keys = terminal_hint_keys(&states, trie);
            trace!("hint search level {k}: {} states, {} hints", states.len(), hint_keys.len());
            k += 1;
        }

        self.materialize(&states, trie, sink);
    }

    /// Builds `word_rules[cost][suffix_len]`: for each rule and each suffix
    /// start position `j`, records the rule under `[cost][n-j]` iff the
    /// rule's left side matches `word[j..]`.
    fn prematch(&self, chars: &[char]) -> Vec<Vec<Vec<usize>>> {
        let n = chars.len();
        let max_cost_idx = self.max_rule_cost.max(0) as usize;
        let mut word_rules = vec![vec![Vec::new(); n + 1]; max_cost_idx + 1];

        for (idx, rule) in self.rules.iter().enumerate() {
            let cost = rule.cost();
            if cost < 0 || cost as usize > max_cost_idx {
                continue;
            }
            for j in 0..=n {
                if rule.matches_prefix(j == 0, &chars[j..]) {
                    word_rules[cost as usize][n - j].push(idx);
                }
            }
        }

        word_rules
    }

    /// Collects the unique, sorted, capped hint strings from the final
    /// search frontier.
    fn materialize(&self, states: &[State], trie: &Trie, sink: &mut impl WordSink) {
        let mut seen_hint_keys: HashSet<(NodeId, Option<NodeId>)> = HashSet::new();
        let mut hints: Vec<(i32, String)> = Vec::new();

        for s in states {
            if !s.is_terminal(trie.node(s.node).is_word()) {
                continue;
            }
            if !seen_hint_keys.insert(s.hint_key()) {
                continue;
            }
            hints.push((s.cost, materialize_text(trie, s)));
        }

        hints.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| collation::compare(&a.1, &b.1)));

        let mut last: Option<String> = None;
        let mut emitted = 0usize;
        for (_, text) in hints {
            if emitted >= DICTIONARY_MAX_HINTS {
                break;
            }
            if last.as_deref() == Some(text.as_str()) {
                continue;
            }
            sink.add(&text);
            last = Some(text);
            emitted += 1;
        }
    }

    /// Saves the generator header (`max_cost`) followed by every held rule.
    pub fn save(&self, sink: &mut impl CharSink) -> Result<()> {
        sink.write_str(&self.max_cost.to_string())?;
        sink.write_str("\n")?;
        for rule in &self.rules {
            rule.save(sink)?;
        }
        Ok(())
    }

    /// Loads a generator header and its rule records, up to end of stream.
    pub fn load(source: &mut impl CharSource) -> Result<HintGenerator> {
        let mut digits = String::new();
        let (line, column) = (source.line(), source.column());
        loop {
            match source.next() {
                Some('\n') => break,
                Some(c) => digits.push(c),
                None => return Err(DictionaryError::MalformedInt { line, column }),
            }
        }
        let max_cost: i32 = digits
            .parse()
            .ok()
            .filter(|c| *c >= 0)
            .ok_or(DictionaryError::MalformedInt { line, column })?;

        let mut generator = HintGenerator {
            rules: Vec::new(),
            max_cost,
            max_rule_cost: 0,
        };

        while source.peek().is_some() {
            let rule = Rule::load(source)?;
            generator.add_rule(rule);
        }

        Ok(generator)
    }
}

/// Greedily extends `state` by zero-cost descents while expandable, adding
/// every chain state including `state` itself to `out`.
fn seed(out: &mut Vec<State>, mut state: State, trie: &Trie, chars: &[char]) {
    out.push(state);
    while state.expandable && state.suffix_len > 0 {
        let next_char = chars[chars.len() - state.suffix_len];
        match trie.child(state.node, next_char) {
            Some(child) => {
                state = State {
                    node: child,
                    suffix_len: state.suffix_len - 1,
                    ..state
                };
                out.push(state);
            }
            None => break,
        }
    }
}

/// Deduplicates the frontier under the full relation, keeping the
/// earliest-inserted representative of each key.
fn dedup_full(states: &mut Vec<State>) {
    let mut seen = HashSet::new();
    states.retain(|s| seen.insert(s.full_key()));
}

fn terminal_hint_keys(states: &[State], trie: &Trie) -> HashSet<(NodeId, Option<NodeId>)> {
    states
        .iter()
        .filter(|s| s.is_terminal(trie.node(s.node).is_word()))
        .map(State::hint_key)
        .collect()
}

fn materialize_text(trie: &Trie, s: &State) -> String {
    match s.prev {
        Some(p) => format!("{} {}", trie.word_at(p), trie.word_at(s.node)),
        None => trie.word_at(s.node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleFlag;
    use crate::word_list::WordList;

    fn substitution_rules() -> Vec<Rule> {
        let mut rules = Vec::new();
        let alphabet = ['a', 'e', 'i', 'o', 'u', 'ó', 'ł', 'f', 'n', 'm', 't'];
        for &from in &alphabet {
            for &to in &alphabet {
                if from != to {
                    rules.push(Rule::new(&from.to_string(), &to.to_string(), 1, RuleFlag::Normal));
                }
            }
        }
        rules
    }

    #[test]
    fn hint_set_matches_reference_scenario() {
        let mut trie = Trie::new();
        for w in ["felin", "fen", "fin", "féin", "mein", "tein"] {
            trie.insert(w);
        }
        let mut gen = HintGenerator::new();
        gen.set_max_cost(1);
        for rule in substitution_rules() {
            gen.add_rule(rule);
        }

        let mut out = WordList::new();
        gen.hints("fein", &trie, &mut out);
        let hints: Vec<&str> = out.iter().collect();
        assert_eq!(hints, vec!["féin", "felin", "fen", "fin", "mein", "tein"]);
    }

    #[test]
    fn hints_capped_and_never_exceed_max_cost() {
        let mut trie = Trie::new();
        trie.insert("kot");
        let gen = HintGenerator::new();
        let mut out = WordList::new();
        gen.hints("kot", &trie, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(0), Some("kot"));
    }

    #[test]
    fn split_hint_combines_two_words_with_a_space() {
        let mut trie = Trie::new();
        trie.insert("jak");
        trie.insert("oś");

        let mut gen = HintGenerator::new();
        gen.set_max_cost(1);
        gen.add_rule(Rule::new("", "", 1, RuleFlag::Split));
        for c in ['j', 'a', 'k', 'o', 'ś'] {
            gen.add_rule(Rule::new(&c.to_string(), &c.to_string(), 0, RuleFlag::Normal));
        }

        let mut out = WordList::new();
        gen.hints("jakoś", &trie, &mut out);
        let hints: Vec<&str> = out.iter().collect();
        assert!(hints.contains(&"jak oś"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut gen = HintGenerator::new();
        gen.set_max_cost(3);
        gen.add_rule(Rule::new("a", "b", 1, RuleFlag::Normal));
        gen.add_rule(Rule::new("", "", 2, RuleFlag::Split));

        let mut sink = crate::io::StringCharSink::default();
        gen.save(&mut sink).unwrap();

        let mut source = crate::io::StrCharSource::new(&sink.buffer);
        let loaded = HintGenerator::load(&mut source).unwrap();
        assert_eq!(loaded.max_cost(), 3);
        assert_eq!(loaded.rules().len(), 2);
    }
}
