//! Transformation rules with pattern variables (spec §3, §4.4).
//!
//! Grounded on `original_source/src/dictionary/rule.h`/`rule.c` for the data
//! shape, legality predicate, and serialization format; the retrieved
//! revision of `rule.c` predates `rule_apply`/`rule_matches_prefix`, so those
//! two algorithms are implemented directly from the specification's
//! step-by-step description rather than ported from C (see DESIGN.md).

use std::collections::HashSet;

use crate::error::{DictionaryError, Result};
use crate::io::{CharSink, CharSource};
use crate::node::NodeId;
use crate::state::State;
use crate::trie::Trie;

/// One element of a rule pattern: either a literal code point, or a pattern
/// variable (an ASCII digit `0`..`9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternElem {
    Literal(char),
    Variable(u8),
}

/// Where in the query a rule may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFlag {
    Normal = 0,
    Begin = 1,
    End = 2,
    Split = 3,
}

impl RuleFlag {
    fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RuleFlag::Normal),
            1 => Some(RuleFlag::Begin),
            2 => Some(RuleFlag::End),
            3 => Some(RuleFlag::Split),
            _ => None,
        }
    }

    fn code(self) -> i32 {
        self as i32
    }
}

fn parse_pattern(s: &str) -> Vec<PatternElem> {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PatternElem::Variable(d as u8),
            _ => PatternElem::Literal(c),
        })
        .collect()
}

fn pattern_to_string(pattern: &[PatternElem]) -> String {
    pattern
        .iter()
        .map(|elem| match elem {
            PatternElem::Literal(c) => *c,
            PatternElem::Variable(v) => std::char::from_digit(*v as u32, 10).unwrap(),
        })
        .collect()
}

fn pattern_vars(pattern: &[PatternElem]) -> HashSet<u8> {
    pattern
        .iter()
        .filter_map(|elem| match elem {
            PatternElem::Variable(v) => Some(*v),
            PatternElem::Literal(_) => None,
        })
        .collect()
}

/// An immutable transformation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    left: Vec<PatternElem>,
    right: Vec<PatternElem>,
    cost: i32,
    flag: RuleFlag,
}

impl Rule {
    pub fn new(left: &str, right: &str, cost: i32, flag: RuleFlag) -> Self {
        Rule {
            left: parse_pattern(left),
            right: parse_pattern(right),
            cost,
            flag,
        }
    }

    pub fn left(&self) -> String {
        pattern_to_string(&self.left)
    }

    pub fn right(&self) -> String {
        pattern_to_string(&self.right)
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn flag(&self) -> RuleFlag {
        self.flag
    }

    /// A pattern is legal only if the variables appearing *only* on the
    /// right side number at most one (the free variable), and a rule whose
    /// both sides are empty must carry `Split`.
    pub fn is_legal(&self) -> bool {
        let left_vars = pattern_vars(&self.left);
        let right_vars = pattern_vars(&self.right);
        let free_vars = right_vars.difference(&left_vars).count();
        if free_vars > 1 {
            return false;
        }
        if self.left.is_empty() && self.right.is_empty() && self.flag != RuleFlag::Split {
            return false;
        }
        true
    }

    /// Whether `self.left` matches the start of `text`, with pattern
    /// variables bound consistently. `_is_start` is accepted but, per the
    /// reference's own unused parameter, not consulted here.
    pub fn matches_prefix(&self, _is_start: bool, text: &[char]) -> bool {
        if text.len() < self.left.len() {
            return false;
        }
        let mut bindings: [Option<char>; 10] = [None; 10];
        for (i, elem) in self.left.iter().enumerate() {
            match elem {
                PatternElem::Literal(c) => {
                    if text[i] != *c {
                        return false;
                    }
                }
                PatternElem::Variable(v) => match bindings[*v as usize] {
                    Some(bound) if bound != text[i] => return false,
                    Some(_) => {}
                    None => bindings[*v as usize] = Some(text[i]),
                },
            }
        }
        true
    }

    /// Produces the successor states reached by applying this rule to
    /// `state`, whose remaining query suffix is `suffix`.
    pub fn apply(&self, state: &State, suffix: &[char], trie: &Trie) -> Vec<State> {
        let root = trie.root_id();

        match self.flag {
            RuleFlag::Begin => {
                if state.prev.is_some() || state.node != root {
                    return Vec::new();
                }
            }
            RuleFlag::Split => {
                // Split may fire wherever the search has already walked to
                // (e.g. the terminal node of the first word of the split),
                // as long as no split has been committed to yet.
                if state.prev.is_some() {
                    return Vec::new();
                }
            }
            RuleFlag::Normal | RuleFlag::End => {}
        }

        if suffix.len() < self.left.len() {
            return Vec::new();
        }

        let mut bindings: [Option<char>; 10] = [None; 10];
        for (i, elem) in self.left.iter().enumerate() {
            match elem {
                PatternElem::Literal(c) => {
                    if suffix[i] != *c {
                        return Vec::new();
                    }
                }
                PatternElem::Variable(v) => match bindings[*v as usize] {
                    Some(bound) if bound != suffix[i] => return Vec::new(),
                    Some(_) => {}
                    None => bindings[*v as usize] = Some(suffix[i]),
                },
            }
        }

        let mut reached = Vec::new();
        walk_right(trie, &self.right, 0, state.node, &mut bindings, &mut reached);

        let new_suffix_len = state.suffix_len - self.left.len();
        let new_cost = state.cost + self.cost;
        let expandable = self.flag != RuleFlag::End;

        reached
            .into_iter()
            .filter_map(|n| match self.flag {
                RuleFlag::Split => {
                    if trie.node(n).is_word() {
                        Some(State {
                            node: root,
                            prev: Some(n),
                            suffix_len: new_suffix_len,
                            cost: new_cost,
                            expandable,
                        })
                    } else {
                        None
                    }
                }
                _ => Some(State {
                    node: n,
                    prev: state.prev,
                    suffix_len: new_suffix_len,
                    cost: new_cost,
                    expandable,
                }),
            })
            .collect()
    }

    /// Saves this rule as `left*right*cost*flag\n`.
    pub fn save(&self, sink: &mut impl CharSink) -> Result<()> {
        sink.write_str(&self.left())?;
        sink.write_str("*")?;
        sink.write_str(&self.right())?;
        sink.write_str("*")?;
        sink.write_str(&self.cost.to_string())?;
        sink.write_str("*")?;
        sink.write_str(&self.flag.code().to_string())?;
        sink.write_str("\n")?;
        Ok(())
    }

    /// Loads a single `left*right*cost*flag\n` record.
    pub fn load(source: &mut impl CharSource) -> Result<Rule> {
        let left = read_field(source)?;
        let right = read_field(source)?;
        let (line, column) = (source.line(), source.column());
        let cost_str = read_field(source)?;
        let cost: i32 = cost_str
            .parse()
            .ok()
            .filter(|c| *c >= 0)
            .ok_or(DictionaryError::MalformedInt { line, column })?;

        let (line, column) = (source.line(), source.column());
        let flag_str = read_last_field(source)?;
        let flag_code: i32 = flag_str
            .parse()
            .map_err(|_| DictionaryError::MalformedInt { line, column })?;
        let flag = RuleFlag::from_code(flag_code)
            .ok_or(DictionaryError::MalformedRule { line, column })?;

        Ok(Rule::new(&left, &right, cost, flag))
    }
}

/// Reads characters up to (and consuming) the next `*`.
fn read_field(source: &mut impl CharSource) -> Result<String> {
    let mut field = String::new();
    loop {
        let (line, column) = (source.line(), source.column());
        match source.next() {
            Some('*') => return Ok(field),
            Some(c) => field.push(c),
            None => return Err(DictionaryError::MalformedRule { line, column }),
        }
    }
}

/// Reads characters up to (and consuming) the terminating `\n`.
fn read_last_field(source: &mut impl CharSource) -> Result<String> {
    let mut field = String::new();
    loop {
        let (line, column) = (source.line(), source.column());
        match source.next() {
            Some('\n') => return Ok(field),
            Some(c) => field.push(c),
            None => return Err(DictionaryError::MalformedRule { line, column }),
        }
    }
}

/// Walks the right pattern from `current`, branching over every child at a
/// free (unbound) variable position and following a single specific child
/// everywhere else. Accumulates every trie node reached at full pattern
/// length into `out`.
fn walk_right(
    trie: &Trie,
    pattern: &[PatternElem],
    idx: usize,
    current: NodeId,
    bindings: &mut [Option<char>; 10],
    out: &mut Vec<NodeId>,
) {
    if idx == pattern.len() {
        out.push(current);
        return;
    }
    match pattern[idx] {
        PatternElem::Literal(c) => {
            if let Some(child) = trie.child(current, c) {
                walk_right(trie, pattern, idx + 1, child, bindings, out);
            }
        }
        PatternElem::Variable(v) => {
            if let Some(bound) = bindings[v as usize] {
                if let Some(child) = trie.child(current, bound) {
                    walk_right(trie, pattern, idx + 1, child, bindings, out);
                }
            } else {
                for (key, child) in trie.children(current) {
                    bindings[v as usize] = Some(key);
                    walk_right(trie, pattern, idx + 1, child, bindings, out);
                }
                bindings[v as usize] = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StrCharSource;

    #[test]
    fn legal_rule_allows_one_free_variable() {
        let rule = Rule::new("a", "0", 1, RuleFlag::Normal);
        assert!(rule.is_legal());
    }

    #[test]
    fn illegal_rule_rejects_two_free_variables() {
        let rule = Rule::new("a", "01", 1, RuleFlag::Normal);
        assert!(!rule.is_legal());
    }

    #[test]
    fn empty_both_sides_requires_split() {
        let normal = Rule::new("", "", 1, RuleFlag::Normal);
        assert!(!normal.is_legal());
        let split = Rule::new("", "", 1, RuleFlag::Split);
        assert!(split.is_legal());
    }

    #[test]
    fn matches_prefix_binds_variable_consistently() {
        let rule = Rule::new("00", "0", 1, RuleFlag::Normal);
        assert!(rule.matches_prefix(true, &['a', 'a', 'b']));
        assert!(!rule.matches_prefix(true, &['a', 'b', 'c']));
    }

    #[test]
    fn apply_single_character_substitution() {
        let mut trie = Trie::new();
        trie.insert("fin");
        let rule = Rule::new("e", "i", 1, RuleFlag::Normal);
        let word: Vec<char> = "fein".chars().collect();
        let suffix = &word[1..];
        let state = State {
            node: trie.child(trie.root_id(), 'f').unwrap(),
            prev: None,
            suffix_len: suffix.len(),
            cost: 0,
            expandable: true,
        };
        let results = rule.apply(&state, suffix, &trie);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].suffix_len, suffix.len() - 1);
        assert_eq!(results[0].cost, 1);
    }

    #[test]
    fn apply_free_variable_fans_out_over_children() {
        let mut trie = Trie::new();
        trie.insert("fan");
        trie.insert("fin");
        let rule = Rule::new("e", "0", 1, RuleFlag::Normal);
        let word: Vec<char> = "fen".chars().collect();
        let suffix = &word[1..];
        let state = State {
            node: trie.child(trie.root_id(), 'f').unwrap(),
            prev: None,
            suffix_len: suffix.len(),
            cost: 0,
            expandable: true,
        };
        let results = rule.apply(&state, suffix, &trie);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn begin_rule_only_fires_at_root_with_no_prev() {
        let mut trie = Trie::new();
        trie.insert("bx");
        let rule = Rule::new("a", "b", 1, RuleFlag::Begin);
        let word: Vec<char> = "ax".chars().collect();

        let at_root = State {
            node: trie.root_id(),
            prev: None,
            suffix_len: word.len(),
            cost: 0,
            expandable: true,
        };
        assert_eq!(rule.apply(&at_root, &word, &trie).len(), 1);

        let child = trie.child(trie.root_id(), 'a');
        let not_root = State {
            node: child.unwrap_or(trie.root_id()),
            prev: None,
            suffix_len: word.len(),
            cost: 0,
            expandable: true,
        };
        assert_eq!(rule.apply(&not_root, &word, &trie).len(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let rule = Rule::new("ab", "c", 2, RuleFlag::End);
        let mut sink = crate::io::StringCharSink::default();
        rule.save(&mut sink).unwrap();
        assert_eq!(sink.buffer, "ab*c*2*2\n");

        let mut source = StrCharSource::new(&sink.buffer);
        let loaded = Rule::load(&mut source).unwrap();
        assert_eq!(loaded, rule);
    }

    #[test]
    fn load_rejects_negative_cost() {
        let mut source = StrCharSource::new("a*b*-1*0\n");
        assert!(Rule::load(&mut source).is_err());
    }

    #[test]
    fn load_rejects_empty_cost_field() {
        let mut source = StrCharSource::new("a*b**0\n");
        assert!(Rule::load(&mut source).is_err());
    }
}
