//! A search node in hint generation (spec §3, §4.6).
//!
//! Grounded on `original_source/src/dictionary/state.h`. The reference keeps
//! `sufix` as a `wchar_t *` pointing into the query word plus a length; since
//! every state produced during one query shares the same query word buffer,
//! this is represented here as `suffix_len` alone — the actual characters are
//! always `word[word.len() - suffix_len..]` for the query word under search.

use crate::node::NodeId;

/// One node of the bounded-cost search frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Current trie position.
    pub node: NodeId,
    /// The terminal node of the first word of a split hint, if this search
    /// has already committed to a split.
    pub prev: Option<NodeId>,
    /// Length of the remaining (unconsumed) tail of the query word.
    pub suffix_len: usize,
    /// Accumulated rule cost to reach this state.
    pub cost: i32,
    /// Whether this state may still be greedily extended for free.
    pub expandable: bool,
}

impl State {
    pub fn initial(root: NodeId, word_len: usize) -> Self {
        State {
            node: root,
            prev: None,
            suffix_len: word_len,
            cost: 0,
            expandable: true,
        }
    }

    /// The full-relation dedup key used for frontier deduplication (spec §9).
    pub fn full_key(&self) -> (NodeId, Option<NodeId>, usize, bool) {
        (self.node, self.prev, self.suffix_len, self.expandable)
    }

    /// The hint-relation dedup key used for counting unique completed hints.
    pub fn hint_key(&self) -> (NodeId, Option<NodeId>) {
        (self.node, self.prev)
    }

    pub fn is_terminal(&self, is_word: bool) -> bool {
        is_word && self.suffix_len == 0
    }
}
