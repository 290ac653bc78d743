//! The dictionary trie (spec §4.3).
//!
//! Grounded on `original_source/src/dictionary/trie.c`: insertion walks/creates
//! a node per code point; deletion clears the terminal flag and then prunes
//! upward (`remove_non_words`/`can_remove`); `has`/enumerate/save/load mirror
//! `trie_has_word`/`trie_to_word_list`/`trie_save`/`trie_load` respectively.
//! Ownership is reworked into an arena (see `node.rs`) in place of the
//! reference's recursive owning-pointer tree.

use crate::error::{DictionaryError, Result};
use crate::io::{CharSink, CharSource};
use crate::node::{Node, NodeId, ROOT_KEY};
use crate::word_list::WordSink;

/// Result of [`Trie::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Inserted,
    AlreadyPresent,
}

/// Result of [`Trie::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    Deleted,
    NotPresent,
}

/// An insertion-ordered prefix tree keyed on Unicode code points.
#[derive(Debug, Clone)]
pub struct Trie {
    arena: Vec<Option<Node>>,
    free: Vec<usize>,
    longest_ever: usize,
}

const ROOT: NodeId = NodeId(0);

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates an empty trie with just the sentinel root.
    pub fn new() -> Self {
        Trie {
            arena: vec![Some(Node::new(ROOT_KEY, None))],
            free: Vec::new(),
            longest_ever: 0,
        }
    }

    /// The root's arena id, exposed for the rule engine's traversal.
    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    /// The longest word ever inserted (never decreases, even across deletes).
    pub fn longest_ever(&self) -> usize {
        self.longest_ever
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena[id.0].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena[id.0].as_mut().expect("dangling NodeId")
    }

    /// The child of `id` keyed by `c`, if any.
    pub fn child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self.node(id).children.find(c).copied()
    }

    /// Iterates over `id`'s children in key order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.node(id).children.iter().map(|(k, v)| (k, *v))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(idx) = self.free.pop() {
            self.arena[idx] = Some(node);
            NodeId(idx)
        } else {
            self.arena.push(Some(node));
            NodeId(self.arena.len() - 1)
        }
    }

    fn free_node(&mut self, id: NodeId) {
        self.arena[id.0] = None;
        self.free.push(id.0);
    }

    fn add_child(&mut self, parent: NodeId, c: char) -> NodeId {
        if let Some(existing) = self.child(parent, c) {
            return existing;
        }
        let child = self.alloc(Node::new(c, Some(parent)));
        self.node_mut(parent).children.insert(c, child);
        child
    }

    /// Walks the full path for `word`, returning the terminal node if every
    /// code point is present, without creating anything.
    fn walk(&self, word: &str) -> Option<NodeId> {
        let mut current = ROOT;
        for c in word.chars() {
            current = self.child(current, c)?;
        }
        Some(current)
    }

    /// Inserts `word`, creating nodes as needed.
    pub fn insert(&mut self, word: &str) -> InsertResult {
        let mut current = ROOT;
        for c in word.chars() {
            current = self.add_child(current, c);
        }

        if self.node(current).is_word {
            return InsertResult::AlreadyPresent;
        }

        self.node_mut(current).is_word = true;
        let len = word.chars().count();
        if len > self.longest_ever {
            self.longest_ever = len;
        }
        InsertResult::Inserted
    }

    /// Whether removing `node` (a leaf with no word marker) is safe.
    fn can_prune(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.children.is_empty() && !node.is_word && node.parent.is_some()
    }

    /// Deletes `word`, then prunes every now-useless ancestor. This is the
    /// one nontrivial trie operation: pruning is the only way nodes disappear.
    pub fn delete(&mut self, word: &str) -> DeleteResult {
        let Some(terminal) = self.walk(word) else {
            return DeleteResult::NotPresent;
        };

        if !self.node(terminal).is_word {
            return DeleteResult::NotPresent;
        }

        self.node_mut(terminal).is_word = false;

        let mut current = terminal;
        while self.can_prune(current) {
            let parent = self.node(current).parent.expect("checked by can_prune");
            let key = self.node(current).key;
            self.node_mut(parent).children.remove(key);
            self.free_node(current);
            current = parent;
        }

        DeleteResult::Deleted
    }

    /// Whether `word` is stored in the trie.
    pub fn has(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|id| self.node(id).is_word)
    }

    /// Reconstructs the word ending at `id` by walking up to the root.
    pub fn word_at(&self, id: NodeId) -> String {
        let mut chars = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            chars.push(self.node(current).key);
            current = parent;
        }
        chars.reverse();
        chars.into_iter().collect()
    }

    /// Emits every stored word exactly once, in child-map iteration order.
    pub fn enumerate(&self, sink: &mut impl WordSink) {
        let mut prefix = Vec::with_capacity(self.longest_ever + 1);
        self.collect(ROOT, &mut prefix, sink);
    }

    fn collect(&self, id: NodeId, prefix: &mut Vec<char>, sink: &mut impl WordSink) {
        for (key, child) in self.children(id) {
            prefix.push(key);
            if self.node(child).is_word {
                let word: String = prefix.iter().collect();
                sink.add(&word);
            }
            self.collect(child, prefix, sink);
            prefix.pop();
        }
    }

    /// Depth-first pre-order dump: `key` then `*` iff terminal, then the
    /// sub-dump, then `^`. Matches `node_save` exactly.
    fn save_node(&self, id: NodeId, sink: &mut impl CharSink) -> Result<()> {
        for (key, child) in self.children(id) {
            sink.write_str(&key.to_string())?;
            if self.node(child).is_word {
                sink.write_str("*")?;
            }
            self.save_node(child, sink)?;
            sink.write_str("^")?;
        }
        Ok(())
    }

    /// Saves the trie segment: the pre-order dump followed by a single `\n`.
    pub fn save(&self, sink: &mut impl CharSink) -> Result<()> {
        self.save_node(ROOT, sink)?;
        sink.write_str("\n")?;
        Ok(())
    }

    /// Loads a trie segment. An unexpected `^` that would pop above the root,
    /// or a non-alphabetic key code point, aborts with a format error.
    pub fn load(source: &mut impl CharSource) -> Result<Trie> {
        let mut trie = Trie::new();
        let mut current = ROOT;

        loop {
            let (line, column) = (source.line(), source.column());
            match source.next() {
                None | Some('\n') => break,
                Some('*') => {
                    trie.node_mut(current).is_word = true;
                }
                Some('^') => match trie.node(current).parent {
                    Some(parent) => current = parent,
                    None => return Err(DictionaryError::MalformedTrie { line, column }),
                },
                Some(c) => {
                    if !c.is_alphabetic() {
                        return Err(DictionaryError::MalformedTrie { line, column });
                    }
                    current = trie.add_child(current, c);
                    let depth = trie.word_at(current).chars().count();
                    if depth > trie.longest_ever {
                        trie.longest_ever = depth;
                    }
                }
            }
        }

        Ok(trie)
    }
}
