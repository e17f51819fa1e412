//! De la Briandais trie store.
//!
//! Each node keeps one link to the head of its children's sibling chain rather
//! than a slot per possible letter, so memory follows the actual branching
//! factor. Every node also caches how many words end inside its subtree, which
//! turns "how many words start with this prefix" into a single field read.
//!
//! Nodes live in an arena and refer to each other by 32-bit index. Pruned
//! slots are recycled through a free list.

mod debug;

use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{Error, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Letter stored in the root node. The root never matches a lookup.
const ROOT_LETTER: char = '\0';

/// Options for [`DlbTrie::with_config`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of node slots to reserve up front.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
        }
    }
}

// =============================================================================
// Node references
// =============================================================================

/// A 32-bit reference to a node in the arena.
///
/// A ref is only meaningful for the trie that handed it out, and only until
/// that trie's [`revision`](DlbTrie::revision) changes. Passing a ref from
/// another trie to a node accessor may panic on an out-of-bounds slot. A
/// stale ref does not panic but reads whatever now occupies its slot, which
/// may be a vacant or recycled node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeRef(u32);

impl NodeRef {
    pub(crate) const NULL: NodeRef = NodeRef(u32::MAX);

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    fn new(idx: usize) -> Self {
        debug_assert!(idx < u32::MAX as usize);
        NodeRef(idx as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn get(self) -> Option<NodeRef> {
        (!self.is_null()).then_some(self)
    }
}

// =============================================================================
// Node
// =============================================================================

#[derive(Clone, Copy, Debug)]
struct Node {
    letter: char,
    is_word: bool,
    /// Words ending in this subtree, this node included.
    size: usize,
    parent: NodeRef,
    /// Head of the child chain, ascending by letter.
    child: NodeRef,
    next_sibling: NodeRef,
    prev_sibling: NodeRef,
}

impl Node {
    fn new(letter: char, parent: NodeRef) -> Self {
        Self {
            letter,
            is_word: false,
            size: 0,
            parent,
            child: NodeRef::NULL,
            next_sibling: NodeRef::NULL,
            prev_sibling: NodeRef::NULL,
        }
    }

    fn vacant() -> Self {
        Self::new(ROOT_LETTER, NodeRef::NULL)
    }
}

// =============================================================================
// DlbTrie
// =============================================================================

/// A word set stored as a de la Briandais trie.
///
/// Sibling chains are kept in ascending letter order, so every traversal that
/// visits children before siblings produces words in lexicographic order.
#[derive(Clone)]
pub struct DlbTrie {
    nodes: Vec<Node>,
    /// Slots released by pruning, reused before the arena grows.
    free: Vec<NodeRef>,
    root: NodeRef,
    /// Bumped whenever a delete frees nodes.
    revision: u64,
}

impl DlbTrie {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: Vec::with_capacity(config.initial_capacity),
            free: Vec::new(),
            root: NodeRef::NULL,
            revision: 0,
        }
    }

    /// Number of stored words.
    #[inline]
    pub fn len(&self) -> usize {
        self.root().map_or(0, |root| self.node(root).size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Changes whenever a delete frees nodes. A [`NodeRef`] obtained under an
    /// older revision may point at a recycled slot.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.free.capacity() * std::mem::size_of::<NodeRef>()
    }

    /// Releases spare arena capacity, e.g. once a dictionary is fully loaded.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        self.free.shrink_to_fit();
    }

    /// The root node, created by the first successful [`add`](Self::add).
    #[inline]
    pub fn root(&self) -> Option<NodeRef> {
        self.root.get()
    }

    /// Letter labelling the edge into `node`.
    ///
    /// # Panics
    ///
    /// If `node` did not come from this trie. See [`NodeRef`] for stale refs;
    /// the same applies to the other node accessors.
    #[inline]
    pub fn letter(&self, node: NodeRef) -> char {
        self.node(node).letter
    }

    /// True if a stored word ends at `node`.
    #[inline]
    pub fn is_word(&self, node: NodeRef) -> bool {
        self.node(node).is_word
    }

    /// Number of words ending at or below `node`.
    #[inline]
    pub fn subtree_count(&self, node: NodeRef) -> usize {
        self.node(node).size
    }

    /// `None` for the root.
    #[inline]
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).parent.get()
    }

    #[inline]
    fn node(&self, node: NodeRef) -> &Node {
        &self.nodes[node.index()]
    }

    #[inline]
    fn node_mut(&mut self, node: NodeRef) -> &mut Node {
        &mut self.nodes[node.index()]
    }

    fn alloc(&mut self, node: Node) -> NodeRef {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.index()] = node;
                slot
            }
            None => {
                let idx = self.nodes.len();
                self.nodes.push(node);
                NodeRef::new(idx)
            }
        }
    }

    fn release(&mut self, node: NodeRef) {
        self.nodes[node.index()] = Node::vacant();
        self.free.push(node);
    }

    fn ensure_root(&mut self) -> NodeRef {
        if self.root.is_null() {
            self.root = self.alloc(Node::new(ROOT_LETTER, NodeRef::NULL));
        }
        self.root
    }

    /// Finds the child of `node` labelled `letter`.
    ///
    /// Scans the sibling chain, stopping early once it passes `letter`.
    /// `node` must be live in this trie, as for [`letter`](Self::letter).
    pub fn find_child(&self, node: NodeRef, letter: char) -> Option<NodeRef> {
        let mut child = self.node(node).child;
        while !child.is_null() {
            let n = self.node(child);
            if n.letter == letter {
                return Some(child);
            }
            if n.letter > letter {
                break;
            }
            child = n.next_sibling;
        }
        None
    }

    /// Follows `prefix` from the root. The empty prefix resolves to the root.
    pub fn find_prefix(&self, prefix: &str) -> Option<NodeRef> {
        prefix
            .chars()
            .try_fold(self.root()?, |node, letter| self.find_child(node, letter))
    }

    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find_prefix(word).is_some_and(|n| self.is_word(n))
    }

    /// Allocates a child of `parent` labelled `letter` and splices it into the
    /// sibling chain at its sorted position. `letter` must not be present yet.
    pub(crate) fn add_child(&mut self, parent: NodeRef, letter: char) -> NodeRef {
        let mut prev = NodeRef::NULL;
        let mut next = self.node(parent).child;
        while !next.is_null() && self.node(next).letter < letter {
            prev = next;
            next = self.node(next).next_sibling;
        }
        debug_assert!(next.is_null() || self.node(next).letter != letter);

        let mut node = Node::new(letter, parent);
        node.prev_sibling = prev;
        node.next_sibling = next;
        let child = self.alloc(node);

        if prev.is_null() {
            self.node_mut(parent).child = child;
        } else {
            self.node_mut(prev).next_sibling = child;
        }
        if !next.is_null() {
            self.node_mut(next).prev_sibling = child;
        }
        child
    }

    /// Splices a childless node out of its sibling chain and frees its slot.
    fn unlink(&mut self, node: NodeRef) {
        let Node {
            parent,
            child,
            next_sibling,
            prev_sibling,
            ..
        } = *self.node(node);
        debug_assert!(child.is_null(), "only leaves are pruned");

        if !parent.is_null() && self.node(parent).child == node {
            self.node_mut(parent).child = next_sibling;
        }
        if !prev_sibling.is_null() {
            self.node_mut(prev_sibling).next_sibling = next_sibling;
        }
        if !next_sibling.is_null() {
            self.node_mut(next_sibling).prev_sibling = prev_sibling;
        }
        self.release(node);
    }

    /// Inserts `word`. Returns `Ok(false)` if it was already present.
    ///
    /// Runs in O(alphabet size * word length).
    pub fn add(&mut self, word: &str) -> Result<bool> {
        if word.is_empty() {
            return Err(Error::InvalidArgument("word is empty"));
        }

        let mut current = self.ensure_root();
        let mut created = 0usize;
        for letter in word.chars() {
            current = match self.find_child(current, letter) {
                Some(child) => child,
                None => {
                    created += 1;
                    self.add_child(current, letter)
                }
            };
        }

        if self.node(current).is_word {
            trace!(word, "word already present");
            return Ok(false);
        }
        self.node_mut(current).is_word = true;

        let mut ancestor = current;
        while !ancestor.is_null() {
            let node = self.node_mut(ancestor);
            node.size += 1;
            ancestor = node.parent;
        }

        trace!(word, created, "added word");
        Ok(true)
    }

    /// Removes `word`. Returns `false` if it was not stored.
    ///
    /// Nodes left with no words below them are pruned bottom-up until the
    /// first node that is still needed; counts are fixed all the way to the
    /// root.
    pub fn delete(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let Some(root) = self.root() else {
            return false;
        };

        let mut path = Vec::with_capacity(word.len());
        let mut current = root;
        for letter in word.chars() {
            match self.find_child(current, letter) {
                Some(child) => {
                    path.push(child);
                    current = child;
                }
                None => return false,
            }
        }

        if !self.node(current).is_word {
            return false;
        }
        self.node_mut(current).is_word = false;

        let mut pruned = 0usize;
        let mut pruning = true;
        for &node in path.iter().rev() {
            let n = self.node_mut(node);
            n.size -= 1;
            if pruning && n.size == 0 && !n.is_word {
                self.unlink(node);
                pruned += 1;
            } else {
                pruning = false;
            }
        }
        self.node_mut(root).size -= 1;

        if pruned > 0 {
            self.revision += 1;
            debug!(word, pruned, "pruned nodes");
        }
        trace!(word, "deleted word");
        true
    }

    /// Words at or below `node`, in lexicographic order. `prefix` is the
    /// spelling of `node` and starts every yielded word.
    ///
    /// `node` must be live in this trie, as for [`letter`](Self::letter).
    pub fn completions(&self, node: NodeRef, prefix: &str) -> Completions<'_> {
        let n = self.node(node);
        let mut stack = Vec::new();
        if !n.child.is_null() {
            stack.push((n.child, prefix.len()));
        }
        Completions {
            trie: self,
            path: prefix.to_owned(),
            stack,
            pending: n.is_word.then(|| prefix.to_owned()),
        }
    }

    /// All stored words in lexicographic order.
    pub fn iter(&self) -> Completions<'_> {
        match self.root() {
            Some(root) => self.completions(root, ""),
            None => Completions {
                trie: self,
                path: String::new(),
                stack: Vec::new(),
                pending: None,
            },
        }
    }
}

impl Default for DlbTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DlbTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Completions
// =============================================================================

/// Depth-first walk yielding every word below a node, children before
/// siblings, which over sorted chains is ascending lexicographic order.
pub struct Completions<'a> {
    trie: &'a DlbTrie,
    path: String,
    /// Pending nodes with the byte length of `path` above them.
    stack: Vec<(NodeRef, usize)>,
    /// The start node's own word, yielded first.
    pending: Option<String>,
}

impl<'a> Iterator for Completions<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(word) = self.pending.take() {
            return Some(word);
        }

        while let Some((node, depth)) = self.stack.pop() {
            let n = self.trie.node(node);
            self.path.truncate(depth);
            self.path.push(n.letter);

            // Sibling goes under the child so the child's subtree is drained first.
            if !n.next_sibling.is_null() {
                self.stack.push((n.next_sibling, depth));
            }
            if !n.child.is_null() {
                self.stack.push((n.child, self.path.len()));
            }
            if n.is_word {
                return Some(self.path.clone());
            }
        }
        None
    }
}

impl FusedIterator for Completions<'_> {}
