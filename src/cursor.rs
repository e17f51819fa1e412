//! Running-prefix cursor over a [`DlbTrie`].
//!
//! The cursor remembers where the prefix typed so far leads in the trie, so
//! extending or shortening it by one character costs a single sibling-chain
//! scan instead of a walk from the root.
//!
//! Once a character fails to match, the cursor is stuck: its position stays
//! frozen on the last real trie path and every further character is only
//! recorded in the literal prefix. Retreating over those characters unwinds
//! the miss before the position moves again.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::trie::{Completions, DlbTrie, NodeRef};

/// A running prefix and its position in one [`DlbTrie`].
///
/// The cursor does not own the trie; every call borrows it. A cursor must
/// always be used with the same trie.
#[derive(Clone, Debug)]
pub struct PrefixCursor {
    /// `NodeRef::NULL` stands for the trie root, which may not exist yet.
    position: NodeRef,
    /// Every character passed to `advance`, misses included.
    prefix: String,
    /// Characters at the end of `prefix` that have no trie path.
    miss_offset: usize,
    /// Trie revision `position` was computed under.
    revision: u64,
}

impl PrefixCursor {
    pub fn new() -> Self {
        Self {
            position: NodeRef::NULL,
            prefix: String::new(),
            miss_offset: 0,
            revision: 0,
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True once a character failed to match, until retreats or a reset
    /// unwind it.
    pub fn is_stuck(&self, trie: &DlbTrie) -> bool {
        self.miss_offset(trie) > 0
    }

    /// Characters at the end of the prefix that have no trie path.
    pub fn miss_offset(&self, trie: &DlbTrie) -> usize {
        self.state(trie).1
    }

    /// Node spelled by the prefix, or `None` when stuck or the trie has no root.
    pub fn position(&self, trie: &DlbTrie) -> Option<NodeRef> {
        let (position, miss_offset) = self.state(trie);
        if miss_offset > 0 {
            return None;
        }
        position.get().or_else(|| trie.root())
    }

    /// Position and miss offset under the trie's current revision.
    fn state(&self, trie: &DlbTrie) -> (NodeRef, usize) {
        if self.revision == trie.revision() {
            (self.position, self.miss_offset)
        } else {
            self.locate(trie)
        }
    }

    /// Walks the matched part of the prefix from the root. Returns the deepest
    /// node reached and how many characters are left over.
    ///
    /// Characters already counted as misses are never looked up again, so a
    /// walk can only grow the miss offset.
    fn locate(&self, trie: &DlbTrie) -> (NodeRef, usize) {
        let total = self.prefix.chars().count();
        let Some(mut node) = trie.root() else {
            return (NodeRef::NULL, total);
        };
        let matched_len = total - self.miss_offset;
        for (matched, letter) in self.prefix.chars().take(matched_len).enumerate() {
            match trie.find_child(node, letter) {
                Some(child) => node = child,
                None => return (node, total - matched),
            }
        }
        (node, self.miss_offset)
    }

    fn resync(&mut self, trie: &DlbTrie) {
        (self.position, self.miss_offset) = self.locate(trie);
        self.revision = trie.revision();
        debug!(prefix = %self.prefix, miss_offset = self.miss_offset, "cursor resynchronised");
    }

    /// Re-derives the position if the trie freed nodes since the last call.
    pub(crate) fn sync(&mut self, trie: &DlbTrie) {
        if self.revision != trie.revision() {
            self.resync(trie);
        }
    }

    /// Appends `c` to the prefix. Returns `true` if the prefix is still the
    /// start of some path in the trie.
    ///
    /// `c` is recorded even when the call fails. While stuck, no lookup is made.
    pub fn advance(&mut self, trie: &DlbTrie, c: char) -> bool {
        self.sync(trie);
        self.prefix.push(c);

        if self.miss_offset > 0 {
            self.miss_offset += 1;
            return false;
        }

        let child = self
            .position
            .get()
            .or_else(|| trie.root())
            .and_then(|from| trie.find_child(from, c));
        match child {
            Some(child) => {
                self.position = child;
                true
            }
            None => {
                self.miss_offset = 1;
                trace!(prefix = %self.prefix, "advance missed");
                false
            }
        }
    }

    /// Drops the last character of the prefix.
    pub fn retreat(&mut self, trie: &DlbTrie) -> Result<()> {
        self.sync(trie);
        if self.prefix.pop().is_none() {
            return Err(Error::InvalidState("running prefix is empty"));
        }

        if self.miss_offset > 0 {
            self.miss_offset -= 1;
        } else if let Some(parent) = self.position.get().and_then(|n| trie.parent(n)) {
            self.position = parent;
        }
        Ok(())
    }

    /// Returns to the empty prefix.
    pub fn reset(&mut self) {
        self.position = NodeRef::NULL;
        self.miss_offset = 0;
        self.prefix.clear();
    }

    /// True if the prefix is itself a stored word.
    pub fn is_word(&self, trie: &DlbTrie) -> bool {
        self.position(trie).is_some_and(|n| trie.is_word(n))
    }

    /// Stores the prefix as a word and moves the cursor onto it.
    ///
    /// Returns `Ok(false)` if the word was already stored.
    pub fn add(&mut self, trie: &mut DlbTrie) -> Result<bool> {
        if self.prefix.is_empty() {
            return Err(Error::InvalidState("running prefix is empty"));
        }
        let added = trie.add(&self.prefix)?;
        // The whole prefix is a trie path now.
        self.miss_offset = 0;
        self.resync(trie);
        Ok(added)
    }

    /// Number of stored words starting with the prefix. O(1).
    pub fn number_of_predictions(&self, trie: &DlbTrie) -> usize {
        self.position(trie).map_or(0, |n| trie.subtree_count(n))
    }

    /// Lazily yields the words starting with the prefix, in lexicographic order.
    ///
    /// `None` when stuck or the trie has no root.
    pub fn predictions<'a>(&self, trie: &'a DlbTrie) -> Option<Completions<'a>> {
        self.position(trie)
            .map(|node| trie.completions(node, &self.prefix))
    }

    /// The lexicographically smallest word starting with the prefix.
    pub fn retrieve_one_prediction(&self, trie: &DlbTrie) -> Option<String> {
        let node = self.position(trie)?;
        if trie.subtree_count(node) == 0 {
            return None;
        }
        trie.completions(node, &self.prefix).next()
    }

    /// Every word starting with the prefix, in lexicographic order.
    ///
    /// `None` when stuck or the trie has no root; an empty vector when the
    /// position exists but no words remain below it.
    pub fn retrieve_all_predictions(&self, trie: &DlbTrie) -> Option<Vec<String>> {
        self.predictions(trie).map(Iterator::collect)
    }
}

impl Default for PrefixCursor {
    fn default() -> Self {
        Self::new()
    }
}
