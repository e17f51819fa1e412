//! # dlb-complete
//!
//! An autocomplete dictionary built on a de la Briandais (DLB) trie.
//!
//! Words are stored in a trie whose nodes cache the number of words below
//! them. A running prefix is tracked by a cursor, so after each typed or
//! erased character the number of matching words is a field read and the
//! matches themselves come out of a short depth-first walk, in lexicographic
//! order.
//!
//! ## Example
//!
//! ```rust
//! use dlb_complete::AutoComplete;
//!
//! let mut ac = AutoComplete::new();
//! ac.add("cat").unwrap();
//! ac.add("car").unwrap();
//! ac.add("card").unwrap();
//!
//! ac.advance('c');
//! ac.advance('a');
//! assert_eq!(ac.number_of_predictions(), 3);
//!
//! ac.advance('r');
//! assert_eq!(ac.retrieve_prediction().as_deref(), Some("car"));
//! assert_eq!(ac.retrieve_predictions(), Some(vec!["car".to_owned(), "card".to_owned()]));
//! ```
//!
//! [`DlbTrie`] and [`PrefixCursor`] can also be used separately, e.g. to keep
//! several cursors over one dictionary.

pub mod cursor;
pub mod error;
pub mod trie;

pub use cursor::PrefixCursor;
pub use error::{Error, Result};
pub use trie::{Completions, Config, DlbTrie, NodeRef};

// =============================================================================
// AutoComplete
// =============================================================================

/// A dictionary together with one running prefix.
#[derive(Clone, Debug, Default)]
pub struct AutoComplete {
    trie: DlbTrie,
    cursor: PrefixCursor,
}

impl AutoComplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            trie: DlbTrie::with_config(config),
            cursor: PrefixCursor::new(),
        }
    }

    /// Adds `word` to the dictionary without moving the cursor.
    ///
    /// Returns `Ok(false)` if it was already present and
    /// [`Error::InvalidArgument`] if it is empty.
    pub fn add(&mut self, word: &str) -> Result<bool> {
        self.trie.add(word)
    }

    /// Removes `word` from the dictionary. Returns `false` if it was absent.
    pub fn delete(&mut self, word: &str) -> bool {
        let deleted = self.trie.delete(word);
        self.cursor.sync(&self.trie);
        deleted
    }

    /// Appends `c` to the running prefix. Returns `true` if some stored word
    /// still starts with the prefix path.
    pub fn advance(&mut self, c: char) -> bool {
        self.cursor.advance(&self.trie, c)
    }

    /// Removes the last character of the running prefix.
    ///
    /// Fails with [`Error::InvalidState`] if the prefix is empty.
    pub fn retreat(&mut self) -> Result<()> {
        self.cursor.retreat(&self.trie)
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// True if the running prefix is a stored word.
    pub fn is_word(&self) -> bool {
        self.cursor.is_word(&self.trie)
    }

    /// Adds the running prefix as a word.
    ///
    /// Fails with [`Error::InvalidState`] if nothing has been typed.
    pub fn add_prefix(&mut self) -> Result<bool> {
        self.cursor.add(&mut self.trie)
    }

    /// Number of stored words starting with the running prefix, itself included.
    pub fn number_of_predictions(&self) -> usize {
        self.cursor.number_of_predictions(&self.trie)
    }

    /// The lexicographically smallest word starting with the running prefix.
    pub fn retrieve_prediction(&self) -> Option<String> {
        self.cursor.retrieve_one_prediction(&self.trie)
    }

    /// All words starting with the running prefix, sorted.
    ///
    /// `None` when the prefix has left the trie (or nothing was ever added);
    /// `Some(vec![])` when the prefix is a trie path with no words left under it.
    pub fn retrieve_predictions(&self) -> Option<Vec<String>> {
        self.cursor.retrieve_all_predictions(&self.trie)
    }

    pub fn predictions(&self) -> Option<Completions<'_>> {
        self.cursor.predictions(&self.trie)
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        self.cursor.prefix()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Releases spare trie capacity.
    pub fn shrink_to_fit(&mut self) {
        self.trie.shrink_to_fit();
    }

    pub fn trie(&self) -> &DlbTrie {
        &self.trie
    }

    pub fn cursor(&self) -> &PrefixCursor {
        &self.cursor
    }
}


#[cfg(test)]
mod proptests;
