//! Debug utilities for trie troubleshooting.

use std::fmt::{self, Write};

use super::{DlbTrie, NodeRef};

const BANNER: &str = "====================";

impl DlbTrie {
    /// Writes the node graph, one node per line.
    ///
    /// Each letter is followed by ` *` when a word ends there and by its
    /// subtree count in parentheses. Siblings share an indentation level;
    /// children are indented one space deeper than their parent.
    pub fn write_tree<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{BANNER} START: DLB Trie {BANNER}")?;
        if let Some(root) = self.root() {
            writeln!(out, "(root) ({})", self.node(root).size)?;
            self.write_chain(out, self.node(root).child, 1)?;
        }
        writeln!(out, "{BANNER} END: DLB Trie {BANNER}")
    }

    fn write_chain<W: Write>(&self, out: &mut W, head: NodeRef, depth: usize) -> fmt::Result {
        let mut current = head;
        while let Some(node) = current.get() {
            let n = self.node(node);
            write!(out, "{:depth$}{}", "", n.letter)?;
            if n.is_word {
                out.write_str(" *")?;
            }
            writeln!(out, " ({})", n.size)?;
            self.write_chain(out, n.child, depth + 1)?;
            current = n.next_sibling;
        }
        Ok(())
    }

    /// [`write_tree`](Self::write_tree) into a fresh string.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut out);
        out
    }

    /// Verify trie integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let Some(root) = self.root() else {
            if self.node_count() != 0 {
                issues.push(format!("no root but {} live nodes", self.node_count()));
            }
            return issues;
        };

        if self.node(root).is_word {
            issues.push("root is marked as a word".to_owned());
        }
        if !self.node(root).parent.is_null() {
            issues.push("root has a parent".to_owned());
        }

        let mut reachable = 0usize;
        self.verify_node(root, &mut String::new(), &mut issues, &mut reachable);
        if reachable != self.node_count() {
            issues.push(format!(
                "{} live nodes but {} reachable from root",
                self.node_count(),
                reachable
            ));
        }
        issues
    }

    /// Returns the number of words found below `node`, inclusive.
    fn verify_node(
        &self,
        node: NodeRef,
        path: &mut String,
        issues: &mut Vec<String>,
        reachable: &mut usize,
    ) -> usize {
        *reachable += 1;
        let n = *self.node(node);
        let mut words = usize::from(n.is_word);

        let mut prev = NodeRef::NULL;
        let mut child = n.child;
        while let Some(c) = child.get() {
            let cn = *self.node(c);
            if cn.parent != node {
                issues.push(format!("{path:?}: child {:?} has wrong parent", cn.letter));
            }
            if cn.prev_sibling != prev {
                issues.push(format!("{path:?}: child {:?} has broken prev link", cn.letter));
            }
            if let Some(p) = prev.get() {
                if self.node(p).letter >= cn.letter {
                    issues.push(format!(
                        "{path:?}: siblings {:?} and {:?} out of order",
                        self.node(p).letter,
                        cn.letter
                    ));
                }
            }

            path.push(cn.letter);
            words += self.verify_node(c, path, issues, reachable);
            path.pop();

            prev = c;
            child = cn.next_sibling;
        }

        if n.size != words {
            issues.push(format!("{path:?}: size {} but {} words below", n.size, words));
        }
        if node != self.root && n.size == 0 && !n.is_word {
            issues.push(format!("{path:?}: empty node was not pruned"));
        }
        words
    }
}
