//! Collected clues
//!
//! An unbalanced binary search tree keyed by clue text. Collecting a clue that
//! is already stored bumps its occurrence count instead of adding a node, so an
//! in-order walk yields each clue exactly once in lexicographic order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

type Link = Option<Box<ClueEntry>>;

#[derive(Debug)]
struct ClueEntry {
    text: String,
    occurrences: u32,
    left: Link,
    right: Link,
}

impl ClueEntry {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            occurrences: 1,
            left: None,
            right: None,
        }
    }
}

/// One line of the "pistas coletadas" report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueReport {
    pub text: String,
    pub occurrences: u32,
}

impl std::fmt::Display for ClueReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" (x{})", self.text, self.occurrences)
    }
}

/// Ordered set-with-multiplicity of discovered clues
#[derive(Debug, Default)]
pub struct ClueStore {
    root: Link,
    len: usize,
}

impl ClueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sighting of `text`.
    ///
    /// Returns `true` when the clue was not stored before. Empty text is
    /// ignored and returns `false`.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match text.cmp(node.text.as_str()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.occurrences += 1;
                    return false;
                }
            }
        }
        *slot = Some(Box::new(ClueEntry::new(text)));
        self.len += 1;
        true
    }

    /// How many times `text` was collected, if ever
    pub fn occurrences(&self, text: &str) -> Option<u32> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match text.cmp(node.text.as_str()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(node.occurrences),
            }
        }
        None
    }

    pub fn contains(&self, text: &str) -> bool {
        self.occurrences(text).is_some()
    }

    /// Number of distinct clues
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of all occurrence counts
    pub fn total_occurrences(&self) -> u32 {
        self.iter().map(|(_, n)| n).sum()
    }

    /// Lazy in-order walk over `(text, occurrences)`
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// The full report, alphabetically ordered
    pub fn entries(&self) -> Vec<ClueReport> {
        self.iter()
            .map(|(text, occurrences)| ClueReport {
                text: text.to_string(),
                occurrences,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }
}

impl Drop for ClueStore {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Free a subtree without recursing, so a degenerate (list-shaped) tree built
/// from sorted input cannot blow the stack. Children are detached before their
/// parent is dropped.
fn release(root: Link) {
    let mut pending: Vec<Box<ClueEntry>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl<'a> IntoIterator for &'a ClueStore {
    type Item = (&'a str, u32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> Extend<S> for ClueStore {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for text in iter {
            self.insert(text.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClueStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

/// In-order iterator over a [`ClueStore`]
pub struct Iter<'a> {
    stack: Vec<&'a ClueEntry>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a ClueEntry>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a ClueEntry>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some((node.text.as_str(), node.occurrences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = ClueStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
        assert_eq!(store.total_occurrences(), 0);
    }

    #[test]
    fn repeated_clue_counts_occurrences() {
        let mut store = ClueStore::new();
        assert!(store.insert("Copo quebrado"));
        assert!(!store.insert("Copo quebrado"));
        assert!(!store.insert("Copo quebrado"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.occurrences("Copo quebrado"), Some(3));
    }

    #[test]
    fn empty_text_is_ignored() {
        let mut store = ClueStore::new();
        store.insert("Luvas sujas");
        assert!(!store.insert(""));
        assert_eq!(store.entries(), vec![ClueReport {
            text: "Luvas sujas".to_string(),
            occurrences: 1,
        }]);
    }

    #[test]
    fn report_is_alphabetical() {
        let store: ClueStore = ["Pegada de lama", "Chave enferrujada", "Lenço rasgado", "Diário antigo"]
            .into_iter()
            .collect();
        let texts: Vec<&str> = store.iter().map(|(t, _)| t).collect();
        assert_eq!(
            texts,
            vec!["Chave enferrujada", "Diário antigo", "Lenço rasgado", "Pegada de lama"]
        );
    }

    #[test]
    fn ordering_is_bytewise() {
        // Uppercase sorts before lowercase, and accented letters after ASCII.
        let store: ClueStore = ["abc", "Abc", "ábc"].into_iter().collect();
        let texts: Vec<&str> = store.iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["Abc", "abc", "ábc"]);
    }

    #[test]
    fn clear_empties_store() {
        let mut store: ClueStore = ["a", "b", "c"].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains("a"));
        store.insert("d");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deep_degenerate_tree_drops_without_overflow() {
        let mut store = ClueStore::new();
        for i in 0..10_000 {
            store.insert(&format!("{i:08}"));
        }
        assert_eq!(store.len(), 10_000);
        assert_eq!(store.iter().next(), Some(("00000000", 1)));
        drop(store);
    }
}
