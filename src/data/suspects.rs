//! Clue to suspect associations
//!
//! A fixed-size chained hash table. Buckets are addressed by the djb2 string
//! hash and never resized. New entries go to the head of their chain, so when a
//! clue is associated twice the most recent association wins.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

/// Prime bucket count used by the game
pub const DEFAULT_BUCKETS: NonZeroUsize = match NonZeroUsize::new(101) {
    Some(n) => n,
    None => unreachable!(),
};

/// djb2: start at 5381, then `h = h * 33 + byte` for every byte, wrapping.
pub fn djb2(text: &str) -> u64 {
    text.bytes().fold(5381u64, |h, b| {
        h.wrapping_mul(33).wrapping_add(u64::from(b))
    })
}

type Chain = Option<Box<SuspectEntry>>;

#[derive(Debug)]
struct SuspectEntry {
    clue: String,
    suspect: String,
    next: Chain,
}

/// Maps clue text to the suspect it incriminates
#[derive(Debug)]
pub struct SuspectIndex {
    buckets: Vec<Chain>,
    len: usize,
}

impl SuspectIndex {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    pub fn with_buckets(buckets: NonZeroUsize) -> Self {
        let mut table = Vec::with_capacity(buckets.get());
        table.resize_with(buckets.get(), || None);
        Self {
            buckets: table,
            len: 0,
        }
    }

    /// Build from `(clue, suspect)` pairs, inserted in order
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut index = Self::new();
        for (clue, suspect) in pairs {
            index.insert(clue, suspect);
        }
        index
    }

    /// Bucket for `text`, always in `0..bucket_count()`
    pub fn hash(&self, text: &str) -> usize {
        // The remainder is below the bucket count, which is a usize.
        (djb2(text) % self.buckets.len() as u64) as usize
    }

    /// Associate `clue` with `suspect`. No duplicate check; an empty clue is
    /// ignored and returns `false`.
    pub fn insert(&mut self, clue: &str, suspect: &str) -> bool {
        if clue.is_empty() {
            return false;
        }
        let bucket = self.hash(clue);
        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(SuspectEntry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next: head,
        }));
        self.len += 1;
        tracing::trace!(clue, suspect, bucket, "association stored");
        true
    }

    /// The suspect most recently associated with `clue`
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        if clue.is_empty() {
            return None;
        }
        let mut entry = self.buckets[self.hash(clue)].as_deref();
        while let Some(e) = entry {
            if e.clue == clue {
                return Some(&e.suspect);
            }
            entry = e.next.as_deref();
        }
        None
    }

    /// Number of stored associations, duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the chain in `bucket`, or `None` if out of range
    pub fn chain_len(&self, bucket: usize) -> Option<usize> {
        let mut entry = self.buckets.get(bucket)?.as_deref();
        let mut n = 0;
        while let Some(e) = entry {
            n += 1;
            entry = e.next.as_deref();
        }
        Some(n)
    }

    /// Every suspect name, sorted and deduplicated
    pub fn suspects(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        for head in &self.buckets {
            let mut entry = head.as_deref();
            while let Some(e) = entry {
                names.insert(e.suspect.as_str());
                entry = e.next.as_deref();
            }
        }
        names.into_iter().collect()
    }
}

impl Default for SuspectIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SuspectIndex {
    fn drop(&mut self) {
        for head in &mut self.buckets {
            let mut entry = head.take();
            while let Some(mut e) = entry {
                entry = e.next.take();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        assert_eq!(djb2("ab"), (5381 * 33 + 97) * 33 + 98);
    }

    #[test]
    fn hash_is_stable_and_in_range() {
        let index = SuspectIndex::new();
        let h = index.hash("Pegada de lama");
        assert_eq!(h, index.hash("Pegada de lama"));
        assert!(h < 101);
        assert_eq!(h, (djb2("Pegada de lama") % 101) as usize);
    }

    #[test]
    fn lookup_after_insert() {
        let mut index = SuspectIndex::new();
        index.insert("Pegada de lama", "Sr. Verdes");
        assert_eq!(index.lookup("Pegada de lama"), Some("Sr. Verdes"));
        assert_eq!(index.lookup("Copo quebrado"), None);
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn latest_association_wins() {
        let mut index = SuspectIndex::new();
        index.insert("Luvas sujas", "Sr. Rocha");
        index.insert("Luvas sujas", "Pintor");
        assert_eq!(index.lookup("Luvas sujas"), Some("Pintor"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn empty_clue_is_ignored() {
        let mut index = SuspectIndex::new();
        assert!(!index.insert("", "Sr. Verdes"));
        assert!(index.is_empty());
    }

    #[test]
    fn single_bucket_chains_everything() {
        let mut index = SuspectIndex::with_buckets(NonZeroUsize::MIN);
        index.insert("a", "A");
        index.insert("b", "B");
        index.insert("c", "C");
        assert_eq!(index.chain_len(0), Some(3));
        assert_eq!(index.chain_len(1), None);
        assert_eq!(index.lookup("a"), Some("A"));
        assert_eq!(index.lookup("c"), Some("C"));
        assert_eq!(index.lookup("d"), None);
    }

    #[test]
    fn suspects_are_sorted_and_unique() {
        let index = SuspectIndex::from_pairs([
            ("Pegada de lama", "Sr. Verdes"),
            ("Lenço rasgado", "Sra. Marinho"),
            ("Chave enferrujada", "Sr. Verdes"),
        ]);
        assert_eq!(index.suspects(), vec!["Sr. Verdes", "Sra. Marinho"]);
    }
}
