//! The removal index: an exact set of strings that have been removed
//! from a filter, kept in a separate chaining hash table.

use crate::error::{Error, Result};
use crate::hashing::string_to_key;

/// Default number of buckets (a prime)
pub const DEFAULT_BUCKETS: usize = 1009;

/// Separate chaining hash set of removed strings.  Each bucket is a
/// chain of entries, appended at the tail.
#[derive(Clone, Debug)]
pub struct RemovalIndex {
    buckets: Vec<Vec<String>>,
    len: usize,
}

impl Default for RemovalIndex {
    fn default() -> RemovalIndex {
        RemovalIndex {
            buckets: vec![Vec::new(); DEFAULT_BUCKETS],
            len: 0,
        }
    }
}

impl RemovalIndex {
    /// Create a RemovalIndex with `num_buckets` chains.  A prime
    /// number of buckets spreads keys best.
    pub fn with_buckets(num_buckets: usize) -> Result<RemovalIndex> {
        if num_buckets == 0 {
            return Err(Error::invalid("q", "bucket count must be at least 1"));
        }
        Ok(RemovalIndex {
            buckets: vec![Vec::new(); num_buckets],
            len: 0,
        })
    }

    fn bucket(&self, element: &str) -> usize {
        (string_to_key(element) % self.buckets.len() as u64) as usize
    }

    /// Mark `element` as removed.  Returns `true` if it was not
    /// already marked.
    pub fn mark(&mut self, element: &str) -> bool {
        let idx = self.bucket(element);
        let chain = &mut self.buckets[idx];
        if chain.iter().any(|e| e == element) {
            return false;
        }
        chain.push(element.to_owned());
        self.len += 1;
        true
    }

    /// Clear the removed mark on `element`.  Returns `true` if it was
    /// marked.
    pub fn unmark(&mut self, element: &str) -> bool {
        let idx = self.bucket(element);
        let chain = &mut self.buckets[idx];
        match chain.iter().position(|e| e == element) {
            Some(pos) => {
                // keep the remaining chain in insertion order
                chain.remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Check if `element` is marked as removed
    pub fn is_marked(&self, element: &str) -> bool {
        self.buckets[self.bucket(element)].iter().any(|e| e == element)
    }

    /// Number of marked elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate all marked elements, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().flatten().map(String::as_str)
    }

    /// Unmark everything
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{RemovalIndex, DEFAULT_BUCKETS};
    use crate::hashing::string_to_key;

    #[test]
    fn mark_unmark() {
        let mut idx = RemovalIndex::default();
        assert_eq!(idx.bucket_count(), DEFAULT_BUCKETS);
        assert!(!idx.is_marked("apple"));
        assert!(idx.mark("apple"));
        assert!(idx.is_marked("apple"));
        assert!(!idx.mark("apple"));
        assert_eq!(idx.len(), 1);

        assert!(idx.unmark("apple"));
        assert!(!idx.is_marked("apple"));
        assert!(!idx.unmark("apple"));
        assert!(idx.is_empty());
    }

    #[test]
    fn chains_keep_every_entry() {
        // one bucket: everything shares a chain
        let mut idx = RemovalIndex::with_buckets(1).unwrap();
        for s in ["a", "b", "c", "d"] {
            assert!(idx.mark(s));
        }
        assert_eq!(idx.len(), 4);
        for s in ["a", "b", "c", "d"] {
            assert!(idx.is_marked(s));
        }
        let all: Vec<&str> = idx.iter().collect();
        assert_eq!(all, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn unmark_scans_whole_chain() {
        let mut idx = RemovalIndex::with_buckets(1).unwrap();
        idx.mark("head");
        idx.mark("middle");
        idx.mark("tail");

        assert!(idx.unmark("tail"));
        assert!(idx.is_marked("head"));
        assert!(idx.is_marked("middle"));
        assert!(!idx.is_marked("tail"));

        assert!(idx.unmark("head"));
        assert!(idx.is_marked("middle"));
        assert!(!idx.unmark("missing"));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn colliding_keys() {
        assert_eq!(string_to_key("ab"), string_to_key("bA"));
        let mut idx = RemovalIndex::with_buckets(7).unwrap();
        idx.mark("ab");
        assert!(!idx.is_marked("bA"));
        idx.mark("bA");
        assert!(idx.unmark("ab"));
        assert!(idx.is_marked("bA"));
        assert!(!idx.is_marked("ab"));
    }

    #[test]
    fn zero_buckets() {
        assert!(RemovalIndex::with_buckets(0).is_err());
    }

    #[test]
    fn clear() {
        let mut idx = RemovalIndex::with_buckets(13).unwrap();
        idx.mark("x");
        idx.mark("y");
        idx.clear();
        assert!(idx.is_empty());
        assert!(!idx.is_marked("x"));
        assert_eq!(idx.bucket_count(), 13);
    }
}
