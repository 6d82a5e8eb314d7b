// This program is free software; you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation; either version 2 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA
// 02110-1301, USA.

use tracing::{debug, trace};

use crate::bitarray::BitArray;
use crate::error::Result;
use crate::hashing::{string_to_key, HashFamily};
use crate::params::FilterParameters;
use crate::removal::RemovalIndex;
use crate::sizing::false_positive_rate;
use crate::ASMS;

/// A BloomFilter over strings that supports removal.  If an item is
/// inserted (and not removed since) then `find` is guaranteed to
/// return `true` for that item.  A removed item is guaranteed to
/// return `false`.  For items never inserted `find` will probably
/// return false.
///
/// # Removal
/// Bits are never cleared, since other items may share them.  Instead
/// a removed item is recorded in an exact removal index that `find`
/// checks first.  Inserting the item again clears its removal mark.
///
/// # False Positive Rate
/// The false positive rate is specified as a float in the range
/// (0,1).  It indicates that out of `X` probes for items that were
/// never inserted, about `X * rate` should return `true`.
///
/// # Example Usage
///
/// ```rust
/// use bloom_remove::BloomFilter;
///
/// let mut filter = BloomFilter::with_rate(0.1, 10).unwrap();
/// filter.insert("apple").unwrap();
/// filter.insert("banana").unwrap();
/// assert!(filter.find("apple").unwrap());
///
/// filter.remove("apple");
/// assert!(!filter.find("apple").unwrap());
/// assert!(filter.find("banana").unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct BloomFilter {
    bits: BitArray,
    hashes: HashFamily,
    removed: RemovalIndex,
    params: FilterParameters,
}

impl BloomFilter {
    /// Create a BloomFilter from `params`.  Every parameter is checked
    /// before anything is allocated.
    pub fn new(params: FilterParameters) -> Result<BloomFilter> {
        let (num_bits, num_hashes) = params.derive()?;
        let hashes = HashFamily::new(num_bits, num_hashes)?;
        let removed = RemovalIndex::with_buckets(params.q)?;
        debug!(
            num_bits,
            num_hashes,
            buckets = params.q,
            p = params.p,
            m = params.m,
            "created bloom filter"
        );
        Ok(BloomFilter {
            bits: BitArray::new(num_bits),
            hashes,
            removed,
            params,
        })
    }

    /// Create a BloomFilter that expects to hold
    /// `expected_num_items`.  The filter will be sized to have a
    /// false positive rate of the value specified in `rate`, and use
    /// default scale factors and bucket count.
    pub fn with_rate(rate: f64, expected_num_items: u32) -> Result<BloomFilter> {
        BloomFilter::new(FilterParameters::new(rate, expected_num_items))
    }

    /// Insert `item`.  Sets all of its bits, then clears any removal
    /// mark so a previously removed item is present again.
    pub fn insert(&mut self, item: &str) -> Result<()> {
        let key = string_to_key(item);
        for pos in self.hashes.positions(key)? {
            self.bits.set(pos)?;
        }
        let was_removed = self.removed.unmark(item);
        trace!(item, key, was_removed, "insert");
        Ok(())
    }

    /// Remove `item`.  No bits are cleared; the item is recorded in
    /// the removal index so `find` reports it absent.  Removing an
    /// item that was never inserted affects no other item.
    ///
    /// Returns `true` if the item was not already removed.
    pub fn remove(&mut self, item: &str) -> bool {
        let newly = self.removed.mark(item);
        trace!(item, newly, "remove");
        newly
    }

    /// Check if `item` is in this filter.  Removed items are always
    /// reported absent.  Otherwise every one of the item's bits must
    /// be set.  Can return false positives for items never inserted,
    /// but never false negatives.
    pub fn find(&self, item: &str) -> Result<bool> {
        if self.removed.is_marked(item) {
            return Ok(false);
        }
        for pos in self.hashes.positions(string_to_key(item))? {
            if !self.bits.test(pos)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Get the number of bits this BloomFilter is using
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of hash functions this BloomFilter is using
    pub fn hash_count(&self) -> u32 {
        self.hashes.num_hashes()
    }

    pub fn num_bits(&self) -> usize {
        self.size()
    }

    pub fn num_hashes(&self) -> u32 {
        self.hash_count()
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    /// Number of items currently marked as removed
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Items currently marked as removed
    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.removed.iter()
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// The false positive rate predicted for this filter once it holds
    /// the expected number of items.
    pub fn expected_false_positive_rate(&self) -> f64 {
        false_positive_rate(self.size(), self.params.m, self.hash_count())
    }

    /// Remove all values from this BloomFilter, including removal
    /// marks.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.removed.clear();
    }

    /// Reset the filter and insert only `present`.  Drops the bits of
    /// removed items and empties the removal index.  The caller must
    /// supply every item that should still be present.
    pub fn rebuild<I, S>(&mut self, present: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let purged = self.removed.len();
        self.clear();
        let mut inserted = 0usize;
        for item in present {
            self.insert(item.as_ref())?;
            inserted += 1;
        }
        debug!(purged, inserted, bits_set = self.bits_set(), "rebuilt bloom filter");
        Ok(())
    }
}

impl ASMS for BloomFilter {
    fn insert(&mut self, item: &str) -> Result<()> {
        BloomFilter::insert(self, item)
    }

    fn contains(&self, item: &str) -> Result<bool> {
        self.find(item)
    }

    fn remove(&mut self, item: &str) -> bool {
        BloomFilter::remove(self, item)
    }

    fn clear(&mut self) {
        BloomFilter::clear(self)
    }
}

#[cfg(feature = "do-bench")]
#[cfg(test)]
mod bench {
    extern crate test;
    use self::test::Bencher;
    use rand::Rng;

    use super::BloomFilter;

    #[bench]
    fn insert_benchmark(b: &mut Bencher) {
        let mut bf = BloomFilter::with_rate(0.01, 500000).unwrap();
        let mut rng = rand::thread_rng();

        b.iter(|| {
            let v = rng.gen::<u64>().to_string();
            bf.insert(&v).unwrap();
        })
    }

    #[bench]
    fn find_benchmark(b: &mut Bencher) {
        let cnt = 500000;
        let mut bf = BloomFilter::with_rate(0.01, cnt).unwrap();
        let mut rng = rand::thread_rng();

        for _ in 0..cnt {
            bf.insert(&rng.gen::<u64>().to_string()).unwrap();
        }

        b.iter(|| {
            let v = rng.gen::<u64>().to_string();
            bf.find(&v).unwrap();
        })
    }
}
