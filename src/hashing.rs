//! Key derivation and the double-hashing family used to pick bit
//! positions.

use crate::error::{Error, Result};

const SEED_ONE: u32 = 0;
const SEED_TWO: u32 = 1;

/// Multiplier of the key polynomial (as in djb2)
const KEY_MULTIPLIER: u64 = 33;

/// Convert a string to its key: the bytes taken as coefficients of a
/// polynomial in `KEY_MULTIPLIER`, evaluated with wrapping `u64`
/// arithmetic from an accumulator of zero.  Each byte is weighted by
/// its position.  Distinct strings can share a key.
pub fn string_to_key(element: &str) -> u64 {
    let mut key: u64 = 0;
    for b in element.bytes() {
        key = key.wrapping_mul(KEY_MULTIPLIER).wrapping_add(b as u64);
    }
    key
}

fn base_hash(key: u64, seed: u32) -> Result<u64> {
    let bytes = key.to_le_bytes();
    let hash = murmur3::murmur3_x64_128(&mut &bytes[..], seed)
        .map_err(|e| Error::internal(format!("murmur3 failed: {}", e)))?;
    Ok(hash as u64)
}

/// The two base hashes of `key` reduced for a filter of `num_bits`
/// bits.  `h2` is never 0 when `num_bits > 1`, so the positions of a
/// key never all collapse onto `h1`.
fn base_pair(key: u64, num_bits: u64) -> Result<(u64, u64)> {
    let h1 = base_hash(key, SEED_ONE)? % num_bits;
    let h2 = if num_bits > 1 {
        1 + base_hash(key, SEED_TWO)? % (num_bits - 1)
    } else {
        0
    };
    Ok((h1, h2))
}

/// Iterates the `count` bit positions of a key:
/// position(i) = (h1 + i * h2) mod num_bits
pub struct HashIter {
    h1: u64,
    h2: u64,
    num_bits: u64,
    i: u32,
    count: u32,
}

impl Iterator for HashIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.i == self.count {
            return None;
        }
        let r = position(self.h1, self.h2, self.i, self.num_bits);
        self.i += 1;
        Some(r as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.i) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for HashIter {}

impl HashIter {
    pub fn from(key: u64, count: u32, num_bits: usize) -> Result<HashIter> {
        let num_bits = num_bits.max(1) as u64;
        let (h1, h2) = base_pair(key, num_bits)?;
        Ok(HashIter {
            h1,
            h2,
            num_bits,
            i: 0,
            count,
        })
    }
}

// h1 and h2 are already reduced mod num_bits, so the u128 sum cannot
// overflow.
fn position(h1: u64, h2: u64, i: u32, num_bits: u64) -> u64 {
    ((h1 as u128 + i as u128 * h2 as u128) % num_bits as u128) as u64
}

/// The `num_hashes` position functions over a filter of `num_bits`
/// bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFamily {
    num_bits: usize,
    num_hashes: u32,
}

impl HashFamily {
    pub fn new(num_bits: usize, num_hashes: u32) -> Result<HashFamily> {
        if num_bits < 1 {
            return Err(Error::invalid("n", "must be at least 1"));
        }
        if num_hashes < 1 {
            return Err(Error::invalid("k", "must be at least 1"));
        }
        Ok(HashFamily { num_bits, num_hashes })
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// All positions for `key`, in hash-index order.
    pub fn positions(&self, key: u64) -> Result<HashIter> {
        HashIter::from(key, self.num_hashes, self.num_bits)
    }

    /// Position chosen by hash function `index` for `key`.
    ///
    /// Fails with `InternalError` if `index` is not below the number of
    /// hashes, or if the computed position is not below the number of
    /// bits.
    pub fn hash_at(&self, key: u64, index: u32) -> Result<usize> {
        if index >= self.num_hashes {
            let count = self.num_hashes as u64;
            return Err(Error::out_of_range("hash index", index as u64, count));
        }
        let num_bits = self.num_bits as u64;
        let (h1, h2) = base_pair(key, num_bits)?;
        let pos = position(h1, h2, index, num_bits);
        if pos >= num_bits {
            return Err(Error::out_of_range("bit position", pos, num_bits));
        }
        Ok(pos as usize)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{string_to_key, HashFamily};
    use crate::error::Error;

    #[test]
    fn key_is_position_weighted() {
        assert_eq!(string_to_key(""), 0);
        assert_eq!(string_to_key("a"), 97);
        // 'a'*33 + 'b'
        assert_eq!(string_to_key("ab"), 97 * 33 + 98);
        assert_ne!(string_to_key("ab"), string_to_key("ba"));
        assert_eq!(string_to_key("apple"), string_to_key("apple"));
        // collisions are allowed: 98*33 + 65 == 97*33 + 98
        assert_eq!(string_to_key("ab"), string_to_key("bA"));
    }

    #[test]
    fn key_wraps_instead_of_overflowing() {
        let long = "\u{7f}".repeat(20000);
        let expected = (0..20000).fold(0u64, |k, _| k.wrapping_mul(33).wrapping_add(127));
        assert_eq!(string_to_key(&long), expected);
    }

    #[test]
    fn positions_in_range() {
        let fam = HashFamily::new(48, 3).unwrap();
        for s in ["apple", "banana", "cherry", "", "a much longer string than the others"] {
            let key = string_to_key(s);
            let positions: Vec<usize> = fam.positions(key).unwrap().collect();
            assert_eq!(positions.len(), 3);
            assert!(positions.iter().all(|&p| p < 48));
        }
    }

    #[test]
    fn deterministic() {
        let fam = HashFamily::new(10007, 7).unwrap();
        let key = string_to_key("deterministic");
        let first: Vec<usize> = fam.positions(key).unwrap().collect();
        let second: Vec<usize> = fam.positions(key).unwrap().collect();
        assert_eq!(first, second);
        for i in 0..7 {
            assert_eq!(fam.hash_at(key, i).unwrap(), first[i as usize]);
        }
    }

    #[test]
    fn positions_spread() {
        let fam = HashFamily::new(10000, 7).unwrap();
        let positions: HashSet<usize> =
            fam.positions(string_to_key("spread")).unwrap().collect();
        assert!(positions.len() >= 3, "positions too clustered: {:?}", positions);
    }

    #[test]
    fn positions_never_collapse() {
        for num_bits in [2, 3, 48, 959] {
            let fam = HashFamily::new(num_bits, 3).unwrap();
            for i in 0..10000 {
                let item = format!("item-{}", i);
                let positions: Vec<usize> =
                    fam.positions(string_to_key(&item)).unwrap().collect();
                assert!(
                    positions.iter().any(|&p| p != positions[0]),
                    "all positions of {} equal in {} bits: {:?}",
                    item,
                    num_bits,
                    positions
                );
            }
        }
    }

    #[test]
    fn single_bit_family() {
        let fam = HashFamily::new(1, 4).unwrap();
        assert!(fam.positions(12345).unwrap().all(|p| p == 0));
    }

    #[test]
    fn bad_index() {
        let fam = HashFamily::new(48, 3).unwrap();
        match fam.hash_at(1, 3) {
            Err(Error::InternalError { detail }) => {
                assert_eq!(detail, "hash index 3 out of range [0, 3)")
            }
            other => panic!("expected InternalError, got {:?}", other),
        }
        assert!(HashFamily::new(0, 3).is_err());
        assert!(HashFamily::new(48, 0).is_err());
    }
}
