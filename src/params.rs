//! Construction parameters for a [`BloomFilter`](crate::BloomFilter)
//!
//! # Example
//!
//! ```rust
//! use bloom_remove::FilterParameters;
//!
//! let params = FilterParameters::new(0.1, 10)
//!     .size_scale(2.0)
//!     .buckets(97);
//! assert!(params.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::removal::DEFAULT_BUCKETS;
use crate::sizing::{needed_bits, optimal_num_hashes};

/// Target false positive rate, expected item count, the two scale
/// factors and the removal index bucket count.
///
/// Deserializing only requires `p` and `m`; the rest default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Target false positive probability, in (0,1)
    pub p: f64,
    /// Expected number of items, at least 1
    pub m: u32,
    /// Bit array size scale factor
    #[serde(default = "default_scale")]
    pub c: f64,
    /// Hash count scale factor
    #[serde(default = "default_scale")]
    pub d: f64,
    /// Removal index bucket count
    #[serde(default = "default_buckets")]
    pub q: usize,
}

fn default_scale() -> f64 {
    1.0
}

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

impl FilterParameters {
    /// Parameters for `expected_num_items` items at `false_pos_rate`,
    /// everything else at its default.
    pub fn new(false_pos_rate: f64, expected_num_items: u32) -> FilterParameters {
        FilterParameters {
            p: false_pos_rate,
            m: expected_num_items,
            c: default_scale(),
            d: default_scale(),
            q: DEFAULT_BUCKETS,
        }
    }

    pub fn size_scale(mut self, c: f64) -> FilterParameters {
        self.c = c;
        self
    }

    pub fn hash_scale(mut self, d: f64) -> FilterParameters {
        self.d = d;
        self
    }

    pub fn buckets(mut self, q: usize) -> FilterParameters {
        self.q = q;
        self
    }

    /// Check every parameter without allocating anything.
    pub fn validate(&self) -> Result<()> {
        self.derive().map(|_| ())
    }

    /// The bit count and hash count these parameters call for.
    pub(crate) fn derive(&self) -> Result<(usize, u32)> {
        let num_bits = needed_bits(self.p, self.m, self.c)?;
        let num_hashes = optimal_num_hashes(num_bits, self.m, self.d)?;
        if self.q == 0 {
            return Err(Error::invalid("q", "bucket count must be at least 1"));
        }
        Ok((num_bits, num_hashes))
    }
}
