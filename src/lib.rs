//! Implementation of a bloom filter that supports removal, in rust
//!
//! Bits in a bloom filter can be shared by several items, so they can
//! never safely be cleared.  This filter instead keeps an exact index
//! of removed items next to the bit array: lookups consult the index
//! first and removal always wins, while inserting an item again makes
//! it present again.
//!
//! # Basic Usage
//! ```toml
//! [dependencies]
//! bloom-remove = "0.1.0"
//! ```
//!
//! ```rust
//! use bloom_remove::{BloomFilter, FilterParameters};
//!
//! let params = FilterParameters::new(0.01, 1000);
//! let mut filter = BloomFilter::new(params).unwrap();
//! filter.insert("apple").unwrap();
//! assert!(filter.find("apple").unwrap());
//! filter.remove("apple");
//! assert!(!filter.find("apple").unwrap());
//! ```
//!

#![cfg_attr(feature = "do-bench", feature(test))]

pub mod bitarray;
pub mod error;
pub mod filter;
pub mod hashing;
pub mod params;
pub mod removal;
pub mod sizing;

pub use error::{Error, Result};
pub use filter::BloomFilter;
pub use hashing::{string_to_key, HashFamily};
pub use params::FilterParameters;
pub use removal::RemovalIndex;
pub use sizing::{false_positive_rate, needed_bits, optimal_num_hashes};

/// Approximate Set Membership Structure with removal.  An item that
/// was inserted and not removed since is always reported present; a
/// removed item is always reported absent.
pub trait ASMS {
    fn insert(&mut self, item: &str) -> Result<()>;
    fn contains(&self, item: &str) -> Result<bool>;
    /// Returns `true` if the item was not already removed
    fn remove(&mut self, item: &str) -> bool;
    fn clear(&mut self);
}
