//! A bloom filter over a fixed universe of `2^(8 * data_depth)` bits.
//!
//! Every item is mapped to `hash_iterations` buckets by chained SHA-256: the
//! first round hashes the item, each later round hashes the previous digest,
//! and the first `data_depth` bytes of each digest (little-endian) name a
//! bucket. Buckets are packed 64 to a `u64`, so the largest universe
//! (`data_depth = 4`, 2^32 bits) costs 512 MiB, all allocated up front.
//!
//! ```
//! use chained_bloom::{BloomFilter, ClassicBloomFilter};
//!
//! let mut filter = ClassicBloomFilter::new(10, 2).unwrap();
//! filter.build_buckets();
//! filter.add(b"block-42");
//! assert!(filter.check_membership(b"block-42"));
//! ```

mod buckets;
mod classic;
mod config;
mod error;
mod hash;
#[cfg(test)]
mod naive;
pub mod serialize;

pub use buckets::{Buckets, BITS_PER_WORD};
pub use classic::Filter as ClassicBloomFilter;
pub use config::FilterConfig;
pub use error::{Error, Result};
pub use hash::{
    compute_k_num, compute_m_num, derive_indices, false_positive_rate, ChainHasher, DigestHasher, HashIter,
    HashKernels, Sha256Hasher,
};

/// Largest supported data depth; a depth of 5 would need 2^40 bits.
pub const MAX_DATA_DEPTH: usize = 4;

pub trait BloomFilter {
    fn add(&mut self, data: &[u8]);
    /// `false` means `data` was never added; `true` may be a false positive.
    fn check_membership(&self, data: &[u8]) -> bool;
    fn reset(&mut self);
}
