use crate::classic::check_params;
use crate::error::Result;
use sha2::digest::Output;
use sha2::{Digest, Sha256};
use std::f64::consts::LN_2;
use std::marker::PhantomData;

const LN_2_2: f64 = LN_2 * LN_2;

/// Calculates the optimal number of hash iterations to use for a Bloom
/// filter based on the desired rate of false positives.
///
/// # Panics
///
/// Panics unless `fp_rate` is in ]0.0, 1.0[.
pub fn compute_k_num(fp_rate: f64) -> usize {
    assert!(fp_rate > 0.0 && fp_rate < 1.0);
    fp_rate.log2().abs().ceil() as usize
}

/// Calculates the optimal Bloom filter size, m, based on the number of
/// items and the desired rate of false positives.
///
/// # Panics
///
/// Panics if `items_count` is zero or `fp_rate` is not in ]0.0, 1.0[.
pub fn compute_m_num(items_count: usize, fp_rate: f64) -> usize {
    assert!(items_count > 0);
    assert!(fp_rate > 0.0 && fp_rate < 1.0);
    ((items_count as f64) * fp_rate.ln().abs() / LN_2_2).ceil() as usize
}

/// Approximate false positive rate `(1 - e^(-k*n/m))^k` of a filter with `k`
/// hash iterations and `m` bits after `n` distinct items were added.
pub fn false_positive_rate(k: usize, n: usize, m: u64) -> f64 {
    let (k, n, m) = (k as f64, n as f64, m as f64);
    (1.0 - (-k * n / m).exp()).powf(k)
}

/// A deterministic fixed-width digest, the only primitive index derivation needs.
pub trait ChainHasher {
    type Output: AsRef<[u8]>;

    /// Width of every digest in bytes.
    fn output_size(&self) -> usize;

    fn hash(&self, data: &[u8]) -> Self::Output;
}

/// Adapts any RustCrypto [`Digest`] into a [`ChainHasher`].
pub struct DigestHasher<D> {
    _digest: PhantomData<fn() -> D>,
}

impl<D> DigestHasher<D> {
    pub fn new() -> Self {
        Self { _digest: PhantomData }
    }
}

impl<D> Default for DigestHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestHasher<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D: Digest> ChainHasher for DigestHasher<D> {
    type Output = Output<D>;

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn hash(&self, data: &[u8]) -> Output<D> {
        D::digest(data)
    }
}

pub type Sha256Hasher = DigestHasher<Sha256>;

/// Derives `k` bucket indices per item by iterated hashing: round `i + 1`
/// hashes the digest of round `i`, and each index is the first `depth` bytes
/// of its round's digest read as little-endian.
#[derive(Clone)]
pub struct HashKernels<H> {
    k: usize,     // hash iterations per item
    depth: usize, // bytes taken from each digest
    hasher: H,
}

impl<H: ChainHasher> HashKernels<H> {
    /// Fails on the same parameters a filter rejects: `k == 0`, a depth
    /// outside 1..=4 or one wider than the hasher's digest.
    pub fn new(k: usize, depth: usize, hasher: H) -> Result<Self> {
        check_params(k, depth, hasher.output_size())?;
        Ok(Self { k, depth, hasher })
    }

    #[inline(always)]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Lazily yields the indices of `item`; each round is only hashed when pulled.
    pub fn hash_iter<'a>(&'a self, item: &'a [u8]) -> HashIter<'a, H> {
        HashIter {
            hasher: &self.hasher,
            item,
            last: None,
            depth: self.depth,
            remaining: self.k,
        }
    }
}

pub struct HashIter<'a, H: ChainHasher> {
    hasher: &'a H,
    item: &'a [u8],
    last: Option<H::Output>,
    depth: usize,
    remaining: usize,
}

impl<'a, H: ChainHasher> Iterator for HashIter<'a, H> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let digest = match self.last.take() {
            Some(prev) => self.hasher.hash(prev.as_ref()),
            None => self.hasher.hash(self.item),
        };
        let index = truncate_le(digest.as_ref(), self.depth);
        self.last = Some(digest);
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, H: ChainHasher> ExactSizeIterator for HashIter<'a, H> {}

#[inline]
fn truncate_le(digest: &[u8], depth: usize) -> u32 {
    digest[..depth].iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Derives the `k` SHA-256 indices of `data` in a universe of `2^(depth * 8)` bits.
pub fn derive_indices(data: &[u8], k: usize, depth: usize) -> Result<Vec<u32>> {
    Ok(HashKernels::new(k, depth, Sha256Hasher::new())?.hash_iter(data).collect())
}
