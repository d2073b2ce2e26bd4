use crate::buckets::{compute_word_num, Buckets};
use crate::error::{Error, Result};
use crate::hash::{false_positive_rate, ChainHasher, HashKernels, Sha256Hasher};
use crate::{BloomFilter, FilterConfig, MAX_DATA_DEPTH};
use std::convert::TryFrom;
use tracing::debug;

const UNBUILT: &str = "bloom filter used before build_buckets";

/// A bloom filter over a universe of `2^(data_depth * 8)` bits.
///
/// The buckets are not allocated by the constructors; call
/// [`Filter::build_buckets`] (or [`BloomFilter::reset`]) before the first
/// `add` or `check_membership`, which panic otherwise.
///
/// There is no internal locking: mutation takes `&mut self`, so sharing a
/// filter between threads means wrapping it in a `Mutex` or `RwLock`.
#[derive(Clone)]
pub struct Filter<H = Sha256Hasher> {
    buckets: Option<Buckets>,     // filter data
    hash_kernels: HashKernels<H>, // hash kernels
    universe: usize,              // bucket count
}

impl Filter<Sha256Hasher> {
    /// Creates an unbuilt SHA-256 filter.
    /// hash_iterations is the k of every add and lookup, at least 1.
    /// data_depth is the number of digest bytes per index, in [1, 4].
    pub fn new(hash_iterations: usize, data_depth: usize) -> Result<Self> {
        Self::with_hasher(hash_iterations, data_depth, Sha256Hasher::new())
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::new(config.hash_iterations, config.data_depth)
    }

    /// Rebuilds a filter from its packed words, as persisted by the serializer.
    pub fn with_words(hash_iterations: usize, data_depth: usize, words: Vec<u64>) -> Result<Self> {
        let mut filter = Self::new(hash_iterations, data_depth)?;
        let len = words.len();
        let buckets = Buckets::with_words(filter.universe, words).ok_or_else(|| {
            Error::Corrupt(format!(
                "expected {} words for data depth {}, found {}",
                compute_word_num(filter.universe),
                data_depth,
                len
            ))
        })?;
        filter.buckets = Some(buckets);
        Ok(filter)
    }
}

impl<H: ChainHasher> Filter<H> {
    /// Creates an unbuilt filter deriving its indices with `hasher`.
    /// Nothing is allocated when the parameters are rejected.
    pub fn with_hasher(hash_iterations: usize, data_depth: usize, hasher: H) -> Result<Self> {
        let universe = check_params(hash_iterations, data_depth, hasher.output_size())?;
        Ok(Self {
            buckets: None,
            hash_kernels: HashKernels::new(hash_iterations, data_depth, hasher)?,
            universe,
        })
    }

    /// Allocates zeroed buckets, dropping any previous contents.
    pub fn build_buckets(&mut self) {
        debug!(
            data_depth = self.data_depth(),
            buckets = self.universe,
            "allocating bloom filter buckets"
        );
        self.buckets = Some(Buckets::new(self.universe));
    }

    pub fn is_built(&self) -> bool {
        self.buckets.is_some()
    }

    pub fn buckets(&self) -> Option<&Buckets> {
        self.buckets.as_ref()
    }

    pub fn hash_iterations(&self) -> usize {
        self.hash_kernels.k()
    }

    pub fn data_depth(&self) -> usize {
        self.hash_kernels.depth()
    }

    pub fn universe_bits(&self) -> usize {
        self.universe
    }

    /// Theoretical false positive rate after `items_count` distinct adds.
    pub fn estimated_false_positive_rate(&self, items_count: usize) -> f64 {
        false_positive_rate(self.hash_iterations(), items_count, self.universe as u64)
    }
}

impl<H: ChainHasher> BloomFilter for Filter<H> {
    fn add(&mut self, data: &[u8]) {
        let buckets = self.buckets.as_mut().expect(UNBUILT);
        self.hash_kernels.hash_iter(data).for_each(|i| buckets.set(i as usize))
    }

    fn check_membership(&self, data: &[u8]) -> bool {
        let buckets = self.buckets.as_ref().expect(UNBUILT);
        self.hash_kernels.hash_iter(data).all(|i| buckets.get(i as usize))
    }

    fn reset(&mut self) {
        match self.buckets.as_mut() {
            Some(buckets) => {
                debug!(buckets = self.universe, "resetting bloom filter");
                buckets.reset()
            }
            None => self.build_buckets(),
        }
    }
}

// Validates filter parameters and returns the bucket count they imply.
pub(crate) fn check_params(hash_iterations: usize, data_depth: usize, output_size: usize) -> Result<usize> {
    if hash_iterations == 0 {
        return Err(Error::ZeroHashIterations);
    }
    if data_depth == 0 || data_depth > MAX_DATA_DEPTH {
        return Err(Error::InvalidDataDepth(data_depth));
    }
    if output_size < data_depth {
        return Err(Error::DigestTooShort {
            output: output_size,
            depth: data_depth,
        });
    }
    usize::try_from(1u64 << (data_depth * 8)).map_err(|_| Error::UniverseTooLarge(data_depth))
}
