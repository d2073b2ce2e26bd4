use std::mem::size_of;

type Word = u64;
const BYTES_PER_WORD: usize = size_of::<Word>();
pub const BITS_PER_WORD: usize = BYTES_PER_WORD * 8;

/// A fixed number of one-bit buckets packed into 64-bit words.
///
/// Bits only go from 0 to 1; the sole way back is [`Buckets::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buckets {
    data: Vec<Word>,
    count: usize,
}

impl Buckets {
    /// Creates `count` zeroed buckets.
    pub fn new(count: usize) -> Self {
        Self {
            data: vec![0; compute_word_num(count)],
            count,
        }
    }

    /// Rebuilds buckets from their words, which must number exactly
    /// `ceil(count / 64)`.
    pub fn with_words(count: usize, words: Vec<Word>) -> Option<Self> {
        if words.len() != compute_word_num(count) {
            return None;
        }
        Some(Self { data: words, count })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn words(&self) -> &[Word] {
        &self.data
    }

    /// Number of buckets currently set.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0)
    }

    #[inline]
    pub fn set(&mut self, bucket: usize) {
        debug_assert!(bucket < self.count);
        self.data[bucket / BITS_PER_WORD] |= 1 << (bucket % BITS_PER_WORD);
    }

    #[inline]
    pub fn get(&self, bucket: usize) -> bool {
        debug_assert!(bucket < self.count);
        self.data[bucket / BITS_PER_WORD] & (1 << (bucket % BITS_PER_WORD)) != 0
    }
}

/// Number of words holding `count` buckets.
#[inline]
pub(crate) fn compute_word_num(count: usize) -> usize {
    (count + BITS_PER_WORD - 1) / BITS_PER_WORD
}
