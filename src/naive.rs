//! One `bool` per bucket, the unpacked reference the packed filter is checked against.

use crate::hash::derive_indices;
use crate::{BloomFilter, MAX_DATA_DEPTH};

const VALID: &str = "parameters checked in BoolFilter::new";

pub struct BoolFilter {
    buckets: Vec<bool>,
    hash_iterations: usize,
    data_depth: usize,
}

impl BoolFilter {
    pub fn new(hash_iterations: usize, data_depth: usize) -> Self {
        assert!(data_depth >= 1 && data_depth <= MAX_DATA_DEPTH);
        let mut filter = Self {
            buckets: Vec::new(),
            hash_iterations,
            data_depth,
        };
        filter.reset();
        filter
    }
}

impl BloomFilter for BoolFilter {
    fn add(&mut self, data: &[u8]) {
        for i in derive_indices(data, self.hash_iterations, self.data_depth).expect(VALID) {
            self.buckets[i as usize] = true;
        }
    }

    fn check_membership(&self, data: &[u8]) -> bool {
        derive_indices(data, self.hash_iterations, self.data_depth).expect(VALID)
            .into_iter()
            .all(|i| self.buckets[i as usize])
    }

    fn reset(&mut self) {
        self.buckets = vec![false; 1 << (self.data_depth * 8)];
    }
}
