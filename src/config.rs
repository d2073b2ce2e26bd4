use crate::classic::check_params;
use crate::error::{Error, Result};
use crate::hash::{compute_k_num, compute_m_num};
use crate::MAX_DATA_DEPTH;
use serde::{Deserialize, Serialize};

const SHA256_OUTPUT_SIZE: usize = 32;

/// Construction parameters of a filter, loadable from any serde format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    pub hash_iterations: usize,
    pub data_depth: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hash_iterations: 10,
            data_depth: 3,
        }
    }
}

impl FilterConfig {
    pub fn new(hash_iterations: usize, data_depth: usize) -> Self {
        Self {
            hash_iterations,
            data_depth,
        }
    }

    /// Picks the iteration count for `fp_rate` and the smallest data depth
    /// whose universe holds the optimal number of bits for `items_count`.
    pub fn with_fp_rate(items_count: usize, fp_rate: f64) -> Result<Self> {
        let unsatisfiable = Error::Unsatisfiable { items: items_count, fp_rate };
        if items_count == 0 || !(fp_rate > 0.0 && fp_rate < 1.0) {
            return Err(unsatisfiable);
        }
        let bits = compute_m_num(items_count, fp_rate) as u64;
        let data_depth = (1..=MAX_DATA_DEPTH)
            .find(|&d| 1u64 << (d * 8) >= bits)
            .ok_or(unsatisfiable)?;
        Ok(Self {
            hash_iterations: compute_k_num(fp_rate).max(1),
            data_depth,
        })
    }

    pub fn validate(&self) -> Result<()> {
        check_params(self.hash_iterations, self.data_depth, SHA256_OUTPUT_SIZE).map(|_| ())
    }
}
