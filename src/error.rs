use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("hash iterations must be at least 1")]
    ZeroHashIterations,

    #[error("data depth {0} is outside 1..=4")]
    InvalidDataDepth(usize),

    #[error("digest of {output} bytes is shorter than data depth {depth}")]
    DigestTooShort { output: usize, depth: usize },

    #[error("bit universe of data depth {0} is not addressable on this platform")]
    UniverseTooLarge(usize),

    #[error("no data depth fits {items} items at false positive rate {fp_rate}")]
    Unsatisfiable { items: usize, fp_rate: f64 },

    #[error("IO: {0}")]
    Io(#[from] io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decompress: {0}")]
    Decompress(io::Error),

    #[error("Persist: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Corrupt filter: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
