//! Whole-filter persistence.
//!
//! A filter is written as a JSON object with the fields `HashIterations`,
//! `DataDepth` and `IntBuckets`, the last being the packed words as unsigned
//! 64-bit numbers (or `null` while the filter is unbuilt). The JSON may be
//! wrapped in a gzip (deflate) stream. Whether it was is not recorded in the
//! bytes, so the caller passes the same `compress` flag to the decoding side.
//!
//! Only the parameters and the words are stored: a filter built with a custom
//! [`ChainHasher`](crate::ChainHasher) is restored as a SHA-256 filter.

use crate::classic::Filter;
use crate::error::{Error, Result};
use crate::hash::ChainHasher;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Serialize)]
struct FilterRef<'a> {
    #[serde(rename = "HashIterations")]
    hash_iterations: usize,
    #[serde(rename = "DataDepth")]
    data_depth: usize,
    #[serde(rename = "IntBuckets")]
    int_buckets: Option<&'a [u64]>,
}

#[derive(Deserialize)]
struct FilterRecord {
    #[serde(rename = "HashIterations")]
    hash_iterations: usize,
    #[serde(rename = "DataDepth")]
    data_depth: usize,
    #[serde(rename = "IntBuckets", default)]
    int_buckets: Option<Vec<u64>>,
}

impl FilterRecord {
    fn into_filter(self) -> Result<Filter> {
        let filter = match self.int_buckets {
            Some(words) => Filter::with_words(self.hash_iterations, self.data_depth, words),
            None => Filter::new(self.hash_iterations, self.data_depth),
        };
        filter.map_err(|err| {
            warn!(%err, "rejecting persisted bloom filter");
            match err {
                Error::Corrupt(_) => err,
                other => Error::Corrupt(other.to_string()),
            }
        })
    }
}

/// Encodes `filter` into `writer`, compressed when `compress` is set.
pub fn to_writer<H, W>(filter: &Filter<H>, mut writer: W, compress: bool) -> Result<()>
where
    H: ChainHasher,
    W: Write,
{
    let record = FilterRef {
        hash_iterations: filter.hash_iterations(),
        data_depth: filter.data_depth(),
        int_buckets: filter.buckets().map(|b| b.words()),
    };
    debug!(
        hash_iterations = record.hash_iterations,
        data_depth = record.data_depth,
        compress,
        "serializing bloom filter"
    );
    if compress {
        let mut encoder = GzEncoder::new(&mut writer, Compression::default());
        serde_json::to_writer(&mut encoder, &record)?;
        encoder.finish()?;
    } else {
        serde_json::to_writer(&mut writer, &record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Decodes a filter from `reader`; `compressed` must match the flag it was written with.
pub fn from_reader<R: Read>(reader: R, compressed: bool) -> Result<Filter> {
    let record: FilterRecord = if compressed {
        let mut decoded = Vec::new();
        GzDecoder::new(reader)
            .read_to_end(&mut decoded)
            .map_err(Error::Decompress)?;
        serde_json::from_slice(&decoded)?
    } else {
        serde_json::from_reader(reader)?
    };
    let filter = record.into_filter()?;
    debug!(
        hash_iterations = filter.hash_iterations(),
        data_depth = filter.data_depth(),
        built = filter.is_built(),
        compressed,
        "deserialized bloom filter"
    );
    Ok(filter)
}

pub fn to_vec<H: ChainHasher>(filter: &Filter<H>, compress: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_writer(filter, &mut buf, compress)?;
    Ok(buf)
}

pub fn from_slice(bytes: &[u8], compressed: bool) -> Result<Filter> {
    from_reader(bytes, compressed)
}

/// Writes `filter` to `path` through a temporary file in the same directory,
/// so `path` holds either the previous contents or the whole new filter.
pub fn save<H, P>(filter: &Filter<H>, path: P, compress: bool) -> Result<()>
where
    H: ChainHasher,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new().prefix(".bloom_").tempfile_in(dir)?;
    to_writer(filter, BufWriter::new(tmp.as_file_mut()), compress)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    debug!(path = %path.display(), "saved bloom filter");
    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P, compressed: bool) -> Result<Filter> {
    let file = File::open(path.as_ref())?;
    from_reader(BufReader::new(file), compressed)
}
