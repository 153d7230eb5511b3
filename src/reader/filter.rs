//! Pass-filter decoding
//!
//! ```text
//! [u32 zero][u32 version = 3][u32 total][byte]*total      bit 0 = passed filter
//! ```

use std::io::Read;
use std::path::Path;

use log::debug;

use super::byte::{ByteReader, FileReader};
use super::codec::ClusterCodec;
use crate::error::{ReadError, Result};
use crate::header::{FilterHeader, SIZE_FILTER_HEADER};

/// Streaming decoder over one filter file
#[derive(Debug)]
pub struct FilterDecoder<R: Read> {
    inner: ByteReader<R>,
    header: FilterHeader,
    current: usize,
    passed: usize,
}

impl FilterDecoder<FileReader> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::open(path)?)
    }
}

impl<R: Read> FilterDecoder<R> {
    pub fn new(mut inner: ByteReader<R>) -> Result<Self> {
        let header = FilterHeader::from_bytes(&inner.read_array::<SIZE_FILTER_HEADER>()?)?;
        debug!(
            "Opened filter {} (version {}) with {} clusters",
            inner.path().display(),
            header.version,
            header.total
        );
        Ok(Self {
            inner,
            header,
            current: 0,
            passed: 0,
        })
    }

    pub fn header(&self) -> FilterHeader {
        self.header
    }

    /// Number of clusters seen so far that passed filter
    pub fn passed_clusters(&self) -> usize {
        self.passed
    }

    /// Returns `true` when the next cluster passed filter
    pub fn next(&mut self) -> Result<bool> {
        if self.current >= self.total_clusters() {
            return Err(ReadError::OutOfRange(self.current, self.total_clusters()).into());
        }
        let passed = self.inner.read_u8()? & 0x1 == 1;
        self.current += 1;
        if passed {
            self.passed += 1;
        }
        Ok(passed)
    }
}

impl<R: Read> ClusterCodec for FilterDecoder<R> {
    fn path(&self) -> &Path {
        self.inner.path()
    }
    fn total_clusters(&self) -> usize {
        self.header.total as usize
    }
    fn current_cluster(&self) -> usize {
        self.current
    }
    fn close(&mut self) {
        self.inner.close();
    }
}
