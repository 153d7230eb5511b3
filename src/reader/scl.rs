//! Second-call (SCL) decoding
//!
//! ```text
//! [u32 total][byte]*ceil(total / 4)
//! ```
//!
//! Four 2-bit bases are packed per byte, the first cluster in the two most
//! significant bits. The whole body is decoded when the file is opened, so
//! [`SecondCallDecoder::next`] only moves an in-memory cursor.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use super::bcl::BASES;
use super::byte::{ByteReader, FileReader};
use super::codec::ClusterCodec;
use crate::error::{ReadError, Result};
use crate::header::{ClusterCountHeader, SIZE_CLUSTER_HEADER};

/// Returns the base of cluster `index` within a packed SCL body
#[inline]
#[must_use]
pub fn unpack_base(body: &[u8], index: usize) -> u8 {
    let shift = (3 - index % 4) * 2;
    BASES[((body[index / 4] >> shift) & 0x3) as usize]
}

/// Eager decoder over one SCL file
#[derive(Debug)]
pub struct SecondCallDecoder {
    path: PathBuf,
    bases: Vec<u8>,
    current: usize,
}

impl SecondCallDecoder {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::<FileReader>::open(path)?)
    }

    /// Reads and decodes the whole file, then releases the handle
    pub fn new<R: Read>(mut inner: ByteReader<R>) -> Result<Self> {
        let header = ClusterCountHeader::from_bytes(&inner.read_array::<SIZE_CLUSTER_HEADER>()?);
        let total = header.total as usize;

        let mut body = vec![0u8; total.div_ceil(4)];
        inner.read_exact(&mut body)?;
        let bases = (0..total).map(|i| unpack_base(&body, i)).collect();

        let path = inner.path().to_path_buf();
        inner.close();
        debug!("Loaded SCL {} with {} clusters", path.display(), total);

        Ok(Self {
            path,
            bases,
            current: 0,
        })
    }

    /// Returns the second-call base of the next cluster
    pub fn next(&mut self) -> Result<u8> {
        match self.bases.get(self.current) {
            Some(&base) => {
                self.current += 1;
                Ok(base)
            }
            None => Err(ReadError::OutOfRange(self.current, self.bases.len()).into()),
        }
    }
}

impl ClusterCodec for SecondCallDecoder {
    fn path(&self) -> &Path {
        &self.path
    }
    fn total_clusters(&self) -> usize {
        self.bases.len()
    }
    fn current_cluster(&self) -> usize {
        self.current
    }
    /// The file handle is already released after loading
    fn close(&mut self) {}
}
