//! Per-cycle basecall (BCL) decoding
//!
//! A BCL file holds one byte per cluster for a single cycle of a single tile:
//!
//! ```text
//! [u32 total][byte]*total        byte = quality (6 bits) | base index (2 bits)
//! ```
//!
//! A quality of zero marks a no-call, emitted as `N`.

use std::io::Read;
use std::path::Path;

use log::debug;

use super::byte::{ByteReader, FileReader};
use super::codec::ClusterCodec;
use crate::error::{ReadError, Result};
use crate::header::{ClusterCountHeader, SIZE_CLUSTER_HEADER};

/// Nucleotides indexed by their 2-bit code
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Base emitted for a no-call
pub const NO_CALL: u8 = b'N';

/// Highest quality a basecall may carry
pub const MAX_QUALITY: u8 = 60;

/// One decoded basecall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseQuality {
    /// One of `A`, `C`, `G`, `T` or `N`
    pub base: u8,
    /// Raw Phred quality in `0..=60`
    pub quality: u8,
}
impl BaseQuality {
    /// Decodes a raw BCL byte without range-checking the quality
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        let quality = (byte & 0xFC) >> 2;
        let base = if quality == 0 {
            NO_CALL
        } else {
            BASES[(byte & 0x3) as usize]
        };
        Self { base, quality }
    }

    #[must_use]
    pub fn is_no_call(&self) -> bool {
        self.quality == 0
    }
}

/// Streaming decoder over one BCL file
#[derive(Debug)]
pub struct BaseCallDecoder<R: Read> {
    inner: ByteReader<R>,
    total: usize,
    current: usize,
}

impl BaseCallDecoder<FileReader> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::open(path)?)
    }
}

impl<R: Read> BaseCallDecoder<R> {
    /// Reads the header from the stream and positions the cursor on the first cluster
    pub fn new(mut inner: ByteReader<R>) -> Result<Self> {
        let header = ClusterCountHeader::from_bytes(&inner.read_array::<SIZE_CLUSTER_HEADER>()?);
        debug!(
            "Opened BCL {} with {} clusters",
            inner.path().display(),
            header.total
        );
        Ok(Self {
            inner,
            total: header.total as usize,
            current: 0,
        })
    }

    /// Decodes the basecall of the next cluster
    ///
    /// Calling this once [`has_next`](ClusterCodec::has_next) is false returns
    /// [`ReadError::OutOfRange`].
    pub fn next(&mut self) -> Result<BaseQuality> {
        if self.current >= self.total {
            return Err(ReadError::OutOfRange(self.current, self.total).into());
        }
        let call = BaseQuality::from_byte(self.inner.read_u8()?);
        if call.quality > MAX_QUALITY {
            return Err(ReadError::InvalidQuality {
                path: self.inner.path().to_path_buf(),
                cluster: self.current,
                quality: call.quality,
            }
            .into());
        }
        self.current += 1;
        Ok(call)
    }
}

impl<R: Read> ClusterCodec for BaseCallDecoder<R> {
    fn path(&self) -> &Path {
        self.inner.path()
    }
    fn total_clusters(&self) -> usize {
        self.total
    }
    fn current_cluster(&self) -> usize {
        self.current
    }
    fn close(&mut self) {
        self.inner.close();
    }
}
