//! Dense binary position (locs) decoding
//!
//! ```text
//! [u32 reserved][f32 version][u32 total]{[f32 x][f32 y]}*total
//! ```
//!
//! All fields are little-endian. Coordinates are in pixels.

use std::io::Read;
use std::path::Path;

use log::debug;

use super::byte::{ByteReader, FileReader};
use super::position::Position;
use crate::error::{ReadError, Result};
use crate::header::{LocsHeader, SIZE_LOCS_HEADER};

/// Streaming decoder over one locs file
#[derive(Debug)]
pub struct LocsDecoder<R: Read> {
    inner: ByteReader<R>,
    header: LocsHeader,
    current: usize,
}

impl LocsDecoder<FileReader> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::open(path)?)
    }
}

impl<R: Read> LocsDecoder<R> {
    pub fn new(mut inner: ByteReader<R>) -> Result<Self> {
        let header = LocsHeader::from_bytes(&inner.read_array::<SIZE_LOCS_HEADER>()?);
        debug!(
            "Opened locs {} with {} clusters",
            inner.path().display(),
            header.total
        );
        Ok(Self {
            inner,
            header,
            current: 0,
        })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn total_clusters(&self) -> usize {
        self.header.total as usize
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_clusters()
    }

    pub fn current_total_clusters(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> Result<Position> {
        if !self.has_next() {
            return Err(ReadError::OutOfRange(self.current, self.total_clusters()).into());
        }
        let x = self.inner.read_f32()?;
        let y = self.inner.read_f32()?;
        self.current += 1;
        Ok(Position::from_physical(f64::from(x), f64::from(y)))
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;
    use byteorder::{LittleEndian, WriteBytesExt};

    #[test]
    fn test_decode_positions() -> Result<()> {
        let mut buffer = Vec::new();
        LocsHeader::new(2).write_bytes(&mut buffer)?;
        for value in [0.0f32, 0.0, 123.5, 67.75] {
            buffer.write_f32::<LittleEndian>(value)?;
        }

        let mut reader = LocsDecoder::new(ByteReader::new(buffer.as_slice(), "s_1_1101.locs"))?;
        assert_eq!(reader.total_clusters(), 2);
        assert_eq!(reader.next()?, Position::new(1000, 1000));
        assert_eq!(reader.next()?, Position::new(2235, 1678));
        assert!(!reader.has_next());
        assert!(matches!(
            reader.next().unwrap_err(),
            Error::ReadError(ReadError::OutOfRange(2, 2))
        ));
        Ok(())
    }

    #[test]
    fn test_truncated_record() -> Result<()> {
        let mut buffer = Vec::new();
        LocsHeader::new(1).write_bytes(&mut buffer)?;
        buffer.write_f32::<LittleEndian>(1.0)?;

        let mut reader = LocsDecoder::new(ByteReader::new(buffer.as_slice(), "short.locs"))?;
        assert!(matches!(
            reader.next().unwrap_err(),
            Error::ReadError(ReadError::UnexpectedEndOfStream { .. })
        ));
        Ok(())
    }
}
