//! Compressed-block position (clocs) decoding
//!
//! ```text
//! [u8 version = 1][u32 total_blocks]{[u8 count]{[u8 dx][u8 dy]}*count}*total_blocks
//! ```
//!
//! The image is divided into square blocks of [`BLOCK_SIZE`] pixels laid out
//! row-major, [`BLOCKS_PER_LINE`] per row. Each cluster stores its offset within
//! its block in tenths of a pixel.

use std::io::Read;
use std::path::Path;

use log::debug;

use super::byte::{ByteReader, FileReader};
use super::position::Position;
use crate::error::{ReadError, Result};
use crate::header::{ClocsHeader, SIZE_CLOCS_HEADER};

/// Edge length of a position block in pixels
pub const BLOCK_SIZE: u32 = 25;

/// Width of a tile image in pixels
pub const IMAGE_WIDTH: u32 = 2048;

/// Number of blocks in one row of the image
pub const BLOCKS_PER_LINE: u32 = IMAGE_WIDTH.div_ceil(BLOCK_SIZE);

/// Computes the normalized position of a cluster in 1-based block `block`
#[must_use]
pub fn block_position(block: u32, dx: u8, dy: u8) -> Position {
    let column = (block - 1) % BLOCKS_PER_LINE;
    let row = (block - 1) / BLOCKS_PER_LINE;
    let x = f64::from(BLOCK_SIZE * column) + f64::from(dx) / 10.0;
    let y = f64::from(BLOCK_SIZE * row) + f64::from(dy) / 10.0;
    Position::from_physical(x, y)
}

/// Streaming decoder over one clocs file
#[derive(Debug)]
pub struct ClocsDecoder<R: Read> {
    inner: ByteReader<R>,
    header: ClocsHeader,
    /// 1-based index of the block being read, 0 before the first block
    block: u32,
    /// Clusters left in the current block
    remaining: u8,
    current: usize,
}

impl ClocsDecoder<FileReader> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::open(path)?)
    }
}

impl<R: Read> ClocsDecoder<R> {
    pub fn new(mut inner: ByteReader<R>) -> Result<Self> {
        let header = ClocsHeader::from_bytes(&inner.read_array::<SIZE_CLOCS_HEADER>()?)?;
        debug!(
            "Opened clocs {} with {} blocks",
            inner.path().display(),
            header.total_blocks
        );
        let mut decoder = Self {
            inner,
            header,
            block: 0,
            remaining: 0,
            current: 0,
        };
        decoder.advance_block()?;
        Ok(decoder)
    }

    /// Moves to the next non-empty block if the current one is exhausted
    fn advance_block(&mut self) -> Result<()> {
        while self.remaining == 0 && self.block < self.header.total_blocks {
            self.remaining = self.inner.read_u8()?;
            self.block += 1;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn header(&self) -> ClocsHeader {
        self.header
    }

    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    pub fn current_total_clusters(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> Result<Position> {
        if self.remaining == 0 {
            return Err(ReadError::OutOfRange(self.current, self.current).into());
        }
        let dx = self.inner.read_u8()?;
        let dy = self.inner.read_u8()?;
        let position = block_position(self.block, dx, dy);
        self.remaining -= 1;
        self.current += 1;
        self.advance_block()?;
        Ok(position)
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}
