//! Header module for the bcl2reads library
//!
//! Every raw data file starts with a small fixed header declaring how many clusters
//! (or position blocks) follow. This module provides the header structures of the
//! binary formats, their validation, and their serialization.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{Read, Write};

use crate::error::{HeaderError, Result};

/// The only supported filter file version
pub const FILTER_VERSION: u32 = 3;

/// The only supported clocs file version
pub const CLOCS_VERSION: u8 = 1;

/// Size of the BCL and SCL headers in bytes
pub const SIZE_CLUSTER_HEADER: usize = 4;

/// Size of the filter header in bytes
pub const SIZE_FILTER_HEADER: usize = 12;

/// Size of the clocs header in bytes
pub const SIZE_CLOCS_HEADER: usize = 5;

/// Size of the locs header in bytes
pub const SIZE_LOCS_HEADER: usize = 12;

/// Header shared by the BCL and SCL formats
///
/// A single little-endian `u32` holding the number of clusters in the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterCountHeader {
    /// Number of clusters in the file
    ///
    /// 4 bytes
    pub total: u32,
}
impl ClusterCountHeader {
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self { total }
    }

    pub fn from_bytes(buffer: &[u8; SIZE_CLUSTER_HEADER]) -> Self {
        Self {
            total: LittleEndian::read_u32(buffer),
        }
    }

    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buffer = [0u8; SIZE_CLUSTER_HEADER];
        LittleEndian::write_u32(&mut buffer, self.total);
        writer.write_all(&buffer)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buffer = [0u8; SIZE_CLUSTER_HEADER];
        reader.read_exact(&mut buffer)?;
        Ok(Self::from_bytes(&buffer))
    }
}

/// Header structure for pass-filter files
///
/// The total size of this structure is 12 bytes:
/// a reserved zero field, the format version and the cluster count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterHeader {
    /// Legacy reserved field, always zero
    ///
    /// 4 bytes
    pub reserved: u32,

    /// Version of the file format
    ///
    /// 4 bytes
    pub version: u32,

    /// Number of clusters in the file
    ///
    /// 4 bytes
    pub total: u32,
}
impl FilterHeader {
    /// Creates a new header for the current version with the given cluster count
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self {
            reserved: 0,
            version: FILTER_VERSION,
            total,
        }
    }

    /// Parses a header from a fixed-size byte array
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The reserved field is not zero
    /// * The version is not [`FILTER_VERSION`]
    pub fn from_bytes(buffer: &[u8; SIZE_FILTER_HEADER]) -> Result<Self> {
        let reserved = LittleEndian::read_u32(&buffer[0..4]);
        if reserved != 0 {
            return Err(HeaderError::NonZeroReserved(reserved).into());
        }
        let version = LittleEndian::read_u32(&buffer[4..8]);
        if version != FILTER_VERSION {
            return Err(HeaderError::InvalidFilterVersion(version).into());
        }
        let total = LittleEndian::read_u32(&buffer[8..12]);
        Ok(Self {
            reserved,
            version,
            total,
        })
    }

    /// Parses a header from an arbitrarily sized buffer
    ///
    /// The buffer must hold at least [`SIZE_FILTER_HEADER`] bytes; any trailing bytes
    /// are ignored.
    pub fn from_buffer(buffer: &[u8]) -> Result<Self> {
        let mut bytes = [0u8; SIZE_FILTER_HEADER];
        if buffer.len() < SIZE_FILTER_HEADER {
            return Err(HeaderError::InvalidSize(buffer.len(), SIZE_FILTER_HEADER).into());
        }
        bytes.copy_from_slice(&buffer[..SIZE_FILTER_HEADER]);
        Self::from_bytes(&bytes)
    }

    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buffer = [0u8; SIZE_FILTER_HEADER];
        LittleEndian::write_u32(&mut buffer[0..4], self.reserved);
        LittleEndian::write_u32(&mut buffer[4..8], self.version);
        LittleEndian::write_u32(&mut buffer[8..12], self.total);
        writer.write_all(&buffer)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buffer = [0u8; SIZE_FILTER_HEADER];
        reader.read_exact(&mut buffer)?;
        Self::from_bytes(&buffer)
    }
}

/// Header structure for compressed-block position files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClocsHeader {
    /// Version of the file format
    ///
    /// 1 byte
    pub version: u8,

    /// Number of position blocks that follow
    ///
    /// 4 bytes
    pub total_blocks: u32,
}
impl ClocsHeader {
    #[must_use]
    pub fn new(total_blocks: u32) -> Self {
        Self {
            version: CLOCS_VERSION,
            total_blocks,
        }
    }

    pub fn from_bytes(buffer: &[u8; SIZE_CLOCS_HEADER]) -> Result<Self> {
        let version = buffer[0];
        if version != CLOCS_VERSION {
            return Err(HeaderError::InvalidClocsVersion(version).into());
        }
        let total_blocks = LittleEndian::read_u32(&buffer[1..5]);
        Ok(Self {
            version,
            total_blocks,
        })
    }

    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buffer = [0u8; SIZE_CLOCS_HEADER];
        buffer[0] = self.version;
        LittleEndian::write_u32(&mut buffer[1..5], self.total_blocks);
        writer.write_all(&buffer)?;
        Ok(())
    }
}

/// Header structure for dense binary position files
///
/// Only the cluster count is interpreted; the two leading fields are carried as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocsHeader {
    /// 4 bytes, conventionally `1`
    pub reserved: u32,

    /// 4 bytes, conventionally `1.0`
    pub version: f32,

    /// Number of clusters in the file
    ///
    /// 4 bytes
    pub total: u32,
}
impl LocsHeader {
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self {
            reserved: 1,
            version: 1.0,
            total,
        }
    }

    pub fn from_bytes(buffer: &[u8; SIZE_LOCS_HEADER]) -> Self {
        Self {
            reserved: LittleEndian::read_u32(&buffer[0..4]),
            version: LittleEndian::read_f32(&buffer[4..8]),
            total: LittleEndian::read_u32(&buffer[8..12]),
        }
    }

    pub fn write_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut buffer = [0u8; SIZE_LOCS_HEADER];
        LittleEndian::write_u32(&mut buffer[0..4], self.reserved);
        LittleEndian::write_f32(&mut buffer[4..8], self.version);
        LittleEndian::write_u32(&mut buffer[8..12], self.total);
        writer.write_all(&buffer)?;
        Ok(())
    }
}
