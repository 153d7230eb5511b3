use std::path::PathBuf;

/// Custom Result type for bcl2reads operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bcl2reads library, encompassing all possible error cases
/// that can occur while decoding raw basecall files and assembling reads.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors related to fixed file headers
    HeaderError(#[from] HeaderError),
    /// Errors that occur while opening or decoding a file body
    ReadError(#[from] ReadError),
    /// Cluster counts that disagree between files of the same tile
    IntegrityError(#[from] IntegrityError),
    /// Invalid lane or tile configuration
    ConfigError(#[from] ConfigError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
    /// Generic errors, mostly surfaced by caller-provided record sinks
    AnyhowError(#[from] anyhow::Error),
}

/// Errors specific to processing and validating file headers
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    /// The legacy reserved field of a filter file is not zero
    ///
    /// # Arguments
    /// * `u32` - The value found in the reserved field
    #[error("Filter file reserved field must be zero, found: {0}")]
    NonZeroReserved(u32),

    /// The filter file version is not supported
    ///
    /// # Arguments
    /// * `u32` - The unsupported version number that was found
    #[error("Invalid filter file version: {0}. Expected: 3")]
    InvalidFilterVersion(u32),

    /// The clocs file version is not supported
    ///
    /// # Arguments
    /// * `u8` - The unsupported version number that was found
    #[error("Invalid clocs file version: {0}. Expected: 1")]
    InvalidClocsVersion(u8),

    /// The buffer is too small to hold the header
    ///
    /// # Arguments
    /// * First `usize` - The actual number of bytes provided
    /// * Second `usize` - The expected number of bytes for the header
    #[error("Invalid number of bytes provided: {0}. Expected: {1}")]
    InvalidSize(usize, usize),
}

/// Errors that can occur while opening or reading a raw data file
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The path does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but cannot be read as a regular file
    #[error("Invalid input file {0}: {1}")]
    InvalidArgument(PathBuf, String),

    /// The stream ended before all declared clusters were read
    #[error("Unexpected end of stream in {path} at byte pos {position}")]
    UnexpectedEndOfStream { path: PathBuf, position: usize },

    /// A basecall quality falls outside of the valid range
    #[error("Quality {quality} out of range [0, 60] in {path} at cluster {cluster}")]
    InvalidQuality {
        path: PathBuf,
        cluster: usize,
        quality: u8,
    },

    /// Attempted to decode past the last declared cluster
    ///
    /// # Arguments
    /// * First `usize` - The requested cluster index
    /// * Second `usize` - The number of clusters in the file
    #[error("Requested cluster ({0}) is out of cluster range ({1})")]
    OutOfRange(usize, usize),

    /// A line of a text position file could not be parsed
    #[error("Malformed position in {path} at line {line}")]
    MalformedPosition { path: PathBuf, line: usize },

    /// The reader was used after it was closed
    #[error("Reader for {0} is already closed")]
    Closed(PathBuf),
}

/// Errors raised when the files of one tile disagree on their cluster counts
#[derive(thiserror::Error, Debug)]
pub enum IntegrityError {
    /// A codec declares a different number of clusters than the filter file
    #[error("Inconsistent cluster count in {path}: expected {expected}, found {found}")]
    InconsistentClusterCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// The number of clusters consumed does not match the filter file
    #[error("Cluster count mismatch in {source_kind} file: expected {expected}, found {found}")]
    ClusterCountMismatch {
        source_kind: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while building a read structure or lane configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Every read structure needs a first read
    #[error("Missing cycle range for read1")]
    MissingRead1,

    /// Cycle ranges are 1-based and inclusive
    #[error("Invalid cycle range [{0}, {1}]")]
    InvalidCycleRange(u32, u32),

    /// Two segments claim the same cycle
    #[error("Cycle ranges of {0} and {1} overlap")]
    OverlappingSegments(&'static str, &'static str),

    /// A second index read was configured without a first one
    #[error("readIndex2 requires readIndex")]
    MissingIndexRead,

    /// Merged index reads must be contiguous in cycle space
    #[error("Cannot merge index reads: readIndex ends at cycle {0}, readIndex2 starts at cycle {1}")]
    NonAdjacentIndexReads(u32, u32),

    /// An index read targets the second record of a single-end run
    #[error("Index read {0} targets the second record but the run is not paired")]
    UnpairedIndexTarget(&'static str),

    /// Tag names are two ASCII alphanumeric characters
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    /// The lane builder needs the raw data folders
    #[error("Missing run folders in lane builder")]
    MissingFolders,

    /// The lane builder needs a read structure
    #[error("Missing read structure in lane builder")]
    MissingReadStructure,

    /// The requested first tile is not part of the lane
    #[error("Tile {0} is not in the tile list of the lane")]
    UnknownTile(u32),
}
