//! Decoding of raw sequencer basecall output into read records
//!
//! An instrument writes one file per cycle per tile holding a base and a quality
//! for every cluster, plus per-tile pass-filter and position files. This crate
//! decodes those formats and reassembles them, cluster by cluster, into complete
//! read records.
//!
//! ```no_run
//! use bcl2reads::{CycleRange, Lane, ReadStructure, RunFolders, SamWriter, TileConfig};
//!
//! let structure = ReadStructure::builder()
//!     .read1(CycleRange::new(1, 151)?)
//!     .index(CycleRange::new(152, 159)?)
//!     .read2(CycleRange::new(160, 310)?)
//!     .build()?;
//! let config = TileConfig::builder()
//!     .folders(RunFolders::new("run/Data/Intensities"))
//!     .run_id("M00123")
//!     .lane(1)
//!     .structure(structure)
//!     .build()?;
//! let lane = Lane::builder(config).tiles(vec![1101, 1102]).build()?;
//!
//! let mut writer = SamWriter::new(std::io::stdout().lock());
//! let stats = lane.process_tiles(&mut writer)?;
//! eprintln!("{} records", stats.records);
//! # Ok::<(), bcl2reads::Error>(())
//! ```

pub mod config;
mod error;
pub mod header;
mod lane;
pub mod reader;
pub mod record;
pub mod tile;
mod writer;

#[cfg(test)]
mod testing;

pub use config::{
    CycleRange, ReadStructure, RecordTarget, RunFolders, Segment, TagConfig, TagName, TileConfig,
};
pub use error::{ConfigError, Error, HeaderError, IntegrityError, ReadError, Result};
pub use lane::{Lane, LaneBuilder, LaneStats};
pub use reader::{
    BaseCallDecoder, ClusterCodec, FilterDecoder, Position, PositionSource, SecondCallDecoder,
};
pub use record::{Flags, ReadRecord, Tag, TagValue};
pub use tile::{Tile, TileStats};
pub use writer::{RecordSink, SamWriter};
