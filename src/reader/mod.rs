mod bcl;
mod byte;
mod clocs;
mod codec;
mod filter;
mod locs;
mod pos;
mod position;
mod scl;

pub use bcl::{BaseCallDecoder, BaseQuality, BASES, MAX_QUALITY, NO_CALL};
pub use byte::{open_file, ByteReader, FileReader};
pub use clocs::{block_position, ClocsDecoder, BLOCKS_PER_LINE, BLOCK_SIZE, IMAGE_WIDTH};
pub use codec::ClusterCodec;
pub use filter::FilterDecoder;
pub use locs::LocsDecoder;
pub use pos::PosDecoder;
pub use position::{normalize, Position, PositionKind, PositionPaths, PositionSource};
pub use scl::{unpack_base, SecondCallDecoder};
