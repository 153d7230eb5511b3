mod flags;
mod read_record;
mod tag;

pub use flags::Flags;
pub use read_record::{phred33, read_name, ReadRecord, PHRED_OFFSET};
pub use tag::{Tag, TagValue};
