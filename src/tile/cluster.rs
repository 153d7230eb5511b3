use crate::config::Segment;
use crate::reader::Position;

/// Bases of one segment of one cluster, concatenated over the segment's cycles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentReads {
    pub segment: Segment,
    pub bases: Vec<u8>,
    /// Raw Phred scores
    pub qualities: Vec<u8>,
    /// Second-call bases, empty unless second calls are decoded for this segment
    pub second_calls: Vec<u8>,
}
impl SegmentReads {
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            bases: Vec::new(),
            qualities: Vec::new(),
            second_calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.bases.clear();
        self.qualities.clear();
        self.second_calls.clear();
    }
}

/// Everything decoded for one cluster, reused from one cluster to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cluster {
    /// 1-based index within the tile
    pub index: usize,
    pub position: Position,
    pub passed_filter: bool,
    pub reads: Vec<SegmentReads>,
}
impl Cluster {
    pub fn segment(&self, segment: Segment) -> Option<&SegmentReads> {
        self.reads.iter().find(|reads| reads.segment == segment)
    }
}
