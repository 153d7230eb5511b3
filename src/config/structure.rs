use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use super::tags::{RecordTarget, TagConfig};
use crate::error::{ConfigError, Result};

/// One logical read of a run, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Read1,
    Read2,
    ReadIndex,
    ReadIndex2,
}
impl Segment {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read1 => "read1",
            Self::Read2 => "read2",
            Self::ReadIndex => "readIndex",
            Self::ReadIndex2 => "readIndex2",
        }
    }

    /// Biological reads become records; index reads become tags
    #[must_use]
    pub fn is_index(&self) -> bool {
        matches!(self, Self::ReadIndex | Self::ReadIndex2)
    }
}
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive, 1-based range of cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRange {
    first: u32,
    last: u32,
}
impl CycleRange {
    pub fn new(first: u32, last: u32) -> Result<Self> {
        if first == 0 || first > last {
            return Err(ConfigError::InvalidCycleRange(first, last).into());
        }
        Ok(Self { first, last })
    }

    #[must_use]
    pub fn first(&self) -> u32 {
        self.first
    }

    #[must_use]
    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of cycles in the range
    #[must_use]
    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Always false, ranges hold at least one cycle
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn cycles(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

/// Cycle ranges of every configured segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadStructure {
    ranges: BTreeMap<Segment, CycleRange>,
}
impl ReadStructure {
    #[must_use]
    pub fn builder() -> ReadStructureBuilder {
        ReadStructureBuilder::new()
    }

    #[must_use]
    pub fn get(&self, segment: Segment) -> Option<CycleRange> {
        self.ranges.get(&segment).copied()
    }

    /// Iterates over the configured segments in processing order
    pub fn segments(&self) -> impl Iterator<Item = (Segment, CycleRange)> + '_ {
        self.ranges.iter().map(|(segment, range)| (*segment, *range))
    }

    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.ranges.contains_key(&Segment::Read2)
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.ranges.contains_key(&Segment::ReadIndex)
    }

    #[must_use]
    pub fn is_dual_indexed(&self) -> bool {
        self.ranges.contains_key(&Segment::ReadIndex2)
    }

    /// Total number of cycles over all segments
    #[must_use]
    pub fn num_cycles(&self) -> usize {
        self.ranges.values().map(CycleRange::len).sum()
    }

    /// Applies the index-read targets of `tags`
    ///
    /// A second index read aimed at the same record as the first is folded into
    /// `readIndex`, which requires the two to be adjacent in cycle space.
    pub fn resolve(&self, tags: &TagConfig) -> Result<Self> {
        if !self.is_paired() {
            if self.is_indexed() && tags.index_target() == RecordTarget::Second {
                return Err(ConfigError::UnpairedIndexTarget(Segment::ReadIndex.as_str()).into());
            }
            if self.is_dual_indexed() && tags.index2_target() == RecordTarget::Second {
                return Err(ConfigError::UnpairedIndexTarget(Segment::ReadIndex2.as_str()).into());
            }
        }

        let mut resolved = self.clone();
        if let (Some(index), Some(index2)) =
            (self.get(Segment::ReadIndex), self.get(Segment::ReadIndex2))
        {
            if tags.index_target() == tags.index2_target() {
                if index2.first() != index.last() + 1 {
                    return Err(
                        ConfigError::NonAdjacentIndexReads(index.last(), index2.first()).into(),
                    );
                }
                resolved.ranges.remove(&Segment::ReadIndex2);
                resolved
                    .ranges
                    .insert(Segment::ReadIndex, CycleRange::new(index.first(), index2.last())?);
            }
        }
        Ok(resolved)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadStructureBuilder {
    ranges: BTreeMap<Segment, CycleRange>,
}
impl ReadStructureBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn segment(mut self, segment: Segment, range: CycleRange) -> Self {
        self.ranges.insert(segment, range);
        self
    }
    #[must_use]
    pub fn read1(self, range: CycleRange) -> Self {
        self.segment(Segment::Read1, range)
    }
    #[must_use]
    pub fn read2(self, range: CycleRange) -> Self {
        self.segment(Segment::Read2, range)
    }
    #[must_use]
    pub fn index(self, range: CycleRange) -> Self {
        self.segment(Segment::ReadIndex, range)
    }
    #[must_use]
    pub fn index2(self, range: CycleRange) -> Self {
        self.segment(Segment::ReadIndex2, range)
    }
    pub fn build(self) -> Result<ReadStructure> {
        if !self.ranges.contains_key(&Segment::Read1) {
            return Err(ConfigError::MissingRead1.into());
        }
        if self.ranges.contains_key(&Segment::ReadIndex2)
            && !self.ranges.contains_key(&Segment::ReadIndex)
        {
            return Err(ConfigError::MissingIndexRead.into());
        }
        let entries: Vec<_> = self.ranges.iter().collect();
        for (i, (segment, range)) in entries.iter().enumerate() {
            for (other_segment, other_range) in &entries[i + 1..] {
                if range.overlaps(other_range) {
                    return Err(ConfigError::OverlappingSegments(
                        segment.as_str(),
                        other_segment.as_str(),
                    )
                    .into());
                }
            }
        }
        Ok(ReadStructure {
            ranges: self.ranges,
        })
    }
}
