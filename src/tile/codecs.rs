use std::io::Read;

use log::{debug, warn};

use super::cluster::{Cluster, SegmentReads};
use crate::config::{Segment, TileConfig};
use crate::error::{IntegrityError, Result};
use crate::reader::{
    BaseCallDecoder, ClusterCodec, FileReader, FilterDecoder, PositionSource, SecondCallDecoder,
};

/// Decoders of one segment, one per cycle in cycle order
#[derive(Debug)]
pub struct SegmentCodecs<R: Read> {
    pub segment: Segment,
    pub base_calls: Vec<BaseCallDecoder<R>>,
    /// Empty unless second calls are decoded for this segment
    pub second_calls: Vec<SecondCallDecoder>,
}
impl<R: Read> SegmentCodecs<R> {
    #[must_use]
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            base_calls: Vec::new(),
            second_calls: Vec::new(),
        }
    }
}

/// Every per-cycle decoder opened for a tile, indexed by segment then cycle
#[derive(Debug)]
pub struct TileCodecs<R: Read> {
    segments: Vec<SegmentCodecs<R>>,
}

impl TileCodecs<FileReader> {
    /// Opens one BCL per cycle of every segment, plus one SCL per cycle of the
    /// biological reads when second calls are requested
    pub fn open(config: &TileConfig, tile: u32) -> Result<Self> {
        let folders = &config.folders;
        let lane = config.lane;
        let mut segments = Vec::new();
        for (segment, range) in config.structure.segments() {
            let mut codecs = SegmentCodecs::new(segment);
            for cycle in range.cycles() {
                codecs
                    .base_calls
                    .push(BaseCallDecoder::open(folders.bcl_path(lane, tile, cycle))?);
                if config.include_second_call && !segment.is_index() {
                    codecs
                        .second_calls
                        .push(SecondCallDecoder::open(folders.scl_path(lane, tile, cycle))?);
                }
            }
            segments.push(codecs);
        }
        let codecs = Self::new(segments);
        debug!("Opened {} codecs for tile {tile}", codecs.len());
        Ok(codecs)
    }
}

impl<R: Read> TileCodecs<R> {
    /// Segments must be given in processing order
    #[must_use]
    pub fn new(segments: Vec<SegmentCodecs<R>>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[SegmentCodecs<R>] {
        &self.segments
    }

    /// Iterates over every opened decoder
    pub fn codecs(&self) -> impl Iterator<Item = &dyn ClusterCodec> + '_ {
        self.segments.iter().flat_map(|codecs| {
            codecs
                .base_calls
                .iter()
                .map(|c| c as &dyn ClusterCodec)
                .chain(codecs.second_calls.iter().map(|c| c as &dyn ClusterCodec))
        })
    }

    /// Number of opened decoders
    pub fn len(&self) -> usize {
        self.codecs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails on the first decoder whose declared cluster count differs from `expected`
    pub fn check_cluster_counts(&self, expected: usize) -> Result<()> {
        for codec in self.codecs() {
            let found = codec.total_clusters();
            if found != expected {
                return Err(IntegrityError::InconsistentClusterCount {
                    path: codec.path().to_path_buf(),
                    expected,
                    found,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Decodes every base call of the next cluster into `reads`, segment by
    /// segment, then every second call
    pub fn next_cluster(&mut self, reads: &mut Vec<SegmentReads>) -> Result<()> {
        if reads.len() != self.segments.len()
            || reads
                .iter()
                .zip(&self.segments)
                .any(|(r, c)| r.segment != c.segment)
        {
            *reads = self
                .segments
                .iter()
                .map(|c| SegmentReads::new(c.segment))
                .collect();
        }

        for (codecs, read) in self.segments.iter_mut().zip(reads.iter_mut()) {
            read.clear();
            for decoder in &mut codecs.base_calls {
                let call = decoder.next()?;
                read.bases.push(call.base);
                read.qualities.push(call.quality);
            }
        }
        for (codecs, read) in self.segments.iter_mut().zip(reads.iter_mut()) {
            for decoder in &mut codecs.second_calls {
                read.second_calls.push(decoder.next()?);
            }
        }
        Ok(())
    }

    pub fn close(&mut self) {
        for codecs in &mut self.segments {
            codecs.base_calls.iter_mut().for_each(ClusterCodec::close);
            codecs.second_calls.iter_mut().for_each(ClusterCodec::close);
        }
    }
}

/// Drives the decoders of a tile in lock-step, one cluster at a time
///
/// Per cluster the order is fixed: position, filter, base calls of every segment,
/// second calls.
pub struct TileCursor<'a, R: Read> {
    position: &'a mut PositionSource<R>,
    filter: &'a mut FilterDecoder<R>,
    codecs: &'a mut TileCodecs<R>,
    cluster: usize,
}
impl<'a, R: Read> TileCursor<'a, R> {
    pub fn new(
        position: &'a mut PositionSource<R>,
        filter: &'a mut FilterDecoder<R>,
        codecs: &'a mut TileCodecs<R>,
    ) -> Self {
        Self {
            position,
            filter,
            codecs,
            cluster: 0,
        }
    }

    /// The filter file drives the loop
    pub fn has_next(&self) -> bool {
        self.filter.has_next()
    }

    pub fn passed_clusters(&self) -> usize {
        self.filter.passed_clusters()
    }

    pub fn next_cluster(&mut self, cluster: &mut Cluster) -> Result<()> {
        if !self.position.has_next() {
            return Err(IntegrityError::ClusterCountMismatch {
                source_kind: self.position.kind().as_str(),
                expected: self.filter.total_clusters(),
                found: self.position.current_total_clusters(),
            }
            .into());
        }
        self.cluster += 1;
        cluster.index = self.cluster;
        cluster.position = self.position.next()?;
        cluster.passed_filter = self.filter.next()?;
        self.codecs.next_cluster(&mut cluster.reads)
    }

    /// Verifies that the filter and position files were consumed in full
    ///
    /// Position clusters left over once the filter is exhausted are only reported.
    pub fn finish(&self) -> Result<()> {
        let expected = self.filter.total_clusters();
        let found = self.filter.current_cluster();
        if found != expected {
            return Err(IntegrityError::ClusterCountMismatch {
                source_kind: "filter",
                expected,
                found,
            }
            .into());
        }
        let found = self.position.current_total_clusters();
        if found != expected {
            return Err(IntegrityError::ClusterCountMismatch {
                source_kind: self.position.kind().as_str(),
                expected,
                found,
            }
            .into());
        }
        if self.position.has_next() {
            warn!(
                "Clusters left over in {} after {expected} clusters",
                self.position.path().display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::header::{ClusterCountHeader, FilterHeader};
    use crate::reader::{ByteReader, PosDecoder, Position};
    use crate::Error;
    use anyhow::Result;

    type Mem = std::io::Cursor<Vec<u8>>;

    fn bcl(total: u32, body: &[u8]) -> Result<BaseCallDecoder<Mem>> {
        let mut buffer = Vec::new();
        ClusterCountHeader::new(total).write_bytes(&mut buffer)?;
        buffer.extend_from_slice(body);
        Ok(BaseCallDecoder::new(ByteReader::new(Mem::new(buffer), "mem.bcl"))?)
    }

    fn scl(bases: &[u8]) -> Result<SecondCallDecoder> {
        let mut buffer = Vec::new();
        ClusterCountHeader::new(bases.len() as u32).write_bytes(&mut buffer)?;
        for chunk in bases.chunks(4) {
            let mut byte = 0u8;
            for (i, base) in chunk.iter().enumerate() {
                let code = b"ACGT".iter().position(|b| b == base).unwrap() as u8;
                byte |= code << ((3 - i) * 2);
            }
            buffer.push(byte);
        }
        Ok(SecondCallDecoder::new(ByteReader::new(buffer.as_slice(), "mem.scl"))?)
    }

    fn filter(flags: &[u8]) -> Result<FilterDecoder<Mem>> {
        let mut buffer = Vec::new();
        FilterHeader::new(flags.len() as u32).write_bytes(&mut buffer)?;
        buffer.extend_from_slice(flags);
        Ok(FilterDecoder::new(ByteReader::new(Mem::new(buffer), "mem.filter"))?)
    }

    fn positions(text: &str) -> Result<PositionSource<Mem>> {
        Ok(PositionSource::Pos(PosDecoder::new(ByteReader::new(
            text.as_bytes(),
            "mem_pos.txt",
        ))?))
    }

    fn q(base_index: u8, quality: u8) -> u8 {
        (quality << 2) | base_index
    }

    /// read1: 2 cycles, index: 1 cycle, 2 clusters
    fn codecs() -> Result<TileCodecs<Mem>> {
        let mut read1 = SegmentCodecs::new(Segment::Read1);
        read1.base_calls.push(bcl(2, &[q(0, 30), q(3, 31)])?);
        read1.base_calls.push(bcl(2, &[q(1, 32), 0])?);
        read1.second_calls.push(scl(b"GA")?);
        read1.second_calls.push(scl(b"TC")?);
        let mut index = SegmentCodecs::new(Segment::ReadIndex);
        index.base_calls.push(bcl(2, &[q(2, 20), q(2, 21)])?);
        Ok(TileCodecs::new(vec![read1, index]))
    }

    #[test]
    fn test_lock_step_decode() -> Result<()> {
        let mut codecs = codecs()?;
        assert_eq!(codecs.len(), 5);
        codecs.check_cluster_counts(2)?;

        let mut position = positions("0 0\n1.5 2.5\n")?;
        let mut filter = filter(&[1, 0])?;
        let mut cursor = TileCursor::new(&mut position, &mut filter, &mut codecs);

        let mut cluster = Cluster::default();
        cursor.next_cluster(&mut cluster)?;
        assert_eq!(cluster.index, 1);
        assert_eq!(cluster.position, Position::new(1000, 1000));
        assert!(cluster.passed_filter);
        let read1 = cluster.segment(Segment::Read1).unwrap();
        assert_eq!(&read1.bases, b"AC");
        assert_eq!(read1.qualities, vec![30, 32]);
        assert_eq!(&read1.second_calls, b"GT");
        let index = cluster.segment(Segment::ReadIndex).unwrap();
        assert_eq!(&index.bases, b"G");
        assert!(index.second_calls.is_empty());

        cursor.next_cluster(&mut cluster)?;
        assert_eq!(cluster.index, 2);
        assert_eq!(cluster.position, Position::new(1015, 1025));
        assert!(!cluster.passed_filter);
        let read1 = cluster.segment(Segment::Read1).unwrap();
        assert_eq!(&read1.bases, b"TN");
        assert_eq!(read1.qualities, vec![31, 0]);
        assert_eq!(&read1.second_calls, b"AC");

        assert!(!cursor.has_next());
        assert_eq!(cursor.passed_clusters(), 1);
        cursor.finish()?;
        Ok(())
    }

    #[test]
    fn test_inconsistent_cluster_count() -> Result<()> {
        let mut read1 = SegmentCodecs::new(Segment::Read1);
        read1.base_calls.push(bcl(2, &[4, 4])?);
        read1.base_calls.push(bcl(3, &[4, 4, 4])?);
        let codecs = TileCodecs::new(vec![read1]);
        let err = codecs.check_cluster_counts(2).unwrap_err();
        assert!(matches!(
            err,
            Error::IntegrityError(IntegrityError::InconsistentClusterCount {
                expected: 2,
                found: 3,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_position_exhausted_early() -> Result<()> {
        let mut codecs = codecs()?;
        let mut position = positions("0 0\n")?;
        let mut filter = filter(&[1, 1])?;
        let mut cursor = TileCursor::new(&mut position, &mut filter, &mut codecs);
        let mut cluster = Cluster::default();
        cursor.next_cluster(&mut cluster)?;
        let err = cursor.next_cluster(&mut cluster).unwrap_err();
        assert!(matches!(
            err,
            Error::IntegrityError(IntegrityError::ClusterCountMismatch {
                source_kind: "pos",
                expected: 2,
                found: 1,
            })
        ));
        Ok(())
    }

    #[test]
    fn test_leftover_positions_are_tolerated() -> Result<()> {
        let mut codecs = codecs()?;
        let mut position = positions("0 0\n1 1\n2 2\n")?;
        let mut filter = filter(&[1, 1])?;
        let mut cursor = TileCursor::new(&mut position, &mut filter, &mut codecs);
        let mut cluster = Cluster::default();
        while cursor.has_next() {
            cursor.next_cluster(&mut cluster)?;
        }
        cursor.finish()?;
        Ok(())
    }

    #[test]
    fn test_finish_before_exhaustion() -> Result<()> {
        let mut codecs = codecs()?;
        let mut position = positions("0 0\n1 1\n")?;
        let mut filter = filter(&[1, 1])?;
        let mut cursor = TileCursor::new(&mut position, &mut filter, &mut codecs);
        let mut cluster = Cluster::default();
        cursor.next_cluster(&mut cluster)?;
        assert!(matches!(
            cursor.finish().unwrap_err(),
            Error::IntegrityError(IntegrityError::ClusterCountMismatch {
                source_kind: "filter",
                expected: 2,
                found: 1,
            })
        ));
        Ok(())
    }
}
