//! Per-tile read assembly
//!
//! A [`Tile`] opens every raw data file of one tile, checks that they agree on the
//! number of clusters, walks them in lock-step and hands the assembled records to
//! a [`RecordSink`]. Its steps are public so callers can drive them one by one;
//! [`Tile::process`] runs them all and always releases the file handles.

mod assemble;
mod cluster;
mod codecs;

pub use assemble::assemble_records;
pub use cluster::{Cluster, SegmentReads};
pub use codecs::{SegmentCodecs, TileCodecs, TileCursor};

use log::{debug, info};

use crate::config::TileConfig;
use crate::reader::{ClusterCodec, FileReader, FilterDecoder, PositionSource};
use crate::writer::RecordSink;
use crate::Result;

/// Counts collected while processing one tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileStats {
    pub tile: u32,
    /// Clusters declared by the filter file
    pub clusters: usize,
    /// Clusters that passed filter
    pub passed_filter: usize,
    /// Records handed to the sink
    pub records: usize,
}

/// The raw data files of one tile and the state needed to walk them
pub struct Tile<'a> {
    config: &'a TileConfig,
    number: u32,
    codecs: Option<TileCodecs<FileReader>>,
    filter: Option<FilterDecoder<FileReader>>,
    position: Option<PositionSource<FileReader>>,
}

impl<'a> Tile<'a> {
    #[must_use]
    pub fn new(config: &'a TileConfig, number: u32) -> Self {
        Self {
            config,
            number,
            codecs: None,
            filter: None,
            position: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Opens one BCL (and optionally SCL) decoder per cycle of every segment
    pub fn open_base_call_files(&mut self) -> Result<()> {
        self.codecs = Some(TileCodecs::open(self.config, self.number)?);
        Ok(())
    }

    /// Opens the filter file and verifies that every opened decoder declares the
    /// same number of clusters
    pub fn check_cluster_counts(&mut self) -> Result<()> {
        let filter = match self.filter.take() {
            Some(filter) => filter,
            None => FilterDecoder::open(
                self.config
                    .folders
                    .filter_path(self.config.lane, self.number),
            )?,
        };
        let expected = filter.total_clusters();
        self.filter = Some(filter);
        if let Some(codecs) = &self.codecs {
            codecs.check_cluster_counts(expected)?;
        }
        Ok(())
    }

    /// Walks every cluster of the tile and emits its records to `sink`
    ///
    /// Opens whatever the previous steps did not and re-checks the cluster counts
    /// before the first cluster is decoded. Clusters failing the pass filter
    /// are still decoded but emit nothing when `pass_filter_only` is set.
    pub fn process_tile<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<TileStats> {
        let config = self.config;
        let number = self.number;

        let codecs = match self.codecs.take() {
            Some(codecs) => codecs,
            None => TileCodecs::open(config, number)?,
        };
        let codecs = self.codecs.insert(codecs);
        let filter = match self.filter.take() {
            Some(filter) => filter,
            None => FilterDecoder::open(config.folders.filter_path(config.lane, number))?,
        };
        let filter = self.filter.insert(filter);
        codecs.check_cluster_counts(filter.total_clusters())?;
        let position = match self.position.take() {
            Some(position) => position,
            None => PositionSource::open(&config.folders.position_paths(config.lane, number))?,
        };
        let position = self.position.insert(position);

        let mut stats = TileStats {
            tile: number,
            clusters: filter.total_clusters(),
            ..TileStats::default()
        };
        let mut cursor = TileCursor::new(position, filter, codecs);
        let mut cluster = Cluster::default();
        while cursor.has_next() {
            cursor.next_cluster(&mut cluster)?;
            if config.pass_filter_only && !cluster.passed_filter {
                continue;
            }
            for record in assemble_records(&cluster, config, number) {
                sink.write_record(record)?;
                stats.records += 1;
            }
        }
        cursor.finish()?;
        stats.passed_filter = cursor.passed_clusters();

        info!(
            "Tile {}: {} clusters, {} passed filter, {} records",
            stats.tile, stats.clusters, stats.passed_filter, stats.records
        );
        Ok(stats)
    }

    /// Closes every opened decoder; safe to call more than once
    pub fn close_base_call_files(&mut self) {
        if let Some(codecs) = &mut self.codecs {
            codecs.close();
        }
        if let Some(filter) = &mut self.filter {
            filter.close();
        }
        if let Some(position) = &mut self.position {
            position.close();
        }
        debug!("Closed files of tile {}", self.number);
    }

    /// Runs every step in order, closing the files whether or not processing succeeds
    pub fn process<S: RecordSink + ?Sized>(mut self, sink: &mut S) -> Result<TileStats> {
        let result = self
            .open_base_call_files()
            .and_then(|()| self.check_cluster_counts())
            .and_then(|()| self.process_tile(sink));
        self.close_base_call_files();
        result
    }
}
