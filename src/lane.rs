//! Lane driver
//!
//! A [`Lane`] walks its tiles strictly one after another, building a fresh
//! [`Tile`] for each and streaming every record into the same sink. The first
//! failing tile aborts the lane; records already emitted stay in the sink.

use log::info;

use crate::config::TileConfig;
use crate::error::{ConfigError, Result};
use crate::tile::{Tile, TileStats};
use crate::writer::RecordSink;

/// Counts aggregated over the processed tiles of a lane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneStats {
    pub lane: u32,
    /// Number of tiles processed
    pub tiles: usize,
    pub clusters: usize,
    pub passed_filter: usize,
    pub records: usize,
}
impl LaneStats {
    fn new(lane: u32) -> Self {
        Self {
            lane,
            ..Self::default()
        }
    }

    fn add(&mut self, stats: &TileStats) {
        self.tiles += 1;
        self.clusters += stats.clusters;
        self.passed_filter += stats.passed_filter;
        self.records += stats.records;
    }
}

/// The ordered tiles of one lane and the settings they share
#[derive(Debug, Clone)]
pub struct Lane {
    config: TileConfig,
    tiles: Vec<u32>,
}
impl Lane {
    #[must_use]
    pub fn builder(config: TileConfig) -> LaneBuilder {
        LaneBuilder::new(config)
    }

    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    /// Tiles that will be processed, in order
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn lane(&self) -> u32 {
        self.config.lane
    }

    /// Processes every tile in order, stopping at the first error
    pub fn process_tiles<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<LaneStats> {
        let mut stats = LaneStats::new(self.config.lane);
        for &number in &self.tiles {
            let tile = Tile::new(&self.config, number).process(sink)?;
            stats.add(&tile);
        }
        info!(
            "Lane {}: {} tiles, {} clusters, {} passed filter, {} records",
            stats.lane, stats.tiles, stats.clusters, stats.passed_filter, stats.records
        );
        Ok(stats)
    }
}

#[derive(Debug, Clone)]
pub struct LaneBuilder {
    config: TileConfig,
    tiles: Vec<u32>,
    first_tile: Option<u32>,
    tile_limit: Option<usize>,
}
impl LaneBuilder {
    #[must_use]
    pub fn new(config: TileConfig) -> Self {
        Self {
            config,
            tiles: Vec::new(),
            first_tile: None,
            tile_limit: None,
        }
    }

    /// Tile numbers in processing order
    #[must_use]
    pub fn tiles(mut self, tiles: Vec<u32>) -> Self {
        self.tiles = tiles;
        self
    }

    /// Skips the tiles listed before `tile`
    #[must_use]
    pub fn first_tile(mut self, tile: u32) -> Self {
        self.first_tile = Some(tile);
        self
    }

    /// Processes at most `limit` tiles
    #[must_use]
    pub fn tile_limit(mut self, limit: usize) -> Self {
        self.tile_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<Lane> {
        let mut tiles = self.tiles;
        if let Some(first) = self.first_tile {
            let Some(start) = tiles.iter().position(|&t| t == first) else {
                return Err(ConfigError::UnknownTile(first).into());
            };
            tiles.drain(..start);
        }
        if let Some(limit) = self.tile_limit {
            tiles.truncate(limit);
        }
        Ok(Lane {
            config: self.config,
            tiles,
        })
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::config::{CycleRange, ReadStructure};
    use crate::record::ReadRecord;
    use crate::testing::{call, RunFixture};
    use crate::{Error, ReadError, SamWriter};
    use anyhow::Result;

    fn write_tile(fixture: &RunFixture, tile: u32, bases: &[u8]) -> Result<()> {
        let calls: Vec<u8> = bases.iter().map(|&b| call(b, 30)).collect();
        fixture.write_bcl(1, tile, 1, &calls)?;
        fixture.write_filter(1, tile, &vec![true; bases.len()])?;
        let positions: Vec<(f64, f64)> = (0..bases.len()).map(|i| (i as f64, 0.0)).collect();
        fixture.write_pos(1, tile, &positions)?;
        Ok(())
    }

    fn config(fixture: &RunFixture) -> Result<TileConfig> {
        let structure = ReadStructure::builder()
            .read1(CycleRange::new(1, 1)?)
            .build()?;
        Ok(TileConfig::builder()
            .folders(fixture.folders())
            .run_id("RUN")
            .lane(1)
            .structure(structure)
            .build()?)
    }

    #[test]
    fn test_tiles_in_order() -> Result<()> {
        let fixture = RunFixture::new()?;
        write_tile(&fixture, 1101, b"AC")?;
        write_tile(&fixture, 1102, b"G")?;

        let lane = Lane::builder(config(&fixture)?)
            .tiles(vec![1102, 1101])
            .build()?;
        let mut records: Vec<ReadRecord> = Vec::new();
        let stats = lane.process_tiles(&mut records)?;

        let names: Vec<&str> = records.iter().map(ReadRecord::name).collect();
        assert_eq!(
            names,
            vec!["RUN:1:1102:1000:1000", "RUN:1:1101:1000:1000", "RUN:1:1101:1010:1000"]
        );
        assert_eq!(
            stats,
            LaneStats {
                lane: 1,
                tiles: 2,
                clusters: 3,
                passed_filter: 3,
                records: 3,
            }
        );
        Ok(())
    }

    #[test]
    fn test_tile_subset() -> Result<()> {
        let fixture = RunFixture::new()?;
        let lane = Lane::builder(config(&fixture)?)
            .tiles(vec![1101, 1102, 1103, 1104])
            .first_tile(1102)
            .tile_limit(2)
            .build()?;
        assert_eq!(lane.tiles(), &[1102, 1103]);

        let err = Lane::builder(config(&fixture)?)
            .tiles(vec![1101])
            .first_tile(2101)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigError(ConfigError::UnknownTile(2101))
        ));
        Ok(())
    }

    #[test]
    fn test_failing_tile_aborts_lane() -> Result<()> {
        let fixture = RunFixture::new()?;
        write_tile(&fixture, 1101, b"AC")?;
        fixture.write_bcl(1, 1102, 1, &[call(b'T', 30)])?;
        fixture.write_pos(1, 1102, &[(0.0, 0.0)])?;
        write_tile(&fixture, 1103, b"G")?;

        let lane = Lane::builder(config(&fixture)?)
            .tiles(vec![1101, 1102, 1103])
            .build()?;
        let mut writer = SamWriter::new(Vec::new());
        let err = lane.process_tiles(&mut writer).unwrap_err();
        assert!(matches!(err, Error::ReadError(ReadError::NotFound(_))));
        assert_eq!(writer.records_written(), 2);
        Ok(())
    }
}
