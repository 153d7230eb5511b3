//! Lane and tile configuration
//!
//! Everything a [`Tile`](crate::Tile) needs besides its number: where the raw data
//! lives, which cycles form which read, how records are tagged and which clusters
//! are kept. The values come from run metadata discovered elsewhere.

mod folders;
mod structure;
mod tags;

pub use folders::RunFolders;
pub use structure::{CycleRange, ReadStructure, ReadStructureBuilder, Segment};
pub use tags::{RecordTarget, TagConfig, TagConfigBuilder, TagName};

use crate::error::{ConfigError, Result};

/// Settings shared by every tile of a lane
#[derive(Debug, Clone)]
pub struct TileConfig {
    /// Raw data roots
    pub folders: RunFolders,
    /// Instrument/run identifier prefixed to read names, may be empty
    pub run_id: String,
    pub lane: u32,
    /// Read structure with the index reads already resolved against `tags`
    pub structure: ReadStructure,
    pub tags: TagConfig,
    /// Attach second-call bases of read1/read2
    pub include_second_call: bool,
    /// Drop clusters that failed the pass filter
    pub pass_filter_only: bool,
}
impl TileConfig {
    #[must_use]
    pub fn builder() -> TileConfigBuilder {
        TileConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TileConfigBuilder {
    folders: Option<RunFolders>,
    run_id: Option<String>,
    lane: Option<u32>,
    structure: Option<ReadStructure>,
    tags: Option<TagConfig>,
    include_second_call: bool,
    pass_filter_only: bool,
}
impl TileConfigBuilder {
    #[must_use]
    pub fn folders(mut self, folders: RunFolders) -> Self {
        self.folders = Some(folders);
        self
    }
    #[must_use]
    pub fn run_id(mut self, run_id: &str) -> Self {
        self.run_id = Some(run_id.to_string());
        self
    }
    #[must_use]
    pub fn lane(mut self, lane: u32) -> Self {
        self.lane = Some(lane);
        self
    }
    #[must_use]
    pub fn structure(mut self, structure: ReadStructure) -> Self {
        self.structure = Some(structure);
        self
    }
    #[must_use]
    pub fn tags(mut self, tags: TagConfig) -> Self {
        self.tags = Some(tags);
        self
    }
    #[must_use]
    pub fn include_second_call(mut self, include: bool) -> Self {
        self.include_second_call = include;
        self
    }
    #[must_use]
    pub fn pass_filter_only(mut self, pass_filter_only: bool) -> Self {
        self.pass_filter_only = pass_filter_only;
        self
    }
    pub fn build(self) -> Result<TileConfig> {
        let Some(folders) = self.folders else {
            return Err(ConfigError::MissingFolders.into());
        };
        let Some(structure) = self.structure else {
            return Err(ConfigError::MissingReadStructure.into());
        };
        let tags = self.tags.unwrap_or_default();
        Ok(TileConfig {
            folders,
            run_id: self.run_id.unwrap_or_default(),
            lane: self.lane.unwrap_or(1),
            structure: structure.resolve(&tags)?,
            tags,
            include_second_call: self.include_second_call,
            pass_filter_only: self.pass_filter_only,
        })
    }
}
