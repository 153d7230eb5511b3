use std::path::{Path, PathBuf};

use crate::reader::PositionPaths;

/// Raw data roots of a run
///
/// ```text
/// <intensities>/L00{lane}/s_{lane}_{tile}.clocs | .locs
/// <intensities>/s_{lane}_{tile}_pos.txt
/// <basecalls>/L00{lane}/C{cycle}.1/s_{lane}_{tile}.bcl | .scl
/// <basecalls>/L00{lane}/s_{lane}_{tile}.filter
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFolders {
    intensities: PathBuf,
    basecalls: PathBuf,
}
impl RunFolders {
    /// Uses `<intensities>/BaseCalls` as the basecalls folder
    pub fn new<P: AsRef<Path>>(intensities: P) -> Self {
        let intensities = intensities.as_ref().to_path_buf();
        let basecalls = intensities.join("BaseCalls");
        Self {
            intensities,
            basecalls,
        }
    }

    #[must_use]
    pub fn with_basecalls<P: AsRef<Path>>(mut self, basecalls: P) -> Self {
        self.basecalls = basecalls.as_ref().to_path_buf();
        self
    }

    pub fn intensities(&self) -> &Path {
        &self.intensities
    }

    pub fn basecalls(&self) -> &Path {
        &self.basecalls
    }

    fn lane_dir(root: &Path, lane: u32) -> PathBuf {
        root.join(format!("L{lane:03}"))
    }

    fn cycle_dir(&self, lane: u32, cycle: u32) -> PathBuf {
        Self::lane_dir(&self.basecalls, lane).join(format!("C{cycle}.1"))
    }

    #[must_use]
    pub fn bcl_path(&self, lane: u32, tile: u32, cycle: u32) -> PathBuf {
        self.cycle_dir(lane, cycle)
            .join(format!("s_{lane}_{tile}.bcl"))
    }

    #[must_use]
    pub fn scl_path(&self, lane: u32, tile: u32, cycle: u32) -> PathBuf {
        self.cycle_dir(lane, cycle)
            .join(format!("s_{lane}_{tile}.scl"))
    }

    /// Filter file of a tile
    ///
    /// Prefers the lane folder and falls back to the basecalls root. When neither
    /// exists the lane folder path is returned so that opening it reports it.
    #[must_use]
    pub fn filter_path(&self, lane: u32, tile: u32) -> PathBuf {
        let name = format!("s_{lane}_{tile}.filter");
        let in_lane = Self::lane_dir(&self.basecalls, lane).join(&name);
        if in_lane.exists() {
            return in_lane;
        }
        let in_root = self.basecalls.join(&name);
        if in_root.exists() {
            in_root
        } else {
            in_lane
        }
    }

    #[must_use]
    pub fn position_paths(&self, lane: u32, tile: u32) -> PositionPaths {
        let lane_dir = Self::lane_dir(&self.intensities, lane);
        PositionPaths {
            clocs: lane_dir.join(format!("s_{lane}_{tile}.clocs")),
            locs: lane_dir.join(format!("s_{lane}_{tile}.locs")),
            pos: self.intensities.join(format!("s_{lane}_{tile}_pos.txt")),
        }
    }
}
