//! Cluster positions
//!
//! Three mutually exclusive file formats carry cluster coordinates. Each one is
//! decoded by its own type, and [`PositionSource`] hides which one a tile uses.
//! All of them normalize to the same integer convention: the physical value
//! scaled by 10 and offset by 1000, rounded half-up.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use super::byte::FileReader;
use super::clocs::ClocsDecoder;
use super::locs::LocsDecoder;
use super::pos::PosDecoder;
use crate::error::{ReadError, Result};

/// Normalized cluster coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Normalizes physical coordinates to `round(1000 + 10 * value)`
    #[must_use]
    pub fn from_physical(x: f64, y: f64) -> Self {
        Self {
            x: normalize(x),
            y: normalize(y),
        }
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// Scales a physical coordinate to the shared integer convention
#[inline]
#[must_use]
pub fn normalize(value: f64) -> i32 {
    (10.0 * value + 1000.0 + 0.5).floor() as i32
}

/// Which position format a tile uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    Clocs,
    Locs,
    Pos,
}
impl PositionKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clocs => "clocs",
            Self::Locs => "locs",
            Self::Pos => "pos",
        }
    }
}
impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate position files of one tile, in order of preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPaths {
    pub clocs: PathBuf,
    pub locs: PathBuf,
    pub pos: PathBuf,
}
impl PositionPaths {
    /// Returns the first candidate that exists on disk
    #[must_use]
    pub fn select(&self) -> Option<(PositionKind, &Path)> {
        [
            (PositionKind::Clocs, self.clocs.as_path()),
            (PositionKind::Locs, self.locs.as_path()),
            (PositionKind::Pos, self.pos.as_path()),
        ]
        .into_iter()
        .find(|(_, path)| path.exists())
    }
}

/// One of the position decoders, selected once per tile
#[derive(Debug)]
pub enum PositionSource<R: Read> {
    Clocs(ClocsDecoder<R>),
    Locs(LocsDecoder<R>),
    Pos(PosDecoder),
}

impl PositionSource<FileReader> {
    /// Opens the preferred existing position file of a tile
    ///
    /// Fails with [`ReadError::NotFound`] naming the last candidate when none exists.
    pub fn open(paths: &PositionPaths) -> Result<Self> {
        let Some((kind, path)) = paths.select() else {
            return Err(ReadError::NotFound(paths.pos.clone()).into());
        };
        debug!("Using {kind} positions from {}", path.display());
        match kind {
            PositionKind::Clocs => ClocsDecoder::open(path).map(Self::Clocs),
            PositionKind::Locs => LocsDecoder::open(path).map(Self::Locs),
            PositionKind::Pos => PosDecoder::open(path).map(Self::Pos),
        }
    }
}

impl<R: Read> PositionSource<R> {
    pub fn kind(&self) -> PositionKind {
        match self {
            Self::Clocs(_) => PositionKind::Clocs,
            Self::Locs(_) => PositionKind::Locs,
            Self::Pos(_) => PositionKind::Pos,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Clocs(inner) => inner.path(),
            Self::Locs(inner) => inner.path(),
            Self::Pos(inner) => inner.path(),
        }
    }

    pub fn has_next(&self) -> bool {
        match self {
            Self::Clocs(inner) => inner.has_next(),
            Self::Locs(inner) => inner.has_next(),
            Self::Pos(inner) => inner.has_next(),
        }
    }

    /// Number of clusters decoded so far
    pub fn current_total_clusters(&self) -> usize {
        match self {
            Self::Clocs(inner) => inner.current_total_clusters(),
            Self::Locs(inner) => inner.current_total_clusters(),
            Self::Pos(inner) => inner.current_total_clusters(),
        }
    }

    pub fn next(&mut self) -> Result<Position> {
        match self {
            Self::Clocs(inner) => inner.next(),
            Self::Locs(inner) => inner.next(),
            Self::Pos(inner) => inner.next(),
        }
    }

    pub fn close(&mut self) {
        match self {
            Self::Clocs(inner) => inner.close(),
            Self::Locs(inner) => inner.close(),
            Self::Pos(inner) => inner.close(),
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;
    use std::fs;

    #[test]
    fn test_normalize_rounds_half_up() {
        assert_eq!(normalize(0.0), 1000);
        assert_eq!(normalize(12.34), 1123);
        assert_eq!(normalize(0.05), 1001);
        assert_eq!(normalize(-0.05), 1000);
        assert_eq!(Position::from_physical(2.5, 0.1).to_string(), "1025:1001");
    }

    #[test]
    fn test_selection_order() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let paths = PositionPaths {
            clocs: dir.path().join("s_1_1101.clocs"),
            locs: dir.path().join("s_1_1101.locs"),
            pos: dir.path().join("s_1_1101_pos.txt"),
        };
        assert!(paths.select().is_none());
        assert!(matches!(
            PositionSource::open(&paths).unwrap_err(),
            Error::ReadError(ReadError::NotFound(_))
        ));

        fs::write(&paths.pos, "1.0 2.0\n")?;
        assert_eq!(paths.select().map(|(k, _)| k), Some(PositionKind::Pos));

        fs::write(&paths.locs, b"")?;
        assert_eq!(paths.select().map(|(k, _)| k), Some(PositionKind::Locs));

        fs::write(&paths.clocs, b"")?;
        assert_eq!(paths.select().map(|(k, _)| k), Some(PositionKind::Clocs));
        Ok(())
    }

    #[test]
    fn test_open_text_positions() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let paths = PositionPaths {
            clocs: dir.path().join("s_1_1101.clocs"),
            locs: dir.path().join("s_1_1101.locs"),
            pos: dir.path().join("s_1_1101_pos.txt"),
        };
        fs::write(&paths.pos, "1.0 2.0\n3.25 4.5\n")?;

        let mut source = PositionSource::open(&paths)?;
        assert_eq!(source.kind(), PositionKind::Pos);
        assert_eq!(source.next()?, Position::new(1010, 1020));
        assert_eq!(source.next()?, Position::new(1033, 1045));
        assert!(!source.has_next());
        assert_eq!(source.current_total_clusters(), 2);
        source.close();
        Ok(())
    }
}
