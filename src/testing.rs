//! On-disk run folders for tests

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::TempDir;

use crate::config::RunFolders;
use crate::header::{ClocsHeader, ClusterCountHeader, FilterHeader, LocsHeader};
use crate::reader::BASES;

/// Packs a base and a quality into one BCL byte
pub fn call(base: u8, quality: u8) -> u8 {
    let index = BASES.iter().position(|&b| b == base).unwrap_or(0) as u8;
    (quality << 2) | index
}

/// A temporary `Data/Intensities` tree
pub struct RunFixture {
    _dir: TempDir,
    folders: RunFolders,
}
impl RunFixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let folders = RunFolders::new(dir.path().join("Data").join("Intensities"));
        Ok(Self { _dir: dir, folders })
    }

    pub fn folders(&self) -> RunFolders {
        self.folders.clone()
    }

    fn write(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(path.to_path_buf())
    }

    pub fn write_bcl(&self, lane: u32, tile: u32, cycle: u32, calls: &[u8]) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        ClusterCountHeader::new(calls.len() as u32).write_bytes(&mut buffer)?;
        buffer.extend_from_slice(calls);
        Self::write(&self.folders.bcl_path(lane, tile, cycle), &buffer)
    }

    pub fn write_scl(&self, lane: u32, tile: u32, cycle: u32, bases: &[u8]) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        ClusterCountHeader::new(bases.len() as u32).write_bytes(&mut buffer)?;
        for chunk in bases.chunks(4) {
            let mut byte = 0u8;
            for (i, base) in chunk.iter().enumerate() {
                let code = BASES.iter().position(|b| b == base).unwrap_or(0) as u8;
                byte |= code << ((3 - i) * 2);
            }
            buffer.push(byte);
        }
        Self::write(&self.folders.scl_path(lane, tile, cycle), &buffer)
    }

    pub fn write_filter(&self, lane: u32, tile: u32, passed: &[bool]) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        FilterHeader::new(passed.len() as u32).write_bytes(&mut buffer)?;
        buffer.extend(passed.iter().map(|&p| u8::from(p)));
        Self::write(&self.folders.filter_path(lane, tile), &buffer)
    }

    pub fn write_clocs(&self, lane: u32, tile: u32, blocks: &[&[(u8, u8)]]) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        ClocsHeader::new(blocks.len() as u32).write_bytes(&mut buffer)?;
        for block in blocks {
            buffer.push(block.len() as u8);
            for &(dx, dy) in *block {
                buffer.extend_from_slice(&[dx, dy]);
            }
        }
        Self::write(&self.folders.position_paths(lane, tile).clocs, &buffer)
    }

    pub fn write_locs(&self, lane: u32, tile: u32, positions: &[(f32, f32)]) -> Result<PathBuf> {
        let mut buffer = Vec::new();
        LocsHeader::new(positions.len() as u32).write_bytes(&mut buffer)?;
        for &(x, y) in positions {
            buffer.write_f32::<LittleEndian>(x)?;
            buffer.write_f32::<LittleEndian>(y)?;
        }
        Self::write(&self.folders.position_paths(lane, tile).locs, &buffer)
    }

    pub fn write_pos(&self, lane: u32, tile: u32, positions: &[(f64, f64)]) -> Result<PathBuf> {
        let text: String = positions
            .iter()
            .map(|(x, y)| format!("{x:.2}\t{y:.2}\n"))
            .collect();
        Self::write(&self.folders.position_paths(lane, tile).pos, text.as_bytes())
    }
}
