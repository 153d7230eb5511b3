//! Plain-text position decoding
//!
//! One line per cluster holding two whitespace-separated decimal coordinates.
//! The file is scanned once when opened to count its clusters.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use super::byte::{ByteReader, FileReader};
use super::position::Position;
use crate::error::{ReadError, Result};

/// Decoder over one `_pos.txt` file
#[derive(Debug)]
pub struct PosDecoder {
    path: PathBuf,
    lines: Vec<String>,
    current: usize,
}

impl PosDecoder {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ByteReader::<FileReader>::open(path)?)
    }

    /// Reads the whole file, keeping every non-blank line as one cluster
    pub fn new<R: Read>(mut inner: ByteReader<R>) -> Result<Self> {
        let mut buffer = Vec::new();
        inner.read_to_end(&mut buffer)?;
        let path = inner.path().to_path_buf();
        inner.close();

        let lines: Vec<String> = String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        debug!("Opened pos {} with {} clusters", path.display(), lines.len());

        Ok(Self {
            path,
            lines,
            current: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_clusters(&self) -> usize {
        self.lines.len()
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_clusters()
    }

    pub fn current_total_clusters(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> Result<Position> {
        let Some(line) = self.lines.get(self.current) else {
            return Err(ReadError::OutOfRange(self.current, self.total_clusters()).into());
        };
        let mut fields = line.split_whitespace().map(str::parse::<f64>);
        let (Some(Ok(x)), Some(Ok(y)), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ReadError::MalformedPosition {
                path: self.path.clone(),
                line: self.current + 1,
            }
            .into());
        };
        self.current += 1;
        Ok(Position::from_physical(x, y))
    }

    pub fn close(&mut self) {}
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;

    fn decoder(text: &str) -> Result<PosDecoder> {
        Ok(PosDecoder::new(ByteReader::new(
            text.as_bytes(),
            "s_1_1101_pos.txt",
        ))?)
    }

    #[test]
    fn test_counts_lines() -> Result<()> {
        let mut reader = decoder("  12.30   45.60\n0.04 -1.2\n\n")?;
        assert_eq!(reader.total_clusters(), 2);
        assert_eq!(reader.next()?, Position::new(1123, 1456));
        assert_eq!(reader.next()?, Position::new(1000, 988));
        assert!(!reader.has_next());
        assert_eq!(reader.current_total_clusters(), 2);
        Ok(())
    }

    #[test]
    fn test_malformed_line() -> Result<()> {
        let mut reader = decoder("1.0 2.0\n3.0\n")?;
        reader.next()?;
        assert!(matches!(
            reader.next().unwrap_err(),
            Error::ReadError(ReadError::MalformedPosition { line: 2, .. })
        ));
        Ok(())
    }
}
