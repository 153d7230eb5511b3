use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::error::{ReadError, Result};

/// File-backed reader type used by every codec when opened from a path
pub type FileReader = BufReader<File>;

/// Opens a raw data file for strictly sequential reading
///
/// Fails with [`ReadError::NotFound`] when the path does not exist and with
/// [`ReadError::InvalidArgument`] when it is a directory or cannot be opened.
pub fn open_file(path: &Path) -> Result<FileReader> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReadError::NotFound(path.to_path_buf()).into())
        }
        Err(e) => return Err(ReadError::InvalidArgument(path.to_path_buf(), e.to_string()).into()),
    };
    if metadata.is_dir() {
        return Err(
            ReadError::InvalidArgument(path.to_path_buf(), "is a directory".to_string()).into(),
        );
    }
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) => Err(ReadError::InvalidArgument(path.to_path_buf(), e.to_string()).into()),
    }
}

/// Forward-only byte cursor shared by the binary codecs
///
/// No seeking is supported. Every read past the end of the underlying stream
/// is reported as [`ReadError::UnexpectedEndOfStream`] with the byte position.
#[derive(Debug)]
pub struct ByteReader<R: Read> {
    inner: Option<R>,
    path: PathBuf,
    position: usize,
}

impl ByteReader<FileReader> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner = open_file(path)?;
        Ok(Self::new(inner, path))
    }
}

impl<R: Read> ByteReader<R> {
    /// Wraps an already opened stream
    ///
    /// `path` only labels errors and log messages.
    pub fn new<P: AsRef<Path>>(inner: R, path: P) -> Self {
        Self {
            inner: Some(inner),
            path: path.as_ref().to_path_buf(),
            position: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn inner(&mut self) -> Result<&mut R> {
        match self.inner.as_mut() {
            Some(inner) => Ok(inner),
            None => Err(ReadError::Closed(self.path.clone()).into()),
        }
    }

    fn map_eof(&self, e: io::Error) -> crate::Error {
        if e.kind() == ErrorKind::UnexpectedEof {
            ReadError::UnexpectedEndOfStream {
                path: self.path.clone(),
                position: self.position,
            }
            .into()
        } else {
            e.into()
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let result = self.inner()?.read_u8();
        match result {
            Ok(byte) => {
                self.position += 1;
                Ok(byte)
            }
            Err(e) => Err(self.map_eof(e)),
        }
    }

    /// Reads a little-endian `u32`: byte `i` contributes `byte[i] << (8 * i)`
    pub fn read_u32(&mut self) -> Result<u32> {
        let result = self.inner()?.read_u32::<LittleEndian>();
        match result {
            Ok(word) => {
                self.position += 4;
                Ok(word)
            }
            Err(e) => Err(self.map_eof(e)),
        }
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let result = self.inner()?.read_f32::<LittleEndian>();
        match result {
            Ok(value) => {
                self.position += 4;
                Ok(value)
            }
            Err(e) => Err(self.map_eof(e)),
        }
    }

    /// Reads exactly `N` bytes, typically a fixed-size header
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buffer = [0u8; N];
        self.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    pub fn read_exact(&mut self, buffer: &mut [u8]) -> Result<()> {
        let result = self.inner()?.read_exact(buffer);
        match result {
            Ok(()) => {
                self.position += buffer.len();
                Ok(())
            }
            Err(e) => Err(self.map_eof(e)),
        }
    }

    /// Reads everything left in the stream
    pub fn read_to_end(&mut self, buffer: &mut Vec<u8>) -> Result<usize> {
        let n = self.inner()?.read_to_end(buffer)?;
        self.position += n;
        Ok(n)
    }

    /// Releases the underlying handle
    ///
    /// Closing twice is a no-op. Dropping the handle cannot fail, so nothing is
    /// ever propagated from here.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!(
                "Closed {} after {} bytes",
                self.path.display(),
                self.position
            );
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;

    #[test]
    fn test_read_u32_little_endian() -> Result<()> {
        let mut reader = ByteReader::new([0x78, 0x56, 0x34, 0x12, 0xff].as_slice(), "mem");
        assert_eq!(reader.read_u32()?, 0x1234_5678);
        assert_eq!(reader.read_u8()?, 0xff);
        assert_eq!(reader.position(), 5);
        Ok(())
    }

    #[test]
    fn test_unexpected_eof() {
        let mut reader = ByteReader::new([0x01, 0x02].as_slice(), "mem");
        let err = reader.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::ReadError(ReadError::UnexpectedEndOfStream { position: 0, .. })
        ));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut reader = ByteReader::new([0x01].as_slice(), "mem");
        reader.close();
        reader.close();
        assert!(reader.is_closed());
        assert!(matches!(
            reader.read_u8().unwrap_err(),
            Error::ReadError(ReadError::Closed(_))
        ));
    }

    #[test]
    fn test_open_missing() {
        let err = ByteReader::open("/definitely/not/here.bcl").unwrap_err();
        assert!(matches!(err, Error::ReadError(ReadError::NotFound(_))));
    }

    #[test]
    fn test_open_directory() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let err = ByteReader::open(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::ReadError(ReadError::InvalidArgument(_, _))
        ));
        Ok(())
    }
}
