//! File sinks

use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggerError::file_sink(path.display().to_string(), err))
}

/// Append-mode file sink
///
/// Writes go straight to the file without buffering, so every record is on
/// disk as soon as the logger releases its lock.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self { file, path })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Append-mode file sink holding an exclusive advisory lock during each write
///
/// Loggers that do not share a write lock (separate `Logger::new` calls, or
/// separate processes) can point a `LockedFileSink` each at the same file and
/// still get whole records. Each record reaches the sink as a single
/// `write_all`, which this sink performs under the file lock.
#[cfg(feature = "file")]
#[derive(Debug)]
pub struct LockedFileSink {
    file: File,
    path: PathBuf,
}

#[cfg(feature = "file")]
impl LockedFileSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "file")]
impl Write for LockedFileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        use fs2::FileExt;

        FileExt::lock_exclusive(&self.file)?;
        let result = self.file.write_all(buf);
        let unlocked = FileExt::unlock(&self.file);
        result.and(unlocked)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
