//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`FileWriter`] is plugged into the `tracing-subscriber` fmt layer as its
//! `MakeWriter`. It appends to a single log file and, once that file exceeds
//! the size limit, moves it aside with a timestamp suffix and starts a new
//! one, keeping only the newest few backups.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If size > 10MB, rotate:
///    - Rename current file to `<name>.<YYYYMMDDHHMMSS>`
///    - Create new empty file
///    - Remove oldest backups beyond 3
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<fs::File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path`. The file is opened on first write.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            writer: Mutex::new(None),
        }
    }

    /// Appends `buf` to the file, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors or if the internal lock is poisoned.
    fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        file.write_all(buf)?;
        file.flush()
    }

    fn check_and_rotate(&self, writer: &mut Option<fs::File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > MAX_FILE_SIZE_BYTES {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn backup_prefix(&self) -> io::Result<String> {
        self.file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let backup_path = self
            .file_path
            .with_file_name(format!("{}{timestamp}", self.backup_prefix()?));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Removes backups beyond [`MAX_BACKUP_FILES`], newest kept.
    ///
    /// Individual deletion failures are ignored so cleanup continues.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
        let prefix = self.backup_prefix()?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort lexicographically in time order.
        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipebox.log");
        let writer = FileWriter::new(path.clone());

        (&writer).write_all(b"first\n").unwrap();
        (&writer).write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn cleanup_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipebox.log");
        for stamp in ["20240101000000", "20240102000000", "20240103000000", "20240104000000"] {
            fs::write(dir.path().join(format!("recipebox.log.{stamp}")), "x").unwrap();
        }

        FileWriter::new(path).cleanup_old_backups().unwrap();

        assert!(!dir.path().join("recipebox.log.20240101000000").exists());
        assert!(dir.path().join("recipebox.log.20240104000000").exists());
    }
}
