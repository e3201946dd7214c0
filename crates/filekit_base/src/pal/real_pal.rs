use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::{debug, instrument};

use crate::{FileKitError, FileKitResult, error::ErrorKind};

use super::FilePath;
use super::traits::{EntryKind, Pal, ReadSeek};

/* 📖 # Why use std::fs instead of async or other crates?

Every file operation is synchronous and blocking by contract. std::fs is:
- Sufficient for synchronous file operations
- Requires no external dependencies
- Available on every native target the crate builds for
*/

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// Relative file paths are resolved against a configured base directory;
/// absolute paths are used as given.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    ///
    /// # Arguments
    /// * `base_dir` - Relative paths will be resolved against this directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to a filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.to_std_path())
    }
}

fn io_error(path: PathBuf, source: std::io::Error) -> Box<FileKitError> {
    ErrorKind::Io { path, source }.into()
}

impl Pal for RealPal {
    fn working_directory(&self) -> FilePath {
        let base_dir = std::path::absolute(&self.base_dir).unwrap_or_else(|_| self.base_dir.clone());
        FilePath::from(base_dir)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn entry_kind(&self, path: &FilePath) -> FileKitResult<Option<EntryKind>> {
        let resolved = self.resolve_path(path);
        let kind = match fs::metadata(&resolved) {
            Ok(metadata) if metadata.is_file() => Some(EntryKind::File),
            Ok(metadata) if metadata.is_dir() => Some(EntryKind::Directory),
            Ok(_) => Some(EntryKind::Other),
            // a regular file somewhere along the path means nothing can exist below it
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                None
            }
            Err(e) => {
                debug!(error = %e, "failed to stat path");
                return Err(io_error(resolved, e));
            }
        };
        debug!(?kind, resolved = %resolved.display(), "checked entry kind");
        Ok(kind)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> FileKitResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            io_error(resolved, e)
        })?;
        debug!("file opened successfully");
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            io_error(resolved, e)
        })?;
        debug!("file created successfully");
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn append_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for appending");
        let file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&resolved)
            .map_err(|e| {
                debug!(error = %e, "failed to open file for appending");
                io_error(resolved, e)
            })?;
        debug!("file opened for appending");
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn copy_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()> {
        let source = self.resolve_path(from);
        let destination = self.resolve_path(to);
        let bytes = fs::copy(&source, &destination).map_err(|e| {
            debug!(error = %e, "failed to copy file");
            io_error(source, e)
        })?;
        debug!(bytes, "file copied");
        Ok(())
    }

    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn rename_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()> {
        let source = self.resolve_path(from);
        let destination = self.resolve_path(to);
        fs::rename(&source, &destination).map_err(|e| {
            debug!(error = %e, "failed to rename file");
            io_error(source, e)
        })?;
        debug!("file renamed");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn remove_file(&self, path: &FilePath) -> FileKitResult<()> {
        let resolved = self.resolve_path(path);
        fs::remove_file(&resolved).map_err(|e| {
            debug!(error = %e, "failed to remove file");
            io_error(resolved, e)
        })?;
        debug!("file removed");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn file_size(&self, path: &FilePath) -> FileKitResult<u64> {
        let resolved = self.resolve_path(path);
        let metadata = fs::metadata(&resolved).map_err(|e| {
            debug!(error = %e, "failed to stat file");
            io_error(resolved, e)
        })?;
        Ok(metadata.len())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn modified(&self, path: &FilePath) -> FileKitResult<SystemTime> {
        let resolved = self.resolve_path(path);
        fs::metadata(&resolved)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| {
                debug!(error = %e, "failed to read modification time");
                io_error(resolved, e)
            })
    }

    /// Uses File::set_modified() which calls futimens/utimensat on Unix.
    #[instrument(skip(self), fields(path = %path))]
    fn set_modified(&self, path: &FilePath, time: SystemTime) -> FileKitResult<()> {
        let resolved = self.resolve_path(path);
        fs::OpenOptions::new()
            .write(true)
            .open(&resolved)
            .and_then(|file| file.set_modified(time))
            .map_err(|e| {
                debug!(error = %e, "failed to set modification time");
                io_error(resolved, e)
            })?;
        debug!("modification time updated");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_directory_all(&self, path: &FilePath) -> FileKitResult<()> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating directory and parents");
        fs::create_dir_all(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create directory");
            io_error(resolved, e)
        })?;
        debug!("directory created successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_entry_kind() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("test.txt"), "content").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        assert_eq!(
            pal.entry_kind(&FilePath::from("test.txt")).unwrap(),
            Some(EntryKind::File)
        );
        assert_eq!(
            pal.entry_kind(&FilePath::from("sub")).unwrap(),
            Some(EntryKind::Directory)
        );
        assert_eq!(pal.entry_kind(&FilePath::from("nonexistent.txt")).unwrap(), None);
    }

    #[test]
    fn test_absolute_path_ignores_base_dir() {
        let (temp_dir, _pal) = setup_test_dir();
        fs::write(temp_dir.path().join("abs.txt"), "x").unwrap();
        let pal = RealPal::new(PathBuf::from("/definitely/not/here"));

        let absolute = FilePath::from(temp_dir.path().join("abs.txt"));
        assert!(pal.is_file(&absolute).unwrap());
    }

    #[test]
    fn test_working_directory_is_absolute() {
        let (temp_dir, pal) = setup_test_dir();
        let cwd = pal.working_directory();
        assert!(cwd.is_absolute());
        assert_eq!(cwd, FilePath::from(temp_dir.path()));
    }

    #[test]
    fn test_read_file_not_found() {
        let (_temp_dir, pal) = setup_test_dir();
        let error = match pal.read_file(&FilePath::from("nonexistent.txt")) {
            Ok(_) => panic!("expected an error"),
            Err(error) => error,
        };
        assert!(matches!(error.kind(), ErrorKind::Io { .. }));
    }

    #[test]
    fn test_write_and_read() {
        let (temp_dir, pal) = setup_test_dir();
        pal.write_file(&FilePath::from("new.txt"), b"test content")
            .unwrap();

        let content = fs::read_to_string(temp_dir.path().join("new.txt")).unwrap();
        assert_eq!(content, "test content");
        assert_eq!(
            pal.read_file_to_string(&FilePath::from("new.txt")).unwrap(),
            "test content"
        );
    }

    #[test]
    fn test_append_file() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("log.txt"), "one").unwrap();

        let mut writer = pal.append_file(&FilePath::from("log.txt")).unwrap();
        writer.write_all(b" two").unwrap();
        drop(writer);

        let content = fs::read_to_string(temp_dir.path().join("log.txt")).unwrap();
        assert_eq!(content, "one two");
    }

    #[test]
    fn test_copy_rename_remove() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("a.txt"), "data").unwrap();

        pal.copy_file(&FilePath::from("a.txt"), &FilePath::from("b.txt"))
            .unwrap();
        pal.rename_file(&FilePath::from("b.txt"), &FilePath::from("c.txt"))
            .unwrap();
        pal.remove_file(&FilePath::from("a.txt")).unwrap();

        assert!(!temp_dir.path().join("a.txt").exists());
        assert!(!temp_dir.path().join("b.txt").exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("c.txt")).unwrap(),
            "data"
        );
    }

    #[test]
    fn test_file_size() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("sized.bin"), [0u8; 17]).unwrap();
        assert_eq!(pal.file_size(&FilePath::from("sized.bin")).unwrap(), 17);
    }

    #[test]
    fn test_set_modified() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("old.txt"), "x").unwrap();
        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);

        pal.set_modified(&FilePath::from("old.txt"), past).unwrap();

        assert_eq!(pal.modified(&FilePath::from("old.txt")).unwrap(), past);
    }

    #[test]
    fn test_create_directory_all() {
        let (temp_dir, pal) = setup_test_dir();
        pal.create_directory_all(&FilePath::from("a/b/c")).unwrap();
        assert!(temp_dir.path().join("a/b/c").is_dir());
    }
}
