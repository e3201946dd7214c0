use std::io::{Read, Seek, Write};
use std::sync::Arc;
use std::time::SystemTime;

use crate::FileKitResult;
use crate::error::ErrorKind;

use super::file_path::FilePath;

/* 📖 # What is the Platform Abstraction Layer (PAL)?

Every deployment target exposes a different native filesystem interface. The PAL reduces
each of them to the same small set of primitives: stat an entry, read it, write or append
to it, copy, rename, delete, query its size and set its modification time.

File-level rules (validation order, overwrite policy, self-copy detection) live above the
PAL in FileHandle and are written once. A target only has to supply the primitives.
*/

/// Trait combining Read + Seek for file operations.
///
/// This trait enables returning opaque file handles that support both reading
/// and seeking, useful for different implementations (real files, in-memory buffers, etc.)
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// What kind of entry lives at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything that is neither a regular file nor a directory (sockets, devices, ...)
    Other,
}

/* 📖 # Why is Pal a trait instead of a struct?

Using a trait enables two key benefits:
1. **Targets**: each deployment target gets its own implementation, chosen once at build time
2. **Testability**: MockPal implements Pal for fast, deterministic tests without filesystem side effects

Code above the PAL never branches on the target.
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem primitives.
///
/// Three implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
/// - `UnsupportedPal`: Fails every primitive, for targets without a filesystem
///
/// Primitives do not enforce file-level policy. `copy_file` and `rename_file` may
/// replace an existing destination; callers decide whether that is allowed.
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Directory that relative paths are resolved against.
    fn working_directory(&self) -> FilePath;

    /// Kind of the entry at `path`, or `None` if nothing exists there.
    fn entry_kind(&self, path: &FilePath) -> FileKitResult<Option<EntryKind>>;

    /// Check if anything exists at the given path.
    fn exists(&self, path: &FilePath) -> FileKitResult<bool> {
        Ok(self.entry_kind(path)?.is_some())
    }

    /// Check if a regular file exists at the given path.
    fn is_file(&self, path: &FilePath) -> FileKitResult<bool> {
        Ok(self.entry_kind(path)? == Some(EntryKind::File))
    }

    /// Check if a directory exists at the given path.
    fn is_directory(&self, path: &FilePath) -> FileKitResult<bool> {
        Ok(self.entry_kind(path)? == Some(EntryKind::Directory))
    }

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> FileKitResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents.
    fn read_file_to_bytes(&self, path: &FilePath) -> FileKitResult<Vec<u8>> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| ErrorKind::Io {
            path: path.to_std_path(),
            source: e,
        })?;
        Ok(contents)
    }

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> FileKitResult<String> {
        let contents = self.read_file_to_bytes(path)?;
        String::from_utf8(contents).map_err(|e| {
            ErrorKind::Io {
                path: path.to_std_path(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            }
            .into()
        })
    }

    /// Create a new file, truncating it if it exists.
    fn create_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>>;

    /// Open a file for appending, creating it if it does not exist.
    fn append_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>>;

    /// Replace the contents of a file with `contents`, creating it if needed.
    fn write_file(&self, path: &FilePath, contents: &[u8]) -> FileKitResult<()> {
        let mut writer = self.create_file(path)?;
        let io_error = |e| ErrorKind::Io {
            path: path.to_std_path(),
            source: e,
        };
        writer.write_all(contents).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }

    /// Copy a regular file, replacing `to` if it exists.
    fn copy_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()>;

    /// Move a regular file, replacing `to` if it exists.
    fn rename_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()>;

    /// Delete a regular file.
    fn remove_file(&self, path: &FilePath) -> FileKitResult<()>;

    /// Length of the entry in bytes.
    fn file_size(&self, path: &FilePath) -> FileKitResult<u64>;

    /// Last modification time of the entry.
    fn modified(&self, path: &FilePath) -> FileKitResult<SystemTime>;

    /// Set the modification time of an existing file without touching its content.
    fn set_modified(&self, path: &FilePath, time: SystemTime) -> FileKitResult<()>;

    /// Create a directory and all parent directories.
    fn create_directory_all(&self, path: &FilePath) -> FileKitResult<()>;
}

/* 📖 # Why use Arc<dyn Pal> with PalHandle?

Every FileHandle carries the PAL it dispatches to. Arc makes that a pointer copy, and
PalHandle wraps it for ergonomic Deref access and Clone support without lifetime
parameters.
*/

/// Handle to a PAL implementation, enabling shared ownership.
///
/// # Examples
///
/// ```
/// use filekit_base::{MockPal, PalHandle};
///
/// let pal = PalHandle::new(MockPal::new());
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::mock::MockPal;

    #[test]
    fn test_pal_handle_clone_shares_state() {
        let pal = PalHandle::new(MockPal::new());
        let pal_clone = pal.clone();
        pal.write_file(&FilePath::from("shared.txt"), b"x").unwrap();
        assert!(pal_clone.exists(&FilePath::from("shared.txt")).unwrap());
    }

    #[test]
    fn test_entry_kind_helpers() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("f.txt"), b"".to_vec());
        pal.add_directory(FilePath::from("d"));

        assert!(pal.is_file(&FilePath::from("f.txt")).unwrap());
        assert!(!pal.is_directory(&FilePath::from("f.txt")).unwrap());
        assert!(pal.is_directory(&FilePath::from("d")).unwrap());
        assert!(!pal.exists(&FilePath::from("nope")).unwrap());
    }
}
