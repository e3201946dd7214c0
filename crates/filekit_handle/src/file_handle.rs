use std::fmt;
use std::io::Write;
use std::time::SystemTime;

use filekit_base::{EntryKind, ErrorKind, FileKitResult, FilePath, PalHandle, ResultExt};
use tracing::{debug, instrument};

use crate::path_input::PathInput;

/* 📖 # Why do writes and transfers default to different overwrite policies?

Writing to a handle targets the file the caller already named, so replacing its content is
the expected outcome and `write_*` callers conventionally pass `DEFAULT_WRITE_OVERWRITE`
(true). Copy and move reach a second location the caller may not have looked at, so
`TransferOptions::default()` refuses to replace an existing destination.
*/

/// Conventional `overwrite` argument for `write_bytes` and `write_string`.
pub const DEFAULT_WRITE_OVERWRITE: bool = true;

/// Options for `copy_to` and `move_to`.
///
/// Defaults: `overwrite = false`, `trim_whitespace = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Replace an existing destination file.
    pub overwrite: bool,
    /// Trim whitespace around the segments of a textual destination.
    pub trim_whitespace: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            trim_whitespace: true,
        }
    }
}

impl TransferOptions {
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_trim_whitespace(mut self, trim_whitespace: bool) -> Self {
        self.trim_whitespace = trim_whitespace;
        self
    }
}

/// Operation surface bound to one file path.
///
/// A FileHandle holds no open file between calls: each operation validates the path,
/// dispatches to the PAL and releases whatever it opened before returning. Operations
/// that change the file's location (`move_to`, `rename_to`) return a new handle.
///
/// Missing files are not errors for reads (`None`) and `delete` (`false`). Everything
/// else that violates a precondition fails with an `ErrorKind` naming the path.
///
/// # Examples
///
/// ```
/// use filekit_base::{MockPal, PalHandle};
/// use filekit_handle::{FileHandle, TransferOptions};
///
/// let pal = PalHandle::new(MockPal::new());
/// let a = FileHandle::of(&pal, "a.txt");
/// a.write_string(Some("HEY!"), true).unwrap();
///
/// let b = a.copy_to("b.txt", TransferOptions::default()).unwrap();
/// assert_eq!(b.read_as_string().unwrap().as_deref(), Some("HEY!"));
/// assert!(a.copy_to("b.txt", TransferOptions::default()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FileHandle {
    pal: PalHandle,
    path: FilePath,
}

impl FileHandle {
    /// Builds a handle, trimming whitespace around path segments. Never fails and performs
    /// no I/O; `None` or `""` produce a handle on the empty path.
    pub fn of(pal: &PalHandle, path: impl Into<PathInput>) -> Self {
        Self::of_with_trim(pal, path, true)
    }

    /// Like `of`, with explicit control over whitespace trimming.
    pub fn of_with_trim(pal: &PalHandle, path: impl Into<PathInput>, trim_whitespace: bool) -> Self {
        Self {
            pal: pal.clone(),
            path: path.into().into_file_path(trim_whitespace),
        }
    }

    pub fn path(&self) -> &FilePath {
        &self.path
    }

    pub fn pal(&self) -> &PalHandle {
        &self.pal
    }

    /// Whether anything exists at the path. The empty path never exists.
    pub fn exists(&self) -> FileKitResult<bool> {
        if self.path.is_empty() {
            return Ok(false);
        }
        self.pal.exists(&self.path)
    }

    /// Whether a regular file exists at the path.
    pub fn is_file(&self) -> FileKitResult<bool> {
        if self.path.is_empty() {
            return Ok(false);
        }
        self.pal.is_file(&self.path)
    }

    fn with_path(&self, path: FilePath) -> FileHandle {
        Self {
            pal: self.pal.clone(),
            path,
        }
    }

    fn same_location(&self, other: &FilePath) -> bool {
        let working_directory = self.pal.working_directory();
        self.path.to_absolute(&working_directory) == other.to_absolute(&working_directory)
    }

    fn assert_valid_path(&self, must_exist: bool) -> FileKitResult<()> {
        if self.path.is_empty() {
            return Err(ErrorKind::InvalidPath {
                path: self.path.clone(),
                reason: "filename is empty".to_string(),
            }
            .into());
        }
        match self.pal.entry_kind(&self.path)? {
            Some(EntryKind::File) => Ok(()),
            Some(_) => Err(ErrorKind::NotAFile {
                path: self.path.clone(),
            }
            .into()),
            None if must_exist => Err(ErrorKind::PathNotFound {
                path: self.path.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn destination(&self, input: PathInput, trim_whitespace: bool) -> FileKitResult<FilePath> {
        let destination = input.into_file_path(trim_whitespace);
        if destination.is_empty() {
            return Err(ErrorKind::InvalidPath {
                path: destination,
                reason: format!("destination for '{}' has an empty filename", self.path),
            }
            .into());
        }
        Ok(destination)
    }

    /// Full contents, or `None` if nothing exists at the path.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn read_as_bytes(&self) -> FileKitResult<Option<Vec<u8>>> {
        if !self.exists()? {
            debug!("path does not exist, nothing to read");
            return Ok(None);
        }
        self.assert_valid_path(true)?;
        let bytes = self.pal.read_file_to_bytes(&self.path)?;
        debug!(len = bytes.len(), "read file");
        Ok(Some(bytes))
    }

    /// Full contents decoded as UTF-8, or `None` if nothing exists at the path.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn read_as_string(&self) -> FileKitResult<Option<String>> {
        if !self.exists()? {
            debug!("path does not exist, nothing to read");
            return Ok(None);
        }
        self.assert_valid_path(true)?;
        let text = self.pal.read_file_to_string(&self.path)?;
        debug!(len = text.len(), "read file");
        Ok(Some(text))
    }

    /// Full contents decoded as UTF-8, or `default` if nothing exists at the path.
    pub fn read_as_string_or(&self, default: impl Into<String>) -> FileKitResult<String> {
        Ok(self
            .read_as_string()?
            .unwrap_or_else(|| default.into()))
    }

    /// Replaces the file's content, creating it if needed.
    ///
    /// `None` content does nothing. With `overwrite == false` an existing file is left
    /// untouched and `AlreadyExists` is returned. See `DEFAULT_WRITE_OVERWRITE`.
    #[instrument(skip(self, content), fields(path = %self.path))]
    pub fn write_bytes(&self, content: Option<&[u8]>, overwrite: bool) -> FileKitResult<()> {
        self.assert_valid_path(false)?;
        let Some(content) = content else {
            debug!("no content given, nothing to write");
            return Ok(());
        };
        if !overwrite && self.pal.exists(&self.path)? {
            return Err(ErrorKind::AlreadyExists {
                path: self.path.clone(),
            }
            .into());
        }
        self.pal.write_file(&self.path, content)?;
        debug!(len = content.len(), "wrote file");
        Ok(())
    }

    /// String variant of `write_bytes`.
    pub fn write_string(&self, content: Option<&str>, overwrite: bool) -> FileKitResult<()> {
        self.write_bytes(content.map(str::as_bytes), overwrite)
    }

    /// Appends to the file, creating it if needed. `None` content does nothing.
    #[instrument(skip(self, content), fields(path = %self.path))]
    pub fn append_string(&self, content: Option<&str>) -> FileKitResult<()> {
        self.assert_valid_path(false)?;
        let Some(content) = content else {
            debug!("no content given, nothing to append");
            return Ok(());
        };
        let mut writer = self.pal.append_file(&self.path)?;
        let written = writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush());
        // the writer is closed before any write error reaches the caller
        drop(writer);
        written.map_err(|e| {
            debug!(error = %e, "failed to append");
            ErrorKind::Io {
                path: self.path.to_std_path(),
                source: e,
            }
        })?;
        debug!(len = content.len(), "appended to file");
        Ok(())
    }

    /// Deletes the file. Returns `false` if nothing existed at the path.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn delete(&self) -> FileKitResult<bool> {
        if !self.exists()? {
            debug!("path does not exist, nothing to delete");
            return Ok(false);
        }
        self.assert_valid_path(true)?;
        self.pal.remove_file(&self.path)?;
        debug!("deleted file");
        Ok(true)
    }

    /// Copies the file to `destination` and returns a handle on the copy.
    ///
    /// Copying a file onto its own location returns this handle and touches nothing.
    #[instrument(skip(self, destination), fields(path = %self.path))]
    pub fn copy_to(
        &self,
        destination: impl Into<PathInput>,
        options: TransferOptions,
    ) -> FileKitResult<FileHandle> {
        self.assert_valid_path(true)?;
        let destination = self.destination(destination.into(), options.trim_whitespace)?;
        debug!(destination = %destination, overwrite = options.overwrite, "copying");

        if self.same_location(&destination) {
            debug!("destination is the source itself, nothing to copy");
            return Ok(self.clone());
        }

        if let Some(kind) = self.pal.entry_kind(&destination)? {
            if !options.overwrite {
                return Err(ErrorKind::AlreadyExists { path: destination }.into());
            }
            if kind != EntryKind::File {
                return Err(ErrorKind::NotAFile { path: destination }.into());
            }
            self.pal
                .remove_file(&destination)
                .with_context(|| format!("removing '{}' before copying over it", destination))?;
        }

        self.pal
            .copy_file(&self.path, &destination)
            .with_context(|| format!("copying '{}' to '{}'", self.path, destination))?;
        Ok(self.with_path(destination))
    }

    /// Moves the file to `destination` and returns a handle on the new location.
    #[instrument(skip(self, destination), fields(path = %self.path))]
    pub fn move_to(
        &self,
        destination: impl Into<PathInput>,
        options: TransferOptions,
    ) -> FileKitResult<FileHandle> {
        self.assert_valid_path(true)?;
        let destination = self.destination(destination.into(), options.trim_whitespace)?;
        debug!(destination = %destination, overwrite = options.overwrite, "moving");

        if let Some(kind) = self.pal.entry_kind(&destination)? {
            if self.same_location(&destination) {
                debug!("destination is the source itself, nothing to move");
                return Ok(self.clone());
            }
            if !options.overwrite {
                return Err(ErrorKind::AlreadyExists { path: destination }.into());
            }
            if kind == EntryKind::Directory {
                return Err(ErrorKind::IsADirectory { path: destination }.into());
            }
            self.pal
                .remove_file(&destination)
                .with_context(|| format!("removing '{}' before moving over it", destination))?;
        }

        self.pal
            .rename_file(&self.path, &destination)
            .with_context(|| format!("moving '{}' to '{}'", self.path, destination))?;
        Ok(self.with_path(destination))
    }

    /// Renames the file within its directory.
    ///
    /// `name` is trimmed and must then be a bare file name: empty names, `.`, `..` and names
    /// containing `/` or `\` are rejected with `InvalidName` on every host.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn rename_to(&self, name: &str, overwrite: bool) -> FileKitResult<FileHandle> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ErrorKind::InvalidName {
                name: name.to_string(),
                reason: format!("new name for '{}' is empty", self.path),
            }
            .into());
        }
        if FilePath::contains_separator(name) {
            return Err(ErrorKind::InvalidName {
                name: name.to_string(),
                reason: "a bare file name must not contain '/' or '\\'".to_string(),
            }
            .into());
        }
        if name == "." || name == ".." {
            return Err(ErrorKind::InvalidName {
                name: name.to_string(),
                reason: "a bare file name must not be '.' or '..'".to_string(),
            }
            .into());
        }
        let destination = match self.path.parent() {
            Some(parent) => parent.join(name),
            None => FilePath::from(name),
        };
        self.move_to(
            destination,
            TransferOptions::default().with_overwrite(overwrite),
        )
    }

    /// Updates the modification time of an existing file, or creates an empty one.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn touch(&self) -> FileKitResult<()> {
        self.assert_valid_path(false)?;
        if self.pal.exists(&self.path)? {
            self.pal.set_modified(&self.path, SystemTime::now())?;
            debug!("updated modification time");
        } else {
            self.pal.write_file(&self.path, &[])?;
            debug!("created empty file");
        }
        Ok(())
    }

    /// Length of the file in bytes.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn size(&self) -> FileKitResult<u64> {
        self.assert_valid_path(true)?;
        self.pal.file_size(&self.path)
    }

    /// Last modification time of the file.
    #[instrument(skip(self), fields(path = %self.path))]
    pub fn modified(&self) -> FileKitResult<SystemTime> {
        self.assert_valid_path(true)?;
        self.pal.modified(&self.path)
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
