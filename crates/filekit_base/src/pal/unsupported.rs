use std::io::Write;
use std::time::SystemTime;

use crate::FileKitResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::{EntryKind, Pal, ReadSeek};

/// PAL for deployment targets that offer no filesystem.
///
/// Every primitive fails with `UnsupportedOperation` naming the primitive and the target,
/// so a missing capability surfaces as an error instead of a silent no-op.
#[derive(Debug, Clone)]
pub struct UnsupportedPal {
    target: &'static str,
}

impl UnsupportedPal {
    /// Create a PAL for the named target.
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    /// A PAL named after the architecture/OS pair the crate was compiled for.
    pub fn for_current_target() -> Self {
        Self::new(current_target())
    }

    fn unsupported<T>(&self, operation: &'static str) -> FileKitResult<T> {
        Err(ErrorKind::UnsupportedOperation {
            operation,
            target: self.target,
        }
        .into())
    }
}

fn current_target() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "wasm32"
    } else {
        std::env::consts::OS
    }
}

impl Pal for UnsupportedPal {
    fn working_directory(&self) -> FilePath {
        FilePath::from("/")
    }

    fn entry_kind(&self, _path: &FilePath) -> FileKitResult<Option<EntryKind>> {
        self.unsupported("entry_kind")
    }

    fn read_file(&self, _path: &FilePath) -> FileKitResult<Box<dyn ReadSeek + 'static>> {
        self.unsupported("read_file")
    }

    fn create_file(&self, _path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        self.unsupported("create_file")
    }

    fn append_file(&self, _path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        self.unsupported("append_file")
    }

    fn copy_file(&self, _from: &FilePath, _to: &FilePath) -> FileKitResult<()> {
        self.unsupported("copy_file")
    }

    fn rename_file(&self, _from: &FilePath, _to: &FilePath) -> FileKitResult<()> {
        self.unsupported("rename_file")
    }

    fn remove_file(&self, _path: &FilePath) -> FileKitResult<()> {
        self.unsupported("remove_file")
    }

    fn file_size(&self, _path: &FilePath) -> FileKitResult<u64> {
        self.unsupported("file_size")
    }

    fn modified(&self, _path: &FilePath) -> FileKitResult<SystemTime> {
        self.unsupported("modified")
    }

    fn set_modified(&self, _path: &FilePath, _time: SystemTime) -> FileKitResult<()> {
        self.unsupported("set_modified")
    }

    fn create_directory_all(&self, _path: &FilePath) -> FileKitResult<()> {
        self.unsupported("create_directory_all")
    }
}
