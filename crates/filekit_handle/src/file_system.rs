use filekit_base::{ErrorKind, FileKitResult, PalHandle, default_pal};

use crate::config::Config;
use crate::{FileHandle, PathInput};

/// Hands out FileHandles bound to one PAL and one trimming policy.
///
/// # Examples
///
/// ```
/// use filekit_base::{MockPal, PalHandle};
/// use filekit_handle::FileSystem;
///
/// let files = FileSystem::new(PalHandle::new(MockPal::new()));
/// files.file("notes.txt").touch().unwrap();
/// assert_eq!(files.file(" notes.txt ").size().unwrap(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct FileSystem {
    pal: PalHandle,
    trim_whitespace: bool,
}

impl FileSystem {
    /// Uses `pal` and trims whitespace around path segments.
    pub fn new(pal: PalHandle) -> Self {
        Self {
            pal,
            trim_whitespace: true,
        }
    }

    /// Builds the PAL of the current target, rooted at the configured base directory
    /// (or the process working directory).
    pub fn from_config(config: &Config) -> FileKitResult<Self> {
        let base_dir = match &config.base_dir {
            Some(base_dir) => base_dir.clone(),
            None => std::env::current_dir().map_err(|e| ErrorKind::Io {
                path: ".".into(),
                source: e,
            })?,
        };
        Ok(Self {
            pal: default_pal(base_dir),
            trim_whitespace: config.trim_whitespace,
        })
    }

    pub fn pal(&self) -> &PalHandle {
        &self.pal
    }

    /// A handle on `path`.
    pub fn file(&self, path: impl Into<PathInput>) -> FileHandle {
        FileHandle::of_with_trim(&self.pal, path, self.trim_whitespace)
    }
}
