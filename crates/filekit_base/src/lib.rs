/* 📖 # Why have filekit_base as a core library?
filekit_base provides the error handling, tracing setup, path type and platform primitives
that the file operations layer is written against. Keeping them apart from FileHandle lets a
new deployment target be added by implementing one trait, without touching file-level rules.
*/

pub mod error;
mod error_tests;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, FileKitError, FileKitResult, ResultExt};
pub use pal::{
    EntryKind, FilePath, MockPal, Pal, PalHandle, ReadSeek, RealPal, Separator, UnsupportedPal,
    default_pal,
};
