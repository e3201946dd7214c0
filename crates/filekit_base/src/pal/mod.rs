/* 📖 # What is the Platform Abstraction Layer?

The PAL provides a trait-based abstraction over filesystem primitives, one implementation
per deployment target:
- RealPal: native targets, backed by std::fs
- UnsupportedPal: targets without a filesystem, every primitive fails loudly
- MockPal: in-memory, for deterministic unit tests

The target implementation is picked once, at compile time, by `default_pal`.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;
pub mod unsupported;

use std::path::PathBuf;

pub use file_path::{FilePath, SEPARATORS, Separator};
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{EntryKind, Pal, PalHandle, ReadSeek};
pub use unsupported::UnsupportedPal;

/// The PAL for the target this crate was compiled for, rooted at `base_dir`.
#[cfg(any(unix, windows))]
pub fn default_pal(base_dir: PathBuf) -> PalHandle {
    PalHandle::new(RealPal::new(base_dir))
}

/// The PAL for the target this crate was compiled for, rooted at `base_dir`.
#[cfg(not(any(unix, windows)))]
pub fn default_pal(_base_dir: PathBuf) -> PalHandle {
    PalHandle::new(UnsupportedPal::for_current_target())
}

#[cfg(all(test, any(unix, windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_default_pal_reaches_real_filesystem() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("here.txt"), "x").unwrap();

        let pal = default_pal(temp_dir.path().to_path_buf());
        assert!(pal.is_file(&FilePath::from("here.txt")).unwrap());
    }
}
