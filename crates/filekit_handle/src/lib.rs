/* 📖 # What lives in filekit_handle?

The file operations layer: FileHandle validates a path, dispatches to the PAL and normalizes
what comes back. Everything target-specific stays behind the Pal trait in filekit_base.
*/

pub mod config;
mod file_handle;
pub mod file_system;
mod path_input;

pub use config::{Config, load_config, parse_config};
pub use file_handle::{DEFAULT_WRITE_OVERWRITE, FileHandle, TransferOptions};
pub use file_system::FileSystem;
pub use path_input::PathInput;
