use std::path::PathBuf;

use filekit_base::{ErrorKind, FileKitResult, FilePath, PalHandle, err};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::FileHandle;

/// Settings for a `FileSystem`, usually read from a `filekit.toml`.
///
/// ```toml
/// base_dir = "data"
/// trim_whitespace = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory relative paths are resolved against. Defaults to the process working
    /// directory.
    pub base_dir: Option<PathBuf>,
    /// Trim whitespace around path segments when building handles from text.
    pub trim_whitespace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            trim_whitespace: true,
        }
    }
}

/// Parses TOML configuration text. `origin` only names the source in error messages.
pub fn parse_config(text: &str, origin: &FilePath) -> FileKitResult<Config> {
    toml::from_str(text).map_err(|e| err!("Failed to parse config file '{}': {}", origin, e))
}

/// Reads and parses a configuration file through the PAL.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_config(pal: &PalHandle, path: &FilePath) -> FileKitResult<Config> {
    let text = FileHandle::of(pal, path)
        .read_as_string()?
        .ok_or_else(|| ErrorKind::PathNotFound { path: path.clone() })?;
    let config = parse_config(&text, path)?;
    debug!(?config, "loaded config");
    Ok(config)
}
