use std::path::{Path, PathBuf};

use filekit_base::FilePath;

/// Anything a FileHandle can be built from, including "nothing".
///
/// `None` converts to `PathInput::Empty`, which every operation treats as the empty
/// sentinel path rather than as a missing value.
#[derive(Debug, Clone, Default)]
pub enum PathInput {
    #[default]
    Empty,
    Text(String),
    Path(FilePath),
}

impl PathInput {
    /// Turns the input into a path. Trimming only applies to text input; a pre-built
    /// FilePath is taken as-is.
    pub fn into_file_path(self, trim_whitespace: bool) -> FilePath {
        match self {
            PathInput::Empty => FilePath::empty(),
            PathInput::Text(text) => FilePath::parse(&text, trim_whitespace),
            PathInput::Path(path) => path,
        }
    }
}

impl From<&str> for PathInput {
    fn from(s: &str) -> Self {
        PathInput::Text(s.to_string())
    }
}

impl From<String> for PathInput {
    fn from(s: String) -> Self {
        PathInput::Text(s)
    }
}

impl From<&String> for PathInput {
    fn from(s: &String) -> Self {
        PathInput::Text(s.clone())
    }
}

impl From<FilePath> for PathInput {
    fn from(p: FilePath) -> Self {
        PathInput::Path(p)
    }
}

impl From<&FilePath> for PathInput {
    fn from(p: &FilePath) -> Self {
        PathInput::Path(p.clone())
    }
}

impl From<&Path> for PathInput {
    fn from(p: &Path) -> Self {
        PathInput::Text(p.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for PathInput {
    fn from(p: PathBuf) -> Self {
        PathInput::from(p.as_path())
    }
}

impl<T: Into<PathInput>> From<Option<T>> for PathInput {
    fn from(input: Option<T>) -> Self {
        input.map(Into::into).unwrap_or_default()
    }
}
