use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use relative_path::{Component, RelativePath, RelativePathBuf};

/* 📖 # Why does FilePath keep its own root next to a RelativePathBuf?

RelativePathBuf gives us segment handling that behaves the same on every host: joining,
parents, file names and `.`/`..` normalization. It cannot express a root, and it only
splits on `/`. FilePath therefore splits input on both `/` and `\` itself, stores an
optional root (`/`, `\` or a drive letter) beside the relative part, and remembers which
separator style to render with.
*/

/// Directory separator convention used when rendering a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `/`
    Unix,
    /// `\`
    Windows,
}

impl Separator {
    /// The separator convention of the host the crate was compiled for.
    pub fn native() -> Self {
        if cfg!(windows) {
            Separator::Windows
        } else {
            Separator::Unix
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Separator::Unix => '/',
            Separator::Windows => '\\',
        }
    }
}

/// Characters recognized as directory separators, whatever the host.
pub const SEPARATORS: [char; 2] = ['/', '\\'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Root {
    /// A leading separator
    Separator,
    /// A drive letter such as `C:`
    Drive(char),
}

/// Immutable, separator-aware location made of an optional root, directory segments and a
/// filename.
///
/// Equality and hashing ignore the rendering style, so `a/b.txt` and `a\b.txt` are the
/// same location.
///
/// # Examples
///
/// ```
/// use filekit_base::FilePath;
///
/// let path = FilePath::parse(" docs / readme.md ", true);
/// assert_eq!(path.filename(), "readme.md");
/// assert_eq!(path.parent().unwrap().filename(), "docs");
/// assert_eq!(path, FilePath::from("docs\\readme.md"));
/// ```
#[derive(Debug, Clone)]
pub struct FilePath {
    root: Option<Root>,
    relative: RelativePathBuf,
    separator: Separator,
}

impl FilePath {
    /// The empty sentinel: no root, no segments, empty filename.
    pub fn empty() -> Self {
        Self {
            root: None,
            relative: RelativePathBuf::new(),
            separator: Separator::native(),
        }
    }

    /// Parses a path accepting both `/` and `\` as separators.
    ///
    /// With `trim` set, whitespace around every segment is removed. Segments that end up
    /// empty are dropped.
    pub fn parse(text: &str, trim: bool) -> Self {
        let text = if trim { text.trim() } else { text };
        if text.is_empty() {
            return Self::empty();
        }

        let (root, rest) = split_root(text);
        let separator = if matches!(root, Some(Root::Drive(_)))
            || (text.contains('\\') && !text.contains('/'))
        {
            Separator::Windows
        } else {
            Separator::Unix
        };

        Self {
            root,
            relative: segments_to_relative(rest, trim),
            separator,
        }
    }

    /// True when the filename is empty, which is how unset paths are recognized.
    pub fn is_empty(&self) -> bool {
        self.filename().is_empty()
    }

    /// The last segment, or `""` when there is none.
    pub fn filename(&self) -> &str {
        match self.relative.components().next_back() {
            Some(Component::Normal(name)) => name,
            _ => "",
        }
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn is_absolute(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the underlying relative part (everything after the root).
    pub fn as_relative(&self) -> &RelativePath {
        &self.relative
    }

    /// The containing directory, or `None` for a bare filename or a root.
    pub fn parent(&self) -> Option<FilePath> {
        let parent = self.relative.parent()?;
        if parent.as_str().is_empty() && self.root.is_none() {
            return None;
        }
        Some(Self {
            root: self.root,
            relative: parent.to_relative_path_buf(),
            separator: self.separator,
        })
    }

    /// Appends one or more segments (separated by `/` or `\`) to this path.
    pub fn join(&self, segment: &str) -> FilePath {
        let mut relative = self.relative.clone();
        for part in segment.split(SEPARATORS).filter(|part| !part.is_empty()) {
            relative.push(part);
        }
        Self {
            root: self.root,
            relative,
            separator: self.separator,
        }
    }

    /// Resolves this path against `working_directory` and removes `.` and `..`.
    ///
    /// The result is the canonical form used to decide whether two paths denote the same
    /// location.
    pub fn to_absolute(&self, working_directory: &FilePath) -> FilePath {
        let (root, relative, separator) = if self.is_absolute() {
            (self.root, self.relative.clone(), self.separator)
        } else {
            (
                working_directory.root,
                working_directory.relative.join(&self.relative),
                working_directory.separator,
            )
        };
        let normalized = relative.normalize();
        let relative = if root.is_some() {
            // nothing lives above a root
            let mut rooted = RelativePathBuf::new();
            for component in normalized.components() {
                if let Component::Normal(name) = component {
                    rooted.push(name);
                }
            }
            rooted
        } else {
            normalized
        };
        Self {
            root,
            relative,
            separator,
        }
    }

    /// Host-native form for handing to `std::fs`.
    pub fn to_std_path(&self) -> PathBuf {
        let mut path = match self.root {
            None => PathBuf::new(),
            Some(Root::Separator) => PathBuf::from(std::path::MAIN_SEPARATOR_STR),
            Some(Root::Drive(letter)) => {
                PathBuf::from(format!("{}:{}", letter, std::path::MAIN_SEPARATOR))
            }
        };
        for component in self.relative.components() {
            path.push(component.as_str());
        }
        path
    }

    /// Whether `text` contains a directory separator of any recognized style.
    pub fn contains_separator(text: &str) -> bool {
        text.contains(SEPARATORS)
    }
}

fn split_root(text: &str) -> (Option<Root>, &str) {
    if let Some(rest) = text.strip_prefix(SEPARATORS) {
        return (Some(Root::Separator), rest);
    }
    let mut chars = text.chars();
    if let (Some(letter), Some(':')) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            return (Some(Root::Drive(letter.to_ascii_uppercase())), &text[2..]);
        }
    }
    (None, text)
}

fn segments_to_relative(text: &str, trim: bool) -> RelativePathBuf {
    let mut relative = RelativePathBuf::new();
    for segment in text.split(SEPARATORS) {
        let segment = if trim { segment.trim() } else { segment };
        if !segment.is_empty() {
            relative.push(segment);
        }
    }
    relative
}

impl Default for FilePath {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for FilePath {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.relative == other.relative
    }
}

impl Eq for FilePath {}

impl Hash for FilePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.relative.hash(state);
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self::parse(s, false)
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self::parse(&s, false)
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        Self::parse(&p.to_string_lossy(), false)
    }
}

impl From<PathBuf> for FilePath {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = self.separator.as_char();
        match self.root {
            None => {}
            Some(Root::Separator) => write!(f, "{}", separator)?,
            Some(Root::Drive(letter)) => write!(f, "{}:{}", letter, separator)?,
        }
        for (i, component) in self.relative.components().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            write!(f, "{}", component.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unix_path() {
        let path = FilePath::from("src/main.rs");
        assert_eq!(path.filename(), "main.rs");
        assert_eq!(path.separator(), Separator::Unix);
        assert!(!path.is_absolute());
        assert_eq!(path.to_string(), "src/main.rs");
    }

    #[test]
    fn test_parse_windows_path() {
        let path = FilePath::from("C:\\Users\\me\\notes.txt");
        assert_eq!(path.filename(), "notes.txt");
        assert_eq!(path.separator(), Separator::Windows);
        assert!(path.is_absolute());
        assert_eq!(path.to_string(), "C:\\Users\\me\\notes.txt");
    }

    #[test]
    fn test_parse_mixed_separators() {
        let path = FilePath::from("a\\b/c.txt");
        assert_eq!(path.as_relative().as_str(), "a/b/c.txt");
        assert_eq!(path.separator(), Separator::Unix);
    }

    #[test]
    fn test_parse_trims_segments() {
        let path = FilePath::parse("  dir / sub  /file.txt  ", true);
        assert_eq!(path.to_string(), "dir/sub/file.txt");

        let untrimmed = FilePath::parse("dir / file.txt", false);
        assert_eq!(untrimmed.filename(), " file.txt");
    }

    #[test]
    fn test_empty_sentinel() {
        assert!(FilePath::empty().is_empty());
        assert!(FilePath::from("").is_empty());
        assert!(FilePath::parse("   ", true).is_empty());
        assert!(FilePath::from("/").is_empty());
        assert_eq!(FilePath::default(), FilePath::empty());
        assert_eq!(FilePath::empty().to_string(), "");
    }

    #[test]
    fn test_parent() {
        let path = FilePath::from("a/b/c.txt");
        assert_eq!(path.parent(), Some(FilePath::from("a/b")));
        assert_eq!(FilePath::from("c.txt").parent(), None);
        assert_eq!(FilePath::from("/c.txt").parent(), Some(FilePath::from("/")));
        assert_eq!(FilePath::from("/").parent(), None);
    }

    #[test]
    fn test_join() {
        let dir = FilePath::from("/data");
        assert_eq!(dir.join("x.bin").to_string(), "/data/x.bin");
        assert_eq!(dir.join("sub\\x.bin"), FilePath::from("/data/sub/x.bin"));
    }

    #[test]
    fn test_to_absolute() {
        let cwd = FilePath::from("/home/user");
        assert_eq!(
            FilePath::from("docs/../a.txt").to_absolute(&cwd),
            FilePath::from("/home/user/a.txt")
        );
        assert_eq!(
            FilePath::from("./a.txt").to_absolute(&cwd),
            FilePath::from("a.txt").to_absolute(&cwd)
        );
        assert_eq!(
            FilePath::from("/etc/../../x").to_absolute(&cwd),
            FilePath::from("/x")
        );
    }

    #[test]
    fn test_equality_ignores_separator_style() {
        assert_eq!(FilePath::from("a/b.txt"), FilePath::from("a\\b.txt"));
        assert_ne!(FilePath::from("a/b.txt"), FilePath::from("a/c.txt"));
    }

    #[test]
    fn test_to_std_path() {
        let path = FilePath::from("docs\\readme.md");
        assert_eq!(path.to_std_path(), Path::new("docs").join("readme.md"));
    }

    #[test]
    fn test_contains_separator() {
        assert!(FilePath::contains_separator("a/b"));
        assert!(FilePath::contains_separator("a\\b"));
        assert!(!FilePath::contains_separator("a.b"));
    }

    #[test]
    fn test_file_path_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(FilePath::from("dir/test1.txt"));
        set.insert(FilePath::from("dir\\test1.txt"));
        set.insert(FilePath::from("test2.txt"));
        assert_eq!(set.len(), 2);
    }
}
