use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use crate::FileKitResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::{EntryKind, Pal, ReadSeek};

/* 📖 # Why use HashMap for MockPal storage?

MockPal uses in-memory storage with Arc<Mutex<T>> for several reasons:
1. **Speed**: No filesystem I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem
3. **Control**: Easy to set up directories, files and timestamps for specific scenarios
4. **Thread-safe**: Mutex allows concurrent test execution

All keys are absolute paths, resolved against the mock working directory, so `a.txt`
and `/a.txt` name the same entry when the working directory is `/`.
*/

#[derive(Debug, Clone)]
struct MockFile {
    content: Vec<u8>,
    modified: SystemTime,
}

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<FilePath, MockFile>,
    directories: HashSet<FilePath>,
}

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use filekit_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("test.txt"), b"content".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("test.txt")).unwrap();
/// assert_eq!(content, "content");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    state: Arc<Mutex<MockState>>,
    working_directory: FilePath,
}

impl MockPal {
    /// Create a new empty MockPal whose working directory is `/`.
    pub fn new() -> Self {
        Self::with_working_directory(FilePath::from("/"))
    }

    /// Create a new empty MockPal resolving relative paths against `working_directory`.
    pub fn with_working_directory(working_directory: FilePath) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            working_directory,
        }
    }

    /// Add a file to the mock storage, along with its parent directories.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        let key = self.key(&path);
        let mut state = self.lock();
        add_parents(&mut state, &key);
        state.files.insert(
            key,
            MockFile {
                content,
                modified: SystemTime::now(),
            },
        );
    }

    /// Add a directory to the mock storage, along with its parents.
    pub fn add_directory(&self, path: FilePath) {
        let key = self.key(&path);
        let mut state = self.lock();
        add_parents(&mut state, &key);
        state.directories.insert(key);
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.lock().files.len()
    }

    fn key(&self, path: &FilePath) -> FilePath {
        path.to_absolute(&self.working_directory)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn file(&self, path: &FilePath) -> FileKitResult<MockFile> {
        self.lock()
            .files
            .get(&self.key(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn check_parent(&self, state: &MockState, path: &FilePath) -> FileKitResult<()> {
        match self.key(path).parent() {
            Some(parent) if parent.is_empty() || state.directories.contains(&parent) => Ok(()),
            None => Ok(()),
            Some(parent) => Err(not_found(&parent)),
        }
    }

    fn check_not_directory(&self, state: &MockState, path: &FilePath) -> FileKitResult<()> {
        if state.directories.contains(&self.key(path)) {
            return Err(io_error(
                path,
                std::io::ErrorKind::IsADirectory,
                "Is a directory",
            ));
        }
        Ok(())
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

fn add_parents(state: &mut MockState, key: &FilePath) {
    let mut current = key.parent();
    while let Some(parent) = current {
        if parent.is_empty() {
            break;
        }
        current = parent.parent();
        state.directories.insert(parent);
    }
}

fn io_error(path: &FilePath, kind: std::io::ErrorKind, message: &str) -> Box<crate::FileKitError> {
    ErrorKind::Io {
        path: path.to_std_path(),
        source: std::io::Error::new(kind, format!("{}: {}", message, path)),
    }
    .into()
}

fn not_found(path: &FilePath) -> Box<crate::FileKitError> {
    io_error(path, std::io::ErrorKind::NotFound, "No such file or directory")
}

impl Pal for MockPal {
    fn working_directory(&self) -> FilePath {
        self.working_directory.clone()
    }

    fn entry_kind(&self, path: &FilePath) -> FileKitResult<Option<EntryKind>> {
        let key = self.key(path);
        let state = self.lock();
        if state.files.contains_key(&key) {
            Ok(Some(EntryKind::File))
        } else if key.is_empty() || state.directories.contains(&key) {
            // an empty key is the root itself
            Ok(Some(EntryKind::Directory))
        } else {
            Ok(None)
        }
    }

    fn read_file(&self, path: &FilePath) -> FileKitResult<Box<dyn ReadSeek + 'static>> {
        self.check_not_directory(&self.lock(), path)?;
        let file = self.file(path)?;
        Ok(Box::new(Cursor::new(file.content)))
    }

    fn create_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        {
            let state = self.lock();
            self.check_not_directory(&state, path)?;
            self.check_parent(&state, path)?;
        }
        // Return a writer that will store in the mock storage when dropped
        Ok(Box::new(MockFileWriter {
            key: self.key(path),
            state: Arc::clone(&self.state),
            buffer: Vec::new(),
        }))
    }

    fn append_file(&self, path: &FilePath) -> FileKitResult<Box<dyn Write>> {
        let buffer = {
            let state = self.lock();
            self.check_not_directory(&state, path)?;
            self.check_parent(&state, path)?;
            state
                .files
                .get(&self.key(path))
                .map(|file| file.content.clone())
                .unwrap_or_default()
        };
        Ok(Box::new(MockFileWriter {
            key: self.key(path),
            state: Arc::clone(&self.state),
            buffer,
        }))
    }

    fn copy_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()> {
        let source = self.file(from)?;
        let mut state = self.lock();
        self.check_not_directory(&state, to)?;
        self.check_parent(&state, to)?;
        state.files.insert(
            self.key(to),
            MockFile {
                content: source.content,
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn rename_file(&self, from: &FilePath, to: &FilePath) -> FileKitResult<()> {
        let mut state = self.lock();
        self.check_not_directory(&state, to)?;
        self.check_parent(&state, to)?;
        let file = state
            .files
            .remove(&self.key(from))
            .ok_or_else(|| not_found(from))?;
        state.files.insert(self.key(to), file);
        Ok(())
    }

    fn remove_file(&self, path: &FilePath) -> FileKitResult<()> {
        let mut state = self.lock();
        self.check_not_directory(&state, path)?;
        state
            .files
            .remove(&self.key(path))
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn file_size(&self, path: &FilePath) -> FileKitResult<u64> {
        Ok(self.file(path)?.content.len() as u64)
    }

    fn modified(&self, path: &FilePath) -> FileKitResult<SystemTime> {
        Ok(self.file(path)?.modified)
    }

    fn set_modified(&self, path: &FilePath, time: SystemTime) -> FileKitResult<()> {
        let mut state = self.lock();
        let file = state
            .files
            .get_mut(&self.key(path))
            .ok_or_else(|| not_found(path))?;
        file.modified = time;
        Ok(())
    }

    fn create_directory_all(&self, path: &FilePath) -> FileKitResult<()> {
        let key = self.key(path);
        let mut state = self.lock();
        if state.files.contains_key(&key) {
            return Err(io_error(
                path,
                std::io::ErrorKind::AlreadyExists,
                "File exists",
            ));
        }
        add_parents(&mut state, &key);
        state.directories.insert(key);
        Ok(())
    }
}

/// Helper struct for writing files to MockPal.
struct MockFileWriter {
    key: FilePath,
    state: Arc<Mutex<MockState>>,
    buffer: Vec<u8>,
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.files.insert(
            self.key.clone(),
            MockFile {
                content: std::mem::take(&mut self.buffer),
                modified: SystemTime::now(),
            },
        );
    }
}
