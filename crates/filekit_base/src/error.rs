use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

use crate::pal::FilePath;

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Every failure of a file operation maps onto a small, closed taxonomy that callers match on
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in filekit operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// The path (or a destination path) has an empty filename
    InvalidPath { path: FilePath, reason: String },

    /// A bare file name given to a rename is unusable
    InvalidName { name: String, reason: String },

    /// The path exists but is not a regular file
    NotAFile { path: FilePath },

    /// The destination of a move is a directory
    IsADirectory { path: FilePath },

    /// The path was required to exist but does not
    PathNotFound { path: FilePath },

    /// The destination exists and overwriting was not permitted
    AlreadyExists { path: FilePath },

    /// An underlying platform call failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The deployment target provides no implementation of a primitive
    UnsupportedOperation {
        operation: &'static str,
        target: &'static str,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidPath { path, reason } => {
                write!(f, "Invalid path '{}': {}", path, reason)
            }
            ErrorKind::InvalidName { name, reason } => {
                write!(f, "Invalid file name '{}': {}", name, reason)
            }
            ErrorKind::NotAFile { path } => {
                write!(f, "Path '{}' exists but is not a regular file", path)
            }
            ErrorKind::IsADirectory { path } => {
                write!(f, "Path '{}' is a directory", path)
            }
            ErrorKind::PathNotFound { path } => {
                write!(f, "Path '{}' does not exist", path)
            }
            ErrorKind::AlreadyExists { path } => {
                write!(
                    f,
                    "Path '{}' already exists and overwrite is not permitted",
                    path
                )
            }
            ErrorKind::Io { path, source } => {
                write!(f, "I/O error at {}: {}", path.display(), source)
            }
            ErrorKind::UnsupportedOperation { operation, target } => {
                write!(
                    f,
                    "Operation '{}' is not supported on target '{}'",
                    operation, target
                )
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/* 📖 # Why separate ErrorKind and FileKitError?
ErrorKind carries the structural variant callers match on (which rule was violated, on which path).
FileKitError wraps it with runtime context strings, an optional cause and the span trace
captured when the error was created.
*/

/// Error type wrapping ErrorKind with context, cause and the active span trace.
pub struct FileKitError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<FileKitError>>,
    span_trace: SpanTrace,
}

impl FileKitError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a `Message` error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that led to this one.
    pub fn caused_by(mut self, cause: impl Into<Box<FileKitError>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context strings in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the span trace captured at creation.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == entries { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, branch, ctx)?;
        }
        if let Some(cause) = &self.cause {
            writeln!(f, "{}└─ cause: {}", indent, cause.kind)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for FileKitError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ErrorKind> for Box<FileKitError> {
    fn from(kind: ErrorKind) -> Self {
        Box::new(FileKitError::new(kind))
    }
}

impl StdError for FileKitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::Io { source, .. } => Some(source),
            _ => self
                .cause
                .as_deref()
                .map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl fmt::Display for FileKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Debug for FileKitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<FileKitError> in the result type?

The error carries a span trace and a context vector; boxing keeps the Ok path of every
file operation small.
*/

/// Standard result type for filekit operations.
pub type FileKitResult<T> = std::result::Result<T, Box<FileKitError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error. Eager evaluation.
    fn context(self, context: impl Into<String>) -> FileKitResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> FileKitResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for FileKitResult<T> {
    fn context(self, context: impl Into<String>) -> FileKitResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> FileKitResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed `Message` error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        ::std::boxed::Box::new($crate::FileKitError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed `Message` error built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
