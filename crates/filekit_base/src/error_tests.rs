/* 📖 # Why use a separate file for these error tests?

The Debug output of an error embeds a span trace whose entries carry source line numbers.
Keeping these tests out of error.rs means edits there do not shift what the tests observe.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::pal::FilePath;
    use crate::{FileKitError, FileKitResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tracing::span;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    /// Set up tracing with ErrorLayer for tests.
    /// Uses `try_init()` to handle multiple tests running concurrently.
    fn setup_tracing_subscriber() {
        let _ = tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .try_init();
    }

    fn io_error(path: &str, kind: io::ErrorKind, message: &str) -> FileKitError {
        FileKitError::new(ErrorKind::Io {
            path: PathBuf::from(path),
            source: io::Error::new(kind, message.to_string()),
        })
    }

    #[test]
    fn test_error_from_io_error() {
        let error = io_error("test.txt", io::ErrorKind::NotFound, "file not found");

        match error.kind() {
            ErrorKind::Io { path, .. } => {
                assert_eq!(path, &PathBuf::from("test.txt"));
            }
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_context_attachment() {
        let error = FileKitError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context().len(), 2);
        assert_eq!(error.get_context()[0], "first context");
        assert_eq!(error.get_context()[1], "second context");
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = FileKitError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_display_of_every_kind() {
        let kinds = vec![
            ErrorKind::InvalidPath {
                path: FilePath::empty(),
                reason: "filename is empty".to_string(),
            },
            ErrorKind::InvalidName {
                name: "a/b".to_string(),
                reason: "must not contain a directory separator".to_string(),
            },
            ErrorKind::NotAFile {
                path: FilePath::from("dir"),
            },
            ErrorKind::IsADirectory {
                path: FilePath::from("dir"),
            },
            ErrorKind::PathNotFound {
                path: FilePath::from("missing.txt"),
            },
            ErrorKind::AlreadyExists {
                path: FilePath::from("b.txt"),
            },
            ErrorKind::UnsupportedOperation {
                operation: "copy_file",
                target: "wasm32",
            },
            ErrorKind::Message {
                message: "plain".to_string(),
            },
        ];
        let rendered = kinds
            .into_iter()
            .map(|kind| FileKitError::new(kind).to_string())
            .collect::<Vec<_>>()
            .join("\n");

        expect![[r#"
            Invalid path '': filename is empty
            Invalid file name 'a/b': must not contain a directory separator
            Path 'dir' exists but is not a regular file
            Path 'dir' is a directory
            Path 'missing.txt' does not exist
            Path 'b.txt' already exists and overwrite is not permitted
            Operation 'copy_file' is not supported on target 'wasm32'
            plain"#]]
        .assert_eq(&rendered);
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = FileKitError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
    }

    #[test]
    fn test_error_display_io_error() {
        let error = io_error("/tmp/test.txt", io::ErrorKind::NotFound, "not found");
        let display = error.to_string();
        assert!(display.contains("/tmp/test.txt"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn test_error_source_io_error() {
        let error = io_error("test.txt", io::ErrorKind::PermissionDenied, "access denied");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_source_message() {
        let error = FileKitError::message("test");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_source_is_cause() {
        let error = FileKitError::message("outer").caused_by(FileKitError::message("inner"));
        assert_eq!(error.source().unwrap().to_string(), "inner");
    }

    #[test]
    fn test_error_root_cause_io_error() {
        let error = FileKitError::message("copy failed").caused_by(io_error(
            "test.txt",
            io::ErrorKind::NotFound,
            "not found",
        ));
        assert_eq!(error.root_cause().to_string(), "not found");
    }

    #[test]
    fn test_error_root_cause_message() {
        let error = FileKitError::message("test");
        assert_eq!(error.root_cause().to_string(), "test");
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: FileKitResult<i32> = Ok(42);
        assert_eq!(result.context("operation failed").unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: FileKitResult<i32> = Err(Box::new(FileKitError::message("root")));
        let err = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }

    #[test]
    fn test_debug_tree_without_span() {
        let inner = FileKitError::new(ErrorKind::PathNotFound {
            path: FilePath::from("a.txt"),
        })
        .context("validating source");
        let outer = FileKitError::message("copy failed")
            .context("copying a.txt to b.txt")
            .caused_by(inner);

        expect![[r#"
            copy failed
            ├─ copying a.txt to b.txt
            └─ cause: Path 'a.txt' does not exist
               └─ validating source
        "#]]
        .assert_eq(&format!("{:?}", outer));
    }

    #[test]
    fn test_debug_includes_span_trace() {
        setup_tracing_subscriber();

        let operation_span = span!(tracing::Level::INFO, "copy_operation", attempt = 3);
        let _guard = operation_span.enter();

        let error = FileKitError::message("copy failed");
        let debug = format!("{:?}", error);

        assert!(debug.starts_with("copy failed\n"));
        assert!(debug.contains("Trace:"));
        assert!(debug.contains("copy_operation"));
        assert!(debug.contains("attempt=3"));
    }
}
