use std::path::PathBuf;
use thiserror::Error;

/// Error types for the Tasklet store and its storage backends
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reading or writing a storage slot
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating the data directory
    #[error("Failed to create data directory at {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error with the data directory path (invalid or inaccessible)
    #[error("Invalid data path: {path} - {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    /// Error serializing the task collection
    #[error("Failed to encode task collection")]
    Encode(#[source] serde_json::Error),

    /// Error parsing a persisted task collection
    #[error("Failed to decode task collection")]
    Decode(#[source] serde_json::Error),

    /// The persisted value parsed but violates collection invariants
    #[error("Invalid task collection: {reason}")]
    InvalidCollection { reason: String },

    /// Error when a requested task was not found
    #[error("Task '{task_id}' not found")]
    NotFound { task_id: String },

    /// Error for invalid input or validation failure
    #[error("{message}")]
    ValidationError { message: String },

    /// A storage backend refused the write
    #[error("Storage rejected write to '{key}'")]
    WriteRejected { key: String },
}

impl StoreError {
    /// Get the full error message including the underlying cause.
    ///
    /// This is useful for displaying detailed error information to users.
    pub fn full_message(&self) -> String {
        match self {
            StoreError::Encode(err) => format!("Failed to encode task collection: {}", err),
            StoreError::Decode(err) => format!("Failed to decode task collection: {}", err),
            other => other.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_error_display() {
        let err = StoreError::InvalidPath {
            path: PathBuf::from("/invalid/path"),
            reason: "not a directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid data path: /invalid/path - not a directory"
        );
    }

    #[test]
    fn test_create_directory_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::CreateDirectory {
            path: PathBuf::from("/root/tasklet"),
            source: io_err,
        };
        assert_eq!(
            err.to_string(),
            "Failed to create data directory at /root/tasklet: access denied"
        );
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StoreError::Io {
            path: PathBuf::from("/data/todos.json"),
            source: io_err,
        };
        assert_eq!(err.to_string(), "I/O error at /data/todos.json: gone");
    }

    #[test]
    fn test_decode_full_message_includes_source() {
        let source = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let err = StoreError::Decode(source);
        assert_eq!(err.to_string(), "Failed to decode task collection");
        assert!(
            err.full_message()
                .starts_with("Failed to decode task collection: "),
            "full message should carry the parser error, got: {}",
            err.full_message()
        );
    }

    #[test]
    fn test_not_found_error_display() {
        let err = StoreError::NotFound {
            task_id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Task '42' not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = StoreError::ValidationError {
            message: "Task text cannot be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Task text cannot be empty");
        assert_eq!(err.full_message(), "Task text cannot be empty");
    }

    #[test]
    fn test_invalid_collection_error_debug() {
        let err = StoreError::InvalidCollection {
            reason: "duplicate task id 7".to_string(),
        };
        let debug_str = format!("{:?}", err);
        assert!(
            debug_str.contains("InvalidCollection") && debug_str.contains("duplicate task id 7"),
            "Debug output should contain InvalidCollection and its reason"
        );
    }

    #[test]
    fn test_write_rejected_display() {
        let err = StoreError::WriteRejected {
            key: "todos".to_string(),
        };
        assert_eq!(err.to_string(), "Storage rejected write to 'todos'");
    }
}
