use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Result type for dataset loading
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Which parsed field failed bounds validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Identity,
    Camera,
}

impl Field {
    pub fn as_str(&self) -> &str {
        match self {
            Field::Identity => "identity",
            Field::Camera => "camera",
        }
    }
}

/// Error types for loading a VeRi directory tree
#[derive(Debug)]
pub enum DatasetError {
    /// One of the dataset/train/query/gallery directories is missing
    DirectoryNotFound(PathBuf),
    ManifestNotFound(PathBuf),
    ManifestUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A manifest entry carries no `<identity>_c<camera>` metadata
    PatternMismatch {
        path: PathBuf,
        reason: String,
    },
    ValidationFailed {
        path: PathBuf,
        field: Field,
        value: i64,
        expected_range: RangeInclusive<i64>,
    },
    Config(String),
    Export(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::DirectoryNotFound(path) => write!(f, "{:?} is not available", path),
            DatasetError::ManifestNotFound(path) => write!(f, "manifest {:?} not found", path),
            DatasetError::ManifestUnreadable { path, source } => {
                write!(f, "failed to read manifest {:?}: {}", path, source)
            }
            DatasetError::PatternMismatch { path, reason } => {
                write!(f, "no identity/camera metadata in {:?}: {}", path, reason)
            }
            DatasetError::ValidationFailed {
                path,
                field,
                value,
                expected_range,
            } => write!(
                f,
                "{} {} out of range {}..={} in {:?}",
                field.as_str(),
                value,
                expected_range.start(),
                expected_range.end(),
                path
            ),
            DatasetError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            DatasetError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::ManifestUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(error: serde_json::Error) -> Self {
        DatasetError::Export(error.to_string())
    }
}
