//! Error types and context management for generation operations

use crate::algorithm::validation::ValidationFailure;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Failed to read or parse the collection configuration file
    ConfigLoad {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Configuration violates a static requirement
    ///
    /// Surfaced before any attempt starts and never retried.
    Configuration {
        /// Description of what's wrong with the configuration
        reason: String,
    },

    /// Allocation percentages cannot be split exactly across the supply
    ///
    /// Stems from static configuration, so retrying cannot help.
    Allocation {
        /// Attribute whose pool could not be built
        attribute: String,
        /// Members already allocated before the last variant
        allocated: usize,
        /// Requested collection size
        supply: usize,
    },

    /// No remaining pool entry could be placed for an attribute
    ///
    /// Recoverable: the attempt is discarded and restarted.
    SelectionExhausted {
        /// Position of the member being assembled within the attempt
        member_index: usize,
        /// Attribute that ran out of admissible variants
        attribute: String,
        /// Keys selected for the member before the failure
        chosen: Vec<String>,
    },

    /// Assembled member failed the post-hoc validation
    ///
    /// Recoverable: the attempt is discarded and restarted.
    ValidationFailed {
        /// Position of the member within the attempt
        member_index: usize,
        /// Which check failed
        failure: ValidationFailure,
        /// Keys of the rejected member
        layers: Vec<String>,
    },

    /// Configured attempt limit reached without a complete collection
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Failure of the final attempt
        last_error: Box<GenerationError>,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No layer image is loaded for a selected key
    MissingLayer {
        /// `attribute/variant` key without an image
        key: String,
    },

    /// Failed to load a layer image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Failed to serialize member metadata
    Serialization {
        /// Destination of the metadata document
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Failed to write the trait table
    Table {
        /// Destination of the table
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Log subscriber could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

impl GenerationError {
    /// Whether the failure only invalidates the current attempt
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SelectionExhausted { .. } | Self::ValidationFailed { .. }
        )
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigLoad { path, source } => {
                write!(f, "Failed to load config '{}': {source}", path.display())
            }
            Self::Configuration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::Allocation {
                attribute,
                allocated,
                supply,
            } => {
                write!(
                    f,
                    "Cannot allocate attribute '{attribute}': {allocated} of {supply} members \
                     taken before the last variant, adjust allocation"
                )
            }
            Self::SelectionExhausted {
                member_index,
                attribute,
                chosen,
            } => {
                write!(
                    f,
                    "Failed to select a layer for \"{attribute}\" (member {member_index}) with layers [{}]",
                    chosen.join(", ")
                )
            }
            Self::ValidationFailed {
                member_index,
                failure,
                layers,
            } => {
                write!(
                    f,
                    "Member {member_index} with layers [{}] failed validation: {failure}",
                    layers.join(", ")
                )
            }
            Self::AttemptsExhausted {
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "No complete collection after {attempts} attempts; last failure: {last_error}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingLayer { key } => {
                write!(f, "No layer image loaded for '{key}'")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to write metadata '{}': {source}",
                    path.display()
                )
            }
            Self::Table { path, source } => {
                write!(f, "Failed to write table '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Logging { reason } => {
                write!(f, "Failed to initialize logging: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ConfigLoad { source, .. } | Self::Serialization { source, .. } => Some(source),
            Self::Table { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::AttemptsExhausted { last_error, .. } => Some(last_error.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Member position within the current attempt
    pub member_index: Option<usize>,
    /// Path involved in a file system operation
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with generation state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the member position
    ///
    /// # Errors
    ///
    /// Propagates the original error with the member index applied
    fn with_member(self, member_index: usize) -> Result<T>;

    /// Add the path and operation of a file system call
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, operation: &'static str, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<GenerationError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                GenerationError::SelectionExhausted { member_index, .. }
                | GenerationError::ValidationFailed { member_index, .. } => {
                    if let Some(index) = context.member_index {
                        *member_index = index;
                    }
                }
                GenerationError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(p) = context.path {
                        *path = p;
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                GenerationError::ImageLoad { path, .. }
                | GenerationError::ImageExport { path, .. } => {
                    if let Some(p) = context.path {
                        *path = p;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_member(self, member_index: usize) -> Result<T> {
        self.with_context(ErrorContext {
            member_index: Some(member_index),
            ..Default::default()
        })
    }

    fn with_path(self, operation: &'static str, path: &Path) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration error
pub fn configuration_error(reason: impl Into<String>) -> GenerationError {
    GenerationError::Configuration {
        reason: reason.into(),
    }
}
