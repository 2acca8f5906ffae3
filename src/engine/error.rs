//! Error types for feature extraction
//!
//! Malformed sub-records never surface here: the tree builder drops them
//! silently. Only conditions the caller has to act on are represented.

use std::fmt;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error type for extraction operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The root of the parser output is not a mapping
    InvalidRoot {
        /// Kind of JSON value found instead
        found: String,
    },

    /// Nesting depth limit exceeded while building the tree
    RecursionLimitExceeded {
        /// Depth at which building stopped
        depth: usize,
        /// Maximum allowed depth
        max_depth: usize,
    },

    /// The external parser could not be run or rejected the input
    Parser {
        /// Description of the failure
        message: String,
    },

    /// JSON could not be read or written
    Json {
        /// Message from serde_json
        message: String,
    },

    /// I/O failure while exporting
    Io {
        /// Message from the underlying error
        message: String,
    },

    /// A feature column name without the `category;key` separator
    MalformedFeatureName {
        /// The offending column name
        name: String,
    },

    /// A feature column whose category is not part of the feature document
    UnknownFeatureCategory {
        /// The unknown category
        category: String,
    },
}

impl ExtractError {
    /// Create a parser error
    pub fn parser(message: impl Into<String>) -> Self {
        ExtractError::Parser {
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::InvalidRoot { found } => {
                write!(f, "Invalid root record: expected an object, got {}", found)
            }
            ExtractError::RecursionLimitExceeded { depth, max_depth } => write!(
                f,
                "Recursion limit exceeded: depth {} (max: {})",
                depth, max_depth
            ),
            ExtractError::Parser { message } => write!(f, "Parser failed: {}", message),
            ExtractError::Json { message } => write!(f, "JSON error: {}", message),
            ExtractError::Io { message } => write!(f, "I/O error: {}", message),
            ExtractError::MalformedFeatureName { name } => {
                write!(f, "Malformed feature name: {:?}", name)
            }
            ExtractError::UnknownFeatureCategory { category } => {
                write!(f, "Unknown feature category: {:?}", category)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::Json {
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io {
            message: e.to_string(),
        }
    }
}
