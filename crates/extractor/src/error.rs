use thiserror::Error;

/// Result type for extractor operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting event documentation
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to parse the source code
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An event source class without a usable name-declaring attribute
    #[error("Malformed event source attribute on class '{class_name}': {reason}")]
    MalformedMarkerAttribute { class_name: String, reason: String },
}

impl ExtractError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a malformed marker attribute error
    pub fn malformed_marker(class_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedMarkerAttribute {
            class_name: class_name.into(),
            reason: reason.into(),
        }
    }
}
