//! Error types for the scholar analytics engine and its tool layer.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors raised by the analytics engine.
///
/// Every failure is a deterministic function of the input; nothing here is retryable.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// A paper record does not match the expected shape. Aborts the analysis pass.
    #[error("Malformed record at index {index}: field '{field}' {message}")]
    MalformedRecord {
        /// Position of the record in the input array.
        index: usize,
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A quantity is undefined because the record set is empty.
    #[error("Empty dataset: {quantity} is undefined for zero papers")]
    EmptyDataset {
        /// The quantity that was requested.
        quantity: String,
    },

    /// Filter criteria are inconsistent.
    #[error("Invalid filter: {message}")]
    Filter {
        /// Description of the problem.
        message: String,
    },

    /// JSON parsing error.
    #[error("Failed to parse input: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRecord { index, field: field.into(), message: message.into() }
    }

    /// Create an empty dataset error.
    #[must_use]
    pub fn empty_dataset(quantity: impl Into<String>) -> Self {
        Self::EmptyDataset { quantity: quantity.into() }
    }

    /// Create a filter error.
    #[must_use]
    pub fn filter(message: impl Into<String>) -> Self {
        Self::Filter { message: message.into() }
    }

    /// Returns true if the caller can recover by changing the request.
    ///
    /// Malformed input aborts the pass; empty datasets and bad criteria do not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyDataset { .. } | Self::Filter { .. })
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the analytics engine
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rendering our own output failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the error was caused by the request rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Analysis(_) | Self::Validation { .. } | Self::Serialization(_)
        )
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Analysis(AnalysisError::MalformedRecord { index, field, message }) => {
                format!("Paper #{index} is malformed: '{field}' {message}.")
            }
            Self::Analysis(AnalysisError::EmptyDataset { quantity }) => {
                format!("No papers to analyze: {quantity} is undefined. Load papers or relax the filter.")
            }
            Self::Analysis(AnalysisError::Filter { message }) => {
                format!("Invalid filter: {message}")
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Analysis(AnalysisError::Parse(_)) | Self::Serialization(_) | Self::Internal(_) => {
                self.to_string()
            }
        }
    }
}

/// Result type alias for engine operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_recoverable() {
        assert!(AnalysisError::empty_dataset("year range").is_recoverable());
        assert!(AnalysisError::filter("yearMin > yearMax").is_recoverable());
        assert!(!AnalysisError::malformed(0, "title", "is missing").is_recoverable());
    }

    #[test]
    fn test_malformed_record_names_field() {
        let err = AnalysisError::malformed(3, "citations", "must be a non-negative integer");
        let msg = err.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("citations"));
    }

    #[test]
    fn test_tool_error_user_message() {
        let err = ToolError::validation("format", "unknown export format");
        assert!(err.to_user_message().contains("format"));
        assert!(err.to_user_message().contains("unknown export format"));

        let err = ToolError::from(AnalysisError::empty_dataset("year range"));
        assert!(err.to_user_message().contains("year range"));
        assert!(err.is_client_error());
        assert!(!ToolError::internal("boom").is_client_error());
    }

    #[test]
    fn test_internal_error_is_server_side() {
        let err = ToolError::internal("Failed to render export: bad float");
        assert!(!err.is_client_error());
        assert_eq!(err.to_user_message(), "Internal error: Failed to render export: bad float");
    }
}
