use crate::domain::model::ElementId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Element {id} has no value assigned to its Mark")]
    MissingMarkValue { id: ElementId },

    #[error("Element {id} does not carry a Mark attribute")]
    MarkAttributeMissing { id: ElementId },

    #[error("Failed to write Mark on element {id}: {reason}")]
    AttributeWrite { id: ElementId, reason: String },

    #[error("Element {id} is not part of the document")]
    ElementNotFound { id: ElementId },

    #[error("Failed to start transaction '{name}': {reason}")]
    TransactionStartFailure { name: String, reason: String },

    #[error("Failed to commit transaction '{name}': {reason}")]
    TransactionCommitFailure { name: String, reason: String },

    #[error("Command cancelled: {reason}")]
    Cancelled { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Transaction,
    Cancellation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MarkError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn attribute_write(id: ElementId, reason: impl Into<String>) -> Self {
        Self::AttributeWrite {
            id,
            reason: reason.into(),
        }
    }

    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::MissingMarkValue { .. }
            | Self::MarkAttributeMissing { .. }
            | Self::AttributeWrite { .. }
            | Self::ElementNotFound { .. } => ErrorCategory::Data,
            Self::TransactionStartFailure { .. } | Self::TransactionCommitFailure { .. } => {
                ErrorCategory::Transaction
            }
            Self::Cancelled { .. } => ErrorCategory::Cancellation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Cancellation => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Transaction => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the model file exists and is readable",
            Self::SerializationError(_) => "Make sure the model file is valid JSON",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration file and CLI flags",
            Self::MissingMarkValue { .. } => {
                "Assign a Mark to the element or run with --unset-marks empty"
            }
            Self::MarkAttributeMissing { .. } => {
                "Restrict the category filter to elements that carry a Mark"
            }
            Self::AttributeWrite { .. } => "Unlock the element or choose a different target value",
            Self::ElementNotFound { .. } => "Refresh the selection and try again",
            Self::TransactionStartFailure { .. } | Self::TransactionCommitFailure { .. } => {
                "Close other pending edits on the document and retry"
            }
            Self::Cancelled { .. } => "No changes were saved; run the command again if needed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write the model: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("The model contains unexpected data: {}", self),
            ErrorCategory::Transaction => format!("The document rejected the change: {}", self),
            ErrorCategory::Cancellation => "The command was cancelled".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarkError>;
