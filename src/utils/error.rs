use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatusError { url: String, status: u16 },

    #[error("Unexpected API response: {message}")]
    UnexpectedResponseError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Remote,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ArchiveError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorCategory::Remote,
            Self::UnexpectedResponseError { .. } | Self::CsvError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiStatusError { status: 401 | 403, .. } => {
                "Session expired? Copy fresh LEETCODE_SESSION and csrftoken cookies from the browser"
            }
            Self::ApiError(_) | Self::ApiStatusError { .. } => {
                "Check the network connection and source.base_url, then re-run"
            }
            Self::UnexpectedResponseError { .. } => {
                "The remote API shape may have changed; re-run with --verbose and inspect the response"
            }
            Self::CsvError(_) => {
                "Check that the category table has Problem, Category and Difficulty columns and the configured delimiter"
            }
            Self::IoError(_) => "Check that the paths exist and are writable",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Fix the configuration file or the referenced environment variables"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Remote => format!("Could not talk to LeetCode: {}", self),
            ErrorCategory::Data => format!("Could not read data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
