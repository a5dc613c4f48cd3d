use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed repository record at index {index}: {message}")]
    MalformedRecord { index: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShowcaseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::TomlError(_)
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::SerializationError(_) | Self::MalformedRecord { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedRecord { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorSeverity::Medium,
            Self::TomlError(_)
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Fetch failures are recovered by the pipeline; everything else bubbles up.
    pub fn is_network_failure(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity and the API base URL",
            Self::HttpStatusError { status: 403, .. } | Self::HttpStatusError { status: 429, .. } => {
                "Anonymous requests are rate limited; wait an hour or retry later"
            }
            Self::HttpStatusError { status: 404, .. } => "Check that the account name exists",
            Self::HttpStatusError { .. } => "The hosting provider rejected the request; retry later",
            Self::TomlError(_) => "Make sure the file exists and is valid TOML",
            Self::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
            Self::MissingConfigError { .. } => "Set the value in the config file or on the command line",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Check that the output directory is writable and not full"
            }
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::MalformedRecord { .. } => "The record was skipped; no action needed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } => {
                format!("Could not fetch repositories: {}", self)
            }
            Self::TomlError(_)
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                format!("Could not write output: {}", self)
            }
            Self::MalformedRecord { .. } => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
