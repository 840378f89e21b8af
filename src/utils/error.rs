use thiserror::Error;

#[derive(Error, Debug)]
pub enum NaminatorError {
    #[error("No text response from the model")]
    NoTextResponse,

    #[error("Failed to parse name combinations from AI response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} ({error_type}): {message}")]
    ApiStatusError {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，讓呼叫端可以依類別分支處理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 模型沒有照輸出格式回覆
    Response,
    Transport,
    Api,
    Configuration,
    System,
}

impl NaminatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NaminatorError::NoTextResponse | NaminatorError::MalformedResponse { .. } => {
                ErrorCategory::Response
            }
            NaminatorError::ApiError(_) => ErrorCategory::Transport,
            NaminatorError::ApiStatusError { .. } => ErrorCategory::Api,
            NaminatorError::ConfigError { .. }
            | NaminatorError::MissingConfigError { .. }
            | NaminatorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            NaminatorError::IoError(_) | NaminatorError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 暫時性錯誤：逾時、連線失敗、429 與 5xx
    pub fn is_retryable(&self) -> bool {
        match self {
            NaminatorError::ApiError(e) => e.is_timeout() || e.is_connect(),
            NaminatorError::ApiStatusError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Raw model text for malformed responses.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            NaminatorError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NaminatorError::NoTextResponse | NaminatorError::MalformedResponse { .. } => {
                "The model ignored the output format; try the request again"
            }
            NaminatorError::ApiError(_) => "Check network connectivity to the API endpoint",
            NaminatorError::ApiStatusError { status: 401, .. }
            | NaminatorError::ApiStatusError { status: 403, .. } => {
                "Check that the API key is valid"
            }
            NaminatorError::ApiStatusError { status: 429, .. } => {
                "Rate limited; wait before retrying or enable retries"
            }
            NaminatorError::ApiStatusError { .. } => "Inspect the API error message",
            NaminatorError::ConfigError { .. }
            | NaminatorError::MissingConfigError { .. }
            | NaminatorError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or environment variables"
            }
            NaminatorError::IoError(_) => "Check file paths and permissions",
            NaminatorError::SerializationError(_) => "Report this as a bug",
        }
    }
}

pub type Result<T> = std::result::Result<T, NaminatorError>;
