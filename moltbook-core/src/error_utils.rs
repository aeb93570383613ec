use crate::error::*;
use std::time::Duration;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn retry_after(&self) -> Option<Duration>;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Api(e) => {
                error!("Moltbook API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_retryable(),
            CoreError::Network(_) => true,
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::Api(e) => e.retry_after(),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Api(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { message } => message.clone(),
            CoreError::Io(e) => format!("File system error: {}", e),
            CoreError::Serialization(_) => {
                "Could not encode the request. Please check your input.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Api(_) => "API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }
}

impl ErrorExt for ApiError {
    fn log_error(&self) -> &Self {
        error!("ApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ApiError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimitExceeded { .. } => true,
            ApiError::RequestTimeout => true,
            ApiError::RequestFailed { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }

    /// Only the server's advertised delay is reported; nothing is guessed.
    fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimitExceeded {
                retry_after: Some(seconds),
            } => Some(Duration::from_secs(*seconds)),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ApiError::RateLimitExceeded {
                retry_after: Some(seconds),
            } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                seconds
            ),
            ApiError::RateLimitExceeded { retry_after: None } => {
                "Too many requests. Please wait before trying again.".to_string()
            }
            ApiError::RequestFailed { status_code, body } => match *status_code {
                401 => "Moltbook rejected the API key. Please register again.".to_string(),
                404 => "The requested resource could not be found.".to_string(),
                code if code >= 500 => {
                    "Moltbook is having trouble right now. Please try again later.".to_string()
                }
                code => format!("Moltbook returned status {}: {}", code, body),
            },
            ApiError::RequestTimeout => {
                "Request to Moltbook timed out. Please try again.".to_string()
            }
            ApiError::InvalidResponse { .. } => {
                "Moltbook returned a response that could not be understood.".to_string()
            }
            ApiError::Rejected { message } => message.clone(),
            ApiError::EmptyApiKey => {
                "Registration succeeded but no API key was returned.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ApiError::RateLimitExceeded { .. } => "API_RATE_LIMIT".to_string(),
            ApiError::RequestFailed { .. } => "API_REQUEST_FAILED".to_string(),
            ApiError::RequestTimeout => "API_TIMEOUT".to_string(),
            ApiError::InvalidResponse { .. } => "API_INVALID_RESPONSE".to_string(),
            ApiError::Rejected { .. } => "API_REJECTED".to_string(),
            ApiError::EmptyApiKey => "API_EMPTY_API_KEY".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::NotConfigured => "No credentials found. Run 'moltbook register' first \
                 or set the MOLTBOOK_API_KEY environment variable."
                .to_string(),
            ConfigError::HomeDirectoryUnavailable => {
                "Could not determine your home directory. Use --config-dir.".to_string()
            }
            ConfigError::LoadFailed { path, .. } => {
                format!("Could not read {}. Please check the file contents.", path)
            }
            ConfigError::WriteFailed { path, .. } => format!(
                "Could not write {}. Please check file permissions.",
                path
            ),
            ConfigError::Encode { .. } => "Could not encode configuration.".to_string(),
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::NotConfigured => "CONFIG_NOT_CONFIGURED".to_string(),
            ConfigError::HomeDirectoryUnavailable => "CONFIG_NO_HOME".to_string(),
            ConfigError::LoadFailed { .. } => "CONFIG_LOAD_FAILED".to_string(),
            ConfigError::WriteFailed { .. } => "CONFIG_WRITE_FAILED".to_string(),
            ConfigError::Encode { .. } => "CONFIG_ENCODE_FAILED".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
            if error.is_retryable() {
                if let Some(retry_after) = error.retry_after() {
                    info!("Error is retryable. Retry after: {:?}", retry_after);
                }
            }
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
