use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Moltbook API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CoreError {
    /// True when no credentials could be resolved from any source.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, CoreError::Config(ConfigError::NotConfigured))
    }
}

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("{}", rate_limit_message(.retry_after))]
    RateLimitExceeded { retry_after: Option<u64> },

    #[error("API error (status {status_code}): {body}")]
    RequestFailed { status_code: u16, body: String },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },

    #[error("Registration returned an empty API key")]
    EmptyApiKey,
}

fn rate_limit_message(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!("Rate limited. Retry after {} seconds", seconds),
        None => "Rate limited".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No credentials found. Run 'moltbook register' first or set MOLTBOOK_API_KEY")]
    NotConfigured,

    #[error("Could not determine home directory")]
    HomeDirectoryUnavailable,

    #[error("Failed to load {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode configuration: {details}")]
    Encode { details: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
