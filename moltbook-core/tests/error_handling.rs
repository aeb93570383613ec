use moltbook_core::{ApiError, ConfigError, CoreError, ErrorExt, ErrorReporter};
use std::time::Duration;

#[test]
fn test_error_codes() {
    let api_error = CoreError::Api(ApiError::RequestTimeout);
    assert_eq!(api_error.error_code(), "API");

    let config_error = CoreError::Config(ConfigError::NotConfigured);
    assert_eq!(config_error.error_code(), "CONFIG");

    let input_error = CoreError::InvalidInput {
        message: "must provide either --content or --url".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");

    assert_eq!(
        ApiError::RateLimitExceeded { retry_after: None }.error_code(),
        "API_RATE_LIMIT"
    );
    assert_eq!(
        ConfigError::NotConfigured.error_code(),
        "CONFIG_NOT_CONFIGURED"
    );
}

#[test]
fn test_retryable_errors() {
    let rate_limited = CoreError::Api(ApiError::RateLimitExceeded {
        retry_after: Some(60),
    });
    assert!(rate_limited.is_retryable());

    let server_error = CoreError::Api(ApiError::RequestFailed {
        status_code: 503,
        body: String::new(),
    });
    assert!(server_error.is_retryable());

    let bad_request = CoreError::Api(ApiError::RequestFailed {
        status_code: 400,
        body: "{\"error\":\"bad\"}".to_string(),
    });
    assert!(!bad_request.is_retryable());

    let not_configured = CoreError::Config(ConfigError::NotConfigured);
    assert!(!not_configured.is_retryable());
}

#[test]
fn test_retry_after_only_when_advertised() {
    let advertised = CoreError::Api(ApiError::RateLimitExceeded {
        retry_after: Some(60),
    });
    assert_eq!(advertised.retry_after(), Some(Duration::from_secs(60)));

    let silent = CoreError::Api(ApiError::RateLimitExceeded { retry_after: None });
    assert_eq!(silent.retry_after(), None);

    let timeout = CoreError::Api(ApiError::RequestTimeout);
    assert_eq!(timeout.retry_after(), None);
}

#[test]
fn test_display_messages() {
    let rate_limited = ApiError::RateLimitExceeded {
        retry_after: Some(30),
    };
    assert_eq!(
        rate_limited.to_string(),
        "Rate limited. Retry after 30 seconds"
    );

    let failed = ApiError::RequestFailed {
        status_code: 404,
        body: "not here".to_string(),
    };
    assert_eq!(failed.to_string(), "API error (status 404): not here");
}

#[test]
fn test_user_friendly_messages() {
    let not_configured = CoreError::Config(ConfigError::NotConfigured);
    let message = not_configured.user_friendly_message();
    assert!(message.contains("moltbook register"));

    let rejected = CoreError::Api(ApiError::Rejected {
        message: "name taken - try another".to_string(),
    });
    assert_eq!(rejected.user_friendly_message(), "name taken - try another");

    let load_failed = CoreError::Config(ConfigError::LoadFailed {
        path: "/tmp/config.toml".to_string(),
        reason: "expected `=`".to_string(),
    });
    assert!(load_failed.user_friendly_message().contains("/tmp/config.toml"));
}

#[test]
fn test_not_configured_is_distinct() {
    assert!(CoreError::Config(ConfigError::NotConfigured).is_not_configured());
    assert!(!CoreError::Config(ConfigError::HomeDirectoryUnavailable).is_not_configured());
    assert!(!CoreError::Api(ApiError::EmptyApiKey).is_not_configured());
}

#[test]
fn test_error_reporter() {
    let reporter = ErrorReporter::new()
        .with_error_reporting(true)
        .with_warning_reporting(true);
    let error = CoreError::Api(ApiError::RequestTimeout);

    // This test just ensures the methods don't panic
    reporter.report_error(&error);
    reporter.report_warning(&error);
}
