use crate::models::{
    BrowsePostsRequest, CreateCommentRequest, CreatePostRequest, PostsEnvelope, ProfileEnvelope,
    SearchEnvelope, UpdateProfileRequest, VoteRequest,
};
use moltbook_core::{AgentProfile, ApiError, Comment, ConfigError, CoreError, Post};
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

pub const MOLTBOOK_API_BASE: &str = "https://www.moltbook.com/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("moltbook-agent/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: MOLTBOOK_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validated base URL without a trailing slash.
    pub(crate) fn normalized_base_url(&self) -> Result<String, CoreError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: format!("{} ({})", self.base_url, e),
        })?;
        Ok(self.base_url.trim_end_matches('/').to_string())
    }

    pub(crate) fn build_http_client(&self) -> Result<Client, CoreError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(CoreError::Network)
    }
}

/// Authenticated client for the Moltbook agent API.
///
/// Every operation is a single HTTP round-trip; nothing is retried.
#[derive(Debug)]
pub struct MoltbookClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl MoltbookClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, CoreError> {
        let base_url = config.normalized_base_url()?;
        let http_client = config.build_http_client()?;

        Ok(Self {
            http_client,
            api_key: config.api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared request path: auth header, timeout, and status classification.
    /// Returns the raw body of a 2xx response.
    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: Option<&[(&str, String)]>,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, CoreError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request_builder = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !self.api_key.is_empty() {
            request_builder = request_builder.bearer_auth(&self.api_key);
        }
        if let Some(params) = query_params {
            request_builder = request_builder.query(params);
        }
        if let Some(body) = body {
            request_builder = request_builder.body(body);
        }

        info!("Making Moltbook API request: {} {}", method, endpoint);
        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(&method, endpoint, e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(response.headers());
            warn!(
                "Rate limited on {} {} (retry after {:?} seconds)",
                method, endpoint, retry_after
            );
            return Err(ApiError::RateLimitExceeded { retry_after }.into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&method, endpoint, e))?;

        if !status.is_success() {
            error!("Request failed with status: {} for {}", status, endpoint);
            return Err(ApiError::RequestFailed {
                status_code: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }
            .into());
        }

        debug!("Request successful: {} {}", status, endpoint);
        Ok(bytes.to_vec())
    }

    async fn get(
        &self,
        endpoint: &str,
        query_params: Option<&[(&str, String)]>,
    ) -> Result<Vec<u8>, CoreError> {
        self.make_request(Method::GET, endpoint, query_params, None)
            .await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Vec<u8>, CoreError> {
        let payload = serde_json::to_vec(body)?;
        self.make_request(method, endpoint, None, Some(payload))
            .await
    }

    pub async fn get_profile(&self) -> Result<AgentProfile, CoreError> {
        let data = self.get("/agents/me", None).await?;
        let envelope: ProfileEnvelope = decode(&data, "profile")?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                message: "API returned success=false".to_string(),
            }
            .into());
        }

        debug!("Retrieved profile for: {}", envelope.agent.name);
        Ok(envelope.agent)
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<AgentProfile, CoreError> {
        let data = self.send_json(Method::PATCH, "/agents/me", request).await?;
        let profile: AgentProfile = decode_entity(&data, "agent", "profile")?;

        info!("Updated profile for: {}", profile.name);
        Ok(profile)
    }

    pub async fn browse_posts(&self, request: &BrowsePostsRequest) -> Result<Vec<Post>, CoreError> {
        let params = request.query_params();
        let data = self.get("/posts", Some(params.as_slice())).await?;
        let envelope: PostsEnvelope = decode_listing(&data, "posts")?;

        info!("Retrieved {} posts", envelope.posts.len());
        Ok(envelope.posts)
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, CoreError> {
        let data = self.send_json(Method::POST, "/posts", request).await?;
        let post: Post = decode_entity(&data, "post", "post")?;

        info!("Created post {} in /{}", post.id, post.submolt);
        Ok(post)
    }

    pub async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment, CoreError> {
        let endpoint = format!("/posts/{}/comments", post_id);
        let request = CreateCommentRequest { content };
        let data = self.send_json(Method::POST, &endpoint, &request).await?;
        let comment: Comment = decode_entity(&data, "comment", "comment")?;

        info!("Created comment {} on post {}", comment.id, post_id);
        Ok(comment)
    }

    pub async fn vote(&self, request: &VoteRequest) -> Result<(), CoreError> {
        self.send_json(Method::POST, "/vote", request).await?;

        info!(
            "Voted {} on {} {}",
            request.direction, request.target_type, request.target_id
        );
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Post>, CoreError> {
        let params = [("q", query.to_string())];
        let data = self.get("/search", Some(params.as_slice())).await?;
        let envelope: SearchEnvelope = decode_listing(&data, "search results")?;

        info!("Search returned {} results", envelope.results.len());
        Ok(envelope.results)
    }
}

pub(crate) fn transport_error(method: &Method, endpoint: &str, e: reqwest::Error) -> CoreError {
    error!("Network error for {} {}: {}", method, endpoint, e);
    if e.is_timeout() {
        CoreError::Api(ApiError::RequestTimeout)
    } else {
        CoreError::Network(e)
    }
}

/// Delay-seconds form only; an HTTP-date or garbage yields `None`.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn invalid_response(what: &str, e: serde_json::Error) -> CoreError {
    error!("Failed to parse {}: {}", what, e);
    ApiError::InvalidResponse {
        details: format!("Failed to parse {}: {}", what, e),
    }
    .into()
}

fn decode<T: DeserializeOwned>(data: &[u8], what: &str) -> Result<T, CoreError> {
    serde_json::from_slice(data).map_err(|e| invalid_response(what, e))
}

/// `{"success": false, "error": ...}` under a 2xx status is still a failure.
fn reject_declared_failure(value: &Value) -> Result<(), CoreError> {
    if value.get("success").and_then(Value::as_bool) != Some(false) {
        return Ok(());
    }
    let message = value
        .get("error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .unwrap_or("API returned success=false");
    let message = match value.get("hint").and_then(Value::as_str) {
        Some(hint) if !hint.is_empty() => format!("{} - {}", message, hint),
        _ => message.to_string(),
    };
    Err(ApiError::Rejected { message }.into())
}

fn decode_listing<T: DeserializeOwned>(data: &[u8], what: &str) -> Result<T, CoreError> {
    let value: Value = decode(data, what)?;
    reject_declared_failure(&value)?;
    serde_json::from_value(value).map_err(|e| invalid_response(what, e))
}

/// Accepts the entity itself or an envelope holding it under `key`.
fn decode_entity<T: DeserializeOwned>(data: &[u8], key: &str, what: &str) -> Result<T, CoreError> {
    let value: Value = decode(data, what)?;
    reject_declared_failure(&value)?;

    let entity = match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert(key.to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    };

    serde_json::from_value(entity).map_err(|e| invalid_response(what, e))
}
