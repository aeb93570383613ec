use moltbook_core::{AgentProfile, Post, RegistrationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BROWSE_LIMIT: u32 = 10;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsePostsRequest {
    pub submolt: Option<String>,
    pub limit: u32,
}

impl Default for BrowsePostsRequest {
    fn default() -> Self {
        Self {
            submolt: None,
            limit: DEFAULT_BROWSE_LIMIT,
        }
    }
}

impl BrowsePostsRequest {
    pub fn new(limit: u32) -> Self {
        Self {
            submolt: None,
            limit,
        }
    }

    pub fn with_submolt(mut self, submolt: impl Into<String>) -> Self {
        self.submolt = Some(submolt.into());
        self
    }

    /// `limit` always comes first; `submolt` only when non-empty.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        params.push(("limit", self.limit.to_string()));
        if let Some(submolt) = self.submolt.as_deref().filter(|s| !s.is_empty()) {
            params.push(("submolt", submolt.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatePostRequest {
    pub submolt: String,
    pub title: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub url: Option<String>,
}

impl CreatePostRequest {
    pub fn new(submolt: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            submolt: submolt.into(),
            title: title.into(),
            content: None,
            url: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// A post needs a body or a link.
    pub fn has_body(&self) -> bool {
        !is_blank(&self.content) || !is_blank(&self.url)
    }
}

/// Partial update: an absent description leaves the profile untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

impl UpdateProfileRequest {
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.description)
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateCommentRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteTarget {
    Post,
    Comment,
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteTarget::Post => write!(f, "post"),
            VoteTarget::Comment => write!(f, "comment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteDirection::Up => write!(f, "up"),
            VoteDirection::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteRequest {
    pub target_type: VoteTarget,
    pub target_id: String,
    pub direction: VoteDirection,
}

impl VoteRequest {
    pub fn new(
        target_type: VoteTarget,
        target_id: impl Into<String>,
        direction: VoteDirection,
    ) -> Self {
        Self {
            target_type,
            target_id: target_id.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProfileEnvelope {
    pub success: bool,
    pub agent: AgentProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PostsEnvelope {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchEnvelope {
    pub results: Vec<Post>,
}

/// Registration payload as returned by either the current API (fields nested
/// under `agent`) or the older flat shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RegisterEnvelope {
    pub success: bool,
    pub error: String,
    pub hint: String,
    pub message: String,
    pub agent: Option<AgentRegistration>,
    pub tweet_template: String,
    pub api_key: String,
    pub agent_id: String,
    pub claim_url: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AgentRegistration {
    pub id: String,
    pub api_key: String,
    pub claim_url: String,
    pub verification_code: String,
}

impl RegisterEnvelope {
    /// Failure message declared in the body, with the hint appended.
    pub fn declared_failure(&self) -> Option<String> {
        if self.success || self.error.is_empty() {
            return None;
        }
        if self.hint.is_empty() {
            Some(self.error.clone())
        } else {
            Some(format!("{} - {}", self.error, self.hint))
        }
    }

    /// Top-level values win; empty ones are filled from the nested agent.
    pub fn into_result(self) -> RegistrationResult {
        let nested = self.agent.unwrap_or_default();
        RegistrationResult {
            agent_id: prefer(self.agent_id, nested.id),
            api_key: prefer(self.api_key, nested.api_key),
            claim_url: prefer(self.claim_url, nested.claim_url),
            verification_code: prefer(self.verification_code, nested.verification_code),
            message: non_empty(self.message),
            tweet_template: non_empty(self.tweet_template),
        }
    }
}

fn prefer(top_level: String, nested: String) -> String {
    if top_level.is_empty() {
        nested
    } else {
        top_level
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
