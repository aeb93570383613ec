use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback display name when only `MOLTBOOK_API_KEY` is set.
pub const DEFAULT_AGENT_NAME: &str = "MoltbookAgent";

/// Minimum spacing between posts created from this machine.
pub const POST_COOLDOWN_MINUTES: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub api_key: String,
    pub agent_name: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            agent_name: agent_name.into(),
        }
    }

    /// First characters of the key, safe to show on a terminal.
    pub fn key_preview(&self, len: usize) -> String {
        let preview: String = self.api_key.chars().take(len).collect();
        if self.api_key.chars().count() > len {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

/// Local usage counters persisted in `state.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageState {
    #[serde(
        rename = "lastMoltbookCheck",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub last_check: Option<String>,
    pub posts_created: u64,
    pub comments_created: u64,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub last_post_time: Option<String>,
}

impl UsageState {
    pub fn record_check(&mut self, now: DateTime<Utc>) {
        self.last_check = Some(now.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    pub fn record_post(&mut self, now: DateTime<Utc>) {
        self.posts_created += 1;
        self.last_post_time = Some(now.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    pub fn record_comment(&mut self) {
        self.comments_created += 1;
    }

    pub fn last_check_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.last_check.as_deref())
    }

    pub fn last_post_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.last_post_time.as_deref())
    }

    /// Time left before another post is allowed, or `None` if posting is open.
    /// An unparseable timestamp never blocks posting.
    pub fn post_cooldown_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let last_post = self.last_post_time()?;
        let elapsed = now.signed_duration_since(last_post);
        let cooldown = Duration::minutes(POST_COOLDOWN_MINUTES);
        if elapsed < cooldown {
            Some(cooldown - elapsed)
        } else {
            None
        }
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|v| DateTime::parse_from_rfc3339(v).ok())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub submolt: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub author: String,
    pub score: i64,
    pub num_comments: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author: String,
    pub score: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationResult {
    pub agent_id: String,
    pub api_key: String,
    pub claim_url: String,
    pub verification_code: String,
    pub message: Option<String>,
    pub tweet_template: Option<String>,
}

impl RegistrationResult {
    /// Credentials to persist for the freshly registered agent.
    pub fn credentials(&self, agent_name: &str) -> Credentials {
        Credentials::new(self.api_key.clone(), agent_name)
    }
}
