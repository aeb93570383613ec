//! Agent registration.
//!
//! Registration is unauthenticated and does not go through
//! [`MoltbookClient::make_request`](crate::MoltbookClient::make_request): the
//! endpoint reports failures in its body as often as in its status code, so
//! the raw status and body are interpreted together here.

use crate::api::{transport_error, ClientConfig};
use crate::models::{RegisterEnvelope, RegisterRequest};
use moltbook_core::{ApiError, CoreError, RegistrationResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{debug, error, info};

const REGISTER_ENDPOINT: &str = "/agents/register";

/// Registers a new agent against the public Moltbook API.
pub async fn register(name: &str, description: &str) -> Result<RegistrationResult, CoreError> {
    register_with(&ClientConfig::new(""), name, description).await
}

/// Registers using the base URL and timeout from `config`; its API key is ignored.
pub async fn register_with(
    config: &ClientConfig,
    name: &str,
    description: &str,
) -> Result<RegistrationResult, CoreError> {
    let base_url = config.normalized_base_url()?;
    let http_client = config.build_http_client()?;
    let payload = serde_json::to_vec(&RegisterRequest { name, description })?;

    info!("Registering agent '{}'", name);
    let response = http_client
        .post(format!("{}{}", base_url, REGISTER_ENDPOINT))
        .header(CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|e| transport_error(&Method::POST, REGISTER_ENDPOINT, e))?;

    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(&Method::POST, REGISTER_ENDPOINT, e))?;

    let result = interpret_registration(status, &body)?;
    info!("Registered agent {}", result.agent_id);
    Ok(result)
}

pub(crate) fn interpret_registration(
    status: u16,
    body: &[u8],
) -> Result<RegistrationResult, CoreError> {
    let success_status = (200..300).contains(&status);
    let raw_body = || String::from_utf8_lossy(body).into_owned();

    let envelope: RegisterEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if !success_status => {
            debug!("Undecodable registration error body: {}", e);
            return Err(ApiError::RequestFailed {
                status_code: status,
                body: raw_body(),
            }
            .into());
        }
        Err(e) => {
            error!("Failed to parse registration response: {}", e);
            return Err(ApiError::InvalidResponse {
                details: format!("Failed to parse registration response: {}", e),
            }
            .into());
        }
    };

    if let Some(message) = envelope.declared_failure() {
        error!("Registration rejected: {}", message);
        return Err(ApiError::Rejected { message }.into());
    }

    if !success_status {
        error!("Registration failed with status {}", status);
        return Err(ApiError::RequestFailed {
            status_code: status,
            body: raw_body(),
        }
        .into());
    }

    let result = envelope.into_result();
    if result.api_key.is_empty() {
        return Err(ApiError::EmptyApiKey.into());
    }
    Ok(result)
}
