use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PERSONA: &str = "You are Link from The Legend of Zelda: Breath of the Wild. \
Speak courageously, concisely, and with a heroic tone. \
Avoid modern slang and stay true to the character's personality. User: ";

/// Reply used when the upstream answer carries no text.
pub const NO_REPLY: &str = "No reply";

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("Invalid Gemini endpoint: {0}")]
    Endpoint(String),
    #[error("Failed to marshal request: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to contact Gemini API: {0}")]
    Contact(#[source] reqwest::Error),
    #[error("Failed to contact Gemini API: timed out after {0:?}")]
    Timeout(Duration),
    #[error("Gemini API error: {status}, body: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to read Gemini response: {0}")]
    Read(#[source] reqwest::Error),
    #[error("Failed to parse Gemini response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Forwards a single user message to a generative-language backend.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn chat(&self, message: &str) -> RelayResult<String>;
}

#[derive(Clone, PartialEq)]
pub struct RelaySettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
    /// Prepended verbatim to every user message.
    pub persona: String,
}

impl RelaySettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }

    /// Settings for a configured key, or `None` when the key is absent or blank.
    pub fn from_key(api_key: Option<&str>) -> Option<Self> {
        api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    pub fn prompt(&self, message: &str) -> String {
        format!("{}{}", self.persona, message)
    }
}

impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaySettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("persona", &self.persona)
            .finish()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextPart {
    pub text: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RequestContent {
    pub parts: Vec<TextPart>,
}

/// Outbound `generateContent` body.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    pub fn from_prompt(text: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart { text }],
            }],
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize, Default, Debug)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// First text part of the first candidate, or [`NO_REPLY`].
    pub fn into_reply(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .unwrap_or_else(|| NO_REPLY.to_string())
    }
}

pub struct GeminiRelay {
    client: Client,
    endpoint: Url,
    settings: RelaySettings,
}

impl GeminiRelay {
    pub fn new(settings: RelaySettings) -> RelayResult<Self> {
        let client = build_http_client(settings.timeout)?;
        let endpoint = Url::parse_with_params(
            &format!(
                "{}/models/{}:generateContent",
                settings.api_base.trim_end_matches('/'),
                settings.model
            ),
            &[("key", settings.api_key.as_str())],
        )
        .map_err(|e| RelayError::Endpoint(e.to_string()))?;
        tracing::debug!(
            "Gemini relay configured: base={}, model={}, timeout={:?}",
            settings.api_base,
            settings.model,
            settings.timeout
        );
        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }

    fn transport_error(
        &self,
        e: reqwest::Error,
        wrap: fn(reqwest::Error) -> RelayError,
    ) -> RelayError {
        if e.is_timeout() {
            RelayError::Timeout(self.settings.timeout)
        } else {
            // The URL carries the API key.
            wrap(e.without_url())
        }
    }
}

fn build_http_client(timeout: Duration) -> RelayResult<Client> {
    let builder = Client::builder().timeout(timeout);
    // Tests talk to a loopback stub; keep ambient proxy settings out of the way.
    let builder = if cfg!(test) { builder.no_proxy() } else { builder };
    builder.build().map_err(RelayError::ClientBuild)
}

#[async_trait]
impl ChatRelay for GeminiRelay {
    async fn chat(&self, message: &str) -> RelayResult<String> {
        let payload = GenerateContentRequest::from_prompt(self.settings.prompt(message));
        let body = serde_json::to_vec(&payload).map_err(RelayError::Serialize)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, RelayError::Contact))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, RelayError::Read))?;
        tracing::debug!("Gemini response body: {}", String::from_utf8_lossy(&bytes));

        let decoded: GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(RelayError::Decode)?;
        Ok(decoded.into_reply())
    }
}
