use std::borrow::Cow;
use std::{error, fmt};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

pub const GENERATE_CONTENT_URL: &str = concat!(
    "https://generativelanguage.googleapis.com",
    "/v1beta/models/gemini-2.0-flash:generateContent"
);

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error),
    Service { status: StatusCode, message: Option<String> },
    Decode(serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part<'a> {
    Text(Cow<'a, str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u16,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn new<T: Into<Cow<'a, str>>>(
        text: T,
        generation_config: Option<GenerationConfig>,
    ) -> Self {
        Self { contents: [Content { parts: [Part::Text(text.into())] }], generation_config }
    }

    pub fn text(&self) -> &str {
        let [Content { parts: [Part::Text(text)] }] = &self.contents;
        text
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PartResponse {
    pub text: Option<String>,
}

/// Result of looking up `candidates[0].content.parts[0].text` in a response.
#[derive(Debug, PartialEq, Eq)]
pub enum GeneratedText {
    WellFormed(String),
    Malformed,
}

impl GenerateContentResponse {
    pub fn into_text(self) -> GeneratedText {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);

        match text {
            Some(text) if !text.is_empty() => GeneratedText::WellFormed(text),
            _ => GeneratedText::Malformed,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Error,
}

#[derive(Deserialize)]
struct Error {
    message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "{err}"),
            Self::Service { message: Some(message), .. } => f.write_str(message),
            Self::Service { status, message: None } => write!(f, "API error: {}", status.as_u16()),
            Self::Decode(err) => write!(f, "could not decode response: {err}"),
        }
    }
}

impl error::Error for ApiError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Service { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Network(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

fn request_url(endpoint: &Url, api_key: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("key", api_key);
    url
}

/// Sends a request and returns the raw response if the server answered with a success status.
pub async fn post_generate_content(
    http_client: &reqwest::Client,
    endpoint: &Url,
    api_key: &str,
    request: &GenerateContentRequest<'_>,
) -> Result<reqwest::Response, ApiError> {
    let response =
        http_client.post(request_url(endpoint, api_key)).json(request).send().await?;

    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<ErrorResponse>(&body).ok())
        .and_then(|error_response| error_response.error.message)
        .filter(|message| !message.is_empty());

    Err(ApiError::Service { status, message })
}

pub async fn generate_content(
    http_client: &reqwest::Client,
    endpoint: &Url,
    api_key: &str,
    request: &GenerateContentRequest<'_>,
) -> Result<GenerateContentResponse, ApiError> {
    let body =
        post_generate_content(http_client, endpoint, api_key, request).await?.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
}
