use std::{error, fmt};

use reqwest::{Client, StatusCode, redirect};
use url::Url;

use crate::apis::gemini::{self, ApiError, GeneratedText};
use crate::prompts::{self, Constraints};
use crate::utilities::code_sanitizer::{self, SanitizedCode, UnsafePattern};
use crate::utilities::config::Config;
use crate::utilities::suggestions;

#[derive(Debug)]
pub enum GenerateCodeError {
    MissingCredential,
    MissingPrompt,
    Transport(reqwest::Error),
    Service { status: StatusCode, message: Option<String> },
    InvalidResponse,
    UnsafeCode(&'static str),
    Failed(String),
}

impl fmt::Display for GenerateCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => f.write_str("API key is required"),
            Self::MissingPrompt => f.write_str("prompt is required"),
            Self::Transport(err) => write!(f, "failed to generate code: {err}"),
            Self::Service { message: Some(message), .. } => f.write_str(message),
            Self::Service { status, message: None } => write!(f, "API error: {}", status.as_u16()),
            Self::InvalidResponse => f.write_str("invalid response from Gemini API"),
            Self::UnsafeCode(pattern) => write!(
                f,
                "failed to generate code: generated code contains potentially unsafe patterns \
                 ({pattern})"
            ),
            Self::Failed(message) => write!(f, "failed to generate code: {message}"),
        }
    }
}

impl error::Error for GenerateCodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for GenerateCodeError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Network(err) => Self::Transport(err),
            ApiError::Service { status, message } => Self::Service { status, message },
            ApiError::Decode(err) => Self::Failed(ApiError::Decode(err).to_string()),
        }
    }
}

impl From<UnsafePattern> for GenerateCodeError {
    fn from(UnsafePattern(pattern): UnsafePattern) -> Self {
        Self::UnsafeCode(pattern)
    }
}

/// Turns visual prompts into p5.js sketch code through the Gemini API.
///
/// Holds no per-call state, so one instance can serve any number of concurrent calls.
#[derive(Clone)]
pub struct SketchGenerator {
    http_client: Client,
    endpoint: Url,
}

impl SketchGenerator {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let mut http_client = Client::builder();

        if let Some(user_agent) = &config.user_agent {
            http_client = http_client.user_agent(user_agent);
        }

        Ok(Self::with_client(
            http_client.redirect(redirect::Policy::none()).build()?,
            config.endpoint.clone(),
        ))
    }

    pub const fn with_client(http_client: Client, endpoint: Url) -> Self {
        Self { http_client, endpoint }
    }

    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn generate_code(
        &self,
        api_key: &str,
        prompt: &str,
        constraints: &Constraints,
    ) -> Result<SanitizedCode, GenerateCodeError> {
        if api_key.is_empty() {
            return Err(GenerateCodeError::MissingCredential);
        }

        if prompt.trim().is_empty() {
            return Err(GenerateCodeError::MissingPrompt);
        }

        log::debug!("generating sketch code for {prompt:?}");

        let request = prompts::code_generation_request(prompt, constraints);
        let response =
            gemini::generate_content(&self.http_client, &self.endpoint, api_key, &request).await?;

        let GeneratedText::WellFormed(text) = response.into_text() else {
            log::warn!("Gemini response has no generated text");
            return Err(GenerateCodeError::InvalidResponse);
        };

        code_sanitizer::sanitize(&text).map_err(|pattern| {
            log::warn!("rejected generated code containing {:?}", pattern.0);
            pattern.into()
        })
    }

    pub async fn test_credential(&self, api_key: &str) -> bool {
        if api_key.is_empty() {
            return false;
        }

        match gemini::post_generate_content(
            &self.http_client,
            &self.endpoint,
            api_key,
            &prompts::key_test_request(),
        )
        .await
        {
            Ok(_) => true,
            Err(err) => {
                log::debug!("API key test failed: {err}");
                false
            }
        }
    }

    pub async fn fetch_suggestions(&self, api_key: &str, current_prompt: &str) -> Vec<String> {
        if api_key.is_empty() {
            return Vec::new();
        }

        let request = prompts::suggestions_request(current_prompt);

        match gemini::generate_content(&self.http_client, &self.endpoint, api_key, &request).await {
            Ok(response) => match response.into_text() {
                GeneratedText::WellFormed(text) => suggestions::parse_suggestions(&text),
                GeneratedText::Malformed => Vec::new(),
            },
            Err(err) => {
                log::warn!("fetching suggestions failed: {err}");
                Vec::new()
            }
        }
    }
}
