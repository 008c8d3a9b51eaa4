use std::{env, error, fmt};

use url::Url;

use crate::apis::gemini::GENERATE_CONTENT_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Url,
    pub user_agent: Option<String>,
}

#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub source: url::ParseError,
}

impl Default for Config {
    fn default() -> Self {
        Self { endpoint: Url::parse(GENERATE_CONTENT_URL).unwrap(), user_agent: None }
    }
}

impl Config {
    /// Reads the config from the environment, after loading a `.env` file if there is one.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => log::debug!("no .env file, using process environment"),
            Err(err) => log::warn!("could not load .env file: {err}"),
        }

        Self::from_lookup(|variable| env::var(variable).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("GEMINI_API_URL").filter(|value| !value.is_empty()) {
            config.endpoint = Url::parse(&endpoint)
                .map_err(|source| ConfigError { variable: "GEMINI_API_URL", source })?;
        }

        config.user_agent = lookup("USER_AGENT").filter(|value| !value.is_empty());

        Ok(config)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.source)
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}
