use std::error::Error as StdError;
use std::fmt;

use crate::core::config::Config;
use crate::core::constants::API_KEY_ENV_VAR;
use crate::core::exchange::GeminiClient;

#[derive(Debug, PartialEq, Eq)]
pub enum EndpointError {
    MissingApiKey,
}

impl EndpointError {
    /// Suggestions printed under the error at the command line.
    pub fn quick_fixes(&self) -> Vec<String> {
        match self {
            EndpointError::MissingApiKey => vec![
                format!("export {API_KEY_ENV_VAR}=\"your-api-key-here\""),
                "qanat set api-key <your-api-key>".to_string(),
            ],
        }
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::MissingApiKey => write!(
                f,
                "No API key configured. Set {API_KEY_ENV_VAR} or store one in the config file."
            ),
        }
    }
}

impl StdError for EndpointError {}

/// Build the exchange client from config plus the API key environment value.
pub fn resolve_client(
    config: &Config,
    env_api_key: Option<String>,
) -> Result<GeminiClient, EndpointError> {
    let api_key = config
        .resolve_api_key(env_api_key)
        .ok_or(EndpointError::MissingApiKey)?;
    Ok(GeminiClient::new(
        reqwest::Client::new(),
        config.effective_base_url(),
        config.effective_model(),
        api_key,
    ))
}

/// [`resolve_client`] reading the key from the process environment.
pub fn resolve_client_from_env(config: &Config) -> Result<GeminiClient, EndpointError> {
    resolve_client(config, std::env::var(API_KEY_ENV_VAR).ok())
}
