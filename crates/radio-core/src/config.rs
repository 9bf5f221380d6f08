use crate::error::ConfigError;
use std::path::PathBuf;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const X_API_KEY: &str = "X_API_KEY";
pub const X_API_KEY_SECRET: &str = "X_API_KEY_SECRET";
pub const X_ACCESS_TOKEN: &str = "X_ACCESS_TOKEN";
pub const X_ACCESS_TOKEN_SECRET: &str = "X_ACCESS_TOKEN_SECRET";

pub const DEFAULT_DB_FILE: &str = "radio_names.db";
pub const DEFAULT_PROMPT_FILE: &str = "prompt.txt";
pub const DEFAULT_GEMINI_BASE_URL: &str = gemini_client::DEFAULT_BASE_URL;
pub const DEFAULT_X_BASE_URL: &str = "https://api.twitter.com";

// ---------------------------------------------------------------------------
// Credential loading
// ---------------------------------------------------------------------------

/// Read `name` from the process environment, trimmed.
///
/// Unset and whitespace-only values are both `ConfigError::Missing`.
pub fn load(name: &str) -> Result<String, ConfigError> {
    load_with(name, env_lookup)
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// [`load`] against an arbitrary lookup instead of the process environment.
pub fn load_with<F>(name: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing(name.to_string()));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// OAuth 1.0a user-context tokens for the X API.
#[derive(Clone, PartialEq, Eq)]
pub struct XCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// All secrets a run needs. Loaded once, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub x: XCredentials,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Loads in a fixed order and stops at the first missing value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            gemini_api_key: load_with(GEMINI_API_KEY, &lookup)?,
            x: XCredentials {
                consumer_key: load_with(X_API_KEY, &lookup)?,
                consumer_secret: load_with(X_API_KEY_SECRET, &lookup)?,
                access_token: load_with(X_ACCESS_TOKEN, &lookup)?,
                access_token_secret: load_with(X_ACCESS_TOKEN_SECRET, &lookup)?,
            },
        })
    }
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XCredentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("x", &self.x)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Process-wide settings, built once in `main` and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub db_path: PathBuf,
    pub prompt_path: PathBuf,
    pub gemini_base_url: String,
    pub x_base_url: String,
}

impl Config {
    /// Defaults for every non-secret setting.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            prompt_path: PathBuf::from(DEFAULT_PROMPT_FILE),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            x_base_url: DEFAULT_X_BASE_URL.to_string(),
        }
    }
}
