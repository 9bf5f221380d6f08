use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{0}' is not set or empty")]
    Missing(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("radio name already stored: {0}")]
    Duplicate(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("failed to read prompt template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong between reading history and holding a
/// usable name. The run reports all of these as one generation failure.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read past names: {0}")]
    History(#[source] StoreError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Model(#[from] gemini_client::GeminiError),

    #[error("model returned an empty name")]
    Empty,

    #[error("generated name has post weight {len}, limit is {limit}")]
    TooLong { len: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("X API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to sign request: {0}")]
    Signing(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
}

/// Failure of a whole run, tagged by the stage that raised it.
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to generate radio name: {0}")]
    Generate(#[from] GenerateError),

    #[error("failed to insert radio name: {0}")]
    Store(#[from] StoreError),

    #[error("failed to post radio name: {0}")]
    Publish(#[from] PublishError),
}

pub type Result<T> = std::result::Result<T, BotError>;
