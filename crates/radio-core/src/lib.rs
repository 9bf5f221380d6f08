//! Core of the radio-name bot: credentials, name history, prompt building,
//! generation, publishing, logging, and the run state machine that ties
//! them together.

pub mod config;
pub mod error;
pub mod generator;
pub mod log;
pub mod oauth;
pub mod orchestrator;
pub mod prompt;
pub mod publisher;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, Credentials, XCredentials};
pub use error::{
    BotError, ConfigError, GenerateError, PromptError, PublishError, Result, StoreError,
    ValidationError,
};
pub use log::LogLevel;
pub use orchestrator::{Orchestrator, Stage};
pub use store::{NameStore, SqliteNameStore};
