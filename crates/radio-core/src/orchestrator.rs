//! One run of the bot: generate, log, persist, publish, log.
//!
//! ```text
//! Init → CredentialsLoaded → NameGenerated → Persisted → Published → Done
//!   └──────────────┴───────────────┴────────────┴───────────┴──→ Aborted
//! ```
//!
//! Every failure is terminal. Nothing is retried and nothing is rolled
//! back: a name persisted before a failed publish stays persisted.

use std::path::{Path, PathBuf};

use gemini_client::GeminiClient;

use crate::config::Config;
use crate::error::{BotError, Result};
use crate::generator::{self, NameGenerator};
use crate::log::{self, LogLevel};
use crate::publisher::{Publisher, XPublisher};
use crate::store::{NameStore, SqliteNameStore};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Process started; credentials not read yet.
    Init,
    CredentialsLoaded,
    NameGenerated,
    Persisted,
    Published,
    Done,
    Aborted,
}

/// Drives one run over injected collaborators.
///
/// Holding the collaborators implies the credentials they were built from
/// were loaded, so a new orchestrator starts at `CredentialsLoaded`.
pub struct Orchestrator<S, G, P> {
    store: S,
    generator: G,
    publisher: P,
    template_path: PathBuf,
    stage: Stage,
}

impl<S, G, P> Orchestrator<S, G, P>
where
    S: NameStore,
    G: NameGenerator,
    P: Publisher,
{
    pub fn new(store: S, generator: G, publisher: P, template_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            generator,
            publisher,
            template_path: template_path.into(),
            stage: Stage::CredentialsLoaded,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn enter(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "stage transition");
        self.stage = next;
    }

    /// Run to `Done` and return the published name, or stop at `Aborted`.
    pub fn run(&mut self) -> Result<String> {
        match self.advance() {
            Ok(name) => Ok(name),
            Err(e) => {
                self.enter(Stage::Aborted);
                Err(e)
            }
        }
    }

    fn advance(&mut self) -> Result<String> {
        let name = generator::generate_name(&self.store, &self.generator, &self.template_path)?;
        self.enter(Stage::NameGenerated);
        log::emit(LogLevel::Info, &format!("Generated radio name: {name}"));

        self.store.insert(&name)?;
        self.enter(Stage::Persisted);

        self.publisher.publish(&name)?;
        self.enter(Stage::Published);
        log::emit(LogLevel::Info, &format!("Posted radio name: {name}"));

        self.enter(Stage::Done);
        Ok(name)
    }
}

/// Build the production collaborators from `config` and run once.
pub fn run(config: &Config) -> Result<String> {
    let store = SqliteNameStore::new(&config.db_path);
    let generator = GeminiClient::new(config.credentials.gemini_api_key.as_str())
        .with_base_url(config.gemini_base_url.as_str());
    let publisher =
        XPublisher::new(&config.credentials.x).with_base_url(config.x_base_url.as_str());

    Orchestrator::new(store, generator, publisher, &config.prompt_path).run()
}

/// Log a failed run at ERROR and map the outcome to a process exit code.
pub fn exit_code<T>(outcome: &std::result::Result<T, BotError>) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(e) => {
            log::emit(LogLevel::Error, &e.to_string());
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
