use radio_core::orchestrator;
use radio_core::{Config, Credentials};
use std::path::PathBuf;

/// Non-secret settings taken from flags or their environment fallbacks.
pub struct Settings {
    pub db: PathBuf,
    pub prompt: PathBuf,
    pub gemini_url: String,
    pub x_url: String,
}

/// Load credentials, then run the bot once. Credentials are read before
/// the store or any network endpoint is touched.
pub fn run(settings: Settings) -> radio_core::Result<String> {
    let credentials = Credentials::from_env()?;
    let config = Config {
        db_path: settings.db,
        prompt_path: settings.prompt,
        gemini_base_url: settings.gemini_url,
        x_base_url: settings.x_url,
        ..Config::new(credentials)
    };
    tracing::debug!(
        db = %config.db_path.display(),
        prompt = %config.prompt_path.display(),
        "configuration loaded"
    );
    orchestrator::run(&config)
}
