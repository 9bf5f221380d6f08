mod cmd;

use clap::{Parser, Subcommand};
use radio_core::config::{
    DEFAULT_DB_FILE, DEFAULT_GEMINI_BASE_URL, DEFAULT_PROMPT_FILE, DEFAULT_X_BASE_URL,
};
use radio_core::log::{self, LogLevel};
use radio_core::orchestrator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "radio-bot",
    about = "Invent a radio station name nobody has used yet, record it, and post it to X",
    version,
    propagate_version = true
)]
struct Cli {
    /// SQLite file holding every name generated so far
    #[arg(long, global = true, env = "RADIO_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Prompt template; past names are appended to its contents
    #[arg(long, global = true, env = "RADIO_PROMPT", default_value = DEFAULT_PROMPT_FILE)]
    prompt: PathBuf,

    /// Gemini API base URL
    #[arg(long, global = true, env = "RADIO_GEMINI_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_url: String,

    /// X API base URL
    #[arg(long, global = true, env = "RADIO_X_URL", default_value = DEFAULT_X_BASE_URL)]
    x_url: String,

    /// Lowest level to print: DEBUG, INFO, WARNING or ERROR
    #[arg(long, global = true, env = "RADIO_LOG_LEVEL", default_value = "INFO")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, store and post one new name (default)
    Run,

    /// Create the names table if it does not exist
    Init,

    /// List every stored name
    Names {
        /// Output as JSON
        #[arg(long, short = 'j')]
        json: bool,
    },
}

fn report(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::emit(LogLevel::Error, &e.to_string());
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    log::init(cli.log_level);

    let code = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let settings = cmd::run::Settings {
                db: cli.db,
                prompt: cli.prompt,
                gemini_url: cli.gemini_url,
                x_url: cli.x_url,
            };
            orchestrator::exit_code(&cmd::run::run(settings))
        }
        Commands::Init => report(cmd::init::run(&cli.db)),
        Commands::Names { json } => report(cmd::names::run(&cli.db, json)),
    };

    if code != 0 {
        std::process::exit(code);
    }
}
