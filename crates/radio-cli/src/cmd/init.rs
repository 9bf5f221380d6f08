use radio_core::log::{self, LogLevel};
use radio_core::SqliteNameStore;
use std::path::Path;

pub fn run(db: &Path) -> anyhow::Result<()> {
    SqliteNameStore::new(db).init()?;
    log::emit(
        LogLevel::Info,
        &format!("Name store ready at {}", db.display()),
    );
    Ok(())
}
