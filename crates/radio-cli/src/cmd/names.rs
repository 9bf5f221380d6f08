use radio_core::{NameStore, SqliteNameStore};
use std::path::Path;

pub fn run(db: &Path, json: bool) -> anyhow::Result<()> {
    let names = SqliteNameStore::new(db).list_all()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }
    if names.is_empty() {
        println!("No names stored yet.");
        return Ok(());
    }
    for name in &names {
        println!("{name}");
    }
    Ok(())
}
