pub mod catalog;
pub mod export;
pub mod log;
pub mod note;
pub mod play;
pub mod player;
pub mod record;
pub mod stats;

use std::path::Path;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use ct_core::{Catalog, SessionStore, TrackerConfig, TrackerError, codec};

/// Build the session configuration from global flags.
pub fn config(catalog: Option<&Path>, aspects: bool) -> Result<TrackerConfig, String> {
    let mut config = TrackerConfig::default().with_aspects(aspects);
    if let Some(path) = catalog {
        config = config.with_catalog(Catalog::from_path(path).map_err(|e| e.to_string())?);
    }
    Ok(config)
}

/// Open a save file. A missing file yields an empty store.
fn open(config: TrackerConfig, file: &Path) -> Result<SessionStore, String> {
    let mut store = SessionStore::new(config);
    if file.exists() {
        codec::load_into(&mut store, file).map_err(|e| e.to_string())?;
    } else {
        tracing::debug!(path = %file.display(), "save file missing, starting empty");
    }
    Ok(store)
}

/// Open a save file that must already exist.
fn open_existing(config: TrackerConfig, file: &Path) -> Result<SessionStore, String> {
    if !file.exists() {
        return Err(format!("save file not found: {}", file.display()));
    }
    open(config, file)
}

fn save(store: &SessionStore, file: &Path) -> Result<(), String> {
    codec::save_to_path(store, file).map_err(|e| e.to_string())
}

/// Resolve a campaign name case-insensitively against the catalog.
fn resolve_campaign(store: &SessionStore, name: &str) -> Result<String, String> {
    store
        .catalog()
        .find_campaign(name)
        .map(str::to_string)
        .ok_or_else(|| format!("unknown campaign: \"{name}\""))
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => ct_core::session::parse_date(d).map_err(|e| e.to_string()),
        None => Ok(Local::now().date_naive()),
    }
}

/// Print a store result: success in plain text, warnings in yellow, and
/// propagate real errors.
fn report(result: Result<String, TrackerError>) -> Result<bool, String> {
    match result {
        Ok(msg) => {
            println!("  {msg}");
            Ok(true)
        }
        Err(e) if e.is_warning() => {
            println!("  {}", e.to_string().yellow());
            Ok(false)
        }
        Err(e) => Err(e.to_string()),
    }
}
