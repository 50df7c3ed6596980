use std::path::Path;

use ct_core::{NoteKind, TrackerConfig};

pub fn run(
    config: TrackerConfig,
    file: &Path,
    campaign: &str,
    text: &str,
    kind: Option<&str>,
    date: Option<&str>,
) -> Result<(), String> {
    let mut store = super::open_existing(config, file)?;
    let campaign = super::resolve_campaign(&store, campaign)?;
    let kind = kind
        .map(str::parse::<NoteKind>)
        .transpose()
        .map_err(|e| e.to_string())?;
    let date = super::parse_date(date)?;

    if super::report(store.add_campaign_note(&campaign, kind, text, date))? {
        super::save(&store, file)?;
    }
    Ok(())
}
