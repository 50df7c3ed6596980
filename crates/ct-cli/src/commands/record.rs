use std::path::Path;

use ct_core::session::parse_hero_slot;
use ct_core::{Outcome, OutcomeDraft, OutcomeExtras, TrackerConfig};

/// Arguments of the `record` subcommand.
pub struct RecordArgs {
    pub campaign: String,
    pub scenario: String,
    pub outcome: String,
    pub heroes: Vec<String>,
    pub notes: String,
    pub date: Option<String>,
    pub extras: OutcomeExtras,
}

pub fn run(config: TrackerConfig, file: &Path, args: RecordArgs) -> Result<(), String> {
    let mut store = super::open_existing(config, file)?;

    let campaign = super::resolve_campaign(&store, &args.campaign)?;
    let scenario = store
        .catalog()
        .find_scenario(&campaign, &args.scenario)
        .unwrap_or(args.scenario.as_str())
        .to_string();
    let outcome: Outcome = args.outcome.parse().map_err(|e| format!("{e}"))?;
    let date = super::parse_date(args.date.as_deref())?;

    let mut draft = OutcomeDraft::new(campaign, scenario, outcome, date)
        .notes(args.notes)
        .extras(args.extras);
    for raw in &args.heroes {
        draft = draft.hero(parse_hero_slot(raw, store.catalog()).map_err(|e| e.to_string())?);
    }

    if super::report(store.record_scenario_outcome(draft))? {
        super::save(&store, file)?;
    }
    Ok(())
}
