use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use ct_core::{ScenarioOutcome, TrackerConfig};

pub fn run(config: TrackerConfig, file: &Path, campaign: Option<&str>) -> Result<(), String> {
    let store = super::open_existing(config, file)?;

    let outcomes: Vec<&ScenarioOutcome> = match campaign {
        Some(name) => {
            let canonical = super::resolve_campaign(&store, name)?;
            store.outcomes_for(&canonical)
        }
        None => {
            let mut all: Vec<_> = store.outcome_log().iter().collect();
            all.sort_by_key(|o| std::cmp::Reverse(o.date));
            all
        }
    };

    if outcomes.is_empty() {
        println!("  No scenarios recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Campaign", "Scenario", "Heroes", "Outcome", "Notes"]);

    for o in &outcomes {
        let notes = if o.notes.is_empty() {
            "-".to_string()
        } else {
            o.notes.clone()
        };
        table.add_row(vec![
            o.date.to_string(),
            o.campaign.clone(),
            o.scenario.clone(),
            o.heroes_display(),
            o.outcome.to_string(),
            notes,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenarios", outcomes.len());

    Ok(())
}
