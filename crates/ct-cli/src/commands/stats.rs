use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ct_core::{CampaignStats, TrackerConfig};

pub fn run(config: TrackerConfig, file: &Path, campaign: &str) -> Result<(), String> {
    let store = super::open_existing(config, file)?;
    let campaign = super::resolve_campaign(&store, campaign)?;
    let stats = CampaignStats::compute(&store.outcomes_for(&campaign));

    let r = stats.record;
    println!("  {}", campaign.bold());
    println!(
        "  {} wins, {} losses ({} played)",
        r.wins, r.losses, r.total
    );

    if stats.scenarios.is_empty() {
        println!("  No scenarios recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scenario", "Wins", "Losses", "Total", "Win %"]);
    for s in &stats.scenarios {
        table.add_row(vec![
            s.scenario.clone(),
            s.wins.to_string(),
            s.losses.to_string(),
            s.total.to_string(),
            format!("{:.2}", s.win_percentage),
        ]);
    }
    println!("{table}");

    let mut heroes = Table::new();
    heroes.set_content_arrangement(ContentArrangement::Dynamic);
    heroes.set_header(vec!["Hero", "Plays"]);
    for (hero, count) in &stats.heroes {
        heroes.add_row(vec![hero.clone(), count.to_string()]);
    }
    println!("{heroes}");

    if !stats.aspects.is_empty() {
        let mut aspects = Table::new();
        aspects.set_content_arrangement(ContentArrangement::Dynamic);
        aspects.set_header(vec!["Aspect", "Plays"]);
        for (aspect, count) in &stats.aspects {
            aspects.add_row(vec![aspect.clone(), count.to_string()]);
        }
        println!("{aspects}");
    }

    Ok(())
}
