//! Statistics derived from the outcome log.
//!
//! Every function here is a pure read over the outcomes it is given; callers
//! pass the log already filtered to the campaign they want to report on.

use std::collections::BTreeMap;

use crate::catalog::NO_HERO;
use crate::store::outcome::{Outcome, ScenarioOutcome};

/// Label older save files used for an unfilled hero slot.
const LEGACY_NOT_SELECTED: &str = "N/A (Not Selected)";

/// Win/loss tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    /// Scenarios won.
    pub wins: usize,
    /// Scenarios lost.
    pub losses: usize,
    /// Wins plus losses.
    pub total: usize,
}

/// Win/loss tally for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStats {
    /// Scenario name.
    pub scenario: String,
    /// Times won.
    pub wins: usize,
    /// Times lost.
    pub losses: usize,
    /// Times played.
    pub total: usize,
    /// `wins / total * 100`, rounded to two decimals; 0 when never played.
    pub win_percentage: f64,
}

/// Everything the stats view shows for one campaign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignStats {
    /// Overall tally.
    pub record: Record,
    /// Per-scenario breakdown, best win rate first.
    pub scenarios: Vec<ScenarioStats>,
    /// Most played heroes first.
    pub heroes: Vec<(String, usize)>,
    /// Most played aspects first.
    pub aspects: Vec<(String, usize)>,
}

impl CampaignStats {
    /// Compute all statistics over `outcomes`.
    pub fn compute(outcomes: &[&ScenarioOutcome]) -> Self {
        let it = || outcomes.iter().copied();
        Self {
            record: overall_record(it()),
            scenarios: per_scenario_breakdown(it()),
            heroes: ranked(&hero_play_frequency(it())),
            aspects: ranked(&aspect_play_frequency(it())),
        }
    }
}

/// Percentage of `wins` in `total`, rounded to two decimals.
pub fn win_percentage(wins: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = wins as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Count wins and losses.
pub fn overall_record<'a>(outcomes: impl IntoIterator<Item = &'a ScenarioOutcome>) -> Record {
    let mut record = Record::default();
    for o in outcomes {
        match o.outcome {
            Outcome::Win => record.wins += 1,
            Outcome::Loss => record.losses += 1,
        }
    }
    record.total = record.wins + record.losses;
    record
}

/// Tally each distinct scenario, ordered by win percentage descending and
/// then by scenario name.
pub fn per_scenario_breakdown<'a>(
    outcomes: impl IntoIterator<Item = &'a ScenarioOutcome>,
) -> Vec<ScenarioStats> {
    let mut tally: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for o in outcomes {
        let entry = tally.entry(o.scenario.as_str()).or_default();
        match o.outcome {
            Outcome::Win => entry.0 += 1,
            Outcome::Loss => entry.1 += 1,
        }
    }

    let mut stats: Vec<ScenarioStats> = tally
        .into_iter()
        .map(|(scenario, (wins, losses))| {
            let total = wins + losses;
            ScenarioStats {
                scenario: scenario.to_string(),
                wins,
                losses,
                total,
                win_percentage: win_percentage(wins, total),
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.win_percentage
            .total_cmp(&a.win_percentage)
            .then_with(|| a.scenario.cmp(&b.scenario))
    });
    stats
}

/// How often each hero was played. Unfilled slots are not counted.
pub fn hero_play_frequency<'a>(
    outcomes: impl IntoIterator<Item = &'a ScenarioOutcome>,
) -> BTreeMap<String, usize> {
    let mut freq = BTreeMap::new();
    for o in outcomes {
        for h in &o.heroes_played {
            if h.hero == NO_HERO || h.hero == LEGACY_NOT_SELECTED {
                continue;
            }
            *freq.entry(h.hero.clone()).or_insert(0) += 1;
        }
    }
    freq
}

/// How often each aspect was played.
pub fn aspect_play_frequency<'a>(
    outcomes: impl IntoIterator<Item = &'a ScenarioOutcome>,
) -> BTreeMap<String, usize> {
    let mut freq = BTreeMap::new();
    for o in outcomes {
        for aspect in o.heroes_played.iter().filter_map(|h| h.aspect.as_ref()) {
            *freq.entry(aspect.clone()).or_insert(0) += 1;
        }
    }
    freq
}

/// Sort a frequency map by count descending, then name ascending.
pub fn ranked(freq: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = freq.iter().map(|(k, v)| (k.clone(), *v)).collect();
    // BTreeMap order is by name, so a stable sort keeps the tie-break.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}
