//! Campaign log export.

use crate::stats::overall_record;
use crate::store::{CampaignNote, ScenarioOutcome, SessionStore};

/// Export the current campaign's log as markdown.
pub fn campaign_markdown(store: &SessionStore) -> String {
    export_markdown(
        store.current_campaign(),
        &store.campaign_outcomes(),
        &store.campaign_notes(),
    )
}

/// Export the current campaign's log as plain text.
pub fn campaign_text(store: &SessionStore) -> String {
    export_text(
        store.current_campaign(),
        &store.campaign_outcomes(),
        &store.campaign_notes(),
    )
}

/// Render a campaign log as markdown. Entries are written in the order given.
pub fn export_markdown(
    campaign: &str,
    outcomes: &[&ScenarioOutcome],
    notes: &[&CampaignNote],
) -> String {
    let mut out = format!("# {campaign}\n\n");
    out.push_str(&format!("**Record**: {}\n\n", record_line(outcomes)));

    out.push_str("## Scenario Log\n\n");
    if outcomes.is_empty() {
        out.push_str("_No scenarios recorded yet._\n\n");
    }
    for o in outcomes {
        out.push_str(&format!("### {} ({}) on {}\n\n", o.scenario, o.outcome, o.date));
        out.push_str(&format!("- **Heroes**: {}\n", o.heroes_display()));
        for (label, value) in extra_fields(o) {
            out.push_str(&format!("- **{label}**: {value}\n"));
        }
        if !o.notes.is_empty() {
            out.push_str(&format!("\n> {}\n", o.notes));
        }
        out.push('\n');
    }

    out.push_str("## Boons & Notes\n\n");
    if notes.is_empty() {
        out.push_str("_No boons or notes recorded yet._\n");
    }
    for n in notes {
        match n.kind {
            Some(kind) => out.push_str(&format!("- {} **{kind}**: {}\n", n.date, n.note)),
            None => out.push_str(&format!("- {}: {}\n", n.date, n.note)),
        }
    }
    out
}

/// Render a campaign log as plain text.
pub fn export_text(
    campaign: &str,
    outcomes: &[&ScenarioOutcome],
    notes: &[&CampaignNote],
) -> String {
    let title = format!("{campaign} Campaign Log");
    let mut out = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));
    out.push_str(&format!("Record: {}\n\n", record_line(outcomes)));

    out.push_str("Scenarios\n---------\n");
    if outcomes.is_empty() {
        out.push_str("No scenarios recorded yet.\n");
    }
    for o in outcomes {
        out.push_str(&format!("{}  {}  {}\n", o.date, o.scenario, o.outcome));
        out.push_str(&format!("  Heroes: {}\n", o.heroes_display()));
        for (label, value) in extra_fields(o) {
            out.push_str(&format!("  {label}: {value}\n"));
        }
        if !o.notes.is_empty() {
            out.push_str(&format!("  Notes: {}\n", o.notes));
        }
    }

    out.push_str("\nBoons & Notes\n-------------\n");
    if notes.is_empty() {
        out.push_str("No boons or notes recorded yet.\n");
    }
    for n in notes {
        out.push_str(&format!("{n}\n"));
    }
    out
}

fn record_line(outcomes: &[&ScenarioOutcome]) -> String {
    let r = overall_record(outcomes.iter().copied());
    format!(
        "{} win{}, {} loss{} ({} played)",
        r.wins,
        if r.wins == 1 { "" } else { "s" },
        r.losses,
        if r.losses == 1 { "" } else { "es" },
        r.total
    )
}

fn extra_fields(o: &ScenarioOutcome) -> Vec<(&'static str, String)> {
    let e = &o.extras;
    let mut fields = Vec::new();
    if let Some(d) = &e.difficulty {
        fields.push(("Difficulty", d.clone()));
    }
    if let Some(m) = &e.modular_sets {
        fields.push(("Modular sets", m.clone()));
    }
    if let Some(v) = e.villain_health_remaining {
        fields.push(("Villain health", v.to_string()));
    }
    if let Some(t) = e.turns_taken {
        fields.push(("Turns", t.to_string()));
    }
    if let Some(t) = e.threat_on_main_scheme {
        fields.push(("Main scheme threat", t.to_string()));
    }
    fields
}
