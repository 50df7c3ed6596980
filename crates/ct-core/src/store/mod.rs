//! The campaign session store: the single source of truth for one tracking
//! session.
//!
//! All mutation goes through [`SessionStore`]. Outcomes and notes are
//! append-only; there is no edit or delete. Reads never mutate, so the
//! presentation layer may re-read and re-validate as often as it redraws.

pub mod note;
pub mod outcome;
pub mod roster;

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, NO_ASPECT, NO_CAMPAIGN, NO_HERO, NO_SCENARIO};
use crate::config::{MAX_HEROES, TrackerConfig};
use crate::error::{TrackerError, TrackerResult, ValidationError};
use crate::stats::CampaignStats;

pub use note::{CampaignNote, NoteKind};
pub use outcome::{
    Health, HeroEntry, HeroSlot, Outcome, OutcomeDraft, OutcomeExtras, ScenarioOutcome,
};
pub use roster::Roster;

/// The persisted part of a session.
///
/// Missing fields load as empty so older save files stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Players in order of addition.
    #[serde(default)]
    pub players: Roster,
    /// Outcome log in insertion order.
    #[serde(default)]
    pub scenarios_played: Vec<ScenarioOutcome>,
    /// Notes per campaign, each list in insertion order.
    #[serde(default)]
    pub campaign_boons: BTreeMap<String, Vec<CampaignNote>>,
}

impl Snapshot {
    /// Check the invariants the public operations guarantee: unique players,
    /// 1 to [`MAX_HEROES`] heroes per entry, and health that matches the
    /// outcome (points on a win, defeated on a loss).
    pub fn validate(&self) -> TrackerResult<()> {
        if let Some(dup) = self.players.first_duplicate() {
            return Err(TrackerError::Parse(format!("duplicate player: \"{dup}\"")));
        }
        for (i, o) in self.scenarios_played.iter().enumerate() {
            let count = o.heroes_played.len();
            if count == 0 || count > MAX_HEROES {
                return Err(TrackerError::Parse(format!(
                    "scenario entry {} has {count} heroes, expected between 1 and {MAX_HEROES}",
                    i + 1
                )));
            }
            let mismatch = o.heroes_played.iter().find(|h| {
                !matches!(
                    (o.outcome, h.health_remaining),
                    (Outcome::Win, Health::Remaining(_)) | (Outcome::Loss, Health::Defeated)
                )
            });
            if let Some(h) = mismatch {
                return Err(TrackerError::Parse(format!(
                    "scenario entry {}: health of {} does not match a {}",
                    i + 1,
                    h.hero,
                    o.outcome
                )));
            }
        }
        Ok(())
    }
}

/// Mutable state of one tracking session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: TrackerConfig,
    current_campaign: String,
    data: Snapshot,
    hero_slot_preference: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl SessionStore {
    /// Create an empty store.
    pub fn new(config: TrackerConfig) -> Self {
        let current_campaign = config.catalog.default_campaign().to_string();
        let hero_slot_preference = config.hero_slot_preference;
        Self {
            config,
            current_campaign,
            data: Snapshot::default(),
            hero_slot_preference,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Reference data.
    pub fn catalog(&self) -> &Catalog {
        &self.config.catalog
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a player to the end of the roster.
    pub fn add_player(&mut self, name: &str) -> TrackerResult<String> {
        match self.data.players.add(name) {
            Ok(()) => {
                debug!(player = name, "player added");
                Ok(format!("Player '{name}' added!"))
            }
            Err(e) => {
                warn!(player = name, "player rejected: {e}");
                Err(e.into())
            }
        }
    }

    /// Validate and append a scenario outcome. Returns a summary on success.
    pub fn record_scenario_outcome(&mut self, draft: OutcomeDraft) -> TrackerResult<String> {
        if let Err(e) = self.validate_draft(&draft) {
            warn!(scenario = %draft.scenario, "outcome rejected: {e}");
            return Err(e.into());
        }
        let outcome = draft.into_outcome();
        let summary = outcome.summary();
        debug!(
            campaign = %outcome.campaign,
            scenario = %outcome.scenario,
            outcome = %outcome.outcome,
            "outcome recorded"
        );
        self.data.scenarios_played.push(outcome);
        Ok(summary)
    }

    /// Check a draft without recording it.
    pub fn validate_draft(&self, draft: &OutcomeDraft) -> Result<(), ValidationError> {
        let campaign = self.known_campaign(&draft.campaign)?;

        if draft.scenario.is_empty() || draft.scenario == NO_SCENARIO {
            return Err(ValidationError::NoScenario);
        }
        if !campaign.has_scenario(&draft.scenario) {
            return Err(ValidationError::UnknownScenario {
                campaign: campaign.name.clone(),
                scenario: draft.scenario.clone(),
            });
        }

        if self.data.players.is_empty() {
            return Err(ValidationError::NoPlayers);
        }
        let max = MAX_HEROES.min(self.data.players.len());
        let count = draft.heroes.len();
        if count == 0 || count > max {
            return Err(ValidationError::HeroCount { count, max });
        }

        for (i, slot) in draft.heroes.iter().enumerate() {
            if slot.hero.trim().is_empty() || slot.hero == NO_HERO {
                return Err(ValidationError::NoHero(i + 1));
            }
            match slot.aspect.as_deref() {
                Some(a) if a.trim().is_empty() || a == NO_ASPECT => {
                    return Err(ValidationError::NoAspect(i + 1));
                }
                None if self.config.track_aspects => {
                    return Err(ValidationError::NoAspect(i + 1));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Append a note to `campaign`'s list.
    pub fn add_campaign_note(
        &mut self,
        campaign: &str,
        kind: Option<NoteKind>,
        content: &str,
        date: NaiveDate,
    ) -> TrackerResult<String> {
        if content.trim().is_empty() {
            warn!(campaign, "note rejected: empty content");
            return Err(ValidationError::EmptyNote.into());
        }
        let campaign = self.known_campaign(campaign)?.name.clone();
        self.data
            .campaign_boons
            .entry(campaign.clone())
            .or_default()
            .push(CampaignNote {
                date,
                note: content.to_string(),
                kind,
            });
        debug!(campaign = %campaign, "note added");
        Ok(format!("Note added to {campaign} campaign log!"))
    }

    /// Point the session at another catalog campaign. Stored data is untouched.
    pub fn select_campaign(&mut self, campaign: &str) -> TrackerResult<()> {
        if self.catalog().campaign(campaign).is_none() {
            return Err(ValidationError::UnknownCampaign(campaign.to_string()).into());
        }
        debug!(campaign, "campaign selected");
        self.current_campaign = campaign.to_string();
        Ok(())
    }

    /// Store the preferred number of hero slots (at least 1). See
    /// [`Self::hero_slots`].
    pub fn set_hero_slot_preference(&mut self, slots: usize) {
        self.hero_slot_preference = slots.max(1);
    }

    /// Discard everything and return to the initial state.
    pub fn reset(&mut self) {
        info!(
            players = self.data.players.len(),
            outcomes = self.data.scenarios_played.len(),
            "session reset"
        );
        *self = Self::new(self.config.clone());
    }

    /// Copy of the persisted state.
    pub fn export_snapshot(&self) -> Snapshot {
        self.data.clone()
    }

    /// Replace the persisted state wholesale.
    ///
    /// The snapshot is validated first; on error nothing changes. On success
    /// the campaign selection and hero-slot preference go back to defaults.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> TrackerResult<()> {
        snapshot.validate()?;
        info!(
            players = snapshot.players.len(),
            outcomes = snapshot.scenarios_played.len(),
            "snapshot imported"
        );
        let mut fresh = Self::new(self.config.clone());
        fresh.data = snapshot;
        *self = fresh;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Players in order of addition.
    pub fn players(&self) -> &[String] {
        self.data.players.names()
    }

    /// Currently selected campaign.
    pub fn current_campaign(&self) -> &str {
        &self.current_campaign
    }

    /// Whether a real campaign is selected and at least one player exists.
    pub fn is_ready(&self) -> bool {
        self.current_campaign != NO_CAMPAIGN && !self.data.players.is_empty()
    }

    /// Number of hero slots to show: `min(preference, players, MAX_HEROES)`.
    pub fn hero_slots(&self) -> usize {
        self.hero_slot_preference
            .min(self.data.players.len())
            .min(MAX_HEROES)
    }

    /// Full outcome log across all campaigns, in insertion order.
    pub fn outcome_log(&self) -> &[ScenarioOutcome] {
        &self.data.scenarios_played
    }

    /// Outcomes of `campaign`, most recent first.
    pub fn outcomes_for(&self, campaign: &str) -> Vec<&ScenarioOutcome> {
        let mut out: Vec<_> = self
            .data
            .scenarios_played
            .iter()
            .filter(|o| o.campaign == campaign)
            .collect();
        out.sort_by_key(|o| Reverse(o.date));
        out
    }

    /// Outcomes of the current campaign, most recent first.
    pub fn campaign_outcomes(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes_for(&self.current_campaign)
    }

    /// Notes of `campaign`, most recent first.
    pub fn notes_for(&self, campaign: &str) -> Vec<&CampaignNote> {
        let mut out: Vec<_> = self
            .data
            .campaign_boons
            .get(campaign)
            .map(|notes| notes.iter().collect())
            .unwrap_or_default();
        out.sort_by_key(|n| Reverse(n.date));
        out
    }

    /// Notes of the current campaign, most recent first.
    pub fn campaign_notes(&self) -> Vec<&CampaignNote> {
        self.notes_for(&self.current_campaign)
    }

    /// Every campaign's notes.
    pub fn all_notes(&self) -> &BTreeMap<String, Vec<CampaignNote>> {
        &self.data.campaign_boons
    }

    /// Statistics for the current campaign.
    pub fn stats(&self) -> CampaignStats {
        CampaignStats::compute(&self.campaign_outcomes())
    }

    fn known_campaign(&self, name: &str) -> Result<&crate::catalog::Campaign, ValidationError> {
        if name.is_empty() || name == NO_CAMPAIGN {
            return Err(ValidationError::NoCampaign);
        }
        self.catalog()
            .campaign(name)
            .ok_or_else(|| ValidationError::UnknownCampaign(name.to_string()))
    }
}
