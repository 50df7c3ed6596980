//! Scenario outcomes and the hero entries they carry.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Wire label for a defeated hero's health.
pub const DEFEATED_LABEL: &str = "N/A (Loss)";

/// Result of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The heroes defeated the villain.
    Win,
    /// The heroes lost.
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => f.pad("Win"),
            Self::Loss => f.pad("Loss"),
        }
    }
}

impl FromStr for Outcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" | "w" => Ok(Self::Win),
            "loss" | "lose" | "l" => Ok(Self::Loss),
            other => Err(ValidationError::InvalidOutcome(other.to_string())),
        }
    }
}

/// Health a hero ended the scenario with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHealth", into = "RawHealth")]
pub enum Health {
    /// Hit points left after a win.
    Remaining(u32),
    /// Defeated, or not applicable because the scenario was lost.
    Defeated,
}

impl Health {
    /// Hit points remaining, if any are tracked.
    pub fn points(self) -> Option<u32> {
        match self {
            Self::Remaining(hp) => Some(hp),
            Self::Defeated => None,
        }
    }
}

/// Save-file form of [`Health`]: a number, or an `N/A` label.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawHealth {
    Points(u32),
    Label(String),
}

impl TryFrom<RawHealth> for Health {
    type Error = String;

    fn try_from(raw: RawHealth) -> Result<Self, Self::Error> {
        match raw {
            RawHealth::Points(hp) => Ok(Self::Remaining(hp)),
            RawHealth::Label(label) if label.starts_with("N/A") => Ok(Self::Defeated),
            RawHealth::Label(label) => Err(format!("invalid health_remaining: \"{label}\"")),
        }
    }
}

impl From<Health> for RawHealth {
    fn from(health: Health) -> Self {
        match health {
            Health::Remaining(hp) => Self::Points(hp),
            Health::Defeated => Self::Label(DEFEATED_LABEL.to_string()),
        }
    }
}

/// One hero as recorded in a scenario outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroEntry {
    /// Hero name.
    pub hero: String,
    /// Aspect played, when tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    /// Health at the end of the scenario.
    pub health_remaining: Health,
}

impl fmt::Display for HeroEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hero)?;
        if let Some(aspect) = &self.aspect {
            write!(f, " [{aspect}]")?;
        }
        if let Health::Remaining(hp) = self.health_remaining {
            write!(f, " ({hp} HP)")?;
        }
        Ok(())
    }
}

/// Optional fields added by later save-file revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeExtras {
    /// Difficulty tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Modular encounter sets, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modular_sets: Option<String>,
    /// Villain health left on a loss.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub villain_health_remaining: Option<u32>,
    /// Number of rounds played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns_taken: Option<u32>,
    /// Threat on the main scheme at the end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_on_main_scheme: Option<u32>,
}

impl OutcomeExtras {
    /// Whether no extension field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A recorded scenario play. Never modified after it enters the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Campaign the scenario belongs to.
    pub campaign: String,
    /// Scenario name.
    pub scenario: String,
    /// Heroes in slot order.
    pub heroes_played: Vec<HeroEntry>,
    /// Win or loss.
    pub outcome: Outcome,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Day the scenario was played.
    pub date: NaiveDate,
    /// Extension fields.
    #[serde(flatten)]
    pub extras: OutcomeExtras,
}

impl ScenarioOutcome {
    /// Hero names joined for display.
    pub fn hero_names(&self) -> String {
        self.heroes_played
            .iter()
            .map(|h| h.hero.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Heroes with health joined for display.
    pub fn heroes_display(&self) -> String {
        self.heroes_played
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Confirmation message shown after recording.
    pub fn summary(&self) -> String {
        format!(
            "'{}' played with '{}' recorded as {} in {}!",
            self.scenario,
            self.hero_names(),
            self.outcome,
            self.campaign
        )
    }
}

/// A hero slot as filled in by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlot {
    /// Selected hero, possibly the placeholder.
    pub hero: String,
    /// Selected aspect, possibly the placeholder.
    pub aspect: Option<String>,
    /// Health entered for a win.
    pub health: Option<u32>,
}

impl HeroSlot {
    /// A slot holding `hero`.
    pub fn new(hero: impl Into<String>) -> Self {
        Self {
            hero: hero.into(),
            aspect: None,
            health: None,
        }
    }

    /// Set the aspect.
    pub fn with_aspect(mut self, aspect: impl Into<String>) -> Self {
        self.aspect = Some(aspect.into());
        self
    }

    /// Set the health remaining.
    pub fn with_health(mut self, hp: u32) -> Self {
        self.health = Some(hp);
        self
    }
}

/// Unvalidated input for recording a scenario outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDraft {
    /// Campaign name.
    pub campaign: String,
    /// Scenario name, possibly the placeholder.
    pub scenario: String,
    /// Hero slots in order.
    pub heroes: Vec<HeroSlot>,
    /// Win or loss.
    pub outcome: Outcome,
    /// Free-text notes.
    pub notes: String,
    /// Day played.
    pub date: NaiveDate,
    /// Extension fields.
    pub extras: OutcomeExtras,
}

impl OutcomeDraft {
    /// Start a draft with no heroes and no notes.
    pub fn new(
        campaign: impl Into<String>,
        scenario: impl Into<String>,
        outcome: Outcome,
        date: NaiveDate,
    ) -> Self {
        Self {
            campaign: campaign.into(),
            scenario: scenario.into(),
            heroes: Vec::new(),
            outcome,
            notes: String::new(),
            date,
            extras: OutcomeExtras::default(),
        }
    }

    /// Add a hero slot.
    pub fn hero(mut self, slot: HeroSlot) -> Self {
        self.heroes.push(slot);
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the extension fields.
    pub fn extras(mut self, extras: OutcomeExtras) -> Self {
        self.extras = extras;
        self
    }

    /// Turn a validated draft into a log entry.
    ///
    /// Health is only kept on a win (missing values become 0); a loss marks
    /// every hero defeated. Villain health is only kept on a loss.
    pub(crate) fn into_outcome(self) -> ScenarioOutcome {
        let outcome = self.outcome;
        let heroes_played = self
            .heroes
            .into_iter()
            .map(|slot| HeroEntry {
                hero: slot.hero,
                aspect: slot.aspect,
                health_remaining: match outcome {
                    Outcome::Win => Health::Remaining(slot.health.unwrap_or(0)),
                    Outcome::Loss => Health::Defeated,
                },
            })
            .collect();

        let mut extras = self.extras;
        if outcome == Outcome::Win {
            extras.villain_health_remaining = None;
        }

        ScenarioOutcome {
            campaign: self.campaign,
            scenario: self.scenario,
            heroes_played,
            outcome,
            notes: self.notes,
            date: self.date,
            extras,
        }
    }
}
