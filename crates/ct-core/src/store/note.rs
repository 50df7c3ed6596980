//! Campaign notes and boons.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Tag attached to a campaign note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    /// A persistent reward or modifier.
    Boon,
    /// A story decision with later consequences.
    #[serde(rename = "Narrative Choice")]
    NarrativeChoice,
    /// Anything else.
    #[serde(rename = "General Note")]
    General,
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boon => write!(f, "Boon"),
            Self::NarrativeChoice => write!(f, "Narrative Choice"),
            Self::General => write!(f, "General Note"),
        }
    }
}

impl FromStr for NoteKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boon" => Ok(Self::Boon),
            "choice" | "narrative" | "narrative choice" => Ok(Self::NarrativeChoice),
            "general" | "note" | "general note" => Ok(Self::General),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown note type: \"{other}\" (expected boon, choice or general)"
            ))),
        }
    }
}

/// A dated note recorded against a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignNote {
    /// Day the note was added.
    pub date: NaiveDate,
    /// Note text.
    pub note: String,
    /// Optional tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NoteKind>,
}

impl fmt::Display for CampaignNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} [{kind}] {}", self.date, self.note),
            None => write!(f, "{} {}", self.date, self.note),
        }
    }
}
