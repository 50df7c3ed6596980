//! Error types for the campaign tracker.

use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// A rejected mutation. The store is left untouched whenever one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Player name was empty.
    #[error("player name is empty")]
    EmptyPlayerName,

    /// Player is already on the roster.
    #[error("player already exists: \"{0}\"")]
    DuplicatePlayer(String),

    /// No campaign (or the placeholder) was selected.
    #[error("please select a campaign")]
    NoCampaign,

    /// Campaign is not in the catalog.
    #[error("unknown campaign: \"{0}\"")]
    UnknownCampaign(String),

    /// No scenario (or the placeholder) was selected.
    #[error("please select a scenario to record its outcome")]
    NoScenario,

    /// Scenario does not belong to the campaign.
    #[error("scenario \"{scenario}\" is not part of {campaign}")]
    UnknownScenario {
        /// Campaign the outcome was recorded against.
        campaign: String,
        /// Offending scenario name.
        scenario: String,
    },

    /// Roster is empty.
    #[error("please add at least one player")]
    NoPlayers,

    /// Number of heroes is outside 1..=max or above the roster size.
    #[error("{count} heroes played, expected between 1 and {max}")]
    HeroCount {
        /// Heroes submitted.
        count: usize,
        /// Upper bound at the time of entry.
        max: usize,
    },

    /// A hero slot was left on the placeholder.
    #[error("please select a hero for slot {0}")]
    NoHero(usize),

    /// An aspect slot was left on the placeholder.
    #[error("please select an aspect for slot {0}")]
    NoAspect(usize),

    /// Outcome was neither a win nor a loss.
    #[error("invalid outcome: \"{0}\" (expected win or loss)")]
    InvalidOutcome(String),

    /// Note content was empty.
    #[error("please enter a note to add")]
    EmptyNote,
}

impl ValidationError {
    /// Whether this is a soft warning rather than an error.
    ///
    /// Duplicate and empty player names are no-ops the user may safely ignore.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyPlayerName | Self::DuplicatePlayer(_))
    }
}

/// Errors that can occur while tracking a campaign.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Save file could not be decoded.
    #[error("cannot load save file: {0}")]
    Parse(String),

    /// Save file could not be read or written.
    #[error("cannot access {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// Catalog file is invalid.
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Unknown session command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Malformed command arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TrackerError {
    /// Whether this error should be shown as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Validation(v) if v.is_warning())
    }
}
