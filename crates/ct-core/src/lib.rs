//! Campaign session model for a cooperative card game tracker.
//!
//! Records which scenarios a group played, with which heroes, and how it went,
//! across multi-scenario campaigns. The [`SessionStore`] owns all state and
//! mutation rules; the [`codec`] turns its persisted part into a JSON save
//! file; [`stats`] derives win rates and play counts from the log.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod stats;
pub mod store;

pub use catalog::{Campaign, Catalog};
pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult, ValidationError};
pub use session::TrackerSession;
pub use stats::CampaignStats;
pub use store::{
    CampaignNote, Health, HeroEntry, HeroSlot, NoteKind, Outcome, OutcomeDraft, OutcomeExtras,
    ScenarioOutcome, SessionStore, Snapshot,
};
