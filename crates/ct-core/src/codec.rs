//! Save-file codec.
//!
//! A save file is a JSON document with three optional top-level fields:
//! `players`, `scenarios_played` and `campaign_boons`. The campaign selection
//! is session state and is never written. The file extension carries no
//! meaning.

use std::path::Path;

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::store::{SessionStore, Snapshot};

/// Encode a snapshot as pretty-printed JSON.
pub fn serialize(snapshot: &Snapshot) -> TrackerResult<String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| TrackerError::Parse(e.to_string()))
}

/// Decode and validate a save file.
///
/// Malformed syntax, wrong types or broken invariants yield
/// [`TrackerError::Parse`]. Missing fields load as empty.
pub fn deserialize(text: &str) -> TrackerResult<Snapshot> {
    let snapshot: Snapshot =
        serde_json::from_str(text).map_err(|e| TrackerError::Parse(e.to_string()))?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Write a store's persisted state to `path`.
pub fn save_to_path(store: &SessionStore, path: &Path) -> TrackerResult<()> {
    let text = serialize(&store.export_snapshot())?;
    std::fs::write(path, text).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), "session saved");
    Ok(())
}

/// Read and decode a save file.
pub fn load_from_path(path: &Path) -> TrackerResult<Snapshot> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let snapshot = deserialize(&text)?;
    info!(path = %path.display(), "save file loaded");
    Ok(snapshot)
}

/// Load `path` into `store`. On any error the store is left as it was.
pub fn load_into(store: &mut SessionStore, path: &Path) -> TrackerResult<()> {
    let snapshot = load_from_path(path)?;
    store.import_snapshot(snapshot)
}

fn io_error(path: &Path, e: std::io::Error) -> TrackerError {
    TrackerError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NO_CAMPAIGN;
    use crate::store::{HeroSlot, NoteKind, Outcome, OutcomeDraft, OutcomeExtras};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn populated() -> SessionStore {
        let mut store = SessionStore::default();
        store.add_player("Alice").unwrap();
        store.add_player("Bob").unwrap();
        store
            .record_scenario_outcome(
                OutcomeDraft::new("Rise of Red Skull", "Crossbones", Outcome::Win, day(1))
                    .hero(HeroSlot::new("Iron Man").with_health(5))
                    .hero(HeroSlot::new("Captain America").with_health(3))
                    .notes("first session"),
            )
            .unwrap();
        store
            .record_scenario_outcome(
                OutcomeDraft::new("Rise of Red Skull", "Absorbing Man", Outcome::Loss, day(2))
                    .hero(HeroSlot::new("Thor").with_aspect("Aggression"))
                    .extras(OutcomeExtras {
                        difficulty: Some("Expert".into()),
                        modular_sets: Some("Hydra Patrol".into()),
                        villain_health_remaining: Some(4),
                        turns_taken: Some(11),
                        threat_on_main_scheme: Some(12),
                    }),
            )
            .unwrap();
        store
            .add_campaign_note("Rise of Red Skull", Some(NoteKind::Boon), "+1 HP", day(2))
            .unwrap();
        store
            .add_campaign_note("Rise of Red Skull", None, "Obligation", day(2))
            .unwrap();
        store
    }

    #[test]
    fn roundtrip_preserves_everything() {
        let store = populated();
        let snapshot = store.export_snapshot();
        let text = serialize(&snapshot).unwrap();
        assert_eq!(deserialize(&text).unwrap(), snapshot);
    }

    #[test]
    fn top_level_field_names() {
        let text = serialize(&populated().export_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("players").is_some());
        assert!(value.get("scenarios_played").is_some());
        assert!(value.get("campaign_boons").is_some());
        assert!(value.get("selected_campaign").is_none());
        assert_eq!(value["scenarios_played"][1]["difficulty"], "Expert");
        assert_eq!(
            value["scenarios_played"][1]["heroes_played"][0]["health_remaining"],
            "N/A (Loss)"
        );
    }

    #[test]
    fn players_only_document_loads() {
        let snapshot = deserialize(r#"{ "players": ["Alice"] }"#).unwrap();
        assert_eq!(snapshot.players.names(), ["Alice"]);
        assert!(snapshot.scenarios_played.is_empty());
        assert!(snapshot.campaign_boons.is_empty());
    }

    #[test]
    fn empty_document_loads() {
        assert_eq!(deserialize("{}").unwrap(), Snapshot::default());
    }

    #[test]
    fn older_schema_loads() {
        let text = r#"{
            "players": ["Alice"],
            "scenarios_played": [{
                "campaign": "Rise of Red Skull",
                "scenario": "Zola",
                "heroes_played": [{ "hero": "Hulk", "health_remaining": "N/A (Loss)" }],
                "outcome": "Loss",
                "notes": "",
                "date": "2023-12-24"
            }],
            "campaign_boons": {
                "Rise of Red Skull": [{ "date": "2023-12-24", "note": "Permanent +1 HP" }]
            }
        }"#;
        let snapshot = deserialize(text).unwrap();
        let o = &snapshot.scenarios_played[0];
        assert!(o.extras.is_empty());
        assert_eq!(o.heroes_played[0].aspect, None);
        assert_eq!(snapshot.campaign_boons["Rise of Red Skull"][0].kind, None);
    }

    #[test]
    fn malformed_is_parse_error() {
        assert!(matches!(
            deserialize("{ players: "),
            Err(TrackerError::Parse(_))
        ));
        assert!(matches!(
            deserialize(r#"{ "players": 3 }"#),
            Err(TrackerError::Parse(_))
        ));
    }

    #[test]
    fn too_many_heroes_is_parse_error() {
        let hero = r#"{ "hero": "Thor", "health_remaining": 1 }"#;
        let heroes = vec![hero; 5].join(",");
        let text = format!(
            r#"{{ "scenarios_played": [{{
                "campaign": "C", "scenario": "S", "outcome": "Win",
                "date": "2024-01-01", "heroes_played": [{heroes}]
            }}] }}"#
        );
        assert!(matches!(deserialize(&text), Err(TrackerError::Parse(_))));
    }

    fn single_entry(outcome: &str, health: &str) -> String {
        format!(
            r#"{{ "players": ["Alice"], "scenarios_played": [{{
                "campaign": "Rise of Red Skull", "scenario": "Zola",
                "outcome": "{outcome}", "date": "2024-01-01",
                "heroes_played": [{{ "hero": "Thor", "health_remaining": {health} }}]
            }}] }}"#
        )
    }

    #[test]
    fn loss_with_hit_points_is_parse_error() {
        let err = deserialize(&single_entry("Loss", "9")).unwrap_err();
        assert!(matches!(err, TrackerError::Parse(_)));
        assert!(err.to_string().contains("Thor"));
    }

    #[test]
    fn defeated_hero_on_win_is_parse_error() {
        assert!(matches!(
            deserialize(&single_entry("Win", r#""N/A (Loss)""#)),
            Err(TrackerError::Parse(_))
        ));
    }

    #[test]
    fn health_matching_outcome_loads() {
        assert!(deserialize(&single_entry("Loss", r#""N/A (Loss)""#)).is_ok());
        assert!(deserialize(&single_entry("Win", "9")).is_ok());
    }

    #[test]
    fn mismatched_health_file_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.json");
        std::fs::write(&path, single_entry("Loss", "9")).unwrap();

        let mut store = populated();
        let before = store.export_snapshot();
        assert!(matches!(
            load_into(&mut store, &path),
            Err(TrackerError::Parse(_))
        ));
        assert_eq!(store.export_snapshot(), before);
    }

    #[test]
    fn failed_load_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "not json").unwrap();

        let mut store = populated();
        let before = store.export_snapshot();
        assert!(load_into(&mut store, &path).is_err());
        assert_eq!(store.export_snapshot(), before);
    }

    #[test]
    fn save_and_load_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.sav");
        let source = populated();
        save_to_path(&source, &path).unwrap();

        let mut target = SessionStore::default();
        target.select_campaign("Mutant Genesis").unwrap();
        load_into(&mut target, &path).unwrap();
        assert_eq!(target.export_snapshot(), source.export_snapshot());
        assert_eq!(target.current_campaign(), NO_CAMPAIGN);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TrackerError::Io { .. }));
    }
}
