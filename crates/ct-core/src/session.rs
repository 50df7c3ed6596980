//! Line-oriented tracking session.
//!
//! `TrackerSession` wraps a [`SessionStore`] and turns one line of user input
//! into one store operation, returning the text to display. The interactive
//! CLI is a thin loop around [`TrackerSession::process`].

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::catalog::{Catalog, NO_HERO, NO_SCENARIO};
use crate::codec;
use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::export;
use crate::store::{HeroSlot, NoteKind, Outcome, OutcomeDraft, OutcomeExtras, SessionStore};

/// An interactive tracking session.
#[derive(Debug, Clone, Default)]
pub struct TrackerSession {
    store: SessionStore,
    save_path: Option<PathBuf>,
}

impl TrackerSession {
    /// Create a session with an empty store.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            store: SessionStore::new(config),
            save_path: None,
        }
    }

    /// Remember `path` as the default target of `save` and `load`.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Get the store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Get the store mutably.
    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    /// Default save path, if any.
    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> TrackerResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "player" => self.do_player(rest),
            "players" => Ok(self.do_players()),
            "campaigns" => Ok(self.do_campaigns()),
            "campaign" => self.do_campaign(rest),
            "scenarios" => Ok(self.do_scenarios()),
            "heroes" => Ok(self.do_heroes()),
            "record" => self.do_record(rest),
            "note" => self.do_note(rest),
            "log" => Ok(self.do_log()),
            "notes" => Ok(self.do_notes()),
            "stats" => Ok(self.do_stats()),
            "slots" => self.do_slots(rest),
            "save" => self.do_save(rest),
            "load" => self.do_load(rest),
            "export" => self.do_export(rest),
            "reset" => {
                self.store.reset();
                Ok("All campaign data has been reset.".to_string())
            }
            "status" => Ok(self.do_status()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(TrackerError::UnknownCommand(other.to_string())),
        }
    }

    fn do_player(&mut self, rest: &str) -> TrackerResult<String> {
        let (sub, name) = rest.split_once(' ').unwrap_or((rest, ""));
        if !sub.eq_ignore_ascii_case("add") {
            return Err(TrackerError::InvalidInput(
                "usage: player add <name>".to_string(),
            ));
        }
        self.store.add_player(name.trim())
    }

    fn do_players(&self) -> String {
        let players = self.store.players();
        if players.is_empty() {
            return "No players added yet.".to_string();
        }
        let mut out = format!("Players ({}):\n", players.len());
        for p in players {
            out.push_str(&format!("  - {p}\n"));
        }
        out.trim_end().to_string()
    }

    fn do_campaigns(&self) -> String {
        let mut out = String::from("Campaigns:\n");
        for c in self.store.catalog().campaigns().iter().skip(1) {
            let marker = if c.name == self.store.current_campaign() {
                "*"
            } else {
                " "
            };
            out.push_str(&format!(" {marker} {} ({} scenarios)\n", c.name, c.scenarios.len()));
        }
        out.trim_end().to_string()
    }

    fn do_campaign(&mut self, name: &str) -> TrackerResult<String> {
        if name.is_empty() {
            return Ok(format!("Current campaign: {}", self.store.current_campaign()));
        }
        let canonical = self
            .store
            .catalog()
            .find_campaign(name)
            .unwrap_or(name)
            .to_string();
        self.store.select_campaign(&canonical)?;
        Ok(format!("Tracking Campaign: {canonical}"))
    }

    fn do_scenarios(&self) -> String {
        let campaign = self.store.current_campaign();
        let scenarios = self.store.catalog().scenarios(campaign);
        if scenarios.is_empty() {
            return "Please select a campaign to begin tracking.".to_string();
        }
        let mut out = format!("Scenarios of {campaign}:\n");
        for (i, s) in scenarios.iter().enumerate() {
            out.push_str(&format!("  {}. {s}\n", i + 1));
        }
        out.trim_end().to_string()
    }

    fn do_heroes(&self) -> String {
        let heroes = self.store.catalog().heroes();
        format!("Heroes ({}):\n  {}", heroes.len(), heroes.join(", "))
    }

    fn do_record(&mut self, rest: &str) -> TrackerResult<String> {
        let draft = parse_record(rest, &self.store, today())?;
        self.store.record_scenario_outcome(draft)
    }

    fn do_note(&mut self, rest: &str) -> TrackerResult<String> {
        let (kind, content) = parse_note(rest);
        let campaign = self.store.current_campaign().to_string();
        self.store
            .add_campaign_note(&campaign, kind, content, today())
    }

    fn do_log(&self) -> String {
        let outcomes = self.store.campaign_outcomes();
        if outcomes.is_empty() {
            return format!(
                "No scenarios recorded yet for {}.",
                self.store.current_campaign()
            );
        }
        let mut out = format!("Scenario Log ({} entries):\n", outcomes.len());
        for o in outcomes {
            out.push_str(&format!(
                "  {}  {:<20} {:<4}  {}\n",
                o.date,
                o.scenario,
                o.outcome,
                o.heroes_display()
            ));
            if !o.notes.is_empty() {
                out.push_str(&format!("      {}\n", o.notes));
            }
        }
        out.trim_end().to_string()
    }

    fn do_notes(&self) -> String {
        let notes = self.store.campaign_notes();
        if notes.is_empty() {
            return format!(
                "No special boons or notes recorded yet for {}.",
                self.store.current_campaign()
            );
        }
        let mut out = format!("Campaign Boons & Notes ({}):\n", notes.len());
        for n in notes {
            out.push_str(&format!("  {n}\n"));
        }
        out.trim_end().to_string()
    }

    fn do_stats(&self) -> String {
        let stats = self.store.stats();
        let r = stats.record;
        let mut out = format!(
            "{}: {} wins, {} losses ({} played)\n",
            self.store.current_campaign(),
            r.wins,
            r.losses,
            r.total
        );
        if !stats.scenarios.is_empty() {
            out.push_str("\nWin rate by scenario:\n");
            for s in &stats.scenarios {
                out.push_str(&format!(
                    "  {:<20} {:>6.2}%  ({}W/{}L)\n",
                    s.scenario, s.win_percentage, s.wins, s.losses
                ));
            }
        }
        if !stats.heroes.is_empty() {
            out.push_str("\nMost played heroes:\n");
            for (hero, count) in &stats.heroes {
                out.push_str(&format!("  {hero}: {count}\n"));
            }
        }
        out.trim_end().to_string()
    }

    fn do_slots(&mut self, rest: &str) -> TrackerResult<String> {
        let n: usize = rest
            .parse()
            .map_err(|_| TrackerError::InvalidInput("usage: slots <number>".to_string()))?;
        self.store.set_hero_slot_preference(n);
        Ok(format!("Hero slots: {}", self.store.hero_slots()))
    }

    fn do_save(&mut self, rest: &str) -> TrackerResult<String> {
        let path = self.resolve_path(rest)?;
        codec::save_to_path(&self.store, &path)?;
        let msg = format!("Saved to {}", path.display());
        self.save_path = Some(path);
        Ok(msg)
    }

    fn do_load(&mut self, rest: &str) -> TrackerResult<String> {
        let path = self.resolve_path(rest)?;
        codec::load_into(&mut self.store, &path)?;
        let msg = format!(
            "Loaded {} ({} players, {} scenarios)",
            path.display(),
            self.store.players().len(),
            self.store.outcome_log().len()
        );
        self.save_path = Some(path);
        Ok(msg)
    }

    fn do_export(&self, format: &str) -> TrackerResult<String> {
        match format.to_lowercase().as_str() {
            "" | "markdown" | "md" => Ok(export::campaign_markdown(&self.store)),
            "text" | "txt" => Ok(export::campaign_text(&self.store)),
            other => Err(TrackerError::InvalidInput(format!(
                "unsupported format: \"{other}\". Use: markdown, text"
            ))),
        }
    }

    fn do_status(&self) -> String {
        let mut out = format!(
            "Campaign: {}\nPlayers: {}\nScenarios recorded: {} ({} in this campaign)\nHero slots: {}",
            self.store.current_campaign(),
            self.store.players().len(),
            self.store.outcome_log().len(),
            self.store.campaign_outcomes().len(),
            self.store.hero_slots(),
        );
        if !self.store.is_ready() {
            out.push_str("\nSelect a campaign and add at least one player to start tracking.");
        }
        out
    }

    fn resolve_path(&self, rest: &str) -> TrackerResult<PathBuf> {
        if !rest.is_empty() {
            return Ok(PathBuf::from(rest));
        }
        self.save_path
            .clone()
            .ok_or_else(|| TrackerError::InvalidInput("no file given".to_string()))
    }
}

const HELP: &str = "\
Commands:
  player add <name>          Add a player
  players                    List players
  campaigns                  List campaigns
  campaign <name>            Select a campaign
  scenarios                  List the current campaign's scenarios
  heroes                     List heroes
  record <scenario> | <win|loss> | <hero[:aspect][=hp], ...> [| notes [| YYYY-MM-DD [| key=value, ...]]]
                             Record a scenario outcome
                             (keys: difficulty, sets, villain, turns, threat)
  note [boon|choice|general:] <text>
                             Add a campaign note or boon
  log                        Show the scenario log
  notes                      Show campaign notes
  stats                      Show statistics
  slots <n>                  Set the number of hero slots
  save [file] / load [file]  Save or load the campaign
  export [markdown|text]     Print the campaign log
  reset                      Discard all data
  status                     Show session status
  quit                       Exit";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse `scenario | outcome | heroes [| notes [| date [| extras]]]` against
/// the store's current campaign.
pub fn parse_record(
    input: &str,
    store: &SessionStore,
    default_date: NaiveDate,
) -> TrackerResult<OutcomeDraft> {
    let parts: Vec<&str> = input.split('|').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(TrackerError::InvalidInput(
            "usage: record <scenario> | <win|loss> | <hero[:aspect][=hp], ...> [| notes [| date]]"
                .to_string(),
        ));
    }

    let catalog = store.catalog();
    let campaign = store.current_campaign();
    let scenario = match parts[0] {
        "" => NO_SCENARIO,
        s => catalog.find_scenario(campaign, s).unwrap_or(s),
    };
    let outcome: Outcome = parts[1].parse()?;

    let mut draft = OutcomeDraft::new(campaign, scenario, outcome, default_date);
    for raw in parts[2].split(',') {
        draft = draft.hero(parse_hero_slot(raw.trim(), catalog)?);
    }

    if let Some(notes) = parts.get(3) {
        draft = draft.notes(*notes);
    }
    if let Some(date) = parts.get(4).filter(|d| !d.is_empty()) {
        draft.date = parse_date(date)?;
    }
    if let Some(extras) = parts.get(5) {
        draft = draft.extras(parse_extras(extras)?);
    }
    Ok(draft)
}

/// Parse one `hero[:aspect][=hp]` slot. An empty slot is the placeholder.
///
/// Names are matched case-insensitively against the catalog and kept as typed
/// when not found.
pub fn parse_hero_slot(raw: &str, catalog: &Catalog) -> TrackerResult<HeroSlot> {
    let (rest, health) = match raw.rsplit_once('=') {
        Some((rest, hp)) => {
            let hp = hp.trim().parse::<u32>().map_err(|_| {
                TrackerError::InvalidInput(format!("invalid health for \"{}\": {hp}", rest.trim()))
            })?;
            (rest.trim(), Some(hp))
        }
        None => (raw, None),
    };
    let (hero, aspect) = match rest.split_once(':') {
        Some((hero, aspect)) => (hero.trim(), Some(aspect.trim())),
        None => (rest, None),
    };

    let hero = match hero {
        "" => NO_HERO,
        h => catalog.find_hero(h).unwrap_or(h),
    };
    let mut slot = HeroSlot::new(hero);
    if let Some(aspect) = aspect {
        slot = slot.with_aspect(catalog.find_aspect(aspect).unwrap_or(aspect));
    }
    slot.health = health;
    Ok(slot)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidInput(format!("invalid date: \"{s}\" (use YYYY-MM-DD)")))
}

/// Parse `key=value, ...` extension fields.
pub fn parse_extras(input: &str) -> TrackerResult<OutcomeExtras> {
    let mut extras = OutcomeExtras::default();
    for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            TrackerError::InvalidInput(format!("expected key=value, got \"{pair}\""))
        })?;
        let value = value.trim();
        let number = || {
            value
                .parse::<u32>()
                .map_err(|_| TrackerError::InvalidInput(format!("{key} must be a number")))
        };
        match key.trim().to_lowercase().as_str() {
            "difficulty" => extras.difficulty = Some(value.to_string()),
            "sets" | "modular" => extras.modular_sets = Some(value.to_string()),
            "villain" => extras.villain_health_remaining = Some(number()?),
            "turns" => extras.turns_taken = Some(number()?),
            "threat" => extras.threat_on_main_scheme = Some(number()?),
            other => {
                return Err(TrackerError::InvalidInput(format!(
                    "unknown field: \"{other}\""
                )));
            }
        }
    }
    Ok(extras)
}

/// Split an optional `kind:` prefix off a note.
pub fn parse_note(input: &str) -> (Option<NoteKind>, &str) {
    if let Some((prefix, text)) = input.split_once(':')
        && let Ok(kind) = prefix.parse::<NoteKind>()
    {
        return (Some(kind), text.trim());
    }
    (None, input.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NO_CAMPAIGN;
    use crate::error::ValidationError;
    use crate::store::Health;

    fn ready_session() -> TrackerSession {
        let mut s = TrackerSession::default();
        s.process("player add Alice").unwrap();
        s.process("player add Bob").unwrap();
        s.process("campaign rise of red skull").unwrap();
        s
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn empty_input() {
        let mut s = TrackerSession::default();
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn unknown_command() {
        let mut s = TrackerSession::default();
        assert!(matches!(
            s.process("dance"),
            Err(TrackerError::UnknownCommand(_))
        ));
    }

    #[test]
    fn player_commands() {
        let mut s = TrackerSession::default();
        assert_eq!(s.process("player add Alice").unwrap(), "Player 'Alice' added!");
        let err = s.process("player add Alice").unwrap_err();
        assert!(err.is_warning());
        assert!(s.process("player Alice").is_err());
        assert!(s.process("players").unwrap().contains("- Alice"));
    }

    #[test]
    fn campaign_selection_is_case_insensitive() {
        let s = ready_session();
        assert_eq!(s.store().current_campaign(), "Rise of Red Skull");
        assert!(s.store().is_ready());
    }

    #[test]
    fn record_command() {
        let mut s = ready_session();
        let out = s
            .process("record crossbones | win | iron man=5, Captain America=3 | first session | 2024-01-01")
            .unwrap();
        assert_eq!(
            out,
            "'Crossbones' played with 'Iron Man, Captain America' recorded as Win in Rise of Red Skull!"
        );
        let o = &s.store().outcome_log()[0];
        assert_eq!(o.date, day());
        assert_eq!(o.notes, "first session");
        assert_eq!(o.heroes_played[1].health_remaining, Health::Remaining(3));
    }

    #[test]
    fn record_rejects_missing_hero() {
        let mut s = ready_session();
        let err = s.process("record Zola | loss | Thor, ").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::NoHero(2))
        ));
        assert!(s.store().outcome_log().is_empty());
    }

    #[test]
    fn record_rejects_missing_scenario() {
        let mut s = ready_session();
        let err = s.process("record  | win | Thor").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::NoScenario)
        ));
    }

    #[test]
    fn record_usage() {
        let mut s = ready_session();
        assert!(matches!(
            s.process("record Zola"),
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[test]
    fn parse_record_with_aspects_and_extras() {
        let s = ready_session();
        let draft = parse_record(
            "Zola | loss | thor:aggression, Hulk:Justice | close one | | difficulty=Expert, villain=4, turns=9",
            s.store(),
            day(),
        )
        .unwrap();
        assert_eq!(draft.heroes[0].hero, "Thor");
        assert_eq!(draft.heroes[0].aspect.as_deref(), Some("Aggression"));
        assert_eq!(draft.date, day());
        assert_eq!(draft.extras.difficulty.as_deref(), Some("Expert"));
        assert_eq!(draft.extras.villain_health_remaining, Some(4));
        assert_eq!(draft.extras.turns_taken, Some(9));
    }

    #[test]
    fn hero_names_with_slashes() {
        let s = ready_session();
        let draft = parse_record("Zola | win | sp//dr=4", s.store(), day()).unwrap();
        assert_eq!(draft.heroes[0].hero, "SP//dr");
        assert_eq!(draft.heroes[0].health, Some(4));
    }

    #[test]
    fn hero_slot_keeps_unknown_names() {
        let catalog = Catalog::builtin();
        let slot = parse_hero_slot("Homebrew Hero:Pool=7", &catalog).unwrap();
        assert_eq!(slot.hero, "Homebrew Hero");
        assert_eq!(slot.aspect.as_deref(), Some("Pool"));
        assert_eq!(slot.health, Some(7));
        assert!(parse_hero_slot("Thor=lots", &catalog).is_err());
        assert_eq!(parse_hero_slot("", &catalog).unwrap().hero, NO_HERO);
    }

    #[test]
    fn bad_extras() {
        assert!(parse_extras("turns=many").is_err());
        assert!(parse_extras("mood=grim").is_err());
        assert!(parse_extras("difficulty").is_err());
        assert!(parse_extras("").unwrap().is_empty());
    }

    #[test]
    fn note_kinds() {
        assert_eq!(parse_note("boon: +1 HP"), (Some(NoteKind::Boon), "+1 HP"));
        assert_eq!(
            parse_note("Obligation: Betrayal added"),
            (None, "Obligation: Betrayal added")
        );
    }

    #[test]
    fn note_requires_campaign_and_content() {
        let mut s = TrackerSession::default();
        assert!(s.process("note something").is_err());
        let mut s = ready_session();
        assert!(s.process("note   ").is_err());
        assert!(s.process("note boon: Permanent +1 HP").is_ok());
        assert!(s.process("notes").unwrap().contains("[Boon] Permanent +1 HP"));
    }

    #[test]
    fn stats_and_log() {
        let mut s = ready_session();
        s.process("record Crossbones | win | Thor=4").unwrap();
        s.process("record Crossbones | win | Thor=2").unwrap();
        s.process("record Crossbones | loss | Hulk").unwrap();
        let stats = s.process("stats").unwrap();
        assert!(stats.contains("2 wins, 1 losses (3 played)"));
        assert!(stats.contains("66.67%"));
        assert!(stats.contains("Thor: 2"));
        assert!(s.process("log").unwrap().contains("Scenario Log (3 entries)"));
    }

    #[test]
    fn slots_clamped_by_players() {
        let mut s = ready_session();
        assert_eq!(s.process("slots 4").unwrap(), "Hero slots: 2");
        assert!(s.process("slots many").is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.json");
        let mut s = ready_session();
        s.process("record Zola | loss | Thor").unwrap();
        s.process(&format!("save {}", path.display())).unwrap();

        s.process("reset").unwrap();
        assert!(s.store().players().is_empty());
        assert_eq!(s.store().current_campaign(), NO_CAMPAIGN);

        let out = s.process("load").unwrap();
        assert!(out.contains("2 players, 1 scenarios"));
        assert_eq!(s.store().current_campaign(), NO_CAMPAIGN);
    }

    #[test]
    fn save_without_path() {
        let mut s = TrackerSession::default();
        assert!(s.process("save").is_err());
    }

    #[test]
    fn export_formats() {
        let mut s = ready_session();
        assert!(s.process("export").unwrap().starts_with("# Rise of Red Skull"));
        assert!(s.process("export text").unwrap().contains("Campaign Log"));
        assert!(s.process("export pdf").is_err());
    }

    #[test]
    fn help_and_quit() {
        let mut s = TrackerSession::default();
        assert!(s.process("help").unwrap().contains("record <scenario>"));
        assert_eq!(s.process("quit").unwrap(), "Goodbye!");
    }

    #[test]
    fn status_prompts_until_ready() {
        let mut s = TrackerSession::default();
        assert!(s.process("status").unwrap().contains("Select a campaign"));
        let mut s = ready_session();
        assert!(!s.process("status").unwrap().contains("Select a campaign"));
    }
}
