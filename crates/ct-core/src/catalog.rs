//! Reference data: campaigns and their scenarios, heroes, aspects and
//! difficulty tiers.
//!
//! A [`Catalog`] is read-only once built. The first campaign is always the
//! [`NO_CAMPAIGN`] placeholder, which is also the default selection of a
//! fresh or freshly loaded store.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// Placeholder campaign shown before the user picks one.
pub const NO_CAMPAIGN: &str = "--- Select a Campaign ---";
/// Placeholder scenario shown before the user picks one.
pub const NO_SCENARIO: &str = "--- Select a Scenario ---";
/// Placeholder hero for an unfilled slot.
pub const NO_HERO: &str = "--- Select a Hero ---";
/// Placeholder aspect for an unfilled slot.
pub const NO_ASPECT: &str = "--- Select an Aspect ---";

const BUILTIN_CAMPAIGNS: &[(&str, [&str; 5])] = &[
    (
        "Rise of Red Skull",
        ["Crossbones", "Absorbing Man", "Taskmaster", "Zola", "Red Skull"],
    ),
    (
        "Galaxy's Most Wanted",
        [
            "Drang",
            "Collector (Museum)",
            "Collector (Ship)",
            "Nebula",
            "Ronan",
        ],
    ),
    (
        "Mad Titan's Shadow",
        ["Ebony Maw", "Tower Defense", "Thanos", "Hela", "Loki"],
    ),
    (
        "Sinister Motives",
        ["Sandman", "Venom", "Mysterio", "Sinister Six", "Venom Goblin"],
    ),
    (
        "Mutant Genesis",
        [
            "Sabretooth",
            "Project Wideawake",
            "Master Mold",
            "Mansion Attack",
            "Magneto",
        ],
    ),
    (
        "Next Evolution",
        [
            "Morlock Siege",
            "On the Run",
            "Juggernaut",
            "Mister Sinister",
            "Stryfe",
        ],
    ),
    (
        "Age of Apocalypse",
        [
            "Unus",
            "Four Horseman",
            "Apocalypse",
            "Dark Beast",
            "En Sabah Nur",
        ],
    ),
    (
        "Agents of S.H.I.E.L.D.",
        [
            "Black Widow",
            "Batroc",
            "M.O.D.O.K.",
            "Thunderbolts",
            "Baron Zero",
        ],
    ),
];

const BUILTIN_HEROES: &[&str] = &[
    "Adam Warlock",
    "Angel",
    "Ant-Man",
    "Bishop",
    "Black Panther",
    "Black Widow",
    "Cable",
    "Captain America",
    "Captain Marvel",
    "Cloak & Dagger",
    "Colossus",
    "Cyclops",
    "Dazzler",
    "Deadpool",
    "Doctor Strange",
    "Doctor Voodoo",
    "Domino",
    "Drax",
    "Falcon",
    "Gambit",
    "Gamora",
    "Ghost-Spider",
    "Goliath",
    "Groot",
    "Hawkeye",
    "Hulk",
    "Iceman",
    "Iron Man",
    "Ironheart",
    "Jean Grey",
    "Jubilee",
    "Kitty Pryde",
    "Magik",
    "Magneto",
    "Maria Hill",
    "Miles Morales",
    "Mister Sinister",
    "Ms. Marvel",
    "Nebula",
    "Nick Fury",
    "Nightcrawler",
    "Nova",
    "Phoenix",
    "Psylocke",
    "Quicksilver",
    "Rocket Raccoon",
    "Rogue",
    "Ronin",
    "Scarlet Witch",
    "Shadowcat",
    "She-Hulk",
    "Silk",
    "Silver Surfer",
    "SP//dr",
    "Spider-Ham",
    "Spider-Man (Peter Parker)",
    "Spider-Woman",
    "Spectrum",
    "Star-Lord",
    "Storm",
    "Thor",
    "Valkyrie",
    "Venom (Flash Thompson)",
    "Vision",
    "War Machine",
    "Wasp",
    "Winter Soldier",
    "Wolverine",
    "X-23",
];

const BUILTIN_ASPECTS: &[&str] = &["Aggression", "Justice", "Leadership", "Protection", "Pool"];

const BUILTIN_DIFFICULTIES: &[&str] = &["Standard", "Expert", "Heroic"];

/// A campaign and its ordered scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign name (unique within a catalog).
    pub name: String,
    /// Scenarios in play order.
    #[serde(default)]
    pub scenarios: Vec<String>,
}

impl Campaign {
    /// Whether `scenario` belongs to this campaign.
    pub fn has_scenario(&self, scenario: &str) -> bool {
        self.scenarios.iter().any(|s| s == scenario)
    }
}

/// On-disk catalog layout. Placeholders are never part of the file.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    campaigns: Vec<Campaign>,
    #[serde(default)]
    heroes: Vec<String>,
    #[serde(default)]
    aspects: Vec<String>,
    #[serde(default)]
    difficulties: Vec<String>,
}

/// Static reference data loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    campaigns: Vec<Campaign>,
    heroes: Vec<String>,
    aspects: Vec<String>,
    difficulties: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in catalog of campaigns, heroes, aspects and difficulties.
    pub fn builtin() -> Self {
        let campaigns = BUILTIN_CAMPAIGNS
            .iter()
            .map(|(name, scenarios)| Campaign {
                name: (*name).to_string(),
                scenarios: scenarios.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();
        Self::assemble(
            campaigns,
            BUILTIN_HEROES.iter().map(|h| (*h).to_string()).collect(),
            BUILTIN_ASPECTS.iter().map(|a| (*a).to_string()).collect(),
            BUILTIN_DIFFICULTIES
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
        )
    }

    /// Parse a catalog from JSON.
    ///
    /// Every field is optional; the placeholder campaign is prepended.
    pub fn from_json(text: &str) -> TrackerResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|e| TrackerError::Catalog(e.to_string()))?;

        let mut seen = HashSet::new();
        for campaign in &file.campaigns {
            if campaign.name.trim().is_empty() || campaign.name == NO_CAMPAIGN {
                return Err(TrackerError::Catalog(format!(
                    "invalid campaign name: \"{}\"",
                    campaign.name
                )));
            }
            if !seen.insert(campaign.name.as_str()) {
                return Err(TrackerError::Catalog(format!(
                    "duplicate campaign: \"{}\"",
                    campaign.name
                )));
            }
        }

        Ok(Self::assemble(
            file.campaigns,
            file.heroes,
            file.aspects,
            file.difficulties,
        ))
    }

    /// Read a catalog file from disk.
    pub fn from_path(path: &Path) -> TrackerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TrackerError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    fn assemble(
        campaigns: Vec<Campaign>,
        mut heroes: Vec<String>,
        aspects: Vec<String>,
        difficulties: Vec<String>,
    ) -> Self {
        let mut all = Vec::with_capacity(campaigns.len() + 1);
        all.push(Campaign {
            name: NO_CAMPAIGN.to_string(),
            scenarios: Vec::new(),
        });
        all.extend(campaigns);

        heroes.retain(|h| h != NO_HERO);
        heroes.sort();
        heroes.dedup();

        Self {
            campaigns: all,
            heroes,
            aspects,
            difficulties,
        }
    }

    /// All campaigns, placeholder first.
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// The default selection: the first catalog entry.
    pub fn default_campaign(&self) -> &str {
        &self.campaigns[0].name
    }

    /// Look up a campaign by exact name.
    pub fn campaign(&self, name: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.name == name)
    }

    /// Scenarios of a campaign; empty for unknown campaigns.
    pub fn scenarios(&self, campaign: &str) -> &[String] {
        self.campaign(campaign)
            .map(|c| c.scenarios.as_slice())
            .unwrap_or(&[])
    }

    /// Heroes, sorted alphabetically, without the placeholder.
    pub fn heroes(&self) -> &[String] {
        &self.heroes
    }

    /// Aspects in catalog order.
    pub fn aspects(&self) -> &[String] {
        &self.aspects
    }

    /// Difficulty tiers in catalog order.
    pub fn difficulties(&self) -> &[String] {
        &self.difficulties
    }

    /// Case-insensitive hero lookup returning the canonical name.
    pub fn find_hero(&self, name: &str) -> Option<&str> {
        self.heroes
            .iter()
            .find(|h| h.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Case-insensitive campaign lookup returning the canonical name.
    pub fn find_campaign(&self, name: &str) -> Option<&str> {
        self.campaigns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.name.as_str())
    }

    /// Case-insensitive scenario lookup within a campaign.
    pub fn find_scenario(&self, campaign: &str, scenario: &str) -> Option<&str> {
        self.scenarios(campaign)
            .iter()
            .find(|s| s.eq_ignore_ascii_case(scenario))
            .map(String::as_str)
    }

    /// Case-insensitive aspect lookup returning the canonical name.
    pub fn find_aspect(&self, name: &str) -> Option<&str> {
        self.aspects
            .iter()
            .find(|a| a.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_starts_with_placeholder() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.default_campaign(), NO_CAMPAIGN);
        assert!(catalog.scenarios(NO_CAMPAIGN).is_empty());
        assert_eq!(catalog.campaigns().len(), 9);
    }

    #[test]
    fn builtin_scenarios_in_order() {
        let catalog = Catalog::builtin();
        let scenarios = catalog.scenarios("Rise of Red Skull");
        assert_eq!(scenarios.first().map(String::as_str), Some("Crossbones"));
        assert_eq!(scenarios.last().map(String::as_str), Some("Red Skull"));
    }

    #[test]
    fn heroes_sorted() {
        let catalog = Catalog::builtin();
        let heroes = catalog.heroes();
        let mut sorted = heroes.to_vec();
        sorted.sort();
        assert_eq!(heroes, sorted.as_slice());
        assert!(!heroes.iter().any(|h| h == NO_HERO));
    }

    #[test]
    fn unknown_campaign_has_no_scenarios() {
        let catalog = Catalog::builtin();
        assert!(catalog.campaign("Nowhere").is_none());
        assert!(catalog.scenarios("Nowhere").is_empty());
    }

    #[test]
    fn case_insensitive_lookups() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_hero("iron man"), Some("Iron Man"));
        assert_eq!(
            catalog.find_campaign("rise of red skull"),
            Some("Rise of Red Skull")
        );
        assert_eq!(
            catalog.find_scenario("Rise of Red Skull", "zola"),
            Some("Zola")
        );
        assert_eq!(catalog.find_aspect("JUSTICE"), Some("Justice"));
    }

    #[test]
    fn from_json_prepends_placeholder() {
        let catalog = Catalog::from_json(
            r#"{
                "campaigns": [{ "name": "Custom", "scenarios": ["One", "Two"] }],
                "heroes": ["Zed", "Abe", "Zed"]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.default_campaign(), NO_CAMPAIGN);
        assert_eq!(catalog.scenarios("Custom").len(), 2);
        assert_eq!(catalog.heroes(), ["Abe", "Zed"]);
        assert!(catalog.aspects().is_empty());
    }

    #[test]
    fn from_json_rejects_duplicate_campaign() {
        let err = Catalog::from_json(
            r#"{ "campaigns": [{ "name": "A" }, { "name": "A" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate campaign"));
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(matches!(
            Catalog::from_json("{ campaigns"),
            Err(TrackerError::Catalog(_))
        ));
    }
}
