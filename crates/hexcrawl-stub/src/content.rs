//! The tunable content catalog.
//!
//! Holds just enough of the game's content definitions for the editor's
//! tuning endpoints to have something to change. Values are stored and
//! reported back; nothing here applies them to a running simulation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::StubError;

/// One weighted row of an encounter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterEntry {
    /// Relative draw weight.
    pub weight: i64,
    /// Entity template spawned when this row is drawn.
    pub entity_template_id: String,
}

/// A weighted list of possible encounters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterTable {
    /// Rows in draw order.
    pub entries: Vec<EncounterEntry>,
}

/// How rumors about one kind of event spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RumorTemplate {
    /// World event type this template describes.
    pub event_type: String,
    /// Lifetime of a rumor in ticks.
    pub ttl_ticks: i64,
    /// Maximum number of retellings.
    pub max_hops: i64,
    /// Rumor text with `{event_type}`, `{x}` and `{y}` placeholders.
    pub text_pattern: String,
}

impl RumorTemplate {
    /// Fill the text pattern for an event at `(x, y)`.
    pub fn render_text(&self, x: i32, y: i32) -> String {
        self.text_pattern
            .replace("{event_type}", &self.event_type)
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// A weapon definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weapon {
    /// Armor penetration.
    pub penetration: i64,
    /// Damage type dealt.
    pub damage_type: String,
}

/// Armor thresholds for one damage type, per facing arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArmorArcs {
    /// Threshold against hits from the front.
    pub front: i64,
    /// Threshold against hits from the side.
    pub side: i64,
    /// Threshold against hits from behind.
    pub rear: i64,
}

impl ArmorArcs {
    /// Mutable threshold for `arc`, if it names a known arc.
    pub fn arc_mut(&mut self, arc: &str) -> Option<&mut i64> {
        match arc {
            "front" => Some(&mut self.front),
            "side" => Some(&mut self.side),
            "rear" => Some(&mut self.rear),
            _ => None,
        }
    }
}

/// An armor definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Armor {
    /// Thresholds keyed by damage type.
    pub thresholds: BTreeMap<String, ArmorArcs>,
}

/// Effects of one wound type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WoundType {
    /// Change to mobility while wounded.
    pub mobility_delta: i64,
    /// Change to dexterity while wounded.
    pub dexterity_delta: i64,
}

/// A faction and the settlements it is tied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faction {
    /// Settlement names, in the order they were added.
    pub settlements: Vec<String>,
}

/// All tunable content, keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentCatalog {
    /// Encounter tables.
    pub encounter_tables: BTreeMap<String, EncounterTable>,
    /// Rumor templates.
    pub rumor_templates: BTreeMap<String, RumorTemplate>,
    /// Weapons.
    pub weapons: BTreeMap<String, Weapon>,
    /// Armors.
    pub armors: BTreeMap<String, Armor>,
    /// Wound types.
    pub wound_types: BTreeMap<String, WoundType>,
    /// Factions.
    pub factions: BTreeMap<String, Faction>,
}

impl Default for ContentCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ContentCatalog {
    /// The starter content the editor's default identifiers point at.
    pub fn seeded() -> Self {
        let arcs = |front, side, rear| ArmorArcs { front, side, rear };

        let encounter_tables = BTreeMap::from([(
            "wilds_basic".to_owned(),
            EncounterTable {
                entries: vec![
                    EncounterEntry {
                        weight: 3,
                        entity_template_id: "raider".to_owned(),
                    },
                    EncounterEntry {
                        weight: 1,
                        entity_template_id: "wolf".to_owned(),
                    },
                ],
            },
        )]);

        let rumor_templates = BTreeMap::from([(
            "raid_rumor".to_owned(),
            RumorTemplate {
                event_type: "raid".to_owned(),
                ttl_ticks: 120,
                max_hops: 3,
                text_pattern: "A {event_type} was reported near {x},{y}".to_owned(),
            },
        )]);

        let weapons = BTreeMap::from([
            (
                "spear".to_owned(),
                Weapon {
                    penetration: 3,
                    damage_type: "pierce".to_owned(),
                },
            ),
            (
                "axe".to_owned(),
                Weapon {
                    penetration: 2,
                    damage_type: "slash".to_owned(),
                },
            ),
        ]);

        let armors = BTreeMap::from([(
            "mail".to_owned(),
            Armor {
                thresholds: BTreeMap::from([
                    ("pierce".to_owned(), arcs(4, 3, 2)),
                    ("slash".to_owned(), arcs(6, 5, 3)),
                    ("blunt".to_owned(), arcs(2, 2, 1)),
                ]),
            },
        )]);

        let wound_types = BTreeMap::from([
            (
                "slash".to_owned(),
                WoundType {
                    mobility_delta: -1,
                    dexterity_delta: -1,
                },
            ),
            (
                "pierce".to_owned(),
                WoundType {
                    mobility_delta: 0,
                    dexterity_delta: -2,
                },
            ),
        ]);

        let factions = BTreeMap::from([(
            "settlers".to_owned(),
            Faction {
                settlements: vec!["Oakford".to_owned()],
            },
        )]);

        Self {
            encounter_tables,
            rumor_templates,
            weapons,
            armors,
            wound_types,
            factions,
        }
    }

    /// The template (and its id) used for rumors about `event_type`.
    pub fn rumor_for_event(&self, event_type: &str) -> Option<(&str, &RumorTemplate)> {
        self.rumor_templates
            .iter()
            .find(|(_, template)| template.event_type == event_type)
            .map(|(id, template)| (id.as_str(), template))
    }

    /// Set the weight of an encounter table's first row.
    pub fn set_first_weight(&mut self, table_id: &str, weight: i64) -> Result<(), StubError> {
        let table = self
            .encounter_tables
            .get_mut(table_id)
            .ok_or_else(|| StubError::NotFound(format!("encounter table {table_id}")))?;
        let first = table
            .entries
            .first_mut()
            .ok_or_else(|| StubError::NotFound(format!("first entry of encounter table {table_id}")))?;
        first.weight = weight;
        Ok(())
    }

    /// Change a rumor template's lifetime and hop limit.
    pub fn update_rumor_template(&mut self, template_id: &str, ttl_ticks: i64, max_hops: i64) -> Result<(), StubError> {
        let template = self
            .rumor_templates
            .get_mut(template_id)
            .ok_or_else(|| StubError::NotFound(format!("rumor template {template_id}")))?;
        template.ttl_ticks = ttl_ticks;
        template.max_hops = max_hops;
        Ok(())
    }

    /// Change a weapon's penetration.
    pub fn update_weapon(&mut self, weapon_id: &str, penetration: i64) -> Result<(), StubError> {
        let weapon = self
            .weapons
            .get_mut(weapon_id)
            .ok_or_else(|| StubError::NotFound(format!("weapon {weapon_id}")))?;
        weapon.penetration = penetration;
        Ok(())
    }

    /// Change one armor threshold.
    pub fn update_armor_threshold(
        &mut self,
        armor_id: &str,
        damage_type: &str,
        arc: &str,
        value: i64,
    ) -> Result<(), StubError> {
        let armor = self
            .armors
            .get_mut(armor_id)
            .ok_or_else(|| StubError::NotFound(format!("armor {armor_id}")))?;
        let arcs = armor
            .thresholds
            .get_mut(damage_type)
            .ok_or_else(|| StubError::NotFound(format!("damage type {damage_type} on armor {armor_id}")))?;
        let slot = arcs
            .arc_mut(arc)
            .ok_or_else(|| StubError::BadRequest(format!("unknown arc {arc}")))?;
        *slot = value;
        Ok(())
    }

    /// Change a wound type's effects.
    pub fn update_wound_type(&mut self, wound_id: &str, mobility_delta: i64, dexterity_delta: i64) -> Result<(), StubError> {
        let wound = self
            .wound_types
            .get_mut(wound_id)
            .ok_or_else(|| StubError::NotFound(format!("wound type {wound_id}")))?;
        wound.mobility_delta = mobility_delta;
        wound.dexterity_delta = dexterity_delta;
        Ok(())
    }

    /// Tie `settlement` to a faction. Returns `false` if it already was.
    pub fn add_faction_settlement(&mut self, faction_id: &str, settlement: &str) -> Result<bool, StubError> {
        let faction = self
            .factions
            .get_mut(faction_id)
            .ok_or_else(|| StubError::NotFound(format!("faction {faction_id}")))?;
        if faction.settlements.iter().any(|s| s == settlement) {
            return Ok(false);
        }
        faction.settlements.push(settlement.to_owned());
        Ok(true)
    }
}
