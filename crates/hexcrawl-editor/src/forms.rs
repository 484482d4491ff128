//! Form snapshots: plain values captured from the editor's input controls.
//!
//! Each mutator first reads its controls into one of these structs and
//! only then builds a request, so request construction is a pure function
//! of the snapshot. Every form also carries the identifier of the entity
//! it edits. The `new` constructors fill in the identifiers the editor has
//! always edited (`wilds_basic`, `raid_rumor`, `spear`, `mail`, `slash`,
//! `settlers`); the `with_*` builders pick a different instance.
//!
//! Field values are the raw control text. Only route coordinates are
//! converted to numbers.

use hexcrawl_types::{
    ArmorRequest, EncounterRequest, Endpoint, FactionRequest, FormNumber, RouteRequest,
    RumorTemplateRequest, SimulateRequest, WeaponRequest, WoundRequest,
};
use serde::Serialize;

/// Encounter table edited by [`EncounterForm::new`].
pub const DEFAULT_ENCOUNTER_TABLE: &str = "wilds_basic";
/// Rumor template edited by [`RumorTemplateForm::new`].
pub const DEFAULT_RUMOR_TEMPLATE: &str = "raid_rumor";
/// Weapon edited by [`WeaponForm::new`].
pub const DEFAULT_WEAPON: &str = "spear";
/// Armor edited by [`ArmorForm::new`].
pub const DEFAULT_ARMOR: &str = "mail";
/// Damage type edited by [`ArmorForm::new`].
pub const DEFAULT_DAMAGE_TYPE: &str = "pierce";
/// Facing arc edited by [`ArmorForm::new`].
pub const DEFAULT_ARC: &str = "front";
/// Wound type edited by [`WoundForm::new`].
pub const DEFAULT_WOUND: &str = "slash";
/// Faction edited by [`FactionForm::new`].
pub const DEFAULT_FACTION: &str = "settlers";

/// A form that submits to one mutation endpoint.
pub trait MutationForm {
    /// JSON body type. It is held across an `.await` inside spawned tasks.
    type Request: Serialize + Send + Sync;

    /// Route the form posts to.
    const ENDPOINT: Endpoint;

    /// Build the request body from the captured values.
    fn to_request(&self) -> Self::Request;
}

/// Values of the selectors consulted by a grid click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexSelections {
    /// Terrain selector (used in paint mode).
    pub terrain: String,
    /// Site-kind selector (used in site mode).
    pub site_kind: String,
}

impl Default for HexSelections {
    fn default() -> Self {
        Self {
            terrain: "plains".to_owned(),
            site_kind: "dungeon".to_owned(),
        }
    }
}

/// The four route endpoint inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteForm {
    /// First endpoint column text.
    pub q1: String,
    /// First endpoint row text.
    pub r1: String,
    /// Second endpoint column text.
    pub q2: String,
    /// Second endpoint row text.
    pub r2: String,
}

impl RouteForm {
    /// Capture the four inputs.
    pub fn new(q1: &str, r1: &str, q2: &str, r2: &str) -> Self {
        Self {
            q1: q1.to_owned(),
            r1: r1.to_owned(),
            q2: q2.to_owned(),
            r2: r2.to_owned(),
        }
    }
}

impl MutationForm for RouteForm {
    type Request = RouteRequest;
    const ENDPOINT: Endpoint = Endpoint::Route;

    fn to_request(&self) -> RouteRequest {
        RouteRequest {
            q1: FormNumber::parse(&self.q1),
            r1: FormNumber::parse(&self.r1),
            q2: FormNumber::parse(&self.q2),
            r2: FormNumber::parse(&self.r2),
        }
    }
}

/// Encounter table weight input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterForm {
    /// Table being tuned.
    pub table_id: String,
    /// Weight of the table's first entry.
    pub first_weight: String,
}

impl EncounterForm {
    /// Tune the default encounter table.
    pub fn new(first_weight: &str) -> Self {
        Self {
            table_id: DEFAULT_ENCOUNTER_TABLE.to_owned(),
            first_weight: first_weight.to_owned(),
        }
    }

    /// Tune `table_id` instead.
    #[must_use]
    pub fn with_table(mut self, table_id: &str) -> Self {
        table_id.clone_into(&mut self.table_id);
        self
    }
}

impl MutationForm for EncounterForm {
    type Request = EncounterRequest;
    const ENDPOINT: Endpoint = Endpoint::Encounter;

    fn to_request(&self) -> EncounterRequest {
        EncounterRequest {
            id: self.table_id.clone(),
            first_weight: self.first_weight.clone(),
        }
    }
}

/// Rumor propagation inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RumorTemplateForm {
    /// Template being tuned.
    pub template_id: String,
    /// Lifetime in ticks.
    pub ttl_ticks: String,
    /// Maximum hop count.
    pub max_hops: String,
}

impl RumorTemplateForm {
    /// Tune the default rumor template.
    pub fn new(ttl_ticks: &str, max_hops: &str) -> Self {
        Self {
            template_id: DEFAULT_RUMOR_TEMPLATE.to_owned(),
            ttl_ticks: ttl_ticks.to_owned(),
            max_hops: max_hops.to_owned(),
        }
    }

    /// Tune `template_id` instead.
    #[must_use]
    pub fn with_template(mut self, template_id: &str) -> Self {
        template_id.clone_into(&mut self.template_id);
        self
    }
}

impl MutationForm for RumorTemplateForm {
    type Request = RumorTemplateRequest;
    const ENDPOINT: Endpoint = Endpoint::RumorTemplate;

    fn to_request(&self) -> RumorTemplateRequest {
        RumorTemplateRequest {
            id: self.template_id.clone(),
            ttl_ticks: self.ttl_ticks.clone(),
            max_hops: self.max_hops.clone(),
        }
    }
}

/// Weapon penetration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponForm {
    /// Weapon being tuned.
    pub weapon_id: String,
    /// Armor penetration.
    pub penetration: String,
}

impl WeaponForm {
    /// Tune the default weapon.
    pub fn new(penetration: &str) -> Self {
        Self {
            weapon_id: DEFAULT_WEAPON.to_owned(),
            penetration: penetration.to_owned(),
        }
    }

    /// Tune `weapon_id` instead.
    #[must_use]
    pub fn with_weapon(mut self, weapon_id: &str) -> Self {
        weapon_id.clone_into(&mut self.weapon_id);
        self
    }
}

impl MutationForm for WeaponForm {
    type Request = WeaponRequest;
    const ENDPOINT: Endpoint = Endpoint::Weapon;

    fn to_request(&self) -> WeaponRequest {
        WeaponRequest {
            id: self.weapon_id.clone(),
            penetration: self.penetration.clone(),
        }
    }
}

/// Armor threshold input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorForm {
    /// Armor being tuned.
    pub armor_id: String,
    /// Damage type whose threshold changes.
    pub damage_type: String,
    /// Facing arc whose threshold changes.
    pub arc: String,
    /// New threshold.
    pub value: String,
}

impl ArmorForm {
    /// Tune the default armor's `pierce`/`front` threshold.
    pub fn new(value: &str) -> Self {
        Self {
            armor_id: DEFAULT_ARMOR.to_owned(),
            damage_type: DEFAULT_DAMAGE_TYPE.to_owned(),
            arc: DEFAULT_ARC.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Tune `armor_id` instead.
    #[must_use]
    pub fn with_armor(mut self, armor_id: &str) -> Self {
        armor_id.clone_into(&mut self.armor_id);
        self
    }

    /// Tune the threshold for `damage_type` on `arc` instead.
    #[must_use]
    pub fn with_facing(mut self, damage_type: &str, arc: &str) -> Self {
        damage_type.clone_into(&mut self.damage_type);
        arc.clone_into(&mut self.arc);
        self
    }
}

impl MutationForm for ArmorForm {
    type Request = ArmorRequest;
    const ENDPOINT: Endpoint = Endpoint::Armor;

    fn to_request(&self) -> ArmorRequest {
        ArmorRequest {
            armor_id: self.armor_id.clone(),
            damage_type: self.damage_type.clone(),
            arc: self.arc.clone(),
            value: self.value.clone(),
        }
    }
}

/// Wound effect inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WoundForm {
    /// Wound type being tuned.
    pub wound_id: String,
    /// Mobility change.
    pub mobility_delta: String,
    /// Dexterity change.
    pub dexterity_delta: String,
}

impl WoundForm {
    /// Tune the default wound type.
    pub fn new(mobility_delta: &str, dexterity_delta: &str) -> Self {
        Self {
            wound_id: DEFAULT_WOUND.to_owned(),
            mobility_delta: mobility_delta.to_owned(),
            dexterity_delta: dexterity_delta.to_owned(),
        }
    }

    /// Tune `wound_id` instead.
    #[must_use]
    pub fn with_wound(mut self, wound_id: &str) -> Self {
        wound_id.clone_into(&mut self.wound_id);
        self
    }
}

impl MutationForm for WoundForm {
    type Request = WoundRequest;
    const ENDPOINT: Endpoint = Endpoint::Wound;

    fn to_request(&self) -> WoundRequest {
        WoundRequest {
            id: self.wound_id.clone(),
            mobility_delta: self.mobility_delta.clone(),
            dexterity_delta: self.dexterity_delta.clone(),
        }
    }
}

/// Faction settlement input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactionForm {
    /// Faction being tuned.
    pub faction_id: String,
    /// Settlement to associate.
    pub settlement: String,
}

impl FactionForm {
    /// Tune the default faction.
    pub fn new(settlement: &str) -> Self {
        Self {
            faction_id: DEFAULT_FACTION.to_owned(),
            settlement: settlement.to_owned(),
        }
    }

    /// Tune `faction_id` instead.
    #[must_use]
    pub fn with_faction(mut self, faction_id: &str) -> Self {
        faction_id.clone_into(&mut self.faction_id);
        self
    }
}

impl MutationForm for FactionForm {
    type Request = FactionRequest;
    const ENDPOINT: Endpoint = Endpoint::Faction;

    fn to_request(&self) -> FactionRequest {
        FactionRequest {
            id: self.faction_id.clone(),
            settlement: self.settlement.clone(),
        }
    }
}

/// Day-count input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateForm {
    /// Days to advance.
    pub days: String,
}

impl SimulateForm {
    /// Capture the day count.
    pub fn new(days: &str) -> Self {
        Self {
            days: days.to_owned(),
        }
    }
}

impl MutationForm for SimulateForm {
    type Request = SimulateRequest;
    const ENDPOINT: Endpoint = Endpoint::Simulate;

    fn to_request(&self) -> SimulateRequest {
        SimulateRequest {
            days: self.days.clone(),
        }
    }
}
