//! The backend route table.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET` | `/api/world` | -- |
//! | `POST` | `/api/paint` | [`PaintRequest`](crate::PaintRequest) |
//! | `POST` | `/api/site` | [`SiteRequest`](crate::SiteRequest) |
//! | `POST` | `/api/spawner` | [`SpawnerRequest`](crate::SpawnerRequest) |
//! | `POST` | `/api/route` | [`RouteRequest`](crate::RouteRequest) |
//! | `POST` | `/api/encounter` | [`EncounterRequest`](crate::EncounterRequest) |
//! | `POST` | `/api/rumor-template` | [`RumorTemplateRequest`](crate::RumorTemplateRequest) |
//! | `POST` | `/api/weapon` | [`WeaponRequest`](crate::WeaponRequest) |
//! | `POST` | `/api/armor` | [`ArmorRequest`](crate::ArmorRequest) |
//! | `POST` | `/api/wound` | [`WoundRequest`](crate::WoundRequest) |
//! | `POST` | `/api/faction` | [`FactionRequest`](crate::FactionRequest) |
//! | `POST` | `/api/simulate` | [`SimulateRequest`](crate::SimulateRequest) |
//! | `POST` | `/api/play` | [`PlayRequest`](crate::PlayRequest) |

use serde::{Deserialize, Serialize};

/// HTTP verb used by an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// Read-only fetch.
    Get,
    /// JSON-body mutation.
    Post,
}

/// Every backend route the editor talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// Full world snapshot.
    World,
    /// Set a cell's terrain tag.
    Paint,
    /// Add a site.
    Site,
    /// Add a spawner.
    Spawner,
    /// Connect two cells with a patrol route.
    Route,
    /// Adjust an encounter table's first entry weight.
    Encounter,
    /// Adjust rumor propagation limits.
    RumorTemplate,
    /// Adjust a weapon's penetration.
    Weapon,
    /// Adjust an armor threshold for one damage type and arc.
    Armor,
    /// Adjust wound effect magnitudes.
    Wound,
    /// Add a settlement to a faction.
    Faction,
    /// Advance world time by whole days.
    Simulate,
    /// Run the backend's scripted playtest step.
    Play,
}

impl Endpoint {
    /// Every endpoint, reads first.
    pub const ALL: [Self; 13] = [
        Self::World,
        Self::Paint,
        Self::Site,
        Self::Spawner,
        Self::Route,
        Self::Encounter,
        Self::RumorTemplate,
        Self::Weapon,
        Self::Armor,
        Self::Wound,
        Self::Faction,
        Self::Simulate,
        Self::Play,
    ];

    /// Absolute request path.
    pub const fn path(self) -> &'static str {
        match self {
            Self::World => "/api/world",
            Self::Paint => "/api/paint",
            Self::Site => "/api/site",
            Self::Spawner => "/api/spawner",
            Self::Route => "/api/route",
            Self::Encounter => "/api/encounter",
            Self::RumorTemplate => "/api/rumor-template",
            Self::Weapon => "/api/weapon",
            Self::Armor => "/api/armor",
            Self::Wound => "/api/wound",
            Self::Faction => "/api/faction",
            Self::Simulate => "/api/simulate",
            Self::Play => "/api/play",
        }
    }

    /// HTTP verb for this endpoint.
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::World => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Whether calling this endpoint changes backend state.
    pub const fn is_mutation(self) -> bool {
        matches!(self.method(), HttpMethod::Post)
    }
}

impl core::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}
