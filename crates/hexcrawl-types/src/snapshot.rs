//! The authoritative world snapshot served by `GET /api/world`.
//!
//! The editor treats this as read-only truth: it is fetched, rendered and
//! discarded on every refresh. Every collection defaults to empty so a
//! backend that omits one still decodes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coords::HexCoord;

/// One hex cell of the terrain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TerrainCell {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Terrain type tag (e.g. `plains`, `forest`).
    pub t: String,
}

impl TerrainCell {
    /// The cell's coordinates.
    pub const fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

/// A placed site (dungeon, town, ruin, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SiteRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Site kind tag.
    pub kind: String,
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

/// A placed encounter spawner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpawnerRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Encounter table the spawner draws from.
    pub table: String,
}

/// A patrol route through a list of hex points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RouteRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Waypoints as `[q, r]` pairs.
    pub points: Vec<(i32, i32)>,
}

/// Physical evidence left behind by a world event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TrackRecord {
    /// Backend-assigned identifier.
    pub id: String,
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Evidence type (e.g. `tracks`, `bodies`).
    pub e: String,
}

/// Full world state as reported by the backend.
///
/// Only `tick` and `terrain` are typed. The other collections are kept as
/// raw JSON: the editor only counts them, and the backend stores whatever
/// the editor sent (a route saved from blank or non-numeric text holds
/// `null` or fractional points). The record types above describe the usual
/// shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Simulation time counter.
    #[serde(default)]
    pub tick: u64,
    /// Terrain cells in backend order.
    #[serde(default)]
    pub terrain: Vec<TerrainCell>,
    /// Placed sites, usually [`SiteRecord`]s.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub sites: Vec<serde_json::Value>,
    /// Placed spawners, usually [`SpawnerRecord`]s.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub spawners: Vec<serde_json::Value>,
    /// Patrol routes, usually [`RouteRecord`]s.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub routes: Vec<serde_json::Value>,
    /// Active rumors, usually plain text.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub rumors: Vec<serde_json::Value>,
    /// Evidence objects on the map, usually [`TrackRecord`]s.
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub tracks: Vec<serde_json::Value>,
    /// Unrest metric keyed by region identifier, in the backend's key
    /// order. Values are passed through untouched.
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub regional_unrest: serde_json::Map<String, serde_json::Value>,
}
