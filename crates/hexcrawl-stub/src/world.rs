//! In-memory world state.
//!
//! Record keeping only: painting replaces a tag, placements append,
//! advancing time bumps the tick counter. No spawner, rumor or combat
//! rules run here.

use hexcrawl_types::{
    HexCoord, RouteRecord, SiteRecord, SpawnerRecord, TerrainCell, TrackRecord, WorldSnapshot,
};
use serde::Serialize;

/// Ticks in one simulated day (one tick is ten seconds).
pub const TICKS_PER_DAY: u64 = 24 * 60 * 6;

/// Default grid width and height.
pub const DEFAULT_GRID_SIZE: i32 = 12;

/// A world event created by the playtest step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Event identifier.
    pub id: String,
    /// Event type (e.g. `raid`).
    pub event_type: String,
    /// Where the event started.
    pub source: HexCoord,
    /// Where its evidence was left.
    pub target: HexCoord,
    /// Tick the event happened at.
    pub tick: u64,
}

/// An active rumor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RumorEntry {
    /// Rumor identifier.
    pub id: String,
    /// Template the rumor was created from.
    pub template_id: String,
    /// Rendered rumor text.
    pub text: String,
}

/// The mutable world behind `GET /api/world`.
#[derive(Debug, Clone, PartialEq)]
pub struct StubWorld {
    /// Simulation time counter.
    pub tick: u64,
    /// Terrain cells in insertion order.
    pub terrain: Vec<TerrainCell>,
    /// Placed sites.
    pub sites: Vec<SiteRecord>,
    /// Placed spawners.
    pub spawners: Vec<SpawnerRecord>,
    /// Patrol routes.
    pub routes: Vec<RouteRecord>,
    /// Active rumors.
    pub rumors: Vec<RumorEntry>,
    /// Evidence objects.
    pub tracks: Vec<TrackRecord>,
    /// World events.
    pub events: Vec<EventRecord>,
    /// Unrest metric per region.
    pub regional_unrest: serde_json::Map<String, serde_json::Value>,
    next_id: u64,
}

impl Default for StubWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE, "plains")
    }
}

impl StubWorld {
    /// A `width` by `height` grid filled with `terrain`, column-major.
    pub fn new(width: i32, height: i32, terrain: &str) -> Self {
        let cells = (0..width)
            .flat_map(|q| (0..height).map(move |r| (q, r)))
            .map(|(q, r)| TerrainCell {
                q,
                r,
                t: terrain.to_owned(),
            })
            .collect();

        Self {
            tick: 0,
            terrain: cells,
            sites: Vec::new(),
            spawners: Vec::new(),
            routes: Vec::new(),
            rumors: Vec::new(),
            tracks: Vec::new(),
            events: Vec::new(),
            regional_unrest: serde_json::Map::new(),
            next_id: 1,
        }
    }

    /// Allocate the next `<prefix>_<n>` identifier.
    fn allocate_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}_{}", self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// The snapshot served to the editor.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a record cannot be encoded.
    pub fn snapshot(&self) -> Result<WorldSnapshot, serde_json::Error> {
        Ok(WorldSnapshot {
            tick: self.tick,
            terrain: self.terrain.clone(),
            sites: to_values(&self.sites)?,
            spawners: to_values(&self.spawners)?,
            routes: to_values(&self.routes)?,
            rumors: self
                .rumors
                .iter()
                .map(|r| serde_json::Value::String(r.text.clone()))
                .collect(),
            tracks: to_values(&self.tracks)?,
            regional_unrest: self.regional_unrest.clone(),
        })
    }

    /// Set the terrain tag at `at`, adding the cell if it is off the grid.
    pub fn paint(&mut self, at: HexCoord, terrain: &str) {
        if let Some(cell) = self.terrain.iter_mut().find(|c| c.coord() == at) {
            terrain.clone_into(&mut cell.t);
        } else {
            self.terrain.push(TerrainCell {
                q: at.q,
                r: at.r,
                t: terrain.to_owned(),
            });
        }
    }

    /// Place a site and return its id.
    pub fn place_site(&mut self, kind: &str, at: HexCoord) -> String {
        let id = self.allocate_id("site");
        self.sites.push(SiteRecord {
            id: id.clone(),
            kind: kind.to_owned(),
            q: at.q,
            r: at.r,
        });
        id
    }

    /// Place a spawner and return its id.
    pub fn place_spawner(&mut self, at: HexCoord, table: &str) -> String {
        let id = self.allocate_id("spawn");
        self.spawners.push(SpawnerRecord {
            id: id.clone(),
            q: at.q,
            r: at.r,
            table: table.to_owned(),
        });
        id
    }

    /// Add a patrol route through `points` and return its id.
    pub fn add_route(&mut self, points: &[HexCoord]) -> String {
        let id = self.allocate_id("patrol");
        self.routes.push(RouteRecord {
            id: id.clone(),
            points: points.iter().map(|p| (p.q, p.r)).collect(),
        });
        id
    }

    /// Move the clock forward by `ticks`.
    pub const fn advance(&mut self, ticks: u64) {
        self.tick = self.tick.saturating_add(ticks);
    }

    /// Move the clock forward by whole days. Non-positive counts do nothing.
    pub fn advance_days(&mut self, days: i64) {
        let days = u64::try_from(days).unwrap_or(0);
        self.advance(days.saturating_mul(TICKS_PER_DAY));
    }

    /// Record an event, one track per evidence type at `target`, and
    /// optionally a rumor. Returns the event id.
    pub fn create_event(
        &mut self,
        event_type: &str,
        source: HexCoord,
        target: HexCoord,
        evidence: &[&str],
        rumor: Option<(&str, String)>,
    ) -> String {
        let event_id = self.allocate_id("event");
        self.events.push(EventRecord {
            id: event_id.clone(),
            event_type: event_type.to_owned(),
            source,
            target,
            tick: self.tick,
        });

        for kind in evidence {
            let track_id = self.allocate_id("track");
            self.tracks.push(TrackRecord {
                id: track_id,
                q: target.q,
                r: target.r,
                e: (*kind).to_owned(),
            });
        }

        if let Some((template_id, text)) = rumor {
            let rumor_id = self.allocate_id("rumor");
            self.rumors.push(RumorEntry {
                id: rumor_id,
                template_id: template_id.to_owned(),
                text,
            });
        }

        event_id
    }
}

fn to_values<T: Serialize>(records: &[T]) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    records.iter().map(serde_json::to_value).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_column_major_plains() {
        let world = StubWorld::default();
        assert_eq!(world.terrain.len(), 144);
        let first: Vec<(i32, i32)> = world.terrain.iter().take(3).map(|c| (c.q, c.r)).collect();
        assert_eq!(first, vec![(0, 0), (0, 1), (0, 2)]);
        assert!(world.terrain.iter().all(|c| c.t == "plains"));
    }

    #[test]
    fn paint_replaces_in_place_and_keeps_order() {
        let mut world = StubWorld::new(2, 2, "plains");
        world.paint(HexCoord::new(1, 0), "forest");
        let tags: Vec<&str> = world.terrain.iter().map(|c| c.t.as_str()).collect();
        assert_eq!(tags, vec!["plains", "plains", "forest", "plains"]);

        world.paint(HexCoord::new(5, 5), "water");
        assert_eq!(world.terrain.len(), 5);
    }

    #[test]
    fn ids_share_one_counter() {
        let mut world = StubWorld::default();
        assert_eq!(world.place_site("dungeon", HexCoord::new(0, 0)), "site_1");
        assert_eq!(world.place_spawner(HexCoord::new(1, 1), "wilds_basic"), "spawn_2");
        assert_eq!(
            world.add_route(&[HexCoord::new(1, 1), HexCoord::new(2, 1)]),
            "patrol_3"
        );
    }

    #[test]
    fn days_convert_to_ticks() {
        let mut world = StubWorld::default();
        world.advance_days(5);
        assert_eq!(world.tick, 5 * TICKS_PER_DAY);
        world.advance_days(-3);
        assert_eq!(world.tick, 5 * TICKS_PER_DAY);
    }

    #[test]
    fn events_leave_tracks_and_rumor() {
        let mut world = StubWorld::default();
        let id = world.create_event(
            "raid",
            HexCoord::new(1, 1),
            HexCoord::new(2, 2),
            &["tracks", "bodies"],
            Some(("raid_rumor", "raid near 2,2".to_owned())),
        );
        assert_eq!(id, "event_1");
        assert_eq!(world.tracks.len(), 2);
        assert!(world.tracks.iter().all(|t| (t.q, t.r) == (2, 2)));

        let snapshot = world.snapshot().unwrap();
        assert_eq!(snapshot.rumors, vec![serde_json::json!("raid near 2,2")]);
        assert_eq!(snapshot.tracks.len(), 2);
    }
}
