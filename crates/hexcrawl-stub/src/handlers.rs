//! REST endpoint handlers for the stand-in backend.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/world` | Current world snapshot |
//! | `POST` | `/api/paint` | Set terrain at a cell |
//! | `POST` | `/api/site` | Place a site |
//! | `POST` | `/api/spawner` | Place a spawner |
//! | `POST` | `/api/route` | Add a two-point patrol route |
//! | `POST` | `/api/encounter` | Set an encounter table's first weight |
//! | `POST` | `/api/rumor-template` | Set rumor lifetime and hop limit |
//! | `POST` | `/api/weapon` | Set weapon penetration |
//! | `POST` | `/api/armor` | Set one armor threshold |
//! | `POST` | `/api/wound` | Set wound effect deltas |
//! | `POST` | `/api/faction` | Add a settlement to a faction |
//! | `POST` | `/api/simulate` | Advance time by whole days |
//! | `POST` | `/api/play` | Scripted playtest step |
//!
//! Integer fields accept JSON numbers or numeric strings; anything else is
//! a `400`. Unknown content identifiers are a `404`. Every request is
//! logged in [`AppState`] before it is validated.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use hexcrawl_types::{Endpoint, HexCoord};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::StubError;
use crate::state::AppState;

/// Ticks the playtest step advances before staging its raid.
pub const PLAY_TICKS: u64 = 6;

type Reply = Result<Json<Value>, StubError>;

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

/// Read an integer field given as a JSON number or numeric string.
fn int_field(body: &Value, name: &str) -> Result<i64, StubError> {
    match body.get(name) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(|| StubError::BadRequest(format!("{name} must be an integer, got {n}"))),
        Some(Value::String(s)) => s.trim().parse().map_err(|e| {
            StubError::BadRequest(format!("{name} must be an integer, got {s:?}: {e}"))
        }),
        Some(other) => Err(StubError::BadRequest(format!(
            "{name} must be an integer, got {other}"
        ))),
        None => Err(StubError::BadRequest(format!("missing field {name}"))),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 9.0e15).then_some(value as i64)
}

fn int_field_or(body: &Value, name: &str, default: i64) -> Result<i64, StubError> {
    if body.get(name).is_none() {
        return Ok(default);
    }
    int_field(body, name)
}

/// Read a text field; numbers are accepted and stringified.
fn str_field(body: &Value, name: &str) -> Result<String, StubError> {
    match body.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(StubError::BadRequest(format!(
            "{name} must be a string, got {other}"
        ))),
        None => Err(StubError::BadRequest(format!("missing field {name}"))),
    }
}

fn str_field_or(body: &Value, name: &str, default: &str) -> Result<String, StubError> {
    if body.get(name).is_none() {
        return Ok(default.to_owned());
    }
    str_field(body, name)
}

fn coord(body: &Value, q: &str, r: &str) -> Result<HexCoord, StubError> {
    let axis = |name: &str| {
        let value = int_field(body, name)?;
        i32::try_from(value)
            .map_err(|e| StubError::BadRequest(format!("{name} out of range: {e}")))
    };
    Ok(HexCoord::new(axis(q)?, axis(r)?))
}

fn ok() -> Json<Value> {
    Json(serde_json::json!({"ok": true}))
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the world counters.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let world = state.world.read().await;
    let tick = world.tick;
    let cells = world.terrain.len();
    let sites = world.sites.len();
    let spawners = world.spawners.len();
    let routes = world.routes.len();
    let rumors = world.rumors.len();
    drop(world);

    let endpoints: String = Endpoint::ALL
        .iter()
        .map(|e| {
            let verb = if e.is_mutation() { "POST" } else { "GET" };
            format!("<li>{verb} {}</li>", e.path())
        })
        .collect();

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Hexcrawl Stub</title></head>\n<body>\n\
         <h1>Hexcrawl stand-in backend</h1>\n\
         <p>tick {tick} &middot; {cells} cells &middot; {sites} sites &middot; {spawners} spawners &middot; {routes} routes &middot; {rumors} rumors</p>\n\
         <ul>{endpoints}</ul>\n</body>\n</html>\n"
    ))
}

// ---------------------------------------------------------------------------
// GET /api/world
// ---------------------------------------------------------------------------

/// Return the full world snapshot.
pub async fn get_world(State(state): State<Arc<AppState>>) -> Reply {
    state.record(Endpoint::World, Value::Null).await;
    let snapshot = state.world.read().await.snapshot()?;
    Ok(Json(serde_json::to_value(snapshot)?))
}

// ---------------------------------------------------------------------------
// Map edits
// ---------------------------------------------------------------------------

/// `POST /api/paint` -- `{q, r, terrain}`.
pub async fn paint(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Paint, body.clone()).await;
    let at = coord(&body, "q", "r")?;
    let terrain = str_field(&body, "terrain")?;

    state.world.write().await.paint(at, &terrain);
    debug!(%at, terrain, "terrain painted");
    Ok(ok())
}

/// `POST /api/site` -- `{q, r, kind}`; `kind` defaults to `dungeon`.
pub async fn place_site(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Site, body.clone()).await;
    let at = coord(&body, "q", "r")?;
    let kind = str_field_or(&body, "kind", "dungeon")?;

    let id = state.world.write().await.place_site(&kind, at);
    debug!(%at, kind, id, "site placed");
    Ok(Json(serde_json::json!({"ok": true, "id": id})))
}

/// `POST /api/spawner` -- `{q, r, table}`; `table` defaults to `wilds_basic`.
pub async fn place_spawner(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Spawner, body.clone()).await;
    let at = coord(&body, "q", "r")?;
    let table = str_field_or(&body, "table", "wilds_basic")?;

    let id = state.world.write().await.place_spawner(at, &table);
    debug!(%at, table, id, "spawner placed");
    Ok(Json(serde_json::json!({"ok": true, "id": id})))
}

/// `POST /api/route` -- `{q1, r1, q2, r2}`.
pub async fn add_route(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Route, body.clone()).await;
    let from = coord(&body, "q1", "r1")?;
    let to = coord(&body, "q2", "r2")?;

    let id = state.world.write().await.add_route(&[from, to]);
    debug!(%from, %to, id, "route added");
    Ok(Json(serde_json::json!({"ok": true, "id": id})))
}

// ---------------------------------------------------------------------------
// Content tuning
// ---------------------------------------------------------------------------

/// `POST /api/encounter` -- `{id, first_weight}`.
pub async fn tune_encounter(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Encounter, body.clone()).await;
    let id = str_field(&body, "id")?;
    let weight = int_field(&body, "first_weight")?;

    state.content.write().await.set_first_weight(&id, weight)?;
    info!(id, weight, "encounter weight tuned");
    Ok(ok())
}

/// `POST /api/rumor-template` -- `{id, ttl_ticks, max_hops}`.
pub async fn tune_rumor_template(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::RumorTemplate, body.clone()).await;
    let id = str_field(&body, "id")?;
    let ttl_ticks = int_field(&body, "ttl_ticks")?;
    let max_hops = int_field(&body, "max_hops")?;

    state
        .content
        .write()
        .await
        .update_rumor_template(&id, ttl_ticks, max_hops)?;
    info!(id, ttl_ticks, max_hops, "rumor template tuned");
    Ok(ok())
}

/// `POST /api/weapon` -- `{id, penetration}`.
pub async fn tune_weapon(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Weapon, body.clone()).await;
    let id = str_field(&body, "id")?;
    let penetration = int_field(&body, "penetration")?;

    state.content.write().await.update_weapon(&id, penetration)?;
    info!(id, penetration, "weapon tuned");
    Ok(ok())
}

/// `POST /api/armor` -- `{armor_id, damage_type, arc, value}`.
pub async fn tune_armor(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Armor, body.clone()).await;
    let armor_id = str_field(&body, "armor_id")?;
    let damage_type = str_field(&body, "damage_type")?;
    let arc = str_field(&body, "arc")?;
    let value = int_field(&body, "value")?;

    state
        .content
        .write()
        .await
        .update_armor_threshold(&armor_id, &damage_type, &arc, value)?;
    info!(armor_id, damage_type, arc, value, "armor threshold tuned");
    Ok(ok())
}

/// `POST /api/wound` -- `{id, mobility_delta, dexterity_delta}`.
pub async fn tune_wound(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Wound, body.clone()).await;
    let id = str_field(&body, "id")?;
    let mobility_delta = int_field(&body, "mobility_delta")?;
    let dexterity_delta = int_field(&body, "dexterity_delta")?;

    state
        .content
        .write()
        .await
        .update_wound_type(&id, mobility_delta, dexterity_delta)?;
    info!(id, mobility_delta, dexterity_delta, "wound type tuned");
    Ok(ok())
}

/// `POST /api/faction` -- `{id, settlement}`.
pub async fn tune_faction(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Faction, body.clone()).await;
    let id = str_field(&body, "id")?;
    let settlement = str_field(&body, "settlement")?;

    let added = state
        .content
        .write()
        .await
        .add_faction_settlement(&id, &settlement)?;
    info!(id, settlement, added, "faction settlement tuned");
    Ok(ok())
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// `POST /api/simulate` -- `{days}`; `days` defaults to 1.
pub async fn simulate(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Reply {
    state.record(Endpoint::Simulate, body.clone()).await;
    let days = int_field_or(&body, "days", 1)?;

    let mut world = state.world.write().await;
    world.advance_days(days);
    let tick = world.tick;
    drop(world);

    info!(days, tick, "world advanced");
    Ok(Json(serde_json::json!({"ok": true, "tick": tick})))
}

/// `POST /api/play` -- advance a few ticks and stage a raid at `(1,1)`
/// that leaves tracks and bodies at `(2,2)`.
pub async fn play(State(state): State<Arc<AppState>>, body: Bytes) -> Reply {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.record(Endpoint::Play, body).await;

    let source = HexCoord::new(1, 1);
    let target = HexCoord::new(2, 2);
    let rumor = state
        .content
        .read()
        .await
        .rumor_for_event("raid")
        .map(|(id, template)| (id.to_owned(), template.render_text(target.q, target.r)));

    let mut world = state.world.write().await;
    world.advance(PLAY_TICKS);
    let event_id = world.create_event(
        "raid",
        source,
        target,
        &["tracks", "bodies"],
        rumor.as_ref().map(|(id, text)| (id.as_str(), text.clone())),
    );
    drop(world);

    info!(event_id, "playtest raid staged");
    Ok(Json(serde_json::json!({"ok": true, "event_id": event_id})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_field_accepts_numbers_and_numeric_strings() {
        let body = serde_json::json!({"a": 5, "b": " 7 ", "c": 2.0, "d": "x", "e": 1.5, "f": true});
        assert_eq!(int_field(&body, "a").ok(), Some(5));
        assert_eq!(int_field(&body, "b").ok(), Some(7));
        assert_eq!(int_field(&body, "c").ok(), Some(2));
        assert!(matches!(int_field(&body, "d"), Err(StubError::BadRequest(_))));
        assert!(matches!(int_field(&body, "e"), Err(StubError::BadRequest(_))));
        assert!(matches!(int_field(&body, "f"), Err(StubError::BadRequest(_))));
        assert!(matches!(int_field(&body, "missing"), Err(StubError::BadRequest(_))));
    }

    #[test]
    fn defaults_apply_only_when_absent() {
        let body = serde_json::json!({"days": "x"});
        assert_eq!(int_field_or(&serde_json::json!({}), "days", 1).ok(), Some(1));
        assert!(int_field_or(&body, "days", 1).is_err());
        assert_eq!(
            str_field_or(&serde_json::json!({}), "kind", "dungeon").ok().as_deref(),
            Some("dungeon")
        );
    }

    #[test]
    fn coordinates_must_fit_i32() {
        let body = serde_json::json!({"q": 1, "r": 9_000_000_000_i64});
        assert!(coord(&body, "q", "r").is_err());
        let body = serde_json::json!({"q": 1, "r": "2"});
        assert_eq!(coord(&body, "q", "r").ok(), Some(HexCoord::new(1, 2)));
    }
}
