//! Request bodies for every mutation endpoint.
//!
//! Field names match the backend contract exactly. Tuning values are the
//! raw text of the originating input control: the backend is the only
//! authority on whether `"12"` or `"twelve"` is acceptable, so nothing here
//! parses or range-checks them. Route coordinates are the one exception
//! and go through [`FormNumber`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coords::HexCoord;
use crate::form_number::FormNumber;

/// Body of `POST /api/paint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PaintRequest {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Terrain tag to apply.
    pub terrain: String,
}

impl PaintRequest {
    /// Paint `coord` with `terrain`.
    pub fn new(coord: HexCoord, terrain: impl Into<String>) -> Self {
        Self {
            q: coord.q,
            r: coord.r,
            terrain: terrain.into(),
        }
    }
}

/// Body of `POST /api/site`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SiteRequest {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Site kind (`dungeon`, `town`, `ruin`).
    pub kind: String,
}

impl SiteRequest {
    /// Place a `kind` site at `coord`.
    pub fn new(coord: HexCoord, kind: impl Into<String>) -> Self {
        Self {
            q: coord.q,
            r: coord.r,
            kind: kind.into(),
        }
    }
}

/// Body of `POST /api/spawner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SpawnerRequest {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
    /// Encounter table the spawner is bound to.
    pub table: String,
}

impl SpawnerRequest {
    /// Place a spawner at `coord` drawing from `table`.
    pub fn new(coord: HexCoord, table: impl Into<String>) -> Self {
        Self {
            q: coord.q,
            r: coord.r,
            table: table.into(),
        }
    }
}

/// Body of `POST /api/route`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RouteRequest {
    /// First endpoint, column.
    #[ts(type = "number | null")]
    pub q1: FormNumber,
    /// First endpoint, row.
    #[ts(type = "number | null")]
    pub r1: FormNumber,
    /// Second endpoint, column.
    #[ts(type = "number | null")]
    pub q2: FormNumber,
    /// Second endpoint, row.
    #[ts(type = "number | null")]
    pub r2: FormNumber,
}

impl RouteRequest {
    /// Connect two known coordinates.
    pub fn between(from: HexCoord, to: HexCoord) -> Self {
        Self {
            q1: FormNumber::from(from.q),
            r1: FormNumber::from(from.r),
            q2: FormNumber::from(to.q),
            r2: FormNumber::from(to.r),
        }
    }
}

/// Body of `POST /api/encounter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EncounterRequest {
    /// Encounter table identifier.
    pub id: String,
    /// New weight of the table's first entry, as typed.
    pub first_weight: String,
}

/// Body of `POST /api/rumor-template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RumorTemplateRequest {
    /// Rumor template identifier.
    pub id: String,
    /// Lifetime in ticks, as typed.
    pub ttl_ticks: String,
    /// Propagation hop limit, as typed.
    pub max_hops: String,
}

/// Body of `POST /api/weapon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeaponRequest {
    /// Weapon identifier.
    pub id: String,
    /// Armor penetration, as typed.
    pub penetration: String,
}

/// Body of `POST /api/armor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ArmorRequest {
    /// Armor identifier.
    pub armor_id: String,
    /// Damage type the threshold applies to (`pierce`, `slash`, ...).
    pub damage_type: String,
    /// Facing arc (`front`, `side`, `rear`).
    pub arc: String,
    /// Threshold value, as typed.
    pub value: String,
}

/// Body of `POST /api/wound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WoundRequest {
    /// Wound type identifier.
    pub id: String,
    /// Mobility change, as typed.
    pub mobility_delta: String,
    /// Dexterity change, as typed.
    pub dexterity_delta: String,
}

/// Body of `POST /api/faction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FactionRequest {
    /// Faction identifier.
    pub id: String,
    /// Settlement to associate with the faction.
    pub settlement: String,
}

/// Body of `POST /api/simulate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulateRequest {
    /// Number of days to advance, as typed.
    pub days: String,
}

/// Body of `POST /api/play` (always empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayRequest {}

/// The reply most mutation endpoints send back.
///
/// The editor never depends on it: replies are read field by field and
/// only used for logging. A field of an unexpected type is skipped rather
/// than failing the whole read, so an error reply is always recognised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MutationAck {
    /// Whether the backend reported success.
    #[serde(default)]
    pub ok: bool,
    /// Identifier of a newly created entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// World tick after the mutation (simulate only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    /// Identifier of an event created by the playtest step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Error message, when the backend refused the mutation. Non-string
    /// errors are kept as their JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationAck {
    /// Best-effort read of an arbitrary reply body.
    pub fn from_reply(reply: &serde_json::Value) -> Self {
        let text = |key: &str| reply.get(key).and_then(serde_json::Value::as_str).map(str::to_owned);
        let error = match reply.get("error") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            ok: reply
                .get("ok")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            id: text("id"),
            tick: reply.get("tick").and_then(serde_json::Value::as_u64),
            event_id: text("event_id"),
            error,
        }
    }

    /// Whether the reply reports a refused mutation.
    pub const fn is_refusal(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap_or_default()
    }

    #[test]
    fn paint_body_shape() {
        let body = PaintRequest::new(HexCoord::new(2, 3), "forest");
        assert_eq!(
            to_json(&body),
            serde_json::json!({"q": 2, "r": 3, "terrain": "forest"})
        );
    }

    #[test]
    fn route_body_uses_numbers() {
        let body = RouteRequest::between(HexCoord::new(1, 1), HexCoord::new(2, 1));
        assert_eq!(
            to_json(&body),
            serde_json::json!({"q1": 1, "r1": 1, "q2": 2, "r2": 1})
        );
    }

    #[test]
    fn tuning_values_stay_strings() {
        let body = SimulateRequest {
            days: "5".to_owned(),
        };
        assert_eq!(to_json(&body), serde_json::json!({"days": "5"}));
    }

    #[test]
    fn play_body_is_empty_object() {
        assert_eq!(to_json(&PlayRequest {}), serde_json::json!({}));
    }

    #[test]
    fn ack_reads_success_and_error_replies() {
        let ok = MutationAck::from_reply(&serde_json::json!({"ok": true, "id": "site_3"}));
        assert!(ok.ok);
        assert_eq!(ok.id.as_deref(), Some("site_3"));

        let err = MutationAck::from_reply(&serde_json::json!({"error": "bad int", "status": 400}));
        assert!(!err.ok);
        assert_eq!(err.error.as_deref(), Some("bad int"));

        let odd = MutationAck::from_reply(&serde_json::json!([1, 2, 3]));
        assert_eq!(odd, MutationAck::default());
        assert!(!odd.is_refusal());
    }

    #[test]
    fn structured_error_is_still_a_refusal() {
        let reply = serde_json::json!({"error": {"field": "q1", "reason": "not an int"}, "status": 400});
        let ack = MutationAck::from_reply(&reply);
        assert!(ack.is_refusal());
        assert!(!ack.ok);
        assert_eq!(ack.error.as_deref(), Some(r#"{"field":"q1","reason":"not an int"}"#));

        let numeric = MutationAck::from_reply(&serde_json::json!({"error": 17, "ok": false}));
        assert_eq!(numeric.error.as_deref(), Some("17"));
    }

    #[test]
    fn mistyped_fields_are_skipped_individually() {
        let reply = serde_json::json!({"ok": true, "id": 42, "tick": "soon", "event_id": "event_3"});
        let ack = MutationAck::from_reply(&reply);
        assert!(ack.ok);
        assert_eq!(ack.id, None);
        assert_eq!(ack.tick, None);
        assert_eq!(ack.event_id.as_deref(), Some("event_3"));
        assert!(!ack.is_refusal());
    }
}
