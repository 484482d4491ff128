//! Axial hex coordinates.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A hex cell address in axial `(q, r)` form.
///
/// The editor never does hex math; coordinates are only carried from a
/// rendered cell back to the backend, so no cube/offset conversions live
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HexCoord {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

impl HexCoord {
    /// Build a coordinate from its two axial components.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl core::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self { q, r }
    }
}
