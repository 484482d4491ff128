//! The grid-click editing mode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which mutation a click on a grid cell performs.
///
/// Exactly one mode is active at a time. The mode is never inferred from
/// world data; the front end sets it and hands it to the action handler
/// at click time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum EditorMode {
    /// Set the terrain tag of the clicked cell.
    #[default]
    Paint,
    /// Place a site of the selected kind on the clicked cell.
    Site,
    /// Place a spawner bound to the editor's encounter table.
    Spawn,
}

impl EditorMode {
    /// Every mode, in the order the editor toolbar lists them.
    pub const ALL: [Self; 3] = [Self::Paint, Self::Site, Self::Spawn];

    /// The wire/display name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paint => "paint",
            Self::Site => "site",
            Self::Spawn => "spawn",
        }
    }
}

impl core::fmt::Display for EditorMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`EditorMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown editor mode `{0}` (expected paint, site or spawn)")]
pub struct ModeParseError(pub String);

impl FromStr for EditorMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paint" => Ok(Self::Paint),
            "site" => Ok(Self::Site),
            "spawn" => Ok(Self::Spawn),
            other => Err(ModeParseError(other.to_owned())),
        }
    }
}
