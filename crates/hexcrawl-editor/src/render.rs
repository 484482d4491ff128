//! Snapshot rendering.
//!
//! [`render`] turns one [`WorldSnapshot`] into a complete [`RenderedView`]:
//! one clickable [`HexButton`] per terrain cell, in the order the backend
//! listed them, plus a plain-text status block. Nothing is reused between
//! renders; every refresh builds the view from scratch.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use hexcrawl_types::{HexCoord, WorldSnapshot};

/// One interactive grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexButton {
    /// Coordinates handed to the action handler when the cell is clicked.
    pub coord: HexCoord,
    /// Terrain tag the cell is styled by.
    pub terrain: String,
    /// Visible label, `q,r`.
    pub label: String,
    /// Style classes, `hex <terrain>`.
    pub class: String,
}

impl HexButton {
    fn from_cell(coord: HexCoord, terrain: &str) -> Self {
        Self {
            coord,
            terrain: terrain.to_owned(),
            label: coord.to_string(),
            class: format!("hex {terrain}"),
        }
    }
}

/// Everything the editor shows for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    /// Grid cells in backend order.
    pub cells: Vec<HexButton>,
    /// Status block text.
    pub status: String,
}

impl RenderedView {
    /// The button for `coord`, if the grid has one.
    pub fn cell(&self, coord: HexCoord) -> Option<&HexButton> {
        self.cells.iter().find(|cell| cell.coord == coord)
    }

    /// Terminal rendition of the grid.
    ///
    /// One line per `r` row, each row shifted right by half a cell per step
    /// so the axial skew reads as hexes. Each cell shows the first letter
    /// of its terrain tag; missing cells are blank.
    pub fn grid_text(&self) -> String {
        let mut rows: BTreeMap<i32, BTreeMap<i32, char>> = BTreeMap::new();
        for cell in &self.cells {
            let glyph = cell.terrain.chars().next().unwrap_or('?');
            rows.entry(cell.coord.r)
                .or_default()
                .insert(cell.coord.q, glyph);
        }

        let Some(min_q) = self.cells.iter().map(|c| c.coord.q).min() else {
            return String::new();
        };
        let min_r = rows.keys().next().copied().unwrap_or_default();

        let mut out = String::new();
        for (r, row) in &rows {
            let indent = usize::try_from(r.abs_diff(min_r)).unwrap_or(0);
            let _ = write!(out, "{r:>4} {}", " ".repeat(indent));
            let Some(max_q) = row.keys().next_back().copied() else {
                continue;
            };
            for q in min_q..=max_q {
                let glyph = row.get(&q).copied().unwrap_or(' ');
                let _ = write!(out, "{glyph} ");
            }
            out.push('\n');
        }
        out
    }
}

/// Build the grid and status block for `snapshot`.
pub fn render(snapshot: &WorldSnapshot) -> RenderedView {
    let cells = snapshot
        .terrain
        .iter()
        .map(|cell| HexButton::from_cell(cell.coord(), &cell.t))
        .collect();

    RenderedView {
        cells,
        status: status_text(snapshot),
    }
}

/// The status block: tick, collection sizes and the raw unrest mapping.
pub fn status_text(snapshot: &WorldSnapshot) -> String {
    let unrest = serde_json::to_string(&snapshot.regional_unrest)
        .unwrap_or_else(|_| "{}".to_owned());
    format!(
        "tick={}\nsites={}\nspawners={}\nroutes={}\nrumors={}\nunrest={}",
        snapshot.tick,
        snapshot.sites.len(),
        snapshot.spawners.len(),
        snapshot.routes.len(),
        snapshot.rumors.len(),
        unrest,
    )
}
