//! Editor-local state owned by the front end.
//!
//! The only state the editor keeps between actions: which grid-click mode
//! is active and what the grid selectors currently hold. It is passed to
//! the action handler explicitly on every click.

use hexcrawl_types::EditorMode;

use crate::config::EditorConfig;
use crate::forms::HexSelections;

/// Mode and selector values at the moment of a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Active grid-click mode.
    pub mode: EditorMode,
    /// Terrain and site-kind selectors.
    pub selections: HexSelections,
}

impl EditorState {
    /// Startup state from configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            mode: config.initial_mode,
            selections: HexSelections {
                terrain: config.default_terrain.clone(),
                site_kind: config.default_site_kind.clone(),
            },
        }
    }

    /// Switch the grid-click mode.
    pub const fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Change the terrain selector.
    pub fn set_terrain(&mut self, terrain: &str) {
        terrain.clone_into(&mut self.selections.terrain);
    }

    /// Change the site-kind selector.
    pub fn set_site_kind(&mut self, kind: &str) {
        kind.clone_into(&mut self.selections.site_kind);
    }
}
