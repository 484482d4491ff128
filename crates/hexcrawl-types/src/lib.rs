//! Shared wire types for the hexcrawl world editor.
//!
//! This crate is the single source of truth for every JSON shape that
//! crosses the boundary between the editor client and the world backend.
//! Types flow downstream to `TypeScript` via `ts-rs` for the browser
//! editor page.
//!
//! # Modules
//!
//! - [`coords`] -- Axial hex coordinates
//! - [`mode`] -- The editor's grid-click mode
//! - [`snapshot`] -- The authoritative world snapshot returned by `GET /api/world`
//! - [`requests`] -- One request body per mutation endpoint
//! - [`endpoint`] -- The backend route table
//! - [`form_number`] -- Numeric coercion of raw form text

pub mod coords;
pub mod endpoint;
pub mod form_number;
pub mod mode;
pub mod requests;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use coords::HexCoord;
pub use endpoint::{Endpoint, HttpMethod};
pub use form_number::FormNumber;
pub use mode::{EditorMode, ModeParseError};
pub use requests::{
    ArmorRequest, EncounterRequest, FactionRequest, MutationAck, PaintRequest, PlayRequest,
    RouteRequest, RumorTemplateRequest, SimulateRequest, SiteRequest, SpawnerRequest,
    WeaponRequest, WoundRequest,
};
pub use snapshot::{
    RouteRecord, SiteRecord, SpawnerRecord, TerrainCell, TrackRecord, WorldSnapshot,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::coords::HexCoord::export_all();
        let _ = crate::mode::EditorMode::export_all();

        let _ = crate::snapshot::TerrainCell::export_all();
        let _ = crate::snapshot::SiteRecord::export_all();
        let _ = crate::snapshot::SpawnerRecord::export_all();
        let _ = crate::snapshot::RouteRecord::export_all();
        let _ = crate::snapshot::TrackRecord::export_all();
        let _ = crate::snapshot::WorldSnapshot::export_all();

        let _ = crate::requests::PaintRequest::export_all();
        let _ = crate::requests::SiteRequest::export_all();
        let _ = crate::requests::SpawnerRequest::export_all();
        let _ = crate::requests::RouteRequest::export_all();
        let _ = crate::requests::EncounterRequest::export_all();
        let _ = crate::requests::RumorTemplateRequest::export_all();
        let _ = crate::requests::WeaponRequest::export_all();
        let _ = crate::requests::ArmorRequest::export_all();
        let _ = crate::requests::WoundRequest::export_all();
        let _ = crate::requests::FactionRequest::export_all();
        let _ = crate::requests::SimulateRequest::export_all();
        let _ = crate::requests::PlayRequest::export_all();
        let _ = crate::requests::MutationAck::export_all();
    }
}
