//! In-memory stand-in for the hexcrawl world backend.
//!
//! This crate provides an Axum HTTP server that speaks the same JSON
//! protocol as the real backend, so the editor can be exercised without
//! the simulation behind it:
//!
//! - **`GET /api/world`** returns the current [`WorldSnapshot`]
//! - **`POST /api/*`** applies map edits, content tuning and time
//!   advancement to in-memory state
//! - **`GET /`** is a minimal HTML status page
//!
//! Every request is appended to a log on [`AppState`] so tests can assert
//! exactly what the editor sent and in which order. Failures are JSON
//! bodies of the form `{"error": ..., "status": ...}`.
//!
//! There is no simulation here. Time advancement only moves the clock,
//! and `/api/play` stages one scripted raid.
//!
//! [`WorldSnapshot`]: hexcrawl_types::WorldSnapshot

pub mod content;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod world;

// Re-export primary types for convenience.
pub use content::ContentCatalog;
pub use error::StubError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, spawn_on, start_server};
pub use state::{AppState, RecordedRequest};
pub use world::{StubWorld, TICKS_PER_DAY};
