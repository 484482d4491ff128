//! Editor client for the hexcrawl world backend.
//!
//! The editor holds no world state of its own. Every operator action is
//! turned into one mutation request, and every mutation is followed by a
//! full re-fetch and re-render of the backend's world snapshot.
//!
//! # Architecture
//!
//! ```text
//! input --> Command --> Action --> EditorController --> Transport --> backend
//!                                        |                              |
//!                                        +<-- render <-- WorldSnapshot <-+
//!                                        |
//!                                        +--> ViewHandle (generation-gated)
//! ```
//!
//! - [`transport`] -- one-shot JSON POST / snapshot GET over `reqwest`
//! - [`forms`] -- plain form snapshots and their request bodies
//! - [`controller`] -- the mutate-then-refresh pipeline
//! - [`render`] -- snapshot to grid and status text
//! - [`view`] -- the shared view and stale-refresh rejection
//! - [`state`] -- mode and selectors owned by the front end
//! - [`command`] / [`cli`] -- the terminal front end

pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod render;
pub mod state;
pub mod transport;
pub mod view;

pub use config::EditorConfig;
pub use controller::{ActionReport, EditorController};
pub use error::EditorError;
pub use render::{HexButton, RenderedView};
pub use state::EditorState;
pub use transport::Transport;
pub use view::{RefreshOutcome, ViewHandle};
