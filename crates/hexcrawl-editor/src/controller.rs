//! The editor's action pipeline: mutate, then re-fetch and re-render.
//!
//! Every user action runs the same sequence:
//! 1. Build one request from the action's inputs
//! 2. POST it to the backend and wait for the reply
//! 3. GET the full world snapshot
//! 4. Render it and install it in the shared view
//!
//! The reply to step 2 is never inspected for success. Whatever the
//! backend said, step 3 runs, and the operator learns about a refused
//! mutation only by seeing that the snapshot did not change.

use hexcrawl_types::{
    EditorMode, Endpoint, HexCoord, MutationAck, PaintRequest, PlayRequest, SiteRequest,
    SpawnerRequest,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::forms::{
    ArmorForm, EncounterForm, FactionForm, MutationForm, RouteForm, RumorTemplateForm,
    SimulateForm, WeaponForm, WoundForm,
};
use crate::render::render;
use crate::state::EditorState;
use crate::transport::Transport;
use crate::view::{RefreshOutcome, ViewHandle};

/// Result of one mutating action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    /// Endpoint the mutation was sent to.
    pub endpoint: Endpoint,
    /// Raw reply body, success or not.
    pub response: serde_json::Value,
    /// What the follow-up refresh did.
    pub refresh: RefreshOutcome,
}

impl ActionReport {
    /// Lenient read of the reply body.
    pub fn ack(&self) -> MutationAck {
        MutationAck::from_reply(&self.response)
    }
}

/// Drives the mutate-then-refresh loop against one backend.
#[derive(Debug, Clone)]
pub struct EditorController {
    transport: Transport,
    spawn_table: String,
    view: ViewHandle,
}

impl EditorController {
    /// Create a controller that binds spawners to `spawn_table`.
    pub fn new(transport: Transport, spawn_table: &str) -> Self {
        Self {
            transport,
            spawn_table: spawn_table.to_owned(),
            view: ViewHandle::new(),
        }
    }

    /// Create a controller from configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(Transport::new(&config.backend_url), &config.spawn_table)
    }

    /// The shared view this controller renders into.
    pub const fn view(&self) -> &ViewHandle {
        &self.view
    }

    /// Encounter table used for spawners placed from the grid.
    pub fn spawn_table(&self) -> &str {
        &self.spawn_table
    }

    /// Fetch the world snapshot and redraw the view from scratch.
    ///
    /// A fetch or decode failure leaves the current view untouched.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from the snapshot fetch.
    pub async fn refresh(&self) -> Result<RefreshOutcome, EditorError> {
        let ticket = self.view.begin();
        let snapshot = self.transport.fetch_world().await?;
        let rendered = render(&snapshot);
        let outcome = self.view.commit(ticket, snapshot.tick, rendered).await;

        match outcome {
            RefreshOutcome::Applied { generation, tick } => {
                debug!(generation, tick, cells = snapshot.terrain.len(), "view refreshed");
            }
            RefreshOutcome::Stale {
                generation,
                superseded_by,
            } => {
                info!(generation, superseded_by, "discarded stale refresh");
            }
        }
        Ok(outcome)
    }

    /// Handle a click on the cell at `coord` according to `state.mode`.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from either round-trip.
    pub async fn on_hex(&self, state: &EditorState, coord: HexCoord) -> Result<ActionReport, EditorError> {
        match state.mode {
            EditorMode::Paint => {
                let body = PaintRequest::new(coord, state.selections.terrain.as_str());
                self.mutate(Endpoint::Paint, &body).await
            }
            EditorMode::Site => {
                let body = SiteRequest::new(coord, state.selections.site_kind.as_str());
                self.mutate(Endpoint::Site, &body).await
            }
            EditorMode::Spawn => {
                let body = SpawnerRequest::new(coord, self.spawn_table.as_str());
                self.mutate(Endpoint::Spawner, &body).await
            }
        }
    }

    /// Submit any form, then refresh.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode failures from either round-trip.
    pub async fn submit<F: MutationForm + Sync>(&self, form: &F) -> Result<ActionReport, EditorError> {
        self.mutate(F::ENDPOINT, &form.to_request()).await
    }

    /// Create a patrol route between two cells.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_route(&self, form: &RouteForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Tune an encounter table's first entry weight.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_encounter(&self, form: &EncounterForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Tune a rumor template's lifetime and hop limit.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_rumor_template(&self, form: &RumorTemplateForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Tune a weapon's penetration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_weapon(&self, form: &WeaponForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Tune an armor threshold.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_armor(&self, form: &ArmorForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Tune a wound type's effects.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_wound(&self, form: &WoundForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Associate a settlement with a faction.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn save_faction(&self, form: &FactionForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Advance the simulation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn simulate_days(&self, form: &SimulateForm) -> Result<ActionReport, EditorError> {
        self.submit(form).await
    }

    /// Run the backend's scripted playtest step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub async fn play(&self) -> Result<ActionReport, EditorError> {
        self.mutate(Endpoint::Play, &PlayRequest {}).await
    }

    async fn mutate<P>(&self, endpoint: Endpoint, body: &P) -> Result<ActionReport, EditorError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let response = self.transport.post(endpoint, body).await?;

        let ack = MutationAck::from_reply(&response);
        if let Some(error) = &ack.error {
            warn!(endpoint = endpoint.path(), error = %error, "backend refused mutation");
        } else {
            info!(endpoint = endpoint.path(), id = ?ack.id, "mutation sent");
        }

        let refresh = self.refresh().await?;
        Ok(ActionReport {
            endpoint,
            response,
            refresh,
        })
    }
}
