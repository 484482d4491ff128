//! Shared application state for the stand-in backend.
//!
//! [`AppState`] holds the world, the content catalog and a log of the most
//! recent requests the editor sent, each behind its own lock so that reads
//! of the world never wait on catalog edits. The log is bounded: once it
//! holds [`REQUEST_LOG_CAPACITY`] entries the oldest is dropped for each new
//! one.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use hexcrawl_types::{Endpoint, HttpMethod};
use tokio::sync::{Mutex, RwLock};

use crate::content::ContentCatalog;
use crate::world::StubWorld;

/// Requests kept by [`AppState::new`].
pub const REQUEST_LOG_CAPACITY: usize = 1024;

/// One request as the backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Route that was hit.
    pub endpoint: Endpoint,
    /// Decoded JSON body (`null` for reads).
    pub body: serde_json::Value,
    /// Arrival time.
    pub received_at: DateTime<Utc>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// The world served by `GET /api/world`.
    pub world: RwLock<StubWorld>,
    /// Tunable content.
    pub content: RwLock<ContentCatalog>,
    requests: Mutex<VecDeque<RecordedRequest>>,
    log_capacity: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_log_capacity(REQUEST_LOG_CAPACITY)
    }
}

impl AppState {
    /// Default 12x12 plains world with seeded content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default world and content, keeping at most `capacity` requests.
    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            world: RwLock::new(StubWorld::default()),
            content: RwLock::new(ContentCatalog::seeded()),
            requests: Mutex::new(VecDeque::with_capacity(capacity.min(REQUEST_LOG_CAPACITY))),
            log_capacity: capacity,
        }
    }

    /// Append a request to the log, evicting the oldest entry when full.
    pub async fn record(&self, endpoint: Endpoint, body: serde_json::Value) {
        if self.log_capacity == 0 {
            return;
        }
        let mut log = self.requests.lock().await;
        while log.len() >= self.log_capacity {
            log.pop_front();
        }
        log.push_back(RecordedRequest {
            method: endpoint.method(),
            endpoint,
            body,
            received_at: Utc::now(),
        });
    }

    /// Logged requests, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.iter().cloned().collect()
    }
}
