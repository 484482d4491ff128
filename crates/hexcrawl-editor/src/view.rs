//! The shared editor view and refresh sequencing.
//!
//! The rendered view is the only state shared between concurrently running
//! actions. Each refresh takes a generation number from a monotonic
//! counter *before* it fetches the snapshot, and may only install its
//! result if no refresh with a higher generation has been installed yet.
//! A slow refresh started by an earlier action therefore can never
//! overwrite a view produced by a later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::render::RenderedView;

/// Proof that a refresh was started, carrying its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    /// Generation number assigned when the refresh began.
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// What happened to a finished refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The rendered snapshot is now on screen.
    Applied {
        /// Generation of this refresh.
        generation: u64,
        /// Tick of the snapshot that was installed.
        tick: u64,
    },
    /// A newer refresh had already been installed; this one was dropped.
    Stale {
        /// Generation of this refresh.
        generation: u64,
        /// Generation of the view currently on screen.
        superseded_by: u64,
    },
}

impl RefreshOutcome {
    /// Whether the refresh changed what is on screen.
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Default)]
struct ViewSlot {
    view: Option<RenderedView>,
    tick: u64,
    generation: u64,
}

/// Cloneable handle to the editor view.
#[derive(Debug, Clone, Default)]
pub struct ViewHandle {
    issued: Arc<AtomicU64>,
    slot: Arc<RwLock<ViewSlot>>,
}

impl ViewHandle {
    /// An empty view; nothing has been rendered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh cycle and reserve its generation.
    pub fn begin(&self) -> RefreshTicket {
        let previous = self.issued.fetch_add(1, Ordering::AcqRel);
        RefreshTicket {
            generation: previous.saturating_add(1),
        }
    }

    /// Install `view` unless a newer refresh got there first.
    pub async fn commit(&self, ticket: RefreshTicket, tick: u64, view: RenderedView) -> RefreshOutcome {
        let mut slot = self.slot.write().await;
        if ticket.generation <= slot.generation {
            return RefreshOutcome::Stale {
                generation: ticket.generation,
                superseded_by: slot.generation,
            };
        }
        slot.view = Some(view);
        slot.tick = tick;
        slot.generation = ticket.generation;
        RefreshOutcome::Applied {
            generation: ticket.generation,
            tick,
        }
    }

    /// A copy of the view on screen, if anything has been rendered.
    pub async fn current(&self) -> Option<RenderedView> {
        self.slot.read().await.view.clone()
    }

    /// Tick of the snapshot on screen (0 before the first render).
    pub async fn tick(&self) -> u64 {
        self.slot.read().await.tick
    }

    /// Generation of the view on screen (0 before the first render).
    pub async fn committed_generation(&self) -> u64 {
        self.slot.read().await.generation
    }
}
