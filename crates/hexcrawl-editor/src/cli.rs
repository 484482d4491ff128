//! Line-oriented terminal front end.
//!
//! Reads commands from any async line source. Local commands update the
//! [`EditorState`] in place. Every action is spawned as its own task with
//! a copy of the state as it was when the line was read, so several
//! actions can be in flight at once; the view's generation check decides
//! which refresh ends up on screen.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::command::{Action, ActionResult, Command, HELP};
use crate::controller::EditorController;
use crate::error::EditorError;
use crate::state::EditorState;
use crate::view::{RefreshOutcome, ViewHandle};

/// An interactive editing session.
pub struct Session {
    controller: Arc<EditorController>,
    state: EditorState,
    tasks: JoinSet<Result<ActionResult, EditorError>>,
}

impl Session {
    /// Start a session with the given controller and startup state.
    pub fn new(controller: Arc<EditorController>, state: EditorState) -> Self {
        Self {
            controller,
            state,
            tasks: JoinSet::new(),
        }
    }

    /// Current local state.
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Read and execute commands until `quit` or end of input, then wait
    /// for every spawned action to finish.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Io`] if reading input fails. Action failures
    /// are reported and do not end the session.
    pub async fn run<R>(&mut self, input: R) -> Result<(), EditorError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            self.reap_finished();
            match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => {}
                Err(e) => println!("{e}"),
            }
        }
        self.drain().await;
        Ok(())
    }

    /// Apply one command. Actions are spawned and not awaited.
    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::Mode(mode) => {
                self.state.set_mode(mode);
                println!("mode = {mode}");
            }
            Command::Terrain(terrain) => {
                self.state.set_terrain(&terrain);
                println!("terrain = {terrain}");
            }
            Command::SiteKind(kind) => {
                self.state.set_site_kind(&kind);
                println!("site kind = {kind}");
            }
            Command::Show => print_view(self.controller.view()).await,
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
            Command::Act(action) => self.spawn(action),
        }
    }

    fn spawn(&mut self, action: Action) {
        let controller = Arc::clone(&self.controller);
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = action.run(&controller, &state).await;
            report(&controller, &action, &result).await;
            result
        });
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "action task panicked or was cancelled");
            }
        }
    }

    /// Wait for every in-flight action.
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "action task panicked or was cancelled");
            }
        }
    }
}

async fn report(controller: &EditorController, action: &Action, result: &Result<ActionResult, EditorError>) {
    match result {
        Ok(done) => {
            if let ActionResult::Mutated(report) = done {
                println!("{} -> {}", report.endpoint, report.response);
            }
            match done.refresh() {
                RefreshOutcome::Applied { .. } => print_view(controller.view()).await,
                RefreshOutcome::Stale { generation, superseded_by } => {
                    info!(?action, generation, superseded_by, "result superseded");
                    println!("(refresh #{generation} discarded; view #{superseded_by} is newer)");
                }
            }
        }
        Err(e) => {
            error!(?action, error = %e, "action failed");
            println!("error: {e}");
        }
    }
}

/// Print the grid and status block currently on screen.
pub async fn print_view(view: &ViewHandle) {
    match view.current().await {
        Some(rendered) => println!("{}\n{}", rendered.grid_text(), rendered.status),
        None => println!("(nothing rendered yet)"),
    }
}
