//! Home coordinator: wires a `Session` to a solve service and a typesetter.
//!
//! `Home::solve` runs one full solve cycle: `submit` sends the ink and
//! queues the answer on the session, then `reveal_pending` shows the queued
//! overlays one at a time, `reveal_delay` apart, in response order.
//!
//! Dropping the future during the reveal phase only pauses the pacing. The
//! entries stay queued until the next `reveal_pending` or `reveal_next`.
//! Hosts that handle input between reveals call `reveal_next` from their
//! own timer instead of awaiting `reveal_pending`.

use crate::input::InputEvent;
use crate::session::{CanvasConfig, Session, SolveOutcome};
use ink_core::{Overlay, OverlayId, Point};
use ink_solve::{SolveError, SolveService};
use std::time::Duration;

/// Renders overlay markup after the overlay list changes. Fire-and-forget.
pub trait Typesetter {
    fn typeset(&mut self, overlays: &[Overlay]);
}

/// Typesetter that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTypesetter;

impl Typesetter for NullTypesetter {
    fn typeset(&mut self, _overlays: &[Overlay]) {}
}

#[derive(Debug, Clone)]
pub struct HomeConfig {
    pub canvas: CanvasConfig,
    /// Pause before each overlay appears. Default: **1s**; zero reveals
    /// the whole batch at once.
    pub reveal_delay: Duration,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            reveal_delay: Duration::from_secs(1),
        }
    }
}

pub struct Home<S, T = NullTypesetter> {
    session: Session,
    service: S,
    typesetter: T,
    reveal_delay: Duration,
}

/// Releases the session's busy flag if the solve future is dropped
/// before the response is applied.
struct PendingSolve<'a> {
    session: &'a mut Session,
    generation: u64,
    armed: bool,
}

impl Drop for PendingSolve<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.abandon_solve(self.generation);
        }
    }
}

impl<S: SolveService> Home<S, NullTypesetter> {
    pub fn new(config: HomeConfig, service: S) -> Self {
        Self::with_typesetter(config, service, NullTypesetter)
    }
}

impl<S: SolveService, T: Typesetter> Home<S, T> {
    pub fn with_typesetter(config: HomeConfig, service: S, typesetter: T) -> Self {
        Self {
            session: Session::new(config.canvas),
            service,
            typesetter,
            reveal_delay: config.reveal_delay,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn typesetter(&self) -> &T {
        &self.typesetter
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.session.handle_input(event)
    }

    /// Drag-stop from the overlay layer.
    pub fn on_drag_stop(&mut self, id: OverlayId, position: Point) -> bool {
        self.session.drag_overlay(id, position)
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.typesetter.typeset(self.session.overlays().as_slice());
    }

    /// Solve the current ink and reveal one overlay per returned entry.
    ///
    /// Returns the ids of the overlays added, in display order. Entries left
    /// queued by an earlier, interrupted reveal come first.
    pub async fn solve(&mut self) -> Result<Vec<OverlayId>, SolveError> {
        self.submit().await?;
        Ok(self.reveal_pending().await)
    }

    /// Send the current ink and apply the answer. Returns how many entries
    /// were queued for reveal; zero if a reset made the response stale.
    pub async fn submit(&mut self) -> Result<usize, SolveError> {
        let ticket = self.session.begin_solve()?;
        let mut pending = PendingSolve {
            generation: ticket.generation(),
            session: &mut self.session,
            armed: true,
        };
        let result = self.service.solve(ticket.request()).await;
        pending.armed = false;
        let outcome = pending.session.finish_solve(ticket, result)?;
        drop(pending);

        Ok(match outcome {
            SolveOutcome::Applied { queued } => queued,
            SolveOutcome::Discarded => 0,
        })
    }

    /// Show the next queued overlay now and typeset.
    pub fn reveal_next(&mut self) -> Option<OverlayId> {
        let id = self.session.reveal_next()?;
        self.typesetter.typeset(self.session.overlays().as_slice());
        Some(id)
    }

    /// Drain the reveal queue, waiting `reveal_delay` before each overlay.
    /// With no delay the whole queue appears in one typeset pass.
    pub async fn reveal_pending(&mut self) -> Vec<OverlayId> {
        if self.reveal_delay.is_zero() {
            let ids = self.session.reveal_all();
            if !ids.is_empty() {
                self.typesetter.typeset(self.session.overlays().as_slice());
            }
            return ids;
        }
        let mut ids = Vec::with_capacity(self.session.pending_reveals());
        while self.session.pending_reveals() > 0 {
            tokio::time::sleep(self.reveal_delay).await;
            ids.extend(self.reveal_next());
        }
        ids
    }
}
