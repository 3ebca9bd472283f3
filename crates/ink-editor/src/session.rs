//! Session state: one canvas, its variables, and its overlays.
//!
//! The session is the single owner of everything a solve cycle touches.
//! Solving is split into explicit steps so an event loop can keep handling
//! input while the request is out:
//!
//! 1. `begin_solve`: detect the ink box, snapshot surface + variables into
//!    a request, and mark the session busy. Fails fast on empty ink or when
//!    another solve is still outstanding.
//! 2. (the caller awaits the service with `SolveTicket::request`)
//! 3. `finish_solve`: on success apply assignments, clear the ink, and queue
//!    one pending reveal per entry; on failure change nothing.
//! 4. `reveal_next` / `reveal_all`: drain the queue into overlays at the
//!    anchor of the solve that produced each entry.
//!
//! Results live in the session from the moment they are applied, so a host
//! that stops pacing reveals halfway loses nothing; the rest of the queue is
//! still there for the next `reveal_next`.
//!
//! `reset` bumps a generation counter and empties the queue. Tickets minted
//! before a reset are stale: their responses are ignored.

use crate::input::InputEvent;
use crate::tools::PenTool;
use ink_core::{
    OverlayId, OverlayManager, Point, SolveEntry, StrokeStyle, Surface, VariableEnv, Viewport,
    detect_bounding_box,
};
use ink_solve::{SolveError, SolveRequest};
use std::collections::VecDeque;

/// Canvas layout and pen configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasConfig {
    pub viewport: Viewport,
    /// Vertical offset of the canvas inside the viewport.
    pub offset_top: f32,
    pub style: StrokeStyle,
}

impl CanvasConfig {
    pub fn surface_size(&self) -> (u32, u32) {
        self.viewport.canvas_size(self.offset_top)
    }
}

/// An outstanding solve: the request to send and where its results go.
#[derive(Debug)]
pub struct SolveTicket {
    generation: u64,
    anchor: Point,
    request: SolveRequest,
}

impl SolveTicket {
    pub fn request(&self) -> &SolveRequest {
        &self.request
    }

    /// Center of the ink box at the moment the solve began.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The response was applied; `queued` entries joined the reveal queue.
    Applied { queued: usize },
    /// The session was reset while the request was out.
    Discarded,
}

/// An applied entry whose overlay has not been shown yet.
#[derive(Debug, Clone, PartialEq)]
struct PendingReveal {
    entry: SolveEntry,
    anchor: Point,
}

pub struct Session {
    config: CanvasConfig,
    surface: Surface,
    pen: PenTool,
    env: VariableEnv,
    overlays: OverlayManager,
    pending: VecDeque<PendingReveal>,
    generation: u64,
    in_flight: bool,
}

impl Session {
    pub fn new(config: CanvasConfig) -> Self {
        let (w, h) = config.surface_size();
        Self {
            config,
            surface: Surface::new(w, h),
            pen: PenTool::new(config.style),
            env: VariableEnv::new(),
            overlays: OverlayManager::new(),
            pending: VecDeque::new(),
            generation: 0,
            in_flight: false,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn env(&self) -> &VariableEnv {
        &self.env
    }

    pub fn overlays(&self) -> &OverlayManager {
        &self.overlays
    }

    pub fn pen(&self) -> &PenTool {
        &self.pen
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_solving(&self) -> bool {
        self.in_flight
    }

    /// Entries applied but not yet shown as overlays.
    pub fn pending_reveals(&self) -> usize {
        self.pending.len()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event. Returns `true` if the surface changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Resize { viewport } => {
                self.resize(*viewport);
                true
            }
            _ => self.pen.handle(event, &mut self.surface),
        }
    }

    /// Resize the canvas to a new viewport. Ink is lost; overlays and
    /// variables are kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
        let (w, h) = self.config.surface_size();
        self.pen.end_stroke();
        self.surface.resize(w, h);
    }

    /// Record the final position of a dragged overlay.
    pub fn drag_overlay(&mut self, id: OverlayId, position: Point) -> bool {
        self.overlays.update_position(id, position)
    }

    // ─── Solve cycle ─────────────────────────────────────────────────────

    /// Snapshot the ink and variables into a request and mark the session busy.
    ///
    /// # Errors
    /// `InFlight` if a previous solve has not finished, `EmptyInk` if nothing
    /// is drawn, `Encode` if the surface cannot be encoded. No state changes
    /// on error.
    pub fn begin_solve(&mut self) -> Result<SolveTicket, SolveError> {
        if self.in_flight {
            return Err(SolveError::InFlight);
        }
        let bbox = detect_bounding_box(&self.surface).ok_or(SolveError::EmptyInk)?;
        let request = SolveRequest::from_surface(&self.surface, self.env.snapshot())?;

        self.in_flight = true;
        log::debug!(
            "solve started (generation {}, anchor {:?})",
            self.generation,
            bbox.center()
        );
        Ok(SolveTicket {
            generation: self.generation,
            anchor: bbox.center(),
            request,
        })
    }

    /// Apply the service's answer for `ticket`.
    ///
    /// On success the assignments go into the variable environment, the
    /// ink is cleared, and every entry is queued for reveal. On error nothing changes and the error is returned,
    /// so the same ink can be re-submitted. A ticket from before the last
    /// reset is discarded either way.
    pub fn finish_solve(
        &mut self,
        ticket: SolveTicket,
        result: Result<Vec<SolveEntry>, SolveError>,
    ) -> Result<SolveOutcome, SolveError> {
        if ticket.generation != self.generation {
            log::warn!(
                "discarding solve response from generation {} (now {})",
                ticket.generation,
                self.generation
            );
            return Ok(SolveOutcome::Discarded);
        }
        self.in_flight = false;

        let entries = result.inspect_err(|e| log::warn!("solve failed: {e}"))?;
        self.env.apply_assignments(&entries);
        self.surface.clear();
        log::info!("solve applied {} entries", entries.len());

        let queued = entries.len();
        let anchor = ticket.anchor;
        self.pending
            .extend(entries.into_iter().map(|entry| PendingReveal { entry, anchor }));
        Ok(SolveOutcome::Applied { queued })
    }

    /// Release the busy flag without applying anything (the request was
    /// dropped before it completed).
    pub fn abandon_solve(&mut self, generation: u64) {
        if generation == self.generation && self.in_flight {
            log::debug!("solve abandoned (generation {generation})");
            self.in_flight = false;
        }
    }

    /// Show the oldest pending entry as an overlay. `None` when the queue is empty.
    pub fn reveal_next(&mut self) -> Option<OverlayId> {
        let PendingReveal { entry, anchor } = self.pending.pop_front()?;
        Some(self.overlays.add(&entry, anchor))
    }

    /// Show every pending entry, in response order.
    pub fn reveal_all(&mut self) -> Vec<OverlayId> {
        let mut ids = Vec::with_capacity(self.pending.len());
        while let Some(anchor) = self.pending.front().map(|p| p.anchor) {
            let run = self.pending.iter().take_while(|p| p.anchor == anchor).count();
            let entries: Vec<SolveEntry> = self.pending.drain(..run).map(|p| p.entry).collect();
            ids.extend(self.overlays.add_batch(&entries, anchor));
        }
        ids
    }

    // ─── Reset ───────────────────────────────────────────────────────────

    /// Clear ink, variables, overlays, and pending reveals. Any outstanding
    /// solve becomes stale.
    pub fn reset(&mut self) {
        self.pen.end_stroke();
        self.surface.clear();
        self.env.reset();
        self.overlays.clear_all();
        self.pending.clear();
        self.generation += 1;
        self.in_flight = false;
        log::debug!("session reset (generation {})", self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(CanvasConfig {
            viewport: Viewport {
                width: 120.0,
                height: 100.0,
            },
            offset_top: 20.0,
            ..CanvasConfig::default()
        })
    }

    fn scribble(s: &mut Session) {
        s.handle_input(&InputEvent::from_pointer_down(10.0, 10.0));
        s.handle_input(&InputEvent::from_pointer_move(50.0, 40.0));
        s.handle_input(&InputEvent::from_pointer_up(50.0, 40.0));
    }

    #[test]
    fn surface_sized_from_viewport_minus_offset() {
        let s = session();
        assert_eq!((s.surface().width(), s.surface().height()), (120, 80));
    }

    #[test]
    fn empty_ink_short_circuits() {
        let mut s = session();
        assert!(matches!(s.begin_solve(), Err(SolveError::EmptyInk)));
        assert!(!s.is_solving());
    }

    #[test]
    fn second_solve_is_refused_while_first_is_out() {
        let mut s = session();
        scribble(&mut s);
        let ticket = s.begin_solve().unwrap();
        assert!(matches!(s.begin_solve(), Err(SolveError::InFlight)));

        s.finish_solve(ticket, Ok(vec![])).unwrap();
        assert!(!s.is_solving());
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let mut s = session();
        scribble(&mut s);
        let before = s.surface().clone();
        let ticket = s.begin_solve().unwrap();

        let err = s
            .finish_solve(ticket, Err(SolveError::MalformedResponse("bad".into())))
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(s.surface(), &before);
        assert!(s.env().is_empty());
        assert!(s.overlays().is_empty());

        // Same ink can go again.
        assert!(s.begin_solve().is_ok());
    }

    #[test]
    fn success_applies_vars_and_clears_ink() {
        let mut s = session();
        scribble(&mut s);
        let ticket = s.begin_solve().unwrap();
        let anchor = ticket.anchor();

        let outcome = s
            .finish_solve(ticket, Ok(vec![SolveEntry::assignment("x", "5")]))
            .unwrap();
        assert_eq!(outcome, SolveOutcome::Applied { queued: 1 });
        assert_eq!(s.env().get("x"), Some("5"));
        assert!(!s.surface().has_ink());
        assert!(s.overlays().is_empty());

        let ids = s.reveal_all();
        assert_eq!(ids, vec![OverlayId::new(0)]);
        assert_eq!(s.pending_reveals(), 0);
        assert_eq!(s.overlays().get(ids[0]).unwrap().position, anchor);
    }

    #[test]
    fn reset_mid_flight_ignores_late_response() {
        let mut s = session();
        s.handle_input(&InputEvent::from_pointer_down(5.0, 5.0));
        s.handle_input(&InputEvent::from_pointer_move(30.0, 30.0));
        let ticket = s.begin_solve().unwrap();

        s.reset();
        assert!(!s.is_solving());
        // Pen was mid-stroke; reset ends it.
        s.handle_input(&InputEvent::from_pointer_move(60.0, 60.0));
        assert!(!s.surface().has_ink());

        let outcome = s
            .finish_solve(ticket, Ok(vec![SolveEntry::assignment("x", "1")]))
            .unwrap();
        assert_eq!(outcome, SolveOutcome::Discarded);
        assert!(s.env().is_empty());
        assert!(s.overlays().is_empty());
    }

    #[test]
    fn reset_drops_pending_reveals() {
        let mut s = session();
        scribble(&mut s);
        let ticket = s.begin_solve().unwrap();
        s.finish_solve(ticket, Ok(vec![SolveEntry::evaluation("1+1", "2")]))
            .unwrap();
        assert_eq!(s.pending_reveals(), 1);

        s.reset();
        assert_eq!(s.pending_reveals(), 0);
        assert_eq!(s.reveal_next(), None);
        assert!(s.overlays().is_empty());
    }

    #[test]
    fn queued_entries_keep_their_own_anchor() {
        let mut s = session();
        scribble(&mut s);
        let first = s.begin_solve().unwrap();
        let first_anchor = first.anchor();
        s.finish_solve(first, Ok(vec![SolveEntry::evaluation("1+1", "2")]))
            .unwrap();

        // A second solve lands before the first entry is shown.
        s.handle_input(&InputEvent::from_pointer_down(80.0, 60.0));
        s.handle_input(&InputEvent::from_pointer_move(100.0, 70.0));
        s.handle_input(&InputEvent::from_pointer_up(100.0, 70.0));
        let second = s.begin_solve().unwrap();
        let second_anchor = second.anchor();
        s.finish_solve(second, Ok(vec![SolveEntry::evaluation("3+3", "6")]))
            .unwrap();
        assert_eq!(s.pending_reveals(), 2);

        let a = s.reveal_next().unwrap();
        let b = s.reveal_next().unwrap();
        assert_eq!(s.overlays().get(a).unwrap().position, first_anchor);
        assert_eq!(s.overlays().get(b).unwrap().position, second_anchor);
        assert_eq!(s.overlays().get(b).unwrap().text(), "3+3 = 6");
    }

    #[test]
    fn abandon_releases_busy_flag() {
        let mut s = session();
        scribble(&mut s);
        let ticket = s.begin_solve().unwrap();
        s.abandon_solve(ticket.generation());
        assert!(!s.is_solving());
        assert!(s.surface().has_ink());
    }

    #[test]
    fn resize_drops_ink_but_keeps_results() {
        let mut s = session();
        scribble(&mut s);
        let ticket = s.begin_solve().unwrap();
        s.finish_solve(ticket, Ok(vec![SolveEntry::assignment("y", "2")]))
            .unwrap();
        s.reveal_all();
        scribble(&mut s);

        s.handle_input(&InputEvent::Resize {
            viewport: Viewport {
                width: 300.0,
                height: 220.0,
            },
        });
        assert_eq!((s.surface().width(), s.surface().height()), (300, 200));
        assert!(!s.surface().has_ink());
        assert_eq!(s.overlays().len(), 1);
        assert_eq!(s.env().get("y"), Some("2"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = session();
        scribble(&mut s);
        s.reset();
        let once = (s.surface().clone(), s.env().clone(), s.overlays().len());
        s.reset();
        assert_eq!((s.surface().clone(), s.env().clone(), s.overlays().len()), once);
        assert!(!s.surface().has_ink());
    }
}
