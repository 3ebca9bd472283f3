//! Result overlays: one draggable label per solved expression.
//!
//! Overlays are appended in response order and never removed one at a
//! time, so an overlay's id is simply its index in the list. The system
//! sets the initial position (the batch anchor); after that the position
//! belongs to the user's drag gestures.

use crate::id::OverlayId;
use crate::model::{Point, SolveEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: OverlayId,
    pub expression: String,
    pub result: String,
    pub position: Point,
}

impl Overlay {
    /// Plain display text: `expr = result`.
    pub fn text(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }

    /// Inline-math markup handed to the typesetter.
    pub fn latex(&self) -> String {
        format!("\\(\\LARGE{{{} = {}}}\\)", self.expression, self.result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    overlays: Vec<Overlay>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single overlay at `anchor`.
    pub fn add(&mut self, entry: &SolveEntry, anchor: Point) -> OverlayId {
        let id = OverlayId::new(self.overlays.len());
        self.overlays.push(Overlay {
            id,
            expression: entry.expression.clone(),
            result: entry.result.clone(),
            position: anchor,
        });
        log::debug!("overlay {id} \"{} = {}\"", entry.expression, entry.result);
        id
    }

    /// Append one overlay per entry, in order, all at the same `anchor`.
    pub fn add_batch(&mut self, entries: &[SolveEntry], anchor: Point) -> Vec<OverlayId> {
        entries.iter().map(|e| self.add(e, anchor)).collect()
    }

    /// Record a drag result. Returns `false` for an unknown id.
    pub fn update_position(&mut self, id: OverlayId, position: Point) -> bool {
        match self.overlays.get_mut(id.index()) {
            Some(overlay) => {
                overlay.position = position;
                true
            }
            None => {
                log::warn!("drag update for unknown overlay {id}");
                false
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.overlays.clear();
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id.index())
    }

    /// Overlays in display order.
    pub fn as_slice(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
