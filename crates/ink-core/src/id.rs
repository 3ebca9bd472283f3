use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an overlay: its insertion index in the overlay list.
///
/// Overlays are never removed individually, so an id keeps pointing at the
/// same overlay until the whole list is cleared.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(usize);

impl OverlayId {
    pub const fn new(index: usize) -> Self {
        OverlayId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_index() {
        assert!(OverlayId::new(0) < OverlayId::new(1));
        assert_eq!(OverlayId::new(3).index(), 3);
        assert_eq!(OverlayId::new(3).to_string(), "#3");
    }

    #[test]
    fn serializes_as_bare_index() {
        assert_eq!(serde_json::to_string(&OverlayId::new(7)).unwrap(), "7");
    }
}
