use std::fmt::{Debug, Display};

use crate::Slot;

/// An undirected edge between two slots.
/// The graph only stores edges with distinct endpoints, but an `SlotEdge` itself does not
/// enforce this so that it can be used while validating input.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotEdge(pub Slot, pub Slot);

/// Number of edges in a graph
pub type NumEdges = usize;

impl Display for SlotEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for SlotEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl SlotEdge {
    /// Normalizes the edge such that the endpoint with smaller slot comes first
    pub fn normalized(&self) -> Self {
        SlotEdge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller slot comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }
}

impl From<(Slot, Slot)> for SlotEdge {
    fn from(value: (Slot, Slot)) -> Self {
        SlotEdge(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        let e = SlotEdge(5, 2);
        assert!(!e.is_normalized());
        assert_eq!(e.normalized(), SlotEdge(2, 5));
        assert!(e.normalized().is_normalized());
        assert!(SlotEdge(3, 3).is_loop());
        assert_eq!(format!("{:?}", SlotEdge::from((1, 4))), "(1,4)");
    }
}
