//! Slot-level graph operations.
//!
//! These traits describe a graph purely in terms of [`Slot`]s. The labelled surface of
//! [`LabelledGraph`](crate::repr::LabelledGraph) is built on top of them, and the
//! traversal algorithms in [`algo`](crate::algo) only require [`AdjacencyList`].

use crate::*;

/// Provides getters pertaining to the slot-size of a graph
pub trait GraphSlotOrder {
    /// Returns the size of the slot table, i.e. the high-water mark of allocated slots.
    /// Vacated slots are included.
    fn number_of_slots(&self) -> NumSlots;

    /// Returns the number of live (non-vacated) vertices
    fn number_of_vertices(&self) -> NumSlots;

    /// Returns the size of the slot table as usize
    fn len(&self) -> usize {
        self.number_of_slots() as usize
    }

    /// Returns an iterator over all live slots in ascending order.
    fn slots(&self) -> impl Iterator<Item = Slot> + '_;

    /// Returns *true* if the graph has no live vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_vertices() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of (undirected) edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphSlotOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given slot in insertion order.
    /// Vacated slots have an empty neighborhood.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Slot) -> impl Iterator<Item = Slot> + '_;

    /// Returns the number of neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Slot) -> NumSlots;

    /// Returns an iterator over the degrees of all live slots
    fn degrees(&self) -> impl Iterator<Item = NumSlots> + '_ {
        self.slots().map(|u| self.degree_of(u))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumSlots {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns an iterator to all slots with non-zero degree
    fn slots_with_neighbors(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots().filter(|&u| self.degree_of(u) > 0)
    }

    /// Returns an iterator over edges incident to a given slot.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Slot, only_normalized: bool) -> impl Iterator<Item = SlotEdge> + '_ {
        self.neighbors_of(u)
            .map(move |v| SlotEdge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, every undirected edge is reported exactly once as `(u, v)` with `u < v`.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = SlotEdge> + '_ {
        self.slots()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }
}

/// Trait to test existence of edges between slots.
pub trait AdjacencyTest: GraphSlotOrder {
    /// Returns *true* if the edge {u,v} exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Slot, v: Slot) -> bool;
}

/// Provides functions to insert/delete edges between existing slots
pub trait GraphEdgeEditing {
    /// Adds the edge {u,v} to the graph.
    /// Returns *true* exactly if the edge was already present, in which case nothing changes.
    /// ** Panics if `u >= n || v >= n`, if either slot is vacated or if `u == v` **
    fn try_add_edge(&mut self, u: Slot, v: Slot) -> bool;

    /// Removes the edge {u,v} from the graph.
    /// If the edge was removed, returns *true* and *false* otherwise.
    /// ** Panics if `u >= n || v >= n` **
    fn try_remove_edge(&mut self, u: Slot, v: Slot) -> bool;

    /// Removes all edges incident to `u` and returns the number of removed edges.
    /// ** Panics if `u >= n` **
    fn remove_edges_at_slot(&mut self, u: Slot) -> NumEdges;
}
