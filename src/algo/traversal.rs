/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- BFS iterators over slots, with and without predecessor tracking.
- [`TraversalTree`] which turns a traversal with predecessors into parent or depth arrays.
- The [`Traversal`] trait exposing traversals and BFS shortest paths on every [`AdjacencyList`].
- Label-based shortest path queries on [`LabelledGraph`].

A BFS puts every slot into one of three states: *unvisited*, *frontier* (queued but not yet
expanded) and *visited* (expanded). A slot is marked as seen when it enters the frontier, so
each slot is queued at most once.
*/

use std::{collections::VecDeque, hash::Hash, marker::PhantomData};

use tracing::debug;

use super::*;
use crate::error::Result;

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **slot currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Slot, item: Slot) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Slot) -> Self;

    /// Returns the slot represented by this item.
    fn item(&self) -> Slot;

    /// Returns the predecessor of this slot, if any.
    fn predecessor(&self) -> Option<Slot>;

    /// Returns a pair `(predecessor, item)`.
    fn predecessor_with_item(&self) -> (Option<Slot>, Slot) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Slot {
    fn new_with_predecessor(_: Slot, item: Slot) -> Self {
        item
    }
    fn new_without_predecessor(item: Slot) -> Self {
        item
    }
    fn item(&self) -> Slot {
        *self
    }
    fn predecessor(&self) -> Option<Slot> {
        None
    }
}

/// Compact representation of `(predecessor, slot)` used for
/// traversals with parent tracking.
///
/// The absence of a predecessor is encoded by setting both entries to the same slot,
/// which is unambiguous since the graph has no self-loops.
pub type PredecessorOfSlot = (Slot, Slot);

impl SequencedItem for PredecessorOfSlot {
    fn new_with_predecessor(predecessor: Slot, item: Slot) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Slot) -> Self {
        (item, item)
    }
    fn item(&self) -> Slot {
        self.1
    }
    fn predecessor(&self) -> Option<Slot> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Abstraction for the traversal frontier.
///
/// [`VecDeque`] provides the queue semantics of a **BFS**.
pub trait SlotSequencer<T> {
    /// Creates a new sequencer initialized with a single item.
    fn init(u: T) -> Self;

    /// Pushes an item into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> SlotSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator over a frontier `S`.
///
/// Maintains an explicit frontier, the set of seen slots and optionally
/// records predecessor information. Neighbors are expanded in neighborhood order, so the
/// traversal order is reproducible for a given insertion history.
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: SlotSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    seen: Vec<bool>,
    num_seen: usize,
    sequencer: S,
    stop_at: Option<Slot>,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator visiting slots in breadth-first order.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Slot>, Slot>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfSlot>, PredecessorOfSlot>;

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: SlotSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.seen[v as usize] {
                    self.seen[v as usize] = true;
                    self.num_seen += 1;
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let queued = self.sequencer.cardinality();
        (
            // a stopper may drop the remaining frontier
            if self.stop_at.is_some() {
                queued.min(1)
            } else {
                queued
            },
            Some(self.sequencer.cardinality() + self.graph.len() - self.num_seen),
        )
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: SlotSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Slot) -> Self {
        let mut seen = vec![false; graph.len()];
        seen[start as usize] = true;
        Self {
            graph,
            seen,
            num_seen: 1,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Sets a stopper slot. If this slot is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Slot) -> Self {
        self.stop_at = Some(stopper);
        self
    }

    /// Number of slots that have entered the frontier so far
    pub fn number_seen(&self) -> usize {
        self.num_seen
    }
}

/// Extension trait for traversal iterators that return `PredecessorOfSlot`,
/// enabling extraction of the implied spanning tree structure (parents, depths).
pub trait TraversalTree: Iterator<Item = PredecessorOfSlot> + Sized {
    /// Size of the slot table of the traversed graph
    fn slot_space(&self) -> usize;

    /// Constructs a parent array where the root is its own parent and unvisited slots
    /// are set to [`INVALID_SLOT`].
    fn parent_array(&mut self) -> Vec<Slot> {
        let mut tree = vec![INVALID_SLOT; self.slot_space()];
        for pred_with_item in self.by_ref() {
            let (p, u) = pred_with_item.predecessor_with_item();
            tree[u as usize] = p.unwrap_or(u);
        }
        tree
    }

    /// Consumes the iterator and computes the depth of each visited slot in the traversal tree
    /// (root depth = 0). Unvisited slots are set to [`INVALID_SLOT`].
    fn depths(&mut self) -> Vec<NumSlots> {
        let mut depths = vec![INVALID_SLOT; self.slot_space()];
        for pred_with_item in self.by_ref() {
            depths[pred_with_item.item() as usize] = pred_with_item
                .predecessor()
                .map_or(0, |p| depths[p as usize] + 1);
        }
        depths
    }
}

impl<G, S> TraversalTree for TraversalSearch<'_, G, S, PredecessorOfSlot>
where
    G: AdjacencyList,
    S: SlotSequencer<PredecessorOfSlot>,
{
    fn slot_space(&self) -> usize {
        self.graph.len()
    }
}

/// Provides traversal methods on slots for every [`AdjacencyList`]
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses slots reachable from `start` in BFS order.
    fn bfs(&self, start: Slot) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn bfs_with_predecessor(&self, start: Slot) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Computes a shortest path from `start` to `end` using BFS.
    ///
    /// - Returns `Some(path)` where `path` is the sequence of intermediate slots
    ///   (excluding `start` and `end`). Adjacent slots and `start == end` yield an empty path.
    /// - Returns `None` if `end` is not reachable from `start`.
    ///
    /// If several shortest paths exist, the one found first in neighborhood order is returned.
    /// ** Panics if `start >= n || end >= n` **
    fn shortest_path_slots(&self, start: Slot, end: Slot) -> Option<Vec<Slot>> {
        if start == end {
            return Some(Vec::new());
        }

        let mut bfs = self.bfs_with_predecessor(start).stop_at(end);
        let parent = bfs.parent_array();
        debug!(start, end, seen = bfs.number_seen(), "bfs finished");

        // `end` never entered the frontier; there is no parent chain to follow
        if parent[end as usize] == INVALID_SLOT {
            return None;
        }

        let mut path = Vec::new();
        let mut slot = parent[end as usize];
        while slot != start {
            path.push(slot);
            slot = parent[slot as usize];
        }

        path.reverse();
        Some(path)
    }

    /// Returns the number of edges on a shortest path from `start` to `end`,
    /// or `None` if `end` is unreachable.
    /// ** Panics if `start >= n || end >= n` **
    fn distance_slots(&self, start: Slot, end: Slot) -> Option<NumSlots> {
        let depth = self.bfs_with_predecessor(start).stop_at(end).depths()[end as usize];
        (depth != INVALID_SLOT).then_some(depth)
    }

    /// Returns *true* if `end` is reachable from `start`.
    /// ** Panics if `start >= n || end >= n` **
    fn is_slot_reachable(&self, start: Slot, end: Slot) -> bool {
        let mut bfs = self.bfs(start).stop_at(end);
        bfs.any(|u| u == end)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

impl<T, Nbs> LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    /// Returns the labels strictly between `source` and `destination` on a shortest path.
    ///
    /// The result is empty if the two vertices are adjacent, identical, or if `destination` is
    /// unreachable from `source`. Use [`LabelledGraph::full_path`] or
    /// [`LabelledGraph::distance`] to tell these cases apart.
    ///
    /// Ties between several shortest paths are broken by edge insertion order.
    ///
    /// # Errors
    /// Fails with [`GraphError`]`::VertexNotFound` if either endpoint is not a vertex.
    pub fn shortest_path(&self, source: &T, destination: &T) -> Result<Vec<T>> {
        let (s, t) = self.endpoints(source, destination)?;
        Ok(self
            .shortest_path_slots(s, t)
            .map(|path| path.into_iter().map(|u| self.label(u).clone()).collect())
            .unwrap_or_default())
    }

    /// Returns a shortest path from `source` to `destination` including both endpoints,
    /// or `None` if `destination` is unreachable.
    ///
    /// # Errors
    /// Fails with [`GraphError`]`::VertexNotFound` if either endpoint is not a vertex.
    pub fn full_path(&self, source: &T, destination: &T) -> Result<Option<Vec<T>>> {
        let (s, t) = self.endpoints(source, destination)?;
        Ok(self.shortest_path_slots(s, t).map(|inner| {
            let mut path = Vec::with_capacity(inner.len() + 2);
            path.push(source.clone());
            path.extend(inner.into_iter().map(|u| self.label(u).clone()));
            if s != t {
                path.push(destination.clone());
            }
            path
        }))
    }

    /// Returns the number of edges on a shortest path, or `None` if `destination` is unreachable.
    ///
    /// # Errors
    /// Fails with [`GraphError`]`::VertexNotFound` if either endpoint is not a vertex.
    pub fn distance(&self, source: &T, destination: &T) -> Result<Option<usize>> {
        let (s, t) = self.endpoints(source, destination)?;
        Ok(self.distance_slots(s, t).map(|d| d as usize))
    }

    /// Returns *true* if `destination` is reachable from `source`.
    ///
    /// # Errors
    /// Fails with [`GraphError`]`::VertexNotFound` if either endpoint is not a vertex.
    pub fn is_reachable(&self, source: &T, destination: &T) -> Result<bool> {
        let (s, t) = self.endpoints(source, destination)?;
        Ok(self.is_slot_reachable(s, t))
    }

    /// Returns the labels reachable from `source` in BFS order, starting with `source`.
    ///
    /// # Errors
    /// Fails with [`GraphError`]`::VertexNotFound` if `source` is not a vertex.
    pub fn bfs_values(&self, source: &T) -> Result<impl Iterator<Item = &T> + '_> {
        let s = self.registry().try_slot_of(source)?;
        Ok(self.bfs(s).map(|u| self.label(u)))
    }

    fn endpoints(&self, source: &T, destination: &T) -> Result<(Slot, Slot)> {
        Ok((
            self.registry().try_slot_of(source)?,
            self.registry().try_slot_of(destination)?,
        ))
    }
}
