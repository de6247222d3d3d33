use std::{fmt, hash::Hash};

use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::debug;

use super::*;
use crate::error::*;

/// An undirected, unweighted graph whose vertices are identified by labels of type `T`.
///
/// Internally every label occupies a [`Slot`] in a slot table of neighborhoods. Edges are stored
/// symmetrically: slot `u` lists `v` exactly if `v` lists `u`. Edges have set semantics
/// (inserting an edge twice keeps a single copy) and self-loops are rejected.
///
/// Removing a vertex vacates its slot; vacated slots still count towards
/// [`LabelledGraph::vertex_count`] and are reused first-in-first-out by subsequent insertions.
///
/// The graph performs no internal synchronization. Mutation requires `&mut self`; share it
/// between threads only behind a lock.
///
/// # Example
/// ```
/// use lgraphs::prelude::*;
///
/// let mut graph = LabelledGraph::new();
/// graph.add_edge("A", "B").unwrap();
/// graph.add_edge("B", "C").unwrap();
/// graph.add_edge("C", "D").unwrap();
///
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.shortest_path(&"A", &"D").unwrap(), vec!["B", "C"]);
/// ```
#[derive(Clone)]
pub struct LabelledGraph<T, Nbs: Neighborhood = ArrNeighborhood> {
    registry: VertexRegistry<T>,
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Representation using `SmallVec`-backed neighborhoods. Prefer this for sparse graphs.
pub type SparseLabelledGraph<T> = LabelledGraph<T, SparseNeighborhood>;

impl<T, Nbs: Neighborhood> Default for LabelledGraph<T, Nbs> {
    fn default() -> Self {
        Self {
            registry: VertexRegistry::default(),
            nbs: Vec::new(),
            num_edges: 0,
        }
    }
}

impl<T> LabelledGraph<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty graph with the default neighborhood representation.
    /// Other representations are created via [`Default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with space for `n` vertices
    pub fn with_capacity(n: usize) -> Self {
        Self::with_slot_capacity(n)
    }
}

impl<T, Nbs> LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn with_slot_capacity(n: usize) -> Self {
        Self {
            registry: VertexRegistry::with_capacity(n),
            nbs: Vec::with_capacity(n),
            num_edges: 0,
        }
    }

    /// Gives read access to the label/slot mapping
    pub fn registry(&self) -> &VertexRegistry<T> {
        &self.registry
    }

    /// Size of the slot table. This includes vacated slots of removed vertices.
    pub fn vertex_count(&self) -> usize {
        self.nbs.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Returns *true* if `label` is a vertex of the graph
    pub fn contains(&self, label: &T) -> bool {
        self.registry.contains(label)
    }

    /// Returns the slot of `label` if it is a vertex of the graph
    pub fn slot_of(&self, label: &T) -> Option<Slot> {
        self.registry.slot_of(label)
    }

    /// Returns the label at `slot` if the slot is live
    pub fn value_of(&self, slot: Slot) -> Option<&T> {
        self.registry.value_of(slot)
    }

    /// Adds `label` as a vertex if it is not already present and returns its slot.
    /// Calling this repeatedly with the same label has no further effect.
    pub fn add_vertex(&mut self, label: T) -> Result<Slot> {
        Ok(self.register(label)?.slot())
    }

    fn register(&mut self, label: T) -> Result<Registration> {
        let registration = self.registry.register(label)?;
        match registration {
            Registration::Existing(_) => {}
            Registration::Fresh(slot) => {
                debug_assert_eq!(slot as usize, self.nbs.len());
                self.nbs.push(Nbs::default());
            }
            Registration::Reused(slot) => {
                self.nbs[slot as usize].clear();
            }
        }
        Ok(registration)
    }

    /// Adds the undirected edge {a, b}.
    ///
    /// Endpoints that are not yet vertices are inserted first. Returns *true* if the edge is new
    /// and *false* if it was already present (the graph is unchanged in that case).
    ///
    /// # Errors
    /// Fails with [`GraphError::SelfLoop`] if `a == b` and with
    /// [`GraphError::SlotSpaceExhausted`] if the missing endpoints do not fit into the slot
    /// space. No vertex is inserted in either case.
    pub fn add_edge(&mut self, a: T, b: T) -> Result<bool> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }

        let missing = usize::from(!self.contains(&a)) + usize::from(!self.contains(&b));
        if missing > self.registry.available() {
            return Err(GraphError::SlotSpaceExhausted(self.registry.slot_limit()));
        }

        let u = self.register(a)?.slot();
        let v = self.register(b)?.slot();
        Ok(!self.try_add_edge(u, v))
    }

    /// Removes the undirected edge {a, b} if it exists and reports whether it did.
    /// Both endpoints stay vertices of the graph.
    ///
    /// # Errors
    /// Fails with [`GraphError::VertexNotFound`] if either endpoint is not a vertex.
    pub fn remove_edge(&mut self, a: &T, b: &T) -> Result<bool> {
        let u = self.registry.try_slot_of(a)?;
        let v = self.registry.try_slot_of(b)?;
        Ok(self.try_remove_edge(u, v))
    }

    /// Returns *true* if the edge {a, b} exists. Unknown endpoints yield *false*.
    pub fn is_edge(&self, a: &T, b: &T) -> bool {
        match (self.slot_of(a), self.slot_of(b)) {
            (Some(u), Some(v)) => self.has_edge(u, v),
            _ => false,
        }
    }

    /// Returns the set of labels adjacent to `a`.
    ///
    /// # Errors
    /// Fails with [`GraphError::VertexNotFound`] if `a` is not a vertex.
    pub fn neighbor_values(&self, a: &T) -> Result<FxHashSet<T>> {
        Ok(self.neighbors(a)?.cloned().collect())
    }

    /// Returns the labels adjacent to `a` in the order the edges were inserted.
    ///
    /// # Errors
    /// Fails with [`GraphError::VertexNotFound`] if `a` is not a vertex.
    pub fn neighbors(&self, a: &T) -> Result<impl Iterator<Item = &T> + '_> {
        let u = self.registry.try_slot_of(a)?;
        Ok(self.neighbors_of(u).map(|v| self.label(v)))
    }

    /// Returns the number of neighbors of `a`.
    ///
    /// # Errors
    /// Fails with [`GraphError::VertexNotFound`] if `a` is not a vertex.
    pub fn degree(&self, a: &T) -> Result<usize> {
        let u = self.registry.try_slot_of(a)?;
        Ok(self.degree_of(u) as usize)
    }

    /// Removes `a` together with all incident edges and returns the number of removed edges.
    /// The slot of `a` is vacated and will be handed to the next inserted vertex.
    ///
    /// # Errors
    /// Fails with [`GraphError::VertexNotFound`] if `a` is not a vertex.
    pub fn remove_vertex(&mut self, a: &T) -> Result<NumEdges> {
        let u = self.registry.try_slot_of(a)?;
        let removed = self.remove_edges_at_slot(u);
        self.registry.release(u);
        debug!(slot = u, removed_edges = removed, "removed vertex");
        Ok(removed)
    }

    /// Iterates over all vertex labels in ascending slot order
    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.registry.iter().map(|(_, label)| label)
    }

    /// Iterates over all edges, each reported once as `(a, b)` with `slot(a) < slot(b)`
    pub fn edge_values(&self) -> impl Iterator<Item = (&T, &T)> + '_ {
        self.edges(true)
            .map(|SlotEdge(u, v)| (self.label(u), self.label(v)))
    }

    /// Removes all vertices and edges
    pub fn clear(&mut self) {
        self.registry.clear();
        self.nbs.clear();
        self.num_edges = 0;
    }

    /// Label of a slot that is known to be live
    pub(crate) fn label(&self, slot: Slot) -> &T {
        self.registry
            .value_of(slot)
            .unwrap_or_else(|| panic!("slot {slot} is referenced but vacated"))
    }

    /// Builds a graph with a predetermined slot layout.
    ///
    /// `len` is the size of the slot table; `labels` places a label at each listed slot, all
    /// other slots are vacated (and queued for reuse in ascending order). Returns `None` if a
    /// slot is out of range or used twice, a label repeats, or an edge is a loop or references
    /// a vacated slot.
    pub(crate) fn from_layout(
        len: usize,
        labels: impl IntoIterator<Item = (Slot, T)>,
        edges: impl IntoIterator<Item = SlotEdge>,
    ) -> Option<Self> {
        let mut graph = Self::with_slot_capacity(len);
        graph.registry.reserve_vacated(len);
        graph.nbs = vec![Nbs::default(); len];

        for (slot, label) in labels {
            if !graph.registry.place_at(slot, label) {
                return None;
            }
        }
        graph.registry.requeue_vacated();

        for edge in edges {
            let SlotEdge(u, v) = edge;
            if edge.is_loop() || !graph.registry.is_live(u) || !graph.registry.is_live(v) {
                return None;
            }
            graph.try_add_edge(u, v);
        }

        Some(graph)
    }
}

impl<T, Nbs> GraphSlotOrder for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn number_of_slots(&self) -> NumSlots {
        self.nbs.len() as NumSlots
    }

    fn number_of_vertices(&self) -> NumSlots {
        self.registry.number_of_live() as NumSlots
    }

    fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.registry.iter().map(|(slot, _)| slot)
    }
}

impl<T, Nbs> GraphEdgeOrder for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<T, Nbs> AdjacencyList for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn neighbors_of(&self, u: Slot) -> impl Iterator<Item = Slot> + '_ {
        self.nbs[u as usize].neighbors()
    }

    fn degree_of(&self, u: Slot) -> NumSlots {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl<T, Nbs> AdjacencyTest for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn has_edge(&self, u: Slot, v: Slot) -> bool {
        self.nbs[u as usize].has_neighbor(v)
    }
}

impl<T, Nbs> GraphEdgeEditing for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    fn try_add_edge(&mut self, u: Slot, v: Slot) -> bool {
        assert_ne!(u, v, "self-loops are not supported");
        assert!(self.registry.is_live(u) && self.registry.is_live(v));

        if self.nbs[u as usize].try_add_neighbor(v) {
            return true;
        }
        assert!(!self.nbs[v as usize].try_add_neighbor(u));
        self.num_edges += 1;
        false
    }

    fn try_remove_edge(&mut self, u: Slot, v: Slot) -> bool {
        if self.nbs[u as usize].try_remove_neighbor(v) {
            assert!(self.nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }

    fn remove_edges_at_slot(&mut self, u: Slot) -> NumEdges {
        let nbs = std::mem::take(&mut self.nbs[u as usize]);
        for v in nbs.neighbors() {
            assert!(self.nbs[v as usize].try_remove_neighbor(u));
        }

        let removed = nbs.num_of_neighbors() as NumEdges;
        self.num_edges -= removed;
        removed
    }
}

impl<T, Nbs> FromIterator<(T, T)> for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    /// Collects edges into a graph. Self-loops are skipped.
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut graph = Self::default();
        graph.extend(iter);
        graph
    }
}

impl<T, Nbs> Extend<(T, T)> for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    /// Adds all edges. Self-loops are skipped.
    ///
    /// # Panics
    /// Panics if the slot space is exhausted.
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (a, b) in iter {
            match self.add_edge(a, b) {
                Ok(_) | Err(GraphError::SelfLoop) => {}
                Err(e) => panic!("{e}"),
            }
        }
    }
}

impl<T, Nbs> fmt::Debug for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone + fmt::Debug,
    Nbs: Neighborhood,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.registry.iter().map(|(u, label)| {
                (
                    label,
                    self.neighbors_of(u).map(|v| self.label(v)).collect_vec(),
                )
            }))
            .finish()
    }
}

impl<T, Nbs> PartialEq for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
    /// Two graphs are equal if they have the same labels and the same edges between them.
    /// The slot layout is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.number_of_vertices() == other.number_of_vertices()
            && self.num_edges == other.num_edges
            && self.vertices().all(|a| other.contains(a))
            && self.edge_values().all(|(a, b)| other.is_edge(a, b))
    }
}

impl<T, Nbs> Eq for LabelledGraph<T, Nbs>
where
    T: Eq + Hash + Clone,
    Nbs: Neighborhood,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_edges() -> Vec<SlotEdge> {
        Vec::new()
    }

    fn path_graph() -> LabelledGraph<&'static str> {
        [("A", "B"), ("B", "C"), ("C", "D")].into_iter().collect()
    }

    #[test]
    fn add_vertex_idempotent() {
        let mut graph: LabelledGraph<&str> = LabelledGraph::new();
        assert_eq!(graph.add_vertex("x").unwrap(), 0);
        graph.add_edge("x", "y").unwrap();

        assert_eq!(graph.add_vertex("x").unwrap(), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&"x").unwrap(), 1);
    }

    #[test]
    fn edge_counting() {
        let graph: LabelledGraph<&str> = [("A", "B"), ("B", "C")].into_iter().collect();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn auto_registration_and_symmetry() {
        let mut graph = LabelledGraph::new();
        assert!(graph.add_edge("x", "y").unwrap());
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.is_edge(&"x", &"y"));
        assert!(graph.is_edge(&"y", &"x"));
        assert!(!graph.is_edge(&"x", &"z"));
        assert!(!graph.is_edge(&"z", &"x"));
    }

    #[test]
    fn parallel_edges_are_ignored() {
        let mut graph = LabelledGraph::new();
        assert!(graph.add_edge(1, 2).unwrap());
        assert!(!graph.add_edge(1, 2).unwrap());
        assert!(!graph.add_edge(2, 1).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(&1).unwrap().collect_vec(), vec![&2]);
    }

    #[test]
    fn self_loops_are_rejected() {
        let mut graph = LabelledGraph::new();
        assert_eq!(graph.add_edge("a", "a"), Err(GraphError::SelfLoop));
        assert_eq!(graph.vertex_count(), 0);
        assert!(!graph.contains(&"a"));
    }

    #[test]
    fn remove_edge_keeps_vertices() {
        let mut graph = LabelledGraph::new();
        graph.add_edge("A", "B").unwrap();

        assert!(graph.remove_edge(&"A", &"B").unwrap());
        assert!(!graph.remove_edge(&"B", &"A").unwrap());
        assert!(!graph.is_edge(&"A", &"B"));
        assert!(graph.contains(&"A") && graph.contains(&"B"));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 0);

        assert_eq!(
            graph.remove_edge(&"A", &"Z"),
            Err(GraphError::VertexNotFound)
        );
    }

    #[test]
    fn neighbor_values() {
        let graph = path_graph();
        let nbs = graph.neighbor_values(&"B").unwrap();
        assert_eq!(nbs.len(), 2);
        assert!(nbs.contains("A") && nbs.contains("C"));

        assert_eq!(
            graph.neighbor_values(&"E").unwrap_err(),
            GraphError::VertexNotFound
        );
        assert_eq!(graph.degree(&"E"), Err(GraphError::VertexNotFound));
    }

    #[test]
    fn remove_vertex_vacates_slot() {
        let mut graph = path_graph();
        assert_eq!(graph.remove_vertex(&"B").unwrap(), 2);

        assert!(!graph.contains(&"B"));
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&"A").unwrap(), 0);
        assert_eq!(graph.neighbors(&"C").unwrap().collect_vec(), vec![&"D"]);
        assert_eq!(graph.remove_vertex(&"B"), Err(GraphError::VertexNotFound));

        assert_eq!(graph.add_vertex("E").unwrap(), 1);
        assert_eq!(graph.degree(&"E").unwrap(), 0);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.add_vertex("F").unwrap(), 4);
    }

    #[test]
    fn vertex_and_edge_iteration() {
        let mut graph = path_graph();
        graph.add_vertex("lonely").unwrap();

        assert_eq!(
            graph.vertices().copied().collect_vec(),
            vec!["A", "B", "C", "D", "lonely"]
        );
        assert_eq!(
            graph.edge_values().collect_vec(),
            vec![(&"A", &"B"), (&"B", &"C"), (&"C", &"D")]
        );
        assert_eq!(graph.max_degree(), 2);
        assert_eq!(graph.slots_with_neighbors().count(), 4);
    }

    #[test]
    fn equality_ignores_layout() {
        let a: LabelledGraph<u32> = [(1, 2), (2, 3)].into_iter().collect();
        let b: LabelledGraph<u32> = [(3, 2), (2, 1)].into_iter().collect();
        let c: LabelledGraph<u32> = [(1, 2), (1, 3)].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn clear() {
        let mut graph = path_graph();
        graph.clear();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn from_layout_rejects_invalid() {
        let ok = LabelledGraph::<&str>::from_layout(
            3,
            [(0, "a"), (2, "c")],
            [SlotEdge(0, 2)],
        )
        .unwrap();
        assert_eq!(ok.vertex_count(), 3);
        assert!(ok.is_edge(&"a", &"c"));
        assert_eq!(ok.registry().vacated().collect_vec(), vec![1]);

        assert!(LabelledGraph::<&str>::from_layout(2, [(0, "a"), (1, "a")], no_edges()).is_none());
        assert!(LabelledGraph::<&str>::from_layout(2, [(0, "a")], [SlotEdge(0, 1)]).is_none());
        assert!(LabelledGraph::<&str>::from_layout(2, [(0, "a")], [SlotEdge(0, 0)]).is_none());
        assert!(LabelledGraph::<&str>::from_layout(1, [(1, "a")], no_edges()).is_none());
    }

    #[test]
    fn sparse_representation() {
        let mut graph: SparseLabelledGraph<u32> = (0..20).map(|i| (i, (i + 1) % 20)).collect();
        assert_eq!(graph.edge_count(), 20);
        assert_eq!(graph.max_degree(), 2);

        assert_eq!(graph.remove_vertex(&5).unwrap(), 2);
        assert_eq!(graph.add_vertex(99).unwrap(), 5);
        assert!(graph.add_edge(99, 0).unwrap());
        assert_eq!(graph.distance(&4, &6).unwrap(), Some(18));
        assert_eq!(graph.distance(&99, &10).unwrap(), Some(11));
    }

    #[test]
    fn exhausted_slot_space_leaves_graph_unchanged() {
        let mut graph = LabelledGraph::new();
        graph.registry.set_slot_limit(2);
        graph.add_vertex("a").unwrap();

        assert_eq!(
            graph.add_edge("b", "c"),
            Err(GraphError::SlotSpaceExhausted(2))
        );
        assert!(!graph.contains(&"b"));
        assert!(!graph.contains(&"c"));
        assert_eq!(graph.vertex_count(), 1);

        assert!(graph.add_edge("a", "b").unwrap());
        assert_eq!(
            graph.add_vertex("c"),
            Err(GraphError::SlotSpaceExhausted(2))
        );
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        graph.remove_vertex(&"a").unwrap();
        assert!(graph.add_edge("c", "b").unwrap());
        assert_eq!(graph.slot_of(&"c"), Some(0));
    }

    #[test]
    #[should_panic(expected = "slot space exhausted")]
    fn extend_panics_on_exhausted_slot_space() {
        let mut graph: LabelledGraph<u32> = LabelledGraph::new();
        graph.registry.set_slot_limit(3);
        graph.extend([(1, 2), (3, 4)]);
    }
}
