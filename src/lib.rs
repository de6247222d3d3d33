/*!
`lgraphs` is a small graph container for graphs that are
- **l**abelled : Vertices are identified by arbitrary values `T: Eq + Hash + Clone`
- unweighted : Neither vertices nor edges carry a weight
- undirected : Every edge `{a, b}` can be traversed in both directions

# Representation

Internally, every vertex occupies a **slot**, a `u32` index into a slot table of neighborhoods.
Slots are handed out densely; when a vertex is removed its slot is *vacated* and reused
first-in-first-out by the next inserted vertex. The mapping between labels and slots is kept by
a [`VertexRegistry`](crate::repr::VertexRegistry) which stores every label exactly once.

Edges are stored symmetrically in the neighborhoods of both endpoints and follow set semantics:
inserting an existing edge is a no-op and self-loops are rejected. Neighborhoods keep insertion
order, which makes traversals (and thus the choice between equally short paths) reproducible.

# Usage

There are *4* submodules you probably want to interact with:
- [`prelude`] includes slots, edges, errors, the slot-level graph traits and [`LabelledGraph`](crate::repr::LabelledGraph),
- [`algo`] includes BFS iterators and shortest path queries,
- [`io`] includes the slot-list dump format (read and write) as well as a DOT writer,
- [`error`] includes the [`GraphError`](crate::error::GraphError) returned by fallible operations.

```
use lgraphs::{prelude::*, algo::*};

let mut graph = LabelledGraph::new();
graph.add_edge("amigo", "amino").unwrap();
graph.add_edge("amino", "amins").unwrap();
graph.add_edge("amins", "abins").unwrap();

assert_eq!(graph.shortest_path(&"amigo", &"abins").unwrap(), vec!["amino", "amins"]);
assert_eq!(graph.distance(&"amigo", &"abins").unwrap(), Some(3));

let slot = graph.slot_of(&"amigo").unwrap();
assert_eq!(graph.bfs(slot).count(), 4);
```

# Thread safety

No operation performs internal locking. All mutation goes through `&mut self`; a graph shared
between threads has to be wrapped in a lock by the caller.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod io;
pub mod ops;
pub mod repr;
pub mod slot;

pub use edge::*;
pub use slot::*;

/// `lgraphs::prelude` includes definitions for slots and edges, errors, all slot-level graph
/// operation traits as well as all representations.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{GraphError, Result as GraphResult},
        ops::*,
        repr::*,
        slot::*,
    };
}
