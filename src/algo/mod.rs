/*!
# Graph Algorithms

Algorithms built on top of the representations in this crate. Everything is re-exported here:
```rust
use lgraphs::algo::*;
```
Traversals are provided as **iterators** over slots, so results can be consumed lazily.
Label-based queries such as [`LabelledGraph::shortest_path`] are inherent methods of the graph.
*/

pub mod traversal;

use crate::prelude::*;

pub use traversal::*;
