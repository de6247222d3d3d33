/*!
# Representations

A [`LabelledGraph`] is composed of
- a [`VertexRegistry`] mapping labels to slots (and back) and recycling vacated slots,
- a slot table holding one [`Neighborhood`] per slot.

The neighborhood type is a generic parameter; [`ArrNeighborhood`] (default) is backed by a
`Vec`, [`SparseNeighborhood`] by a `SmallVec` which avoids allocations for low-degree vertices.
*/

use crate::{ops::*, *};

mod graph;
mod neighborhood;
pub mod registry;

pub use graph::*;
pub use neighborhood::*;
pub use registry::{Registration, VertexRegistry};
