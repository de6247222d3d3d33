/*!
# Slot Representation

Every vertex of a [`LabelledGraph`](crate::repr::LabelledGraph) lives in a *slot*: a compact
index into the slot table. We choose `Slot = u32` as almost all use-cases involve less than
`2^32` vertices, which saves space compared to `usize` in neighbor lists.
*/

/// Slots can be any unsigned integer from `0` to `Slot::MAX - 1`
pub type Slot = u32;

/// Slot-Value that is considered invalid
pub const INVALID_SLOT: Slot = Slot::MAX;

/// There can be at most `2^32 - 1` slots in a graph!
pub type NumSlots = Slot;
