use std::{iter::Copied, slice::Iter};

use itertools::Itertools;
use smallvec::{Array, SmallVec};

use super::*;

/// Trait for methods on the Neighborhood of a specified slot.
///
/// Neighborhoods keep their neighbors in insertion order. Removing a neighbor keeps the
/// relative order of the remaining ones, so traversals are reproducible.
pub trait Neighborhood: Clone + Default {
    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumSlots;

    type NeighborhoodIter<'a>: Iterator<Item = Slot> + 'a
    where
        Self: 'a;

    /// Returns an iterator over all neighbors in the Neighborhood
    fn neighbors(&self) -> Self::NeighborhoodIter<'_>;

    /// Returns *true* if `v` is in the Neighborhood. Linear in the size of the Neighborhood.
    fn has_neighbor(&self, v: Slot) -> bool {
        self.neighbors().any(|u| u == v)
    }

    /// Tries to add a neighbor to the Neighborhood.
    /// Returns *true* if the slot was in the Neighborhood before.
    fn try_add_neighbor(&mut self, u: Slot) -> bool {
        if self.has_neighbor(u) {
            true
        } else {
            self.add_neighbor(u);
            false
        }
    }

    /// Adds a neighbor to the Neighborhood without checking if this neighbor exists beforehand.
    fn add_neighbor(&mut self, u: Slot);

    /// Tries to remove a neighbor from the Neighborhood.
    /// Returns *true* if the slot was in the Neighborhood before.
    fn try_remove_neighbor(&mut self, u: Slot) -> bool;

    /// Removes all neighbors in the Neighborhood
    fn clear(&mut self);
}

/// Basic Neighborhood-Impl. using `Vec<Slot>`
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Slot>);

impl Neighborhood for ArrNeighborhood {
    fn num_of_neighbors(&self) -> NumSlots {
        self.0.len() as NumSlots
    }

    type NeighborhoodIter<'a>
        = Copied<Iter<'a, Slot>>
    where
        Self: 'a;

    fn neighbors(&self) -> Self::NeighborhoodIter<'_> {
        self.0.iter().copied()
    }

    fn add_neighbor(&mut self, u: Slot) {
        self.0.push(u);
    }

    fn try_remove_neighbor(&mut self, u: Slot) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Like `ArrNeighborhood` but uses `SmallVec<[Slot; N]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Default, Clone, Debug)]
pub struct SparseNeighborhood<const N: usize = 8>(pub SmallVec<[Slot; N]>)
where
    [Slot; N]: Array<Item = Slot>;

impl<const N: usize> Neighborhood for SparseNeighborhood<N>
where
    [Slot; N]: Array<Item = Slot>,
{
    fn num_of_neighbors(&self) -> NumSlots {
        self.0.len() as NumSlots
    }

    type NeighborhoodIter<'a>
        = Copied<Iter<'a, Slot>>
    where
        Self: 'a;

    fn neighbors(&self) -> Self::NeighborhoodIter<'_> {
        self.0.iter().copied()
    }

    fn add_neighbor(&mut self, u: Slot) {
        self.0.push(u);
    }

    fn try_remove_neighbor(&mut self, u: Slot) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_order_preserving<Nbs: Neighborhood>() {
        let mut nbs = Nbs::default();
        for u in [4, 1, 7, 3] {
            assert!(!nbs.try_add_neighbor(u));
        }
        assert!(nbs.try_add_neighbor(7));
        assert_eq!(nbs.num_of_neighbors(), 4);

        assert!(nbs.try_remove_neighbor(1));
        assert!(!nbs.try_remove_neighbor(1));
        assert_eq!(nbs.neighbors().collect_vec(), vec![4, 7, 3]);
        assert!(nbs.has_neighbor(3));
        assert!(!nbs.has_neighbor(1));

        nbs.clear();
        assert_eq!(nbs.num_of_neighbors(), 0);
    }

    #[test]
    fn arr_neighborhood() {
        check_order_preserving::<ArrNeighborhood>();
    }

    #[test]
    fn sparse_neighborhood() {
        check_order_preserving::<SparseNeighborhood>();
        check_order_preserving::<SparseNeighborhood<2>>();
    }
}
