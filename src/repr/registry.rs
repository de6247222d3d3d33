//! # Vertex Registry
//!
//! Owns the bijection between labels and slots as well as the FIFO queue of vacated slots.
//! Labels are stored once, in a slot-indexed table; the lookup map only holds the key it needs
//! for hashing and the slot.

use std::{collections::VecDeque, hash::Hash};

use fxhash::FxHashMap;
use tracing::trace;

use crate::{error::*, *};

/// Result of [`VertexRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The label was already registered at this slot
    Existing(Slot),
    /// The label was assigned a slot that was never used before (`slot == len` before the call)
    Fresh(Slot),
    /// The label was assigned a previously vacated slot
    Reused(Slot),
}

impl Registration {
    /// Returns the slot of the label regardless of how it was obtained
    pub fn slot(&self) -> Slot {
        match *self {
            Registration::Existing(s) | Registration::Fresh(s) | Registration::Reused(s) => s,
        }
    }

    /// Returns *true* if the call created a new vertex
    pub fn is_new(&self) -> bool {
        !matches!(self, Registration::Existing(_))
    }
}

/// Bidirectional mapping `label <-> slot` with slot recycling
#[derive(Debug, Clone)]
pub struct VertexRegistry<T> {
    /// `labels[s]` is the label of slot `s` or `None` if `s` is vacated
    labels: Vec<Option<T>>,
    slot_of: FxHashMap<T, Slot>,
    /// Vacated slots in the order they were released
    free: VecDeque<Slot>,
    /// Maximum size of the slot space
    limit: usize,
}

impl<T> Default for VertexRegistry<T> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            slot_of: FxHashMap::default(),
            free: VecDeque::new(),
            limit: INVALID_SLOT as usize,
        }
    }
}

impl<T> VertexRegistry<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with space for `n` labels
    pub fn with_capacity(n: usize) -> Self {
        Self {
            labels: Vec::with_capacity(n),
            slot_of: FxHashMap::with_capacity_and_hasher(n, Default::default()),
            free: VecDeque::new(),
            limit: INVALID_SLOT as usize,
        }
    }

    /// Size of the slot space including vacated slots
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns *true* if no slot was ever allocated
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of live labels
    pub fn number_of_live(&self) -> usize {
        self.slot_of.len()
    }

    pub fn contains(&self, label: &T) -> bool {
        self.slot_of.contains_key(label)
    }

    pub fn slot_of(&self, label: &T) -> Option<Slot> {
        self.slot_of.get(label).copied()
    }

    /// Like [`VertexRegistry::slot_of`] but reports a missing label as an error
    pub fn try_slot_of(&self, label: &T) -> Result<Slot> {
        self.slot_of(label).ok_or(GraphError::VertexNotFound)
    }

    /// Maximum size of the slot space; [`INVALID_SLOT`] is never handed out
    pub fn slot_limit(&self) -> usize {
        self.limit
    }

    /// Number of labels that can still be registered
    pub fn available(&self) -> usize {
        self.free.len() + self.limit.saturating_sub(self.labels.len())
    }

    #[cfg(test)]
    pub(crate) fn set_slot_limit(&mut self, limit: usize) {
        self.limit = limit.min(INVALID_SLOT as usize);
    }

    /// Returns the label stored at `slot` or `None` if the slot is vacated or was never allocated
    pub fn value_of(&self, slot: Slot) -> Option<&T> {
        self.labels.get(slot as usize)?.as_ref()
    }

    /// Returns *true* if `slot` currently holds a label
    pub fn is_live(&self, slot: Slot) -> bool {
        self.value_of(slot).is_some()
    }

    /// Assigns a slot to `label` if it has none yet.
    ///
    /// Vacated slots are reused first-in-first-out. If none is left, the next fresh index
    /// `self.len()` is used and the slot space grows by one.
    ///
    /// # Errors
    /// Fails with [`GraphError::SlotSpaceExhausted`] if no slot is vacated and the slot space
    /// has reached [`VertexRegistry::slot_limit`]. The registry is unchanged then.
    pub fn register(&mut self, label: T) -> Result<Registration> {
        if let Some(slot) = self.slot_of(&label) {
            return Ok(Registration::Existing(slot));
        }

        let registration = match self.free.pop_front() {
            Some(slot) => {
                debug_assert!(self.labels[slot as usize].is_none());
                self.labels[slot as usize] = Some(label.clone());
                trace!(slot, "reusing vacated slot");
                Registration::Reused(slot)
            }
            None => {
                let slot = self.labels.len();
                if slot >= self.limit {
                    return Err(GraphError::SlotSpaceExhausted(self.limit));
                }
                self.labels.push(Some(label.clone()));
                trace!(slot, "allocated fresh slot");
                Registration::Fresh(slot as Slot)
            }
        };

        self.slot_of.insert(label, registration.slot());
        Ok(registration)
    }

    /// Vacates `slot`, pushes it onto the free queue and returns its label.
    /// Returns `None` if the slot was not live.
    pub fn release(&mut self, slot: Slot) -> Option<T> {
        let label = self.labels.get_mut(slot as usize)?.take()?;
        self.slot_of.remove(&label);
        self.free.push_back(slot);
        trace!(slot, "released slot");
        Some(label)
    }

    /// Extends the slot space to `len` empty slots.
    /// Used when reconstructing a graph with a known slot layout; call
    /// [`VertexRegistry::requeue_vacated`] once all labels are placed.
    pub(crate) fn reserve_vacated(&mut self, len: usize) {
        if self.labels.len() < len {
            self.labels.resize_with(len, || None);
        }
    }

    /// Places `label` at an empty `slot`.
    /// Returns *false* if the slot is live, out of range, or the label is already registered.
    pub(crate) fn place_at(&mut self, slot: Slot, label: T) -> bool {
        let idx = slot as usize;
        if idx >= self.labels.len() || self.labels[idx].is_some() || self.contains(&label) {
            return false;
        }
        self.labels[idx] = Some(label.clone());
        self.slot_of.insert(label, slot);
        true
    }

    /// Rebuilds the free queue from all empty slots in ascending order
    pub(crate) fn requeue_vacated(&mut self) {
        self.free = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_none())
            .map(|(s, _)| s as Slot)
            .collect();
    }

    /// Iterates over all live `(slot, label)` pairs in ascending slot order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(s, l)| l.as_ref().map(|l| (s as Slot, l)))
    }

    /// Vacated slots in the order in which they will be reused
    pub fn vacated(&self) -> impl Iterator<Item = Slot> + '_ {
        self.free.iter().copied()
    }

    /// Removes all labels and slots
    pub fn clear(&mut self) {
        self.labels.clear();
        self.slot_of.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn register_is_idempotent() {
        let mut reg = VertexRegistry::new();
        assert_eq!(reg.register("a").unwrap(), Registration::Fresh(0));
        assert_eq!(reg.register("b").unwrap(), Registration::Fresh(1));
        assert_eq!(reg.register("a").unwrap(), Registration::Existing(0));
        assert!(!reg.register("b").unwrap().is_new());

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.number_of_live(), 2);
        assert_eq!(reg.slot_of(&"b"), Some(1));
        assert_eq!(reg.value_of(0), Some(&"a"));
        assert_eq!(reg.value_of(2), None);
        assert_eq!(reg.try_slot_of(&"c"), Err(GraphError::VertexNotFound));
    }

    #[test]
    fn slots_are_reused_fifo() {
        let mut reg = VertexRegistry::new();
        for label in 0..5 {
            reg.register(label).unwrap();
        }

        assert_eq!(reg.release(3), Some(3));
        assert_eq!(reg.release(1), Some(1));
        assert_eq!(reg.release(1), None);
        assert_eq!(reg.vacated().collect_vec(), vec![3, 1]);
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.number_of_live(), 3);
        assert!(!reg.contains(&3));

        assert_eq!(reg.register(10).unwrap(), Registration::Reused(3));
        assert_eq!(reg.register(11).unwrap(), Registration::Reused(1));
        assert_eq!(reg.register(12).unwrap(), Registration::Fresh(5));

        for (slot, label) in reg.iter() {
            assert_eq!(reg.slot_of(label), Some(slot));
        }
    }

    #[test]
    fn place_at_vacated() {
        let mut reg: VertexRegistry<String> = VertexRegistry::new();
        reg.reserve_vacated(3);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.number_of_live(), 0);

        assert!(reg.place_at(2, "x".to_string()));
        assert!(!reg.place_at(2, "y".to_string()));
        assert!(!reg.place_at(0, "x".to_string()));
        assert!(!reg.place_at(7, "z".to_string()));
        reg.requeue_vacated();
        assert_eq!(reg.vacated().collect_vec(), vec![0, 1]);

        assert_eq!(
            reg.register("q".to_string()).unwrap(),
            Registration::Reused(0)
        );
    }

    #[test]
    fn slot_space_exhausted() {
        let mut reg = VertexRegistry::new();
        reg.set_slot_limit(2);
        reg.register("a").unwrap();
        reg.register("b").unwrap();
        assert_eq!(reg.available(), 0);

        assert_eq!(reg.register("c"), Err(GraphError::SlotSpaceExhausted(2)));
        assert!(!reg.contains(&"c"));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.register("a").unwrap(), Registration::Existing(0));

        reg.release(1);
        assert_eq!(reg.available(), 1);
        assert_eq!(reg.register("c").unwrap(), Registration::Reused(1));
    }
}
