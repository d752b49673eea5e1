//! Registry slots and tombstone-skipping iteration.

use crate::handler::Handler;

/// A position in the registry: a live handler or a tombstone.
pub(crate) enum Slot<T, C> {
    /// Tombstone left behind by a removal
    Empty,
    /// Live handler
    Occupied(Handler<T, C>),
}

impl<T, C> Slot<T, C> {
    pub(crate) fn handler(&self) -> Option<&Handler<T, C>> {
        match self {
            Slot::Occupied(handler) => Some(handler),
            Slot::Empty => None,
        }
    }

    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Turn the slot into a tombstone, handing back the handler it held.
    pub(crate) fn vacate(&mut self) -> Option<Handler<T, C>> {
        match std::mem::replace(self, Slot::Empty) {
            Slot::Occupied(handler) => Some(handler),
            Slot::Empty => None,
        }
    }
}

/// Iterate the live handlers of `slots` in order, skipping tombstones.
pub(crate) fn occupied<'a, T, C>(
    slots: &'a [Slot<T, C>],
) -> impl Iterator<Item = &'a Handler<T, C>> + 'a {
    slots.iter().filter_map(Slot::handler)
}
