/// A storage slot in the node arena.
///
/// `generation` is bumped every time the slot is vacated, so a stale position
/// that still carries the old generation no longer matches. A slot whose
/// generation is exhausted is retired and never reused.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) generation: u32,
    pub(crate) entry: Entry<T>,
}

#[derive(Debug)]
pub(crate) enum Entry<T> {
    Occupied(Node<T>),
    /// Link to the next vacant slot in the free list.
    Vacant(Option<usize>),
    Retired,
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<usize>,
}

impl<T> Slot<T> {
    pub(crate) fn node(&self) -> Option<&Node<T>> {
        match &self.entry {
            Entry::Occupied(node) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn node_mut(&mut self) -> Option<&mut Node<T>> {
        match &mut self.entry {
            Entry::Occupied(node) => Some(node),
            _ => None,
        }
    }

    /// Does this slot hold the node a position with `generation` refers to?
    pub(crate) fn is_live(&self, generation: u32) -> bool {
        self.generation == generation && matches!(self.entry, Entry::Occupied(_))
    }

    pub(crate) fn is_retired(&self) -> bool {
        matches!(self.entry, Entry::Retired)
    }

    /// Vacate the slot, returning the node it held.
    ///
    /// The slot is retired instead when its generation cannot be bumped; the
    /// caller must then leave it off the free list.
    pub(crate) fn vacate(&mut self, next_free: Option<usize>) -> Option<Node<T>> {
        if !matches!(self.entry, Entry::Occupied(_)) {
            return None;
        }
        let vacated = match self.generation.checked_add(1) {
            Some(generation) => {
                self.generation = generation;
                Entry::Vacant(next_free)
            }
            None => Entry::Retired,
        };
        match std::mem::replace(&mut self.entry, vacated) {
            Entry::Occupied(node) => Some(node),
            _ => None,
        }
    }
}
