/// A copyable token naming a place in a [`LinkedSequence`](crate::LinkedSequence).
///
/// A position names a value node, the slot before the first node, or
/// past-the-end. Node positions go stale once their node is removed; the
/// sequence rejects them with [`SequenceError::InvalidPosition`](crate::SequenceError).
///
/// `Position::default()` is past-the-end and equals the `end()` of any sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position(pub(crate) Link);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Link {
    /// `id` names the sequence the sentinel belongs to.
    BeforeFirst {
        id: u64,
    },
    /// `storage` names the node arena, which moves between sequences on swap.
    Node {
        storage: u64,
        index: usize,
        generation: u32,
    },
    #[default]
    End,
}

impl Position {
    pub(crate) fn before_first(id: u64) -> Self {
        Position(Link::BeforeFirst { id })
    }

    pub(crate) fn node(storage: u64, index: usize, generation: u32) -> Self {
        Position(Link::Node {
            storage,
            index,
            generation,
        })
    }

    /// Is this the past-the-end position?
    pub fn is_end(&self) -> bool {
        matches!(self.0, Link::End)
    }

    /// Is this the position before the first node?
    pub fn is_before_first(&self) -> bool {
        matches!(self.0, Link::BeforeFirst { .. })
    }

    /// Returns the raw storage slot for debugging, if this names a node.
    pub fn as_raw(&self) -> Option<usize> {
        match self.0 {
            Link::Node { index, .. } => Some(index),
            _ => None,
        }
    }
}
