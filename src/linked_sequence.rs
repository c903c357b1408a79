use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::{
    cursor::{Cursor, CursorMut},
    errors::{Result, SequenceError},
    iter::{IntoIter, Iter, IterMut, IterPositions},
    node::{Entry, Node, Slot},
    position::{Link, Position},
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Panic with the allocation error from an infallible trait impl.
fn must<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("linked sequence: {err}"),
    }
}

/// The thing a position resolves to: the slot before the first node or a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Head,
    Node(usize),
}

/// A singly-linked sequence with O(1) front and insert-after/erase-after operations.
///
/// Nodes live in an index arena; `head` plays the part of the "before-first"
/// sentinel's next link. Vacated slots are recycled through a free list.
///
/// `id` names the sentinel and stays with the sequence for its whole life;
/// `storage` names the node arena and moves with it on [`swap`](Self::swap).
pub struct LinkedSequence<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    retired: usize,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    storage: u64,
    id: u64,
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedSequence<T> {
    /// Create a new empty sequence.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            retired: 0,
            head: None,
            tail: None,
            len: 0,
            storage: next_id(),
            id: next_id(),
        }
    }

    /// Create an empty sequence with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            retired: 0,
            head: None,
            tail: None,
            len: 0,
            storage: next_id(),
            id: next_id(),
        }
    }

    /// Build a sequence from `iter` in a single tail-appending pass.
    ///
    /// If a node cannot be allocated the partially built sequence is released
    /// before the error is returned.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self> {
        let mut seq = Self::new();
        seq.append_all(iter)?;
        Ok(seq)
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the sequence empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Make sure `additional` more values can be inserted without allocating.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let vacant = self.slots.len() - self.len - self.retired;
        self.slots
            .try_reserve(additional.saturating_sub(vacant))
            .map_err(|err| {
                log::warn!("reserving {additional} nodes failed: {err}");
                SequenceError::from(err)
            })
    }

    /// Push a value to the front. Returns the position of the new node.
    ///
    /// On allocation failure the sequence is left unchanged.
    pub fn push_front(&mut self, value: T) -> Result<Position> {
        self.link_after(Anchor::Head, value)
    }

    /// Push a value to the back. Returns the position of the new node.
    pub fn push_back(&mut self, value: T) -> Result<Position> {
        let anchor = self.tail.map_or(Anchor::Head, Anchor::Node);
        self.link_after(anchor, value)
    }

    /// Remove the first value, or do nothing if the sequence is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.head?;
        let next = self.node(first).next;
        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(self.release(first))
    }

    /// Remove every value, front to back.
    ///
    /// Storage is kept for reuse and all outstanding node positions go stale.
    pub fn clear(&mut self) {
        if self.len > 0 {
            log::trace!("releasing {} nodes", self.len);
        }
        while self.pop_front().is_some() {}
    }

    /// Exchange the contents of two sequences without touching any node.
    ///
    /// Node positions follow their nodes into the other sequence; each
    /// sequence keeps its own [`before_begin`](Self::before_begin).
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.slots, &mut other.slots);
        core::mem::swap(&mut self.free, &mut other.free);
        core::mem::swap(&mut self.retired, &mut other.retired);
        core::mem::swap(&mut self.head, &mut other.head);
        core::mem::swap(&mut self.tail, &mut other.tail);
        core::mem::swap(&mut self.len, &mut other.len);
        core::mem::swap(&mut self.storage, &mut other.storage);
    }

    /// Insert a value **after** `position`. Returns the position of the new node.
    ///
    /// `position` may be [`before_begin`](Self::before_begin) to insert at the front.
    /// Error if `position` is past-the-end, stale, or from another sequence.
    pub fn insert_after(&mut self, position: Position, value: T) -> Result<Position> {
        let anchor = self.require_anchor(position)?;
        self.link_after(anchor, value)
    }

    /// Remove the value **after** `position`, returning the position that now
    /// follows `position` (past-the-end if the removed node was the last).
    pub fn erase_after(&mut self, position: Position) -> Result<Position> {
        let (_, following) = self.unlink_after(position)?;
        Ok(following)
    }

    /// Remove the value **after** `position` and return it.
    pub fn remove_after(&mut self, position: Position) -> Result<T> {
        let (value, _) = self.unlink_after(position)?;
        Ok(value)
    }

    /// Position of the first node, or [`end`](Self::end) if empty.
    pub fn begin(&self) -> Position {
        self.position_or_end(self.head)
    }

    /// The past-the-end position.
    pub fn end(&self) -> Position {
        Position::default()
    }

    /// The position before the first node.
    pub fn before_begin(&self) -> Position {
        Position::before_first(self.id)
    }

    /// Position of the last node; [`before_begin`](Self::before_begin) if empty.
    ///
    /// `insert_after(seq.last_position(), v)` always appends.
    pub fn last_position(&self) -> Position {
        match self.tail {
            Some(index) => self.position_of(index),
            None => self.before_begin(),
        }
    }

    /// The position following `position`.
    pub fn next_position(&self, position: Position) -> Result<Position> {
        let anchor = self.require_anchor(position)?;
        Ok(self.position_or_end(self.next_of(anchor)))
    }

    /// Get a reference by position (if it names a live node).
    pub fn get(&self, position: Position) -> Option<&T> {
        match self.require_anchor(position) {
            Ok(Anchor::Node(index)) => Some(&self.node(index).value),
            _ => None,
        }
    }

    /// Get a mutable reference by position (if it names a live node).
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        match self.require_anchor(position) {
            Ok(Anchor::Node(index)) => Some(&mut self.node_mut(index).value),
            _ => None,
        }
    }

    /// The first value, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|index| &self.node(index).value)
    }

    /// Mutable reference to the first value, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let index = self.head?;
        Some(&mut self.node_mut(index).value)
    }

    /// The last value, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|index| &self.node(index).value)
    }

    /// Mutable reference to the last value, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let index = self.tail?;
        Some(&mut self.node_mut(index).value)
    }

    /// Does any value equal `value`? O(n).
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Reverse the order of the values in place by relinking.
    pub fn reverse(&mut self) {
        let mut reversed = None;
        let mut current = self.head;
        self.tail = self.head;
        while let Some(index) = current {
            let node = self.node_mut(index);
            current = node.next;
            node.next = reversed;
            reversed = Some(index);
        }
        self.head = reversed;
    }

    /// Keep only the values for which `keep` returns `true`, preserving order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut anchor = Anchor::Head;
        while let Some(index) = self.next_of(anchor) {
            if keep(&self.node(index).value) {
                anchor = Anchor::Node(index);
                continue;
            }
            let following = self.node(index).next;
            self.set_next(anchor, following);
            self.len -= 1;
            drop(self.release(index));
        }
        self.tail = match anchor {
            Anchor::Head => None,
            Anchor::Node(index) => Some(index),
        };
    }

    /// Iterate values front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.head, self.len)
    }

    /// Iterate mutable references front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (head, len) = (self.head, self.len);
        IterMut::new(&mut self.slots, head, len)
    }

    /// Iterate `(Position, &T)` front to back.
    pub fn iter_positions(&self) -> IterPositions<'_, T> {
        IterPositions::new(self, self.head, self.len)
    }

    /// A read-only cursor at the first node (past-the-end if empty).
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin())
    }

    /// A read-only cursor at the position before the first node.
    pub fn cursor_before_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.before_begin())
    }

    /// A read-only cursor at `position`.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, T>> {
        self.require_valid(position)?;
        Ok(Cursor::new(self, position))
    }

    /// A mutable cursor at the first node (past-the-end if empty).
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let position = self.begin();
        CursorMut::new(self, position)
    }

    /// A mutable cursor at the position before the first node.
    pub fn cursor_before_front_mut(&mut self) -> CursorMut<'_, T> {
        let position = self.before_begin();
        CursorMut::new(self, position)
    }

    /// A mutable cursor at `position`.
    pub fn cursor_at_mut(&mut self, position: Position) -> Result<CursorMut<'_, T>> {
        self.require_valid(position)?;
        Ok(CursorMut::new(self, position))
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        self.slots[index].node().expect("linked slot is occupied")
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        self.slots[index]
            .node_mut()
            .expect("linked slot is occupied")
    }

    pub(crate) fn position_of(&self, index: usize) -> Position {
        Position::node(self.storage, index, self.slots[index].generation)
    }

    fn position_or_end(&self, index: Option<usize>) -> Position {
        index.map_or_else(Position::default, |index| self.position_of(index))
    }

    fn require_anchor(&self, position: Position) -> Result<Anchor> {
        match position.0 {
            Link::End => Err(SequenceError::PastTheEnd),
            Link::BeforeFirst { id } if id == self.id => Ok(Anchor::Head),
            Link::Node {
                storage,
                index,
                generation,
            } if storage == self.storage
                && self
                    .slots
                    .get(index)
                    .is_some_and(|slot| slot.is_live(generation)) =>
            {
                Ok(Anchor::Node(index))
            }
            _ => Err(SequenceError::InvalidPosition),
        }
    }

    /// Like `require_anchor`, but past-the-end is acceptable.
    fn require_valid(&self, position: Position) -> Result<()> {
        match self.require_anchor(position) {
            Ok(_) | Err(SequenceError::PastTheEnd) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn next_of(&self, anchor: Anchor) -> Option<usize> {
        match anchor {
            Anchor::Head => self.head,
            Anchor::Node(index) => self.node(index).next,
        }
    }

    fn set_next(&mut self, anchor: Anchor, next: Option<usize>) {
        match anchor {
            Anchor::Head => self.head = next,
            Anchor::Node(index) => self.node_mut(index).next = next,
        }
    }

    fn link_after(&mut self, anchor: Anchor, value: T) -> Result<Position> {
        let next = self.next_of(anchor);
        let index = self.alloc(value, next)?;
        self.set_next(anchor, Some(index));
        if next.is_none() {
            self.tail = Some(index);
        }
        self.len += 1;
        Ok(self.position_of(index))
    }

    fn unlink_after(&mut self, position: Position) -> Result<(T, Position)> {
        let anchor = self.require_anchor(position)?;
        let victim = self.next_of(anchor).ok_or(SequenceError::NoSuccessor)?;
        let following = self.node(victim).next;
        self.set_next(anchor, following);
        if following.is_none() {
            self.tail = match anchor {
                Anchor::Head => None,
                Anchor::Node(index) => Some(index),
            };
        }
        self.len -= 1;
        let value = self.release(victim);
        Ok((value, self.position_or_end(following)))
    }

    /// Append everything `iter` yields at the tail.
    fn append_all<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let iter = iter.into_iter();
        self.try_reserve(iter.size_hint().0)?;
        let mut anchor = self.tail.map_or(Anchor::Head, Anchor::Node);
        for value in iter {
            let index = self.alloc(value, None)?;
            self.set_next(anchor, Some(index));
            self.tail = Some(index);
            self.len += 1;
            anchor = Anchor::Node(index);
        }
        Ok(())
    }

    /// Store a node, reusing a vacant slot when there is one.
    fn alloc(&mut self, value: T, next: Option<usize>) -> Result<usize> {
        let node = Node { value, next };
        if let Some(index) = self.free {
            let slot = &mut self.slots[index];
            let Entry::Vacant(next_free) = slot.entry else {
                unreachable!("free list points at an occupied slot");
            };
            self.free = next_free;
            slot.entry = Entry::Occupied(node);
            return Ok(index);
        }
        if let Err(err) = self.slots.try_reserve(1) {
            log::warn!("node allocation failed at length {}: {err}", self.len);
            return Err(err.into());
        }
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Occupied(node),
        });
        Ok(self.slots.len() - 1)
    }

    /// Vacate an already unlinked slot and put it on the free list.
    fn release(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let node = slot.vacate(self.free).expect("released slot is occupied");
        if slot.is_retired() {
            log::debug!("retiring slot {index} with exhausted generation");
            self.retired += 1;
        } else {
            self.free = Some(index);
        }
        node.value
    }
}

impl<T: Clone> LinkedSequence<T> {
    /// Deep copy. On allocation failure nothing leaks and `self` is untouched.
    pub fn try_clone(&self) -> Result<Self> {
        let mut copy = Self::new();
        copy.try_reserve(self.len)?;
        copy.append_all(self.iter().cloned())?;
        Ok(copy)
    }

    /// Replace the contents with a copy of `source`.
    ///
    /// The copy is built completely before it is swapped in, so on failure
    /// `self` keeps its original contents.
    pub fn assign_from(&mut self, source: &Self) -> Result<()> {
        let mut copy = source.try_clone()?;
        log::debug!("assigning {} values over {}", copy.len, self.len);
        self.swap(&mut copy);
        Ok(())
    }
}

/// Exchange two sequences; see [`LinkedSequence::swap`].
pub fn swap<T>(lhs: &mut LinkedSequence<T>, rhs: &mut LinkedSequence<T>) {
    lhs.swap(rhs);
}

impl<T> Drop for LinkedSequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    fn clone(&self) -> Self {
        must(self.try_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        must(self.assign_from(source));
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T: PartialOrd> PartialOrd for LinkedSequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedSequence<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for LinkedSequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        must(Self::try_from_iter(iter))
    }
}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        must(self.append_all(iter));
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSequence<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for LinkedSequence<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
